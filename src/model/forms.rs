use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

use super::records::EnrollmentMapping;
use crate::error::{ConsoleError, Result};

/// Insert-vs-update discriminator sent with every create/edit submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Insert = 1,
    Update = 2,
}

impl Flag {
    /// `Update` when a record is being edited, `Insert` otherwise.
    pub fn for_edit(editing: Option<i64>) -> Self {
        if editing.is_some() {
            Flag::Update
        } else {
            Flag::Insert
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

fn required(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConsoleError::ValidationMissing(format!("{field} is required")));
    }
    Ok(())
}

fn required_opt<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ConsoleError::ValidationMissing(format!("{field} is required")))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<()> {
        required(&self.user_name, "username")?;
        required(&self.password, "password")
    }
}

/// Fields entered on the add/edit student form.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub name: String,
    pub class: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: String,
    pub class: String,
    pub id: String,
    pub flag: Flag,
    pub unique_id: i64,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

impl StudentForm {
    /// Validates the form and builds the submission body. `editing` is the
    /// `uniqueId` of the record being edited; new records are sent with 0.
    pub fn into_payload(self, editing: Option<i64>, now: DateTime<Utc>) -> Result<StudentPayload> {
        required(&self.name, "name")?;
        required(&self.class, "class")?;
        required(&self.id, "student id")?;

        Ok(StudentPayload {
            name: self.name,
            class: self.class,
            id: self.id,
            flag: Flag::for_edit(editing),
            unique_id: editing.unwrap_or(0),
            created_date: now,
            modified_date: now,
        })
    }
}

/// Fields entered on the add/edit drive form. Absent values are left
/// `None` so validation can name them.
#[derive(Debug, Clone, Default)]
pub struct DriveForm {
    pub name: String,
    pub date_of_drive: Option<NaiveDate>,
    pub total_doses: Option<u32>,
    pub number_of_available_doses: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivePayload {
    pub name: String,
    pub date_of_drive: NaiveDate,
    pub total_doses: u32,
    pub number_of_available_doses: u32,
    pub flag: Flag,
    pub unique_id: i64,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub vaccination_student_mapper: Vec<EnrollmentMapping>,
}

impl DriveForm {
    pub fn into_payload(self, editing: Option<i64>, now: DateTime<Utc>) -> Result<DrivePayload> {
        required(&self.name, "drive name")?;
        let date_of_drive = required_opt(self.date_of_drive, "drive date")?;
        let total_doses = required_opt(self.total_doses, "total doses")?;
        let number_of_available_doses =
            required_opt(self.number_of_available_doses, "available doses")?;

        Ok(DrivePayload {
            name: self.name,
            date_of_drive,
            total_doses,
            number_of_available_doses,
            flag: Flag::for_edit(editing),
            unique_id: editing.unwrap_or(0),
            created_date: now,
            modified_date: now,
            vaccination_student_mapper: Vec::new(),
        })
    }
}

/// Student/drive selection on the enrollment form.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentForm {
    pub student_unique_id: Option<i64>,
    pub drive_unique_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub flag: Flag,
    pub student_unique_id: i64,
    #[serde(rename = "vaccinationDriveUniuqId")]
    pub drive_unique_id: i64,
}

impl EnrollmentForm {
    pub fn into_payload(self, flag: Flag) -> Result<EnrollmentPayload> {
        match (self.student_unique_id, self.drive_unique_id) {
            (Some(student_unique_id), Some(drive_unique_id)) => Ok(EnrollmentPayload {
                flag,
                student_unique_id,
                drive_unique_id,
            }),
            _ => Err(ConsoleError::ValidationMissing(
                "Please select both a student and a vaccination drive.".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn student_form() -> StudentForm {
        StudentForm {
            name: "Asha".into(),
            class: "5".into(),
            id: "S-1".into(),
        }
    }

    #[test]
    fn test_new_student_payload_uses_insert_flag() {
        let payload = student_form().into_payload(None, now()).unwrap();
        let v = serde_json::to_value(&payload).unwrap();

        assert_eq!(v["flag"], json!(1));
        assert_eq!(v["uniqueId"], json!(0));
        assert_eq!(v["name"], json!("Asha"));
        assert_eq!(v["createdDate"], v["modifiedDate"]);
    }

    #[test]
    fn test_edited_student_payload_uses_update_flag() {
        let payload = student_form().into_payload(Some(42), now()).unwrap();
        let v = serde_json::to_value(&payload).unwrap();

        assert_eq!(v["flag"], json!(2));
        assert_eq!(v["uniqueId"], json!(42));
    }

    #[test]
    fn test_student_form_requires_fields() {
        let form = StudentForm {
            class: "  ".into(),
            ..student_form()
        };
        let err = form.into_payload(None, now()).unwrap_err();
        assert!(matches!(err, ConsoleError::ValidationMissing(m) if m == "class is required"));
    }

    #[test]
    fn test_drive_payload_shape() {
        let form = DriveForm {
            name: "MMR".into(),
            date_of_drive: NaiveDate::from_ymd_opt(2024, 6, 10),
            total_doses: Some(100),
            number_of_available_doses: Some(80),
        };
        let v = serde_json::to_value(form.into_payload(None, now()).unwrap()).unwrap();

        assert_eq!(v["dateOfDrive"], json!("2024-06-10"));
        assert_eq!(v["totalDoses"], json!(100));
        assert_eq!(v["vaccinationStudentMapper"], json!([]));
        assert_eq!(v["flag"], json!(1));
    }

    #[test]
    fn test_drive_form_missing_date() {
        let form = DriveForm {
            name: "MMR".into(),
            total_doses: Some(1),
            number_of_available_doses: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            form.into_payload(None, now()),
            Err(ConsoleError::ValidationMissing(_))
        ));
    }

    #[test]
    fn test_enrollment_requires_both_selections() {
        let form = EnrollmentForm {
            student_unique_id: Some(1),
            drive_unique_id: None,
        };
        let err = form.into_payload(Flag::Insert).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select both a student and a vaccination drive."
        );
    }

    #[test]
    fn test_enrollment_payload_keeps_wire_spelling() {
        let form = EnrollmentForm {
            student_unique_id: Some(7),
            drive_unique_id: Some(3),
        };
        let v = serde_json::to_value(form.into_payload(Flag::Insert).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({ "flag": 1, "studentUniqueId": 7, "vaccinationDriveUniuqId": 3 })
        );
    }

    #[test]
    fn test_credentials_camel_case() {
        let c = Credentials {
            user_name: "admin".into(),
            password: "pw".into(),
        };
        c.validate().unwrap();
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({ "userName": "admin", "password": "pw" })
        );
    }
}
