use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::wire;

/// A student as returned by `GET /api/Student/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub unique_id: i64,
    /// School-issued student id.
    #[serde(default, deserialize_with = "wire::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "wire::string_or_number")]
    pub class: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub is_vaccinated: bool,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub date_of_vaccination: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::non_empty")]
    pub vaccine_name: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_datetime")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_datetime")]
    pub modified_date: Option<DateTime<Utc>>,
}

/// Link between one student and one drive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentMapping {
    #[serde(default)]
    pub unique_id: Option<i64>,
    #[serde(default)]
    pub student_unique_id: Option<i64>,
    // The backend spells this field "Uniuq".
    #[serde(
        default,
        rename = "vaccinationDriveUniuqId",
        alias = "vaccinationDriveUniqueId"
    )]
    pub drive_unique_id: Option<i64>,
}

/// A vaccination drive as returned by `GET /api/VaccinationDrive/list` and
/// `GET /dashboard/list`. The student totals are only filled in by the
/// dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub unique_id: i64,
    pub name: String,
    #[serde(deserialize_with = "wire::datetime")]
    pub date_of_drive: DateTime<Utc>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub total_doses: u32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub number_of_available_doses: u32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub vaccination_student_mapper: Vec<EnrollmentMapping>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub total_student: u32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub total_vaccinated_student: u32,
}
