//! Report exports over the full filtered student list.
//!
//! The two formats render missing values differently on purpose: CSV
//! leaves the cell empty, PDF shows an em dash.

pub mod csv;
pub mod pdf;

use crate::model::Student;

pub const COLUMNS: [&str; 5] = ["Student Name", "Class", "Vaccinated", "Date", "Vaccine Name"];

pub const CSV_FILE_NAME: &str = "vaccination_report.csv";
pub const PDF_FILE_NAME: &str = "vaccination_report.pdf";

/// One report row, with `missing` standing in for an absent date or
/// vaccine name.
pub(crate) fn cells(student: &Student, missing: &str) -> [String; 5] {
    [
        student.name.clone(),
        student.class.clone(),
        if student.is_vaccinated { "Yes" } else { "No" }.to_string(),
        student
            .date_of_vaccination
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| missing.to_string()),
        student
            .vaccine_name
            .clone()
            .unwrap_or_else(|| missing.to_string()),
    ]
}
