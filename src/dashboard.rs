//! Derived dashboard metrics for vaccination drives.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::Drive;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Drives dated on or before `now + window_days`.
///
/// Drives whose date has already passed are kept as well: the window has
/// an upper bound only. Input order is preserved.
pub fn compute_upcoming(drives: &[Drive], now: DateTime<Utc>, window_days: i64) -> Vec<Drive> {
    let horizon = now + Duration::days(window_days);
    drives
        .iter()
        .filter(|d| d.date_of_drive <= horizon)
        .cloned()
        .collect()
}

/// Percentage of `part` over `total`, 0 when `total` is 0.
pub fn pct(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

pub fn vaccinated_percentage(drive: &Drive) -> f64 {
    pct(drive.total_vaccinated_student, drive.total_student)
}

/// One dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriveSummary {
    pub unique_id: i64,
    pub name: String,
    pub date_of_drive: DateTime<Utc>,
    pub total_students: u32,
    pub vaccinated_students: u32,
    pub vaccinated_percentage: f64,
    pub total_doses: u32,
    pub available_doses: u32,
    /// Same value as `available_doses`; the dashboard shows both.
    pub remaining_doses: u32,
    pub mapping_count: usize,
}

impl DriveSummary {
    pub fn from_drive(drive: &Drive) -> Self {
        DriveSummary {
            unique_id: drive.unique_id,
            name: drive.name.clone(),
            date_of_drive: drive.date_of_drive,
            total_students: drive.total_student,
            vaccinated_students: drive.total_vaccinated_student,
            vaccinated_percentage: vaccinated_percentage(drive),
            total_doses: drive.total_doses,
            available_doses: drive.number_of_available_doses,
            remaining_doses: drive.number_of_available_doses,
            mapping_count: drive.vaccination_student_mapper.len(),
        }
    }
}

pub fn summarize_upcoming(
    drives: &[Drive],
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<DriveSummary> {
    compute_upcoming(drives, now, window_days)
        .iter()
        .map(DriveSummary::from_drive)
        .collect()
}
