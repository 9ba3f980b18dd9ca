//! Typed records exchanged with the vaccination backend.
//!
//! Inbound records (`Student`, `Drive`, `EnrollmentMapping`) are validated
//! while deserializing; outbound form submissions are built from the
//! `*Form` types, which check required fields before any request is made.

mod forms;
mod records;
mod wire;

pub use forms::{
    Credentials, DriveForm, DrivePayload, EnrollmentForm, EnrollmentPayload, Flag, StudentForm,
    StudentPayload,
};
pub use records::{Drive, EnrollmentMapping, Student};
pub use wire::{parse_wire_date, parse_wire_datetime};
