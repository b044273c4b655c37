//! Validation for resident-submitted forms.
//!
//! Each `*_at` constructor takes the submission time explicitly so tests stay
//! deterministic; the binary passes `Local::now()`.

use chrono::{DateTime, Local};

use crate::model::{CommunityReport, HouseholdRegistration};

/// Highest water level a resident can report.
pub const MAX_REPORTED_LEVEL: u32 = 200;

/// Household size limits on the registration form.
pub const MIN_FAMILY_MEMBERS: u32 = 1;
pub const MAX_FAMILY_MEMBERS: u32 = 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("water level {0} is outside 0..=200")]
    LevelOutOfRange(u32),

    #[error("latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("family members {0} is outside 1..=20")]
    FamilySizeOutOfRange(u32),
}

/// Raw fields of a water-level report as entered by a resident.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub level: u32,
    pub notes: String,
    pub contact: String,
}

/// Raw fields of a household registration.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub address: String,
    pub contact_number: String,
    pub barangay: String,
    pub family_members: u32,
}

fn iso_timestamp(now: DateTime<Local>) -> String {
    now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Validate a report and stamp it with a time-based id.
pub fn build_report_at(input: ReportInput, now: DateTime<Local>) -> Result<CommunityReport, FormError> {
    if input.level > MAX_REPORTED_LEVEL {
        return Err(FormError::LevelOutOfRange(input.level));
    }
    if !(-90.0..=90.0).contains(&input.lat) {
        return Err(FormError::InvalidLatitude(input.lat));
    }
    if !(-180.0..=180.0).contains(&input.lon) {
        return Err(FormError::InvalidLongitude(input.lon));
    }

    Ok(CommunityReport {
        timestamp: iso_timestamp(now),
        name: input.name.trim().to_string(),
        lat: input.lat,
        lon: input.lon,
        level: input.level,
        notes: input.notes,
        report_id: format!("R-{}", now.timestamp()),
        contact: input.contact.trim().to_string(),
    })
}

/// Validate a household registration.
pub fn build_registration_at(
    input: RegistrationInput,
    now: DateTime<Local>,
) -> Result<HouseholdRegistration, FormError> {
    if input.name.trim().is_empty() {
        return Err(FormError::Blank("name"));
    }
    if !(MIN_FAMILY_MEMBERS..=MAX_FAMILY_MEMBERS).contains(&input.family_members) {
        return Err(FormError::FamilySizeOutOfRange(input.family_members));
    }

    Ok(HouseholdRegistration {
        name: input.name.trim().to_string(),
        address: input.address.trim().to_string(),
        contact_number: input.contact_number.trim().to_string(),
        barangay: input.barangay.trim().to_string(),
        family_members: input.family_members,
        timestamp: iso_timestamp(now),
    })
}
