//! Student intake validation
//!
//! Validation is a pure function of the three field values and the current
//! date. Every field gets at most one error; the form is valid when none do.

use super::phone::{is_formatted_phone, PHONE_EXAMPLE};
use crate::state::NewStudent;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum trimmed name length, in characters
pub const MIN_NAME_LEN: usize = 2;
/// Youngest accepted age, inclusive
pub const MIN_AGE: i32 = 5;
/// Oldest accepted age, inclusive
pub const MAX_AGE: i32 = 100;

/// Accepted birth date input formats (ISO first, then pt-BR)
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Fields of the student intake form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    Name,
    Phone,
    BirthDate,
}

impl IntakeField {
    pub const ALL: [IntakeField; 3] = [Self::Name, Self::Phone, Self::BirthDate];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Phone => "Phone",
            Self::BirthDate => "Birth Date",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Student's full name",
            Self::Phone => PHONE_EXAMPLE,
            Self::BirthDate => "YYYY-MM-DD",
        }
    }

    /// Message shown under the field when it holds a value and no error
    pub fn ok_message(&self) -> &'static str {
        match self {
            Self::Name => "Valid name",
            Self::Phone => "Valid phone",
            Self::BirthDate => "Valid date",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::BirthDate => "Birth date",
        };
        f.write_str(name)
    }
}

/// A field-scoped validation failure, rendered inline next to its field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(IntakeField),
    #[error("Name must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Format: (11) 99999-8888")]
    BadFormat,
    #[error("Use YYYY-MM-DD or DD/MM/YYYY")]
    InvalidDate,
    #[error("Age must be between {min} and {max} years")]
    AgeOutOfRange { min: i32, max: i32 },
}

/// How a birth date is turned into an age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRule {
    /// Current year minus birth year, ignoring month and day
    #[default]
    CalendarYear,
    /// Completed years, counting the birthday itself
    Exact,
}

impl AgeRule {
    pub fn age(&self, birth_date: NaiveDate, today: NaiveDate) -> i32 {
        match self {
            Self::CalendarYear => today.year() - birth_date.year(),
            Self::Exact => age_in_years(birth_date, today),
        }
    }
}

/// Completed years between `birth_date` and `today` (negative for future dates)
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Parse a typed birth date in any of the accepted formats
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Raw values of the student intake form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentIntakeForm {
    pub name: String,
    pub phone: String,
    pub birth_date: String,
}

impl StudentIntakeForm {
    pub fn get(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::Name => &self.name,
            IntakeField::Phone => &self.phone,
            IntakeField::BirthDate => &self.birth_date,
        }
    }

    /// Copy of this form with one field replaced
    pub fn with_field(&self, field: IntakeField, value: String) -> Self {
        let mut form = self.clone();
        match field {
            IntakeField::Name => form.name = value,
            IntakeField::Phone => form.phone = value,
            IntakeField::BirthDate => form.birth_date = value,
        }
        form
    }

    /// Build the submission payload. Returns `None` when the birth date
    /// does not parse, which validation reports first.
    pub fn to_new_student(&self) -> Option<NewStudent> {
        Some(NewStudent {
            name: self.name.trim().to_string(),
            phone: self.phone.clone(),
            birth_date: parse_birth_date(&self.birth_date)?,
        })
    }
}

/// Per-field validation outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<FieldError>,
    pub phone: Option<FieldError>,
    pub birth_date: Option<FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: IntakeField) -> Option<&FieldError> {
        match field {
            IntakeField::Name => self.name.as_ref(),
            IntakeField::Phone => self.phone.as_ref(),
            IntakeField::BirthDate => self.birth_date.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: IntakeField) -> &mut Option<FieldError> {
        match field {
            IntakeField::Name => &mut self.name,
            IntakeField::Phone => &mut self.phone,
            IntakeField::BirthDate => &mut self.birth_date,
        }
    }

    /// Copy of these errors with one field cleared
    pub fn without(&self, field: IntakeField) -> Self {
        let mut errors = self.clone();
        *errors.slot_mut(field) = None;
        errors
    }

    /// Error text for a field, empty when the field is fine
    pub fn message(&self, field: IntakeField) -> String {
        self.get(field).map(ToString::to_string).unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        IntakeField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn error_count(&self) -> usize {
        IntakeField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }
}

fn validate_name(name: &str) -> Option<FieldError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required(IntakeField::Name))
    } else if trimmed.chars().count() < MIN_NAME_LEN {
        Some(FieldError::TooShort { min: MIN_NAME_LEN })
    } else {
        None
    }
}

fn validate_phone(phone: &str) -> Option<FieldError> {
    if phone.trim().is_empty() {
        Some(FieldError::Required(IntakeField::Phone))
    } else if !is_formatted_phone(phone) {
        Some(FieldError::BadFormat)
    } else {
        None
    }
}

fn validate_birth_date(value: &str, today: NaiveDate, rule: AgeRule) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::Required(IntakeField::BirthDate));
    }
    let Some(birth_date) = parse_birth_date(value) else {
        return Some(FieldError::InvalidDate);
    };
    let age = rule.age(birth_date, today);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Some(FieldError::AgeOutOfRange {
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }
    None
}

/// Validate every field of the form
pub fn validate(form: &StudentIntakeForm, today: NaiveDate, rule: AgeRule) -> FieldErrors {
    FieldErrors {
        name: validate_name(&form.name),
        phone: validate_phone(&form.phone),
        birth_date: validate_birth_date(&form.birth_date, today, rule),
    }
}
