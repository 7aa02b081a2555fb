//! Student intake: phone formatting, field validation and the intake flow

mod flow;
mod phone;
mod validator;

pub use flow::{reduce, IntakeAction, IntakeState, ValidationContext};
pub use phone::MAX_PHONE_LEN;
pub use validator::{age_in_years, AgeRule, IntakeField};

#[cfg(test)]
pub use validator::{FieldError, StudentIntakeForm};
