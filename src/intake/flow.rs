//! Intake flow state machine
//!
//! The flow state is an immutable value; `reduce` produces the next state
//! from the current one and an action. The caller owns the asynchronous
//! submission and feeds its outcome back as `SubmitSucceeded`/`SubmitFailed`.

use super::phone::format_phone;
use super::validator::{validate, AgeRule, FieldErrors, IntakeField, StudentIntakeForm};
use chrono::NaiveDate;

/// Phase of the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakePhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
}

/// Inputs to the intake flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeAction {
    SetField(IntakeField, String),
    Submit,
    SubmitSucceeded,
    SubmitFailed(String),
}

/// What validation needs besides the form itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
    pub age_rule: AgeRule,
}

impl ValidationContext {
    pub fn new(today: NaiveDate, age_rule: AgeRule) -> Self {
        Self { today, age_rule }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeState {
    pub form: StudentIntakeForm,
    pub errors: FieldErrors,
    pub phase: IntakePhase,
    /// Failure reported by the submission sink on the last attempt
    pub submit_error: Option<String>,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.phase == IntakePhase::Editing
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == IntakePhase::Submitting
    }

    pub fn is_succeeded(&self) -> bool {
        self.phase == IntakePhase::Succeeded
    }

    fn with_phase(&self, phase: IntakePhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }
}

/// Normalise a value the way its field displays it
fn normalize(field: IntakeField, value: String) -> String {
    match field {
        IntakeField::Phone => format_phone(&value),
        IntakeField::Name | IntakeField::BirthDate => value,
    }
}

/// Compute the next intake state.
///
/// Field updates and submits are only honoured while editing; the
/// completion actions are only honoured while submitting. Anything else
/// leaves the state unchanged.
pub fn reduce(state: &IntakeState, action: IntakeAction, ctx: ValidationContext) -> IntakeState {
    match (state.phase, action) {
        (IntakePhase::Editing, IntakeAction::SetField(field, value)) => IntakeState {
            form: state.form.with_field(field, normalize(field, value)),
            errors: state.errors.without(field),
            ..state.clone()
        },
        (IntakePhase::Editing, IntakeAction::Submit) => {
            let errors = validate(&state.form, ctx.today, ctx.age_rule);
            let phase = if errors.is_valid() {
                IntakePhase::Submitting
            } else {
                IntakePhase::Editing
            };
            IntakeState {
                form: state.form.clone(),
                errors,
                phase,
                submit_error: None,
            }
        }
        (IntakePhase::Submitting, IntakeAction::SubmitSucceeded) => {
            state.with_phase(IntakePhase::Succeeded)
        }
        (IntakePhase::Submitting, IntakeAction::SubmitFailed(message)) => IntakeState {
            submit_error: Some(message),
            ..state.with_phase(IntakePhase::Editing)
        },
        _ => state.clone(),
    }
}
