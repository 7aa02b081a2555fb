//! Form state management and form structs

use super::field::FormField;
use crate::intake::{reduce, IntakeAction, IntakeField, IntakeState, ValidationContext};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    StudentCreate(StudentCreateForm),
}

impl FormState {
    pub fn student_create(&self) -> Option<&StudentCreateForm> {
        match self {
            FormState::StudentCreate(f) => Some(f),
            FormState::None => None,
        }
    }

    pub fn student_create_mut(&mut self) -> Option<&mut StudentCreateForm> {
        match self {
            FormState::StudentCreate(f) => Some(f),
            FormState::None => None,
        }
    }
}

/// Buttons on the student create action panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentFormButton {
    Save,
    Cancel,
}

impl StudentFormButton {
    pub const ALL: [StudentFormButton; 2] = [Self::Save, Self::Cancel];
}

// Student Create Form
#[derive(Debug, Clone)]
pub struct StudentCreateForm {
    pub intake: IntakeState,
    pub fields: [FormField; 3],
    pub active_field_index: usize,
    /// Which button is selected when on the buttons row (0=Save, 1=Cancel)
    pub selected_button: usize,
}

impl StudentCreateForm {
    /// Index of the buttons row
    pub const BUTTONS_ROW: usize = 3;

    pub fn new() -> Self {
        Self {
            intake: IntakeState::new(),
            fields: IntakeField::ALL.map(FormField::for_intake),
            active_field_index: 0,
            selected_button: 0,
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == Self::BUTTONS_ROW
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % StudentFormButton::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = StudentFormButton::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn selected_button(&self) -> StudentFormButton {
        StudentFormButton::ALL[self.selected_button.min(StudentFormButton::ALL.len() - 1)]
    }

    /// The field being edited, `None` on the buttons row
    pub fn active_form_field(&self) -> Option<&FormField> {
        self.get_field(self.active_field_index)
    }

    /// Feed an action through the intake flow
    pub fn apply(&mut self, action: IntakeAction, ctx: ValidationContext) {
        self.intake = reduce(&self.intake, action, ctx);
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char, ctx: ValidationContext) {
        let Some(field) = self.active_form_field().copied() else {
            return;
        };
        if let Some(value) = field.push_char(self.intake.form.get(field.field), c) {
            self.apply(IntakeAction::SetField(field.field, value), ctx);
        }
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self, ctx: ValidationContext) {
        let Some(field) = self.active_form_field().copied() else {
            return;
        };
        if let Some(value) = field.pop_char(self.intake.form.get(field.field)) {
            self.apply(IntakeAction::SetField(field.field, value), ctx);
        }
    }
}

impl Default for StudentCreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for StudentCreateForm {
    fn field_count(&self) -> usize {
        4 // name, phone, birth date, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::BUTTONS_ROW);
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        // Index 3 is buttons row, no FormField for it
        self.fields.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::AgeRule;
    use chrono::NaiveDate;

    fn ctx() -> ValidationContext {
        ValidationContext::new(
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            AgeRule::CalendarYear,
        )
    }

    fn type_str(form: &mut StudentCreateForm, text: &str) {
        for c in text.chars() {
            form.input_char(c, ctx());
        }
    }

    mod form_state_enum {
        use super::*;

        #[test]
        fn test_default_is_none() {
            let state = FormState::default();
            assert!(matches!(state, FormState::None));
        }

        #[test]
        fn test_none_has_no_student_form() {
            let mut state = FormState::None;
            assert!(state.student_create().is_none());
            assert!(state.student_create_mut().is_none());
        }

        #[test]
        fn test_student_create_mut_gives_access() {
            let mut state = FormState::StudentCreate(StudentCreateForm::new());
            state.student_create_mut().unwrap().input_char('A', ctx());
            assert_eq!(state.student_create().unwrap().intake.form.name, "A");
        }
    }

    mod student_create_form {
        use super::*;

        #[test]
        fn test_new_has_correct_defaults() {
            let form = StudentCreateForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.selected_button(), StudentFormButton::Save);
            assert!(form.intake.is_editing());
            assert_eq!(form.fields[0].field, IntakeField::Name);
            assert_eq!(form.fields[1].field, IntakeField::Phone);
            assert_eq!(form.fields[2].field, IntakeField::BirthDate);
        }

        #[test]
        fn test_field_count_and_cycling() {
            let mut form = StudentCreateForm::new();
            assert_eq!(form.field_count(), 4);
            for _ in 0..4 {
                form.next_field();
            }
            assert_eq!(form.active_field_index, 0);
            form.prev_field();
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_buttons_wrap() {
            let mut form = StudentCreateForm::new();
            form.prev_button();
            assert_eq!(form.selected_button(), StudentFormButton::Cancel);
            form.next_button();
            assert_eq!(form.selected_button(), StudentFormButton::Save);
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = StudentCreateForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 3);
            assert!(form.active_form_field().is_none());
        }

        #[test]
        fn test_typing_phone_formats_live() {
            let mut form = StudentCreateForm::new();
            form.set_active_field(1);
            type_str(&mut form, "1199998888");
            assert_eq!(form.intake.form.phone, "(11) 9999-8888");
            type_str(&mut form, "7");
            assert_eq!(form.intake.form.phone, "(11) 99998-8887");
            type_str(&mut form, "6");
            assert_eq!(form.intake.form.phone, "(11) 99998-8887");
        }

        #[test]
        fn test_backspace_on_formatted_phone() {
            let mut form = StudentCreateForm::new();
            form.set_active_field(1);
            type_str(&mut form, "11999998888");
            form.backspace(ctx());
            assert_eq!(form.intake.form.phone, "(11) 9999-9888");
        }

        #[test]
        fn test_input_on_buttons_row_is_ignored() {
            let mut form = StudentCreateForm::new();
            form.set_active_field(StudentCreateForm::BUTTONS_ROW);
            type_str(&mut form, "abc");
            form.backspace(ctx());
            assert_eq!(form.intake.form, crate::intake::StudentIntakeForm::default());
        }

        #[test]
        fn test_typing_clears_field_error() {
            let mut form = StudentCreateForm::new();
            form.apply(IntakeAction::Submit, ctx());
            assert!(form.intake.errors.name.is_some());
            type_str(&mut form, "M");
            assert!(form.intake.errors.name.is_none());
            assert!(form.intake.errors.phone.is_some());
        }

        #[test]
        fn test_full_valid_entry_submits() {
            let mut form = StudentCreateForm::new();
            type_str(&mut form, "Jo");
            form.next_field();
            type_str(&mut form, "11999998888");
            form.next_field();
            type_str(&mut form, "2006-05-20");
            form.apply(IntakeAction::Submit, ctx());
            assert!(form.intake.is_submitting());
        }
    }
}
