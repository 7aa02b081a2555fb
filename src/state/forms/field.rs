//! Form field descriptors

use crate::intake::{IntakeField, MAX_PHONE_LEN};

/// Longest accepted name, in characters
const MAX_NAME_LEN: usize = 120;
/// `DD/MM/YYYY` and `YYYY-MM-DD` are both ten characters
const MAX_DATE_LEN: usize = 10;

/// Rendering and editing configuration for a single intake field.
/// Values live in the intake state; a field only knows how to edit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub field: IntakeField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub max_len: usize,
}

impl FormField {
    pub fn for_intake(field: IntakeField) -> Self {
        let max_len = match field {
            IntakeField::Name => MAX_NAME_LEN,
            IntakeField::Phone => MAX_PHONE_LEN,
            IntakeField::BirthDate => MAX_DATE_LEN,
        };
        Self {
            field,
            label: field.label(),
            placeholder: field.placeholder(),
            max_len,
        }
    }

    /// Value after typing `c`, or `None` when the field is full
    /// or the character does not belong in it
    pub fn push_char(&self, value: &str, c: char) -> Option<String> {
        if c.is_control() || value.chars().count() >= self.max_len {
            return None;
        }
        let accepted = match self.field {
            IntakeField::Name => true,
            IntakeField::Phone => c.is_ascii_digit(),
            IntakeField::BirthDate => c.is_ascii_digit() || matches!(c, '-' | '/'),
        };
        if !accepted {
            return None;
        }
        let mut next = value.to_string();
        next.push(c);
        Some(next)
    }

    /// Value after a backspace, or `None` when there is nothing to remove
    pub fn pop_char(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            return None;
        }
        let mut next = value.to_string();
        next.pop();
        Some(next)
    }

    /// Text shown inside the field box
    pub fn display_value(&self, value: &str, is_active: bool) -> String {
        if value.is_empty() && !is_active {
            self.placeholder.to_string()
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_come_from_intake_field() {
        let field = FormField::for_intake(IntakeField::Phone);
        assert_eq!(field.label, "Phone");
        assert_eq!(field.placeholder, "(11) 99999-8888");
        assert_eq!(field.max_len, 15);
    }

    #[test]
    fn test_push_char_appends() {
        let field = FormField::for_intake(IntakeField::Name);
        assert_eq!(field.push_char("An", 'a'), Some("Ana".to_string()));
        assert_eq!(field.push_char("Ana", ' '), Some("Ana ".to_string()));
    }

    #[test]
    fn test_push_char_rejects_letters_in_phone() {
        let field = FormField::for_intake(IntakeField::Phone);
        assert_eq!(field.push_char("11", 'x'), None);
        assert_eq!(field.push_char("11", '9'), Some("119".to_string()));
    }

    #[test]
    fn test_push_char_respects_max_len() {
        let field = FormField::for_intake(IntakeField::Phone);
        assert_eq!(field.push_char("(11) 99999-8888", '7'), None);
        let date = FormField::for_intake(IntakeField::BirthDate);
        assert_eq!(date.push_char("1995-03-15", '1'), None);
    }

    #[test]
    fn test_push_char_rejects_control_characters() {
        let field = FormField::for_intake(IntakeField::Name);
        assert_eq!(field.push_char("Ana", '\n'), None);
    }

    #[test]
    fn test_pop_char() {
        let field = FormField::for_intake(IntakeField::Name);
        assert_eq!(field.pop_char("Zé"), Some("Z".to_string()));
        assert_eq!(field.pop_char(""), None);
    }

    #[test]
    fn test_display_value_shows_placeholder_when_inactive_and_empty() {
        let field = FormField::for_intake(IntakeField::BirthDate);
        assert_eq!(field.display_value("", false), "YYYY-MM-DD");
        assert_eq!(field.display_value("", true), "");
        assert_eq!(field.display_value("1995", false), "1995");
    }
}
