//! Application state definitions

use super::forms::FormState;
use crate::intake::age_in_years;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Students,
    StudentCreate,
}

impl View {
    /// Form views are skipped when walking back through history
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::StudentCreate)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Instructor Dashboard",
            View::Students => "Student Management",
            View::StudentCreate => "Student Registration",
        }
    }
}

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// A registered student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub status: StudentStatus,
}

impl Student {
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_in_years(self.birth_date, today)
    }

    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

/// Payload for registering a new student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

/// Accent used for a dashboard stat card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatAccent {
    Blue,
    Green,
    Orange,
}

/// One summary card on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub title: String,
    pub value: String,
    pub description: String,
    pub accent: StatAccent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Success,
    Warning,
    Info,
}

/// Recent account activity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub student: String,
    pub action: String,
    pub time: String,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub stats: Vec<DashboardStat>,
    pub activities: Vec<Activity>,
}

/// Focus state for the students view (search box vs list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentsFocus {
    #[default]
    List,
    Search,
}

impl StudentsFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::List => Self::Search,
            Self::Search => Self::List,
        };
    }
}

/// Dashboard quick actions, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    NewStudent,
    ViewStudents,
}

impl QuickAction {
    pub const ALL: [QuickAction; 2] = [Self::NewStudent, Self::ViewStudents];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewStudent => "Register New Student",
            Self::ViewStudents => "View All Students",
        }
    }

    pub fn target(&self) -> View {
        match self {
            Self::NewStudent => View::StudentCreate,
            Self::ViewStudents => View::Students,
        }
    }
}

/// Return the students whose name contains `term`, ignoring case.
/// Order is preserved and an empty term matches everyone.
pub fn filter_students<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    let needle = term.to_lowercase();
    students
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Data
    pub students: Vec<Student>,
    pub dashboard: DashboardSummary,

    // Selection
    pub selected_index: usize,

    // Students view
    pub search_term: String,
    pub students_focus: StudentsFocus,

    // Form state
    pub form: FormState,

    // UI state
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Students matching the current search term
    pub fn filtered_students(&self) -> Vec<&Student> {
        filter_students(&self.students, &self.search_term)
    }

    pub fn active_student_count(&self) -> usize {
        self.students.iter().filter(|s| s.is_active()).count()
    }

    /// Currently highlighted student in the filtered list
    pub fn selected_student(&self) -> Option<&Student> {
        self.filtered_students().get(self.selected_index).copied()
    }

    /// Append a character to the search term
    pub fn search_push(&mut self, c: char) {
        self.search_term.push(c);
        self.reset_selection();
    }

    /// Remove the last character of the search term
    pub fn search_pop(&mut self) {
        self.search_term.pop();
        self.reset_selection();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.reset_selection();
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Drop any in-progress form
    pub fn clear_form(&mut self) {
        self.form = FormState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::mock_students;
    use pretty_assertions::assert_eq;

    fn names<'a>(students: &[&'a Student]) -> Vec<&'a str> {
        students.iter().map(|s| s.name.as_str()).collect()
    }

    mod search {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_filter_is_case_insensitive_and_keeps_order() {
            let students = mock_students();
            let found = filter_students(&students, "silva");
            assert_eq!(
                names(&found),
                vec!["Maria Silva Santos", "Pedro Lima da Silva"]
            );
            let upper = filter_students(&students, "SILVA");
            assert_eq!(names(&upper), names(&found));
        }

        #[test]
        fn test_empty_term_matches_everyone() {
            let students = mock_students();
            assert_eq!(filter_students(&students, "").len(), students.len());
        }

        #[test]
        fn test_no_match_returns_empty() {
            let students = mock_students();
            assert!(filter_students(&students, "zzz").is_empty());
        }

        #[test]
        fn test_matches_accented_names() {
            let students = mock_students();
            let found = filter_students(&students, "JOÃO");
            assert_eq!(names(&found), vec!["João Pedro Oliveira"]);
        }

        #[test]
        fn test_search_edits_reset_selection() {
            let mut state = AppState {
                students: mock_students(),
                selected_index: 3,
                ..Default::default()
            };
            state.search_push('a');
            assert_eq!(state.selected_index, 0);
            state.selected_index = 2;
            state.search_pop();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.search_term, "");
        }

        #[test]
        fn test_selected_student_follows_filter() {
            let mut state = AppState {
                students: mock_students(),
                ..Default::default()
            };
            for c in "lima".chars() {
                state.search_push(c);
            }
            let selected = state.selected_student().unwrap();
            assert_eq!(selected.name, "Pedro Lima da Silva");
        }
    }

    mod counts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_active_student_count() {
            let state = AppState {
                students: mock_students(),
                ..Default::default()
            };
            assert_eq!(state.active_student_count(), 4);
        }

        #[test]
        fn test_student_age_is_day_adjusted() {
            let students = mock_students();
            let maria = &students[0];
            let before_birthday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
            let on_birthday = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
            assert_eq!(maria.age_on(before_birthday), 30);
            assert_eq!(maria.age_on(on_birthday), 31);
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_selection_down_stops_at_end() {
            let mut state = AppState::default();
            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_move_selection_down_with_empty_list() {
            let mut state = AppState::default();
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_move_selection_up_stops_at_zero() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_are_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod views {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_only_create_is_form_view() {
            assert!(View::StudentCreate.is_form_view());
            assert!(!View::Students.is_form_view());
            assert!(!View::Dashboard.is_form_view());
        }

        #[test]
        fn test_quick_action_targets() {
            assert_eq!(QuickAction::NewStudent.target(), View::StudentCreate);
            assert_eq!(QuickAction::ViewStudents.target(), View::Students);
        }

        #[test]
        fn test_focus_toggle() {
            let mut focus = StudentsFocus::default();
            focus.toggle();
            assert_eq!(focus, StudentsFocus::Search);
            focus.toggle();
            assert_eq!(focus, StudentsFocus::List);
        }
    }
}
