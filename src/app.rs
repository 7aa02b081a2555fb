//! Application state and core logic

use crate::config::TuiConfig;
use crate::directory::{InMemoryDirectory, StudentDirectory, SubmissionOutcome, SubmissionTask};
use crate::intake::{IntakeAction, ValidationContext};
use crate::state::{
    AppState, Form, FormState, QuickAction, StudentCreateForm, StudentFormButton, StudentsFocus,
    View,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Oldest entries are dropped past this many views
const MAX_VIEW_HISTORY: usize = 32;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Student data source and registration sink
    directory: Arc<dyn StudentDirectory>,
    /// Loaded user configuration
    config: TuiConfig,
    /// Registration in flight, aborted when dropped
    submission: Option<SubmissionTask>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback message shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App backed by the in-memory directory
    pub async fn new(config: TuiConfig) -> Result<Self> {
        let directory = Arc::new(InMemoryDirectory::seeded(config.submit_delay()));
        Self::with_directory(config, directory).await
    }

    /// Create an App over any directory implementation
    pub async fn with_directory(
        config: TuiConfig,
        directory: Arc<dyn StudentDirectory>,
    ) -> Result<Self> {
        let state = AppState {
            current_view: config.start_view(),
            ..Default::default()
        };

        let mut app = Self {
            state,
            directory,
            config,
            submission: None,
            quit: false,
            status_message: None,
        };
        app.load_students().await;
        app.load_dashboard().await;
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Request the main loop to exit
    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Today's date in local time
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Whether a registration is in flight
    pub fn is_submitting(&self) -> bool {
        self.submission.is_some()
    }

    fn validation_context(&self) -> ValidationContext {
        ValidationContext::new(self.today(), self.config.age_rule())
    }

    async fn load_students(&mut self) {
        match self.directory.list_students().await {
            Ok(students) => self.state.students = students,
            Err(e) => {
                tracing::warn!("Failed to load students: {e}");
                self.push_error(format!("Failed to load students: {e}"));
            }
        }
    }

    async fn load_dashboard(&mut self) {
        match self.directory.dashboard().await {
            Ok(summary) => self.state.dashboard = summary,
            Err(e) => {
                tracing::warn!("Failed to load dashboard: {e}");
                self.push_error(format!("Failed to load dashboard: {e}"));
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        // View shortcuts, only where typing is not expected
        let typing = self.state.current_view.is_form_view()
            || (self.state.current_view == View::Students
                && self.state.students_focus == StudentsFocus::Search);
        if !typing && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('q') => {
                    self.quit();
                    return Ok(());
                }
                KeyCode::Char('1') => {
                    self.navigate(View::Dashboard);
                    return Ok(());
                }
                KeyCode::Char('2') => {
                    self.navigate(View::Students);
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.state.current_view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Students => self.handle_students_key(key),
            View::StudentCreate => self.handle_student_create_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        tracing::info!("Navigating to {view:?}");
        if self.state.view_history.len() >= MAX_VIEW_HISTORY {
            self.state.view_history.remove(0);
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.reset_selection();
            return;
        }
        // Nowhere to return to from a form: fall back to the listing
        if self.state.current_view.is_form_view() {
            self.state.current_view = View::Students;
            self.state.reset_selection();
        }
    }

    /// Open an empty student registration form
    pub fn open_student_form(&mut self) {
        self.state.form = FormState::StudentCreate(StudentCreateForm::new());
        self.navigate(View::StudentCreate);
    }

    /// Leave the registration form, abandoning any pending registration
    fn close_student_form(&mut self) {
        if let Some(task) = self.submission.take() {
            task.cancel();
            self.status_message = Some("Registration cancelled".to_string());
        }
        self.state.clear_form();
        self.go_back();
    }

    /// Handle keys in Dashboard view
    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(QuickAction::ALL.len())
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(action) = QuickAction::ALL.get(self.state.selected_index) {
                    self.run_quick_action(*action);
                }
            }
            KeyCode::Char('n') => self.run_quick_action(QuickAction::NewStudent),
            KeyCode::Char('s') => self.run_quick_action(QuickAction::ViewStudents),
            _ => {}
        }
    }

    fn run_quick_action(&mut self, action: QuickAction) {
        match action.target() {
            View::StudentCreate => self.open_student_form(),
            view => self.navigate(view),
        }
    }

    /// Handle keys in Students view
    fn handle_students_key(&mut self, key: KeyEvent) {
        match self.state.students_focus {
            StudentsFocus::Search => match key.code {
                KeyCode::Esc if !self.state.search_term.is_empty() => self.state.clear_search(),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                    self.state.students_focus = StudentsFocus::List
                }
                KeyCode::Backspace => self.state.search_pop(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.state.search_push(c)
                }
                _ => {}
            },
            StudentsFocus::List => match key.code {
                KeyCode::Down | KeyCode::Char('j') => {
                    let count = self.state.filtered_students().len();
                    self.state.move_selection_down(count);
                }
                KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
                KeyCode::Enter => {
                    self.status_message = self.state.selected_student().map(|s| {
                        format!(
                            "{} | {} | born {}",
                            s.name,
                            s.phone,
                            s.birth_date.format("%d/%m/%Y")
                        )
                    });
                }
                KeyCode::Char('/') | KeyCode::Tab => self.state.students_focus.toggle(),
                KeyCode::Char('n') => self.open_student_form(),
                KeyCode::Esc => self.go_back(),
                _ => {}
            },
        }
    }

    /// Handle keys in Student Create view
    fn handle_student_create_key(&mut self, key: KeyEvent) {
        let ctx = self.validation_context();
        let Some(form) = self.state.form.student_create_mut() else {
            // View without a form: recover by leaving it
            self.go_back();
            return;
        };
        let on_action_panel = form.is_buttons_row_active();

        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            // Up/Down for action panel navigation
            KeyCode::Up if on_action_panel => form.prev_button(),
            KeyCode::Down if on_action_panel => form.next_button(),
            KeyCode::Up => form.prev_field(),
            KeyCode::Down => form.next_field(),
            // Enter on action panel triggers selected button
            KeyCode::Enter if on_action_panel => match form.selected_button() {
                StudentFormButton::Save => self.submit_student_form(),
                StudentFormButton::Cancel => self.close_student_form(),
            },
            // Keyboard shortcut (works from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_student_form()
            }
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SAVE_MODIFIER) => {
                self.submit_student_form()
            }
            KeyCode::Esc => self.close_student_form(),
            // Form field input (only when not on action panel)
            KeyCode::Enter => form.next_field(),
            KeyCode::Char(c)
                if !on_action_panel && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                form.input_char(c, ctx)
            }
            KeyCode::Backspace if !on_action_panel => form.backspace(ctx),
            _ => {}
        }
    }

    /// Validate the form and, when it passes, start the registration
    fn submit_student_form(&mut self) {
        let ctx = self.validation_context();
        let Some(form) = self.state.form.student_create_mut() else {
            return;
        };
        if !form.intake.is_editing() {
            return;
        }

        form.apply(IntakeAction::Submit, ctx);
        if !form.intake.is_submitting() {
            tracing::debug!(
                errors = form.intake.errors.error_count(),
                "Registration rejected by validation"
            );
            return;
        }

        let Some(student) = form.intake.form.to_new_student() else {
            form.apply(
                IntakeAction::SubmitFailed("Birth date could not be read".to_string()),
                ctx,
            );
            return;
        };

        tracing::info!("Submitting registration for {}", student.name);
        self.submission = Some(SubmissionTask::spawn(self.directory.clone(), student));
    }

    /// Check for a finished registration. Called once per UI loop tick.
    pub async fn poll_submission(&mut self) {
        let Some(outcome) = self.submission.as_mut().and_then(|t| t.try_outcome()) else {
            return;
        };
        self.submission = None;
        self.finish_submission(outcome).await;
    }

    async fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        let ctx = self.validation_context();
        match outcome {
            Ok(student) => {
                if let Some(form) = self.state.form.student_create_mut() {
                    form.apply(IntakeAction::SubmitSucceeded, ctx);
                    if !form.intake.is_succeeded() {
                        tracing::warn!("Registration completed outside of a submitting form");
                    }
                }
                tracing::info!(id = student.id, "Registration completed");
                self.load_students().await;
                self.status_message = Some(format!("{} registered!", student.name));
                self.state.clear_form();
                self.navigate(View::Students);
            }
            Err(e) => {
                tracing::warn!("Registration failed: {e}");
                if let Some(form) = self.state.form.student_create_mut() {
                    form.apply(IntakeAction::SubmitFailed(e.to_string()), ctx);
                }
                self.push_error(format!("Failed to register student: {e}"));
            }
        }
    }
}
