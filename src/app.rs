use crate::domain::{FormField, TaskDraft, TaskError, TaskStatus, TaskStore, UiMode};
use crate::timer::{TimerCommand, TimerLauncher, TimerSnapshot};
use crate::ui::timer_pane;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use ratatui::layout::Rect;
use uuid::Uuid;

/// Input form state for adding/editing tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub subject: String,
    pub assignment: String,
    pub status: TaskStatus,
    pub due_on: String,
    pub editing_field: FormField,
    pub editing_id: Option<Uuid>, // Some when editing an existing task
}

impl InputFormState {
    fn empty() -> Self {
        Self {
            subject: String::new(),
            assignment: String::new(),
            status: TaskStatus::NotStarted,
            due_on: String::new(),
            editing_field: FormField::Subject,
            editing_id: None,
        }
    }

    fn draft(&self) -> TaskDraft {
        TaskDraft {
            subject: self.subject.trim().to_string(),
            assignment: self.assignment.trim().to_string(),
            status: self.status,
            due_on: self.due_on.clone(),
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.editing_field {
            FormField::Subject => Some(&mut self.subject),
            FormField::Assignment => Some(&mut self.assignment),
            FormField::DueOn => Some(&mut self.due_on),
            FormField::Status => None,
        }
    }
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub selected_index: Option<usize>,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub error_message: Option<String>,
    error_return_mode: UiMode,

    // Pomodoro timer
    pub timer: TimerLauncher,
    pub show_timer: bool,
    pub timer_area: Option<Rect>, // Last rendered timer pane, for mouse hit-testing
    bells_rung: u64,
}

impl AppState {
    pub fn new(store: TaskStore, timer: TimerLauncher) -> Self {
        Self {
            store,
            selected_index: None,
            ui_mode: UiMode::Normal,
            input_form: None,
            error_message: None,
            error_return_mode: UiMode::Normal,
            timer,
            show_timer: false,
            timer_area: None,
            bells_rung: 0,
        }
    }

    /// Id of the selected row, if any
    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected_index.and_then(|idx| self.store.id_at(idx))
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => idx.saturating_sub(1),
            None => self.store.len() - 1,
        });
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) if idx + 1 < self.store.len() => idx + 1,
            Some(idx) => idx,
            None => 0,
        });
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.selected_index = None;
    }

    /// Show a blocking error message
    pub fn show_error(&mut self, message: String) {
        warn!("{}", message);
        if self.ui_mode != UiMode::Error {
            self.error_return_mode = self.ui_mode;
        }
        self.error_message = Some(message);
        self.ui_mode = UiMode::Error;
    }

    /// Close the error message and return to whatever was open before
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.ui_mode = self.error_return_mode;
        self.error_return_mode = UiMode::Normal;
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::empty());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Start editing the selected task (opens input form with its data)
    pub fn start_edit_task(&mut self) {
        let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) else {
            self.show_error(TaskError::NoSelection { action: "edit" }.to_string());
            return;
        };

        let draft = task.to_draft();
        self.input_form = Some(InputFormState {
            subject: draft.subject,
            assignment: draft.assignment,
            status: draft.status,
            due_on: draft.due_on,
            editing_field: FormField::Subject,
            editing_id: Some(task.id),
        });
        self.ui_mode = UiMode::EditingTask;
    }

    /// Delete the selected task
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.show_error(TaskError::NoSelection { action: "delete" }.to_string());
            return;
        };

        match self.store.delete(id) {
            Ok(task) => {
                info!("deleted task {} ({} / {})", task.id, task.subject, task.assignment);
                self.clear_selection();
                self.refresh();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Rebuild derived data (subject set) from the task list
    pub fn refresh(&mut self) {
        self.store.refresh();
        if let Some(idx) = self.selected_index {
            if idx >= self.store.len() {
                self.selected_index = None;
            }
        }
    }

    /// Move focus to the next form field
    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = form.editing_field.next();
        }
    }

    /// Move focus to the previous form field
    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = form.editing_field.prev();
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(text) = self.input_form.as_mut().and_then(InputFormState::active_text_mut) {
            text.push(c);
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(text) = self.input_form.as_mut().and_then(InputFormState::active_text_mut) {
            text.pop();
        }
    }

    /// Cycle the status picker
    pub fn input_form_cycle_status(&mut self, forward: bool) {
        if let Some(form) = &mut self.input_form {
            if form.editing_field == FormField::Status {
                form.status = if forward { form.status.next() } else { form.status.prev() };
            }
        }
    }

    /// Subject autocomplete hint for the current form input
    pub fn subject_suggestion(&self) -> Option<&str> {
        let form = self.input_form.as_ref()?;
        self.store.subjects().suggest(&form.subject)
    }

    /// Replace the subject with the autocomplete hint. Returns true if applied.
    pub fn accept_subject_suggestion(&mut self) -> bool {
        let Some(suggestion) = self.subject_suggestion().map(str::to_string) else {
            return false;
        };
        match &mut self.input_form {
            Some(form) if form.editing_field == FormField::Subject => {
                form.subject = suggestion;
                true
            }
            _ => false,
        }
    }

    /// Submit input form using the current local time
    pub fn submit_input_form(&mut self) {
        self.submit_input_form_at(Local::now().naive_local());
    }

    /// Submit input form and create or update the task.
    /// On a bad due date the form stays open behind an error message.
    pub fn submit_input_form_at(&mut self, now: NaiveDateTime) {
        let Some(form) = &self.input_form else {
            return;
        };
        let draft = form.draft();

        let result = match form.editing_id {
            Some(id) => self.store.edit(id, &draft, now).map(|()| id),
            None => self.store.add(&draft, now),
        };

        match result {
            Ok(id) => {
                info!("saved task {} ({} / {})", id, draft.subject, draft.assignment);
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.refresh();
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Launch the pomodoro timer, or just show it if it is already running
    pub fn open_timer(&mut self) -> Result<()> {
        if self.timer.launch()? {
            info!("pomodoro timer launched");
        }
        self.show_timer = true;
        Ok(())
    }

    /// Hide the timer pane; the countdown keeps running
    pub fn hide_timer(&mut self) {
        self.show_timer = false;
        self.timer_area = None;
    }

    /// Forward a command to the timer loop if it is visible
    pub fn timer_command(&mut self, command: TimerCommand) {
        if !self.show_timer {
            return;
        }
        if let Some(handle) = self.timer.handle() {
            handle.send(command);
        }
    }

    /// Latest timer state, if launched
    pub fn timer_snapshot(&self) -> Option<TimerSnapshot> {
        self.timer.handle().map(|handle| handle.snapshot())
    }

    /// True once for each terminal bell the timer loop has requested
    pub fn take_bell(&mut self) -> bool {
        let Some(snapshot) = self.timer_snapshot() else {
            return false;
        };
        if snapshot.bells > self.bells_rung {
            self.bells_rung = snapshot.bells;
            true
        } else {
            false
        }
    }

    /// Primary-button click at a terminal cell
    pub fn click(&mut self, column: u16, row: u16) {
        let Some(area) = self.timer_area else {
            return;
        };
        if let Some(command) = timer_pane::hit_test(area, column, row) {
            self.timer_command(command);
        }
    }

    /// Stop the timer loop before exit
    pub fn shutdown(&mut self) {
        self.timer.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::DaysLeft;
    use crate::domain::TimerMode;
    use crate::timer::{Alert, BellAlert, TimerDurations};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct SilentAlert;

    impl Alert for SilentAlert {
        fn play(&self) {}
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn create_test_app() -> AppState {
        let launcher = TimerLauncher::new(
            TimerDurations::default(),
            Arc::new(SilentAlert),
            Duration::from_millis(5),
        );
        let mut app = AppState::new(TaskStore::new(), launcher);
        add(&mut app, "Math", "HW1", "2026-10-25");
        add(&mut app, "Physics", "Lab", "2026-10-21");
        app
    }

    fn add(app: &mut AppState, subject: &str, assignment: &str, due_on: &str) {
        app.start_add_task();
        type_text(app, subject);
        app.input_form_next_field();
        type_text(app, assignment);
        app.input_form_next_field();
        app.input_form_next_field();
        type_text(app, due_on);
        app.submit_input_form_at(now());
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.selected_index, None);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert!(!app.show_timer);
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_index, Some(0));
        app.move_selection_down();
        assert_eq!(app.selected_index, Some(1));
        app.move_selection_down();
        assert_eq!(app.selected_index, Some(1));

        app.move_selection_up();
        assert_eq!(app.selected_index, Some(0));
        app.move_selection_up();
        assert_eq!(app.selected_index, Some(0));
    }

    #[test]
    fn test_add_task_through_form() {
        let app = create_test_app();
        let task = &app.store.tasks()[1];
        assert_eq!(task.subject, "Physics");
        assert_eq!(task.assignment, "Lab");
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.days_left, DaysLeft::Remaining(2));
        assert_eq!(app.store.subjects().as_slice(), ["Math", "Physics"]);
    }

    #[test]
    fn test_bad_date_keeps_form_open() {
        let mut app = create_test_app();
        add(&mut app, "Bio", "Essay", "soon");

        assert_eq!(app.store.len(), 2);
        assert_eq!(app.ui_mode, UiMode::Error);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Invalid due date 'soon'. Use YYYY-MM-DD.")
        );

        // Back to the form with the input preserved
        app.dismiss_error();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        let form = app.input_form.as_mut().unwrap();
        assert_eq!(form.subject, "Bio");
        form.due_on = "2026-11-01".to_string();

        app.submit_input_form_at(now());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_edit_without_selection() {
        let mut app = create_test_app();
        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::Error);
        assert_eq!(app.error_message.as_deref(), Some("Please select a task to edit."));
        assert!(app.input_form.is_none());

        app.dismiss_error();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_delete_without_selection() {
        let mut app = create_test_app();
        app.delete_selected();
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.error_message.as_deref(), Some("Please select a task to delete."));
    }

    #[test]
    fn test_edit_selected_task() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.move_selection_down();
        let id = app.selected_id().unwrap();

        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert_eq!(app.input_form.as_ref().unwrap().due_on, "2026-10-21");

        app.input_form_next_field();
        app.input_form_backspace();
        app.input_form_backspace();
        app.input_form_backspace();
        type_text(&mut app, "Quiz 2");
        app.input_form_next_field();
        app.input_form_cycle_status(true);
        app.input_form_cycle_status(true);
        app.input_form_cycle_status(true);
        app.submit_input_form_at(now());

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.store.position(id), Some(1));
        let task = app.store.get(id).unwrap();
        assert_eq!(task.assignment, "Quiz 2");
        assert_eq!(task.status, TaskStatus::QuizExam);
        assert_eq!(app.store.tasks()[0].assignment, "HW1");
    }

    #[test]
    fn test_delete_selected_task() {
        let mut app = create_test_app();
        app.move_selection_down();
        app.delete_selected();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].subject, "Physics");
        assert_eq!(app.selected_index, None);
        assert_eq!(app.store.subjects().as_slice(), ["Physics"]);
    }

    #[test]
    fn test_status_only_cycles_on_status_field() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_cycle_status(true);
        assert_eq!(app.input_form.as_ref().unwrap().status, TaskStatus::NotStarted);

        app.input_form_prev_field();
        app.input_form_prev_field();
        app.input_form_cycle_status(false);
        assert_eq!(app.input_form.as_ref().unwrap().status, TaskStatus::QuizExam);

        // Typing on the status field is ignored
        app.input_form_add_char('x');
        let form = app.input_form.as_ref().unwrap();
        assert_eq!(form.editing_field, FormField::Status);
        assert!(form.subject.is_empty() && form.assignment.is_empty() && form.due_on.is_empty());
    }

    #[test]
    fn test_subject_autocomplete() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, "ph");
        assert_eq!(app.subject_suggestion(), Some("Physics"));
        assert!(app.accept_subject_suggestion());
        assert_eq!(app.input_form.as_ref().unwrap().subject, "Physics");
        assert!(!app.accept_subject_suggestion());

        app.cancel_input_form();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.subject_suggestion().is_none());
    }

    #[test]
    fn test_timer_commands_need_open_timer() {
        let mut app = create_test_app();
        app.timer_command(TimerCommand::StartStop);
        assert!(app.timer_snapshot().is_none());

        app.open_timer().unwrap();
        app.open_timer().unwrap();
        assert!(app.show_timer);

        app.timer_command(TimerCommand::SwitchMode(TimerMode::LongBreak));
        let deadline = Instant::now() + Duration::from_secs(2);
        while app.timer_snapshot().map(|s| s.mode) != Some(TimerMode::LongBreak) {
            assert!(Instant::now() < deadline, "timer never switched mode");
            std::thread::sleep(Duration::from_millis(5));
        }

        app.hide_timer();
        assert!(app.timer_snapshot().is_some());
        app.shutdown();
        assert!(app.timer_snapshot().is_none());
    }

    #[test]
    fn test_terminal_bell_rings_once_per_finish() {
        let durations = TimerDurations {
            pomodoro: 1,
            short_break: 1,
            long_break: 1,
        };
        let launcher = TimerLauncher::new(durations, Arc::new(BellAlert), Duration::from_millis(5));
        let mut app = AppState::new(TaskStore::new(), launcher);
        assert!(!app.take_bell());

        app.open_timer().unwrap();
        app.timer_command(TimerCommand::StartStop);

        let deadline = Instant::now() + Duration::from_secs(3);
        while !app.take_bell() {
            assert!(Instant::now() < deadline, "bell never requested");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.take_bell());
        app.shutdown();
    }
}
