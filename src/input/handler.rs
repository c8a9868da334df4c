use crate::app::AppState;
use crate::domain::{FormField, TimerMode, UiMode};
use crate::timer::TimerCommand;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Error => handle_error_mode(app, key),
    }
}

/// Handle mouse input; only left clicks on the timer buttons do anything
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Result<bool> {
    if app.ui_mode == UiMode::Normal && mouse.kind == MouseEventKind::Down(MouseButton::Left) {
        app.click(mouse.column, mouse.row);
    }
    Ok(false)
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Edit selected task
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            app.start_edit_task();
            Ok(false)
        }

        // Delete selected task
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Rebuild table and subject list
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.refresh();
            Ok(false)
        }

        // Open pomodoro timer
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.open_timer()?;
            Ok(false)
        }

        // Timer buttons (only while the timer pane is shown)
        KeyCode::Char('1') => {
            app.timer_command(TimerCommand::SwitchMode(TimerMode::Pomodoro));
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.timer_command(TimerCommand::SwitchMode(TimerMode::ShortBreak));
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.timer_command(TimerCommand::SwitchMode(TimerMode::LongBreak));
            Ok(false)
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') => {
            app.timer_command(TimerCommand::StartStop);
            Ok(false)
        }

        // Escape hides the timer pane, then clears the selection
        KeyCode::Esc => {
            if app.show_timer {
                app.hide_timer();
            } else {
                app.clear_selection();
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding/editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let field = app.input_form.as_ref().map(|form| form.editing_field);

    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch fields
        KeyCode::Tab | KeyCode::Down => {
            app.input_form_next_field();
            Ok(false)
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.input_form_prev_field();
            Ok(false)
        }

        // Status picker
        KeyCode::Left if field == Some(FormField::Status) => {
            app.input_form_cycle_status(false);
            Ok(false)
        }
        KeyCode::Right if field == Some(FormField::Status) => {
            app.input_form_cycle_status(true);
            Ok(false)
        }

        // Accept subject autocomplete
        KeyCode::Right if field == Some(FormField::Subject) => {
            app.accept_subject_suggestion();
            Ok(false)
        }

        // Backspace
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Add character
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while the error message is shown
fn handle_error_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.dismiss_error();
            Ok(false)
        }
        _ => Ok(false),
    }
}
