pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_table;
pub mod timer_pane;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_error_modal;
use ratatui::Frame;
use task_table::render_task_table;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size, app.show_timer);

    render_keybindings(f, layout.keybindings_area, app.show_timer);
    render_task_table(f, app, layout.table_area);

    match layout.timer_area {
        Some(timer_area) => render_timer_pane(f, app, timer_area),
        None => app.timer_area = None,
    }

    // Form stays visible behind an error raised on submit
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    render_error_modal(f, app, size);
}
