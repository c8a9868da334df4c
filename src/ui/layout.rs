use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub table_area: Rect,
    pub timer_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: task table, with the timer pane on the right when shown
pub fn create_layout(area: Rect, show_timer: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    if show_timer {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(65), // Task table
                Constraint::Percentage(35), // Timer pane
            ])
            .split(content_area);

        MainLayout {
            keybindings_area,
            table_area: horizontal[0],
            timer_area: Some(horizontal[1]),
        }
    } else {
        MainLayout {
            keybindings_area,
            table_area: content_area,
            timer_area: None,
        }
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
