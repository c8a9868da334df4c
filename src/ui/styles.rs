use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Row colour per status tag
pub fn status_style(tag: &str) -> Style {
    match tag {
        "not_started" => Style::default().fg(Color::Gray),
        "in_progress" => Style::default().fg(Color::Yellow),
        "done" => Style::default().fg(Color::Green),
        "quiz_exam" => Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        _ => default_style(),
    }
}

/// Table header style
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Timer button (teal, like a push button)
pub fn button_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 128, 128))
        .add_modifier(Modifier::BOLD)
}

/// Button for the active mode
pub fn active_button_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Countdown digits
pub fn clock_style(running: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if running {
        style.fg(Color::Magenta)
    } else {
        style.fg(Color::White)
    }
}

/// Countdown progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
