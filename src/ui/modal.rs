use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the error modal
pub fn render_error_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::Error {
        return;
    }
    let Some(message) = &app.error_message else {
        return;
    };

    let modal_area = create_modal_area(area, 7);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", message), error_style())),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" OK"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Error ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
