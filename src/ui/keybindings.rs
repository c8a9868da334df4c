use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, show_timer: bool) {
    let mut spans = vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("d delete   "),
        Span::raw("r refresh   "),
        Span::raw("t timer   "),
    ];
    if show_timer {
        spans.push(Span::raw("1/2/3 mode   "));
        spans.push(Span::raw("s start   "));
        spans.push(Span::raw("Esc hide timer   "));
    }
    spans.push(Span::raw("q quit"));

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
