use crate::app::AppState;
use crate::domain::TimerMode;
use crate::timer::{TimerCommand, TimerSnapshot};
use crate::ui::styles::{
    active_button_style, border_style, button_style, clock_style, gauge_style, hint_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const BUTTON_HEIGHT: u16 = 3;
const START_BUTTON_WIDTH: u16 = 14;

/// Pane interior (inside the border)
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Fixed button rectangles for a timer pane drawn at `area`: the three
/// mode buttons across the top, Start/Stop centred at the bottom.
pub fn button_areas(area: Rect) -> [(TimerCommand, Rect); 4] {
    let inner = inner(area);
    let column = inner.width / 3;
    let top = inner.y.saturating_add(1);

    let mode_button = |i: u16, mode: TimerMode| {
        (
            TimerCommand::SwitchMode(mode),
            Rect::new(inner.x + i * column, top, column.saturating_sub(1), BUTTON_HEIGHT),
        )
    };

    let start_width = START_BUTTON_WIDTH.min(inner.width);
    let start_y = inner
        .bottom()
        .saturating_sub(BUTTON_HEIGHT + 1)
        .max(top + BUTTON_HEIGHT);
    let start = Rect::new(
        inner.x + (inner.width - start_width) / 2,
        start_y,
        start_width,
        BUTTON_HEIGHT,
    );

    [
        mode_button(0, TimerMode::Pomodoro),
        mode_button(1, TimerMode::ShortBreak),
        mode_button(2, TimerMode::LongBreak),
        (TimerCommand::StartStop, start),
    ]
}

/// Which button, if any, covers a terminal cell
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<TimerCommand> {
    let inner = inner(area);
    button_areas(area)
        .into_iter()
        .find(|(_, rect)| {
            let visible = rect.intersection(inner);
            visible.area() > 0
                && column >= visible.x
                && column < visible.right()
                && row >= visible.y
                && row < visible.bottom()
        })
        .map(|(command, _)| command)
}

fn button_label(command: TimerCommand) -> &'static str {
    match command {
        TimerCommand::SwitchMode(mode) => mode.label(),
        TimerCommand::StartStop | TimerCommand::Shutdown => "Start/Stop",
    }
}

fn render_button(f: &mut Frame, command: TimerCommand, rect: Rect, active: bool) {
    let style = if active { active_button_style() } else { button_style() };
    // Label on the middle row of the button
    let lines = vec![
        Line::raw(""),
        Line::raw(button_label(command)),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style);
    f.render_widget(paragraph, rect);
}

fn pane_title(snapshot: Option<&TimerSnapshot>) -> String {
    let status = match snapshot {
        Some(s) if s.running => "running",
        Some(_) => "stopped",
        None => "not started",
    };
    format!(" Pomodoro Timer · {} ", status)
}

/// Render the pomodoro timer pane and remember where it was drawn
pub fn render_timer_pane(f: &mut Frame, app: &mut AppState, area: Rect) {
    app.timer_area = Some(area);
    let snapshot = app.timer_snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(pane_title(snapshot.as_ref()), title_style()));
    f.render_widget(block, area);

    let inner = inner(area);
    if inner.area() == 0 {
        return;
    }

    for (command, rect) in button_areas(area) {
        let visible = rect.intersection(inner);
        if visible.area() == 0 {
            continue;
        }
        let active = matches!(
            (&snapshot, command),
            (Some(s), TimerCommand::SwitchMode(mode)) if s.mode == mode
        );
        render_button(f, command, visible, active);
    }

    if let Some(snapshot) = snapshot {
        render_clock(f, &snapshot, inner);
    }
}

/// Countdown and progress gauge between the two button rows
fn render_clock(f: &mut Frame, snapshot: &TimerSnapshot, inner: Rect) {
    let middle = inner.y + inner.height / 2;

    let clock_area = Rect::new(inner.x, middle.saturating_sub(1), inner.width, 1);
    let clock = Paragraph::new(Line::from(Span::styled(
        snapshot.display.clone(),
        clock_style(snapshot.running),
    )))
    .alignment(Alignment::Center);
    f.render_widget(clock, clock_area.intersection(inner));

    let hint_area = Rect::new(inner.x, middle, inner.width, 1);
    let hint = Paragraph::new(Line::from(Span::styled(
        snapshot.mode.label(),
        hint_style(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hint, hint_area.intersection(inner));

    let gauge_area = Rect::new(inner.x + 1, middle + 1, inner.width.saturating_sub(2), 1);
    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(snapshot.progress())
        .label("");
    f.render_widget(gauge, gauge_area.intersection(inner));
}
