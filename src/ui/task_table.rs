use crate::app::AppState;
use crate::domain::TaskRow;
use crate::ui::styles::{border_style, header_style, selected_style, status_style, title_style};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

const HEADERS: [&str; 5] = ["Subject", "Assignment", "Status", "Due on", "Days Left"];

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(18),
    Constraint::Percentage(32),
    Constraint::Percentage(14),
    Constraint::Percentage(13),
    Constraint::Percentage(23),
];

/// Build a table row coloured by its status tag
fn create_task_row(row: &TaskRow) -> Row<'static> {
    let cells: Vec<Cell> = row.cells.iter().cloned().map(Cell::from).collect();
    Row::new(cells).style(status_style(&row.tag))
}

fn table_title(count: usize, date: &str) -> String {
    format!(" Tasks ({}) · {} ", count, date)
}

/// Render the task table
pub fn render_task_table(f: &mut Frame, app: &AppState, area: Rect) {
    let task_rows = app.store.rows();
    let selected = app
        .selected_id()
        .and_then(|id| task_rows.iter().position(|row| row.id == id));
    let rows: Vec<Row> = task_rows.iter().map(create_task_row).collect();

    let date = Local::now().format("%a %b %d").to_string();
    let title = table_title(app.store.len(), &date);

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(Row::new(HEADERS).style(header_style()).bottom_margin(1))
        .highlight_style(selected_style())
        .highlight_symbol("▶ ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        );

    let mut state = TableState::default();
    state.select(selected);
    f.render_stateful_widget(table, area, &mut state);
}
