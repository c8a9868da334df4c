use crate::app::{AppState, InputFormState};
use crate::domain::{FormField, TaskStatus};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FORM_HEIGHT: u16 = 19;

fn field_label(form: &InputFormState, field: FormField, label: &'static str) -> Line<'static> {
    if form.editing_field == field {
        Line::raw(format!("{}: (editing)", label))
    } else {
        Line::raw(format!("{}:", label))
    }
}

fn cursor(form: &InputFormState, field: FormField) -> Span<'static> {
    if form.editing_field == field {
        Span::styled("█", modal_title_style())
    } else {
        Span::raw("")
    }
}

fn text_line<'a>(form: &InputFormState, field: FormField, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        cursor(form, field),
    ])
}

/// Status picker: every status with the chosen one bracketed
fn status_line(form: &InputFormState) -> Line<'static> {
    let mut spans = vec![Span::raw("> ")];
    for status in TaskStatus::all().iter().copied() {
        if status == form.status {
            spans.push(Span::styled(format!("[{}]", status.label()), modal_title_style()));
        } else {
            spans.push(Span::raw(format!(" {} ", status.label())));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render the add/edit task form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, FORM_HEIGHT);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing_id.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = Vec::new();

        // Subject, with the autocomplete remainder greyed out
        lines.push(Line::raw(""));
        lines.push(field_label(form, FormField::Subject, "Subject"));
        let mut subject_line = text_line(form, FormField::Subject, &form.subject);
        if form.editing_field == FormField::Subject {
            if let Some(suggestion) = app.subject_suggestion() {
                let rest: String = suggestion.chars().skip(form.subject.chars().count()).collect();
                subject_line.spans.push(Span::styled(rest, hint_style()));
                subject_line.spans.push(Span::styled("  (→ accept)", hint_style()));
            }
        }
        lines.push(subject_line);
        let known = app.store.subjects().as_slice();
        if !known.is_empty() {
            lines.push(Line::styled(format!("  known: {}", known.join(", ")), hint_style()));
        }
        lines.push(Line::raw(""));

        lines.push(field_label(form, FormField::Assignment, "Assignment"));
        lines.push(text_line(form, FormField::Assignment, &form.assignment));
        lines.push(Line::raw(""));

        lines.push(field_label(form, FormField::Status, "Status (←/→)"));
        lines.push(status_line(form));
        lines.push(Line::raw(""));

        lines.push(field_label(form, FormField::DueOn, "Due on (YYYY-MM-DD)"));
        lines.push(text_line(form, FormField::DueOn, &form.due_on));
        lines.push(Line::raw(""));

        // Instructions
        lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
