use crate::app::{
    AppState, InputFormState, FIELD_DAY, FIELD_DESCRIPTION, FIELD_DURATION, FIELD_PRIORITY,
    FIELD_START_TIME, FIELD_TITLE,
};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// (label, field index, is a choice field)
const FIELDS: [(&str, usize, bool); 6] = [
    ("Title", FIELD_TITLE, false),
    ("Description", FIELD_DESCRIPTION, false),
    ("Priority", FIELD_PRIORITY, true),
    ("Start time (HH:MM)", FIELD_START_TIME, false),
    ("Duration (minutes)", FIELD_DURATION, false),
    ("Day", FIELD_DAY, true),
];

fn field_value(form: &InputFormState, field: usize) -> String {
    match field {
        FIELD_TITLE => form.title.clone(),
        FIELD_DESCRIPTION => form.description.clone(),
        FIELD_PRIORITY => form.priority.to_string(),
        FIELD_START_TIME => form.start_time.clone(),
        FIELD_DURATION => form.duration.clone(),
        _ => form.day.to_string(),
    }
}

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, 16);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.task_id.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = vec![Line::raw("")];
        for (label, field, is_choice) in FIELDS {
            let editing = form.editing_field == field;
            let label = if editing {
                format!("{}: (editing)", label)
            } else {
                format!("{}:", label)
            };

            let value = field_value(form, field);
            let value = if is_choice {
                format!("‹ {} ›", value)
            } else {
                value
            };

            lines.push(Line::from(vec![
                Span::raw(format!("{:<28}", label)),
                Span::styled(value, modal_title_style()),
                if editing && !is_choice {
                    Span::styled("█", modal_title_style()) // Cursor
                } else {
                    Span::raw("")
                },
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::raw("Tab/↑↓ switch fields  ·  ←/→ or Space change choice"));
        lines.push(Line::raw("Enter to submit  ·  Esc to cancel"));

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
