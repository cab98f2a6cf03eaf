use crate::app::AppState;
use crate::domain::{format_minutes, format_seconds};
use crate::schedule::timer::TimerState;
use crate::ui::styles::{
    border_style, default_style, idle_style, priority_style, running_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task_id().and_then(|id| app.scheduler.get(id)) else {
        let empty = Paragraph::new("No task selected").style(idle_style()).block(block);
        f.render_widget(empty, area);
        return;
    };

    let running = app.scheduler.timer_state() == TimerState::Running(task.id);
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Title:    ", title_style()),
        Span::raw(task.title.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("When:     ", title_style()),
        Span::raw(format!(
            "{} {} ({})",
            task.day,
            task.start_time,
            format_minutes(task.duration as u64)
        )),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Priority: ", title_style()),
        Span::styled(task.priority.to_string(), priority_style(task.priority)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Actual:   ", title_style()),
        Span::styled(
            format_seconds(task.actual_seconds()),
            if running { running_style() } else { default_style() },
        ),
    ]));

    if !task.description.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(task.description.clone(), idle_style()));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
