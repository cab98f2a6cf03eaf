use crate::app::AppState;
use crate::domain::{format_minutes, format_seconds, Task};
use crate::schedule::timer::TimerState;
use crate::ui::styles::{
    border_style, default_style, over_estimate_style, priority_style, running_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the task list, filtered by the current search
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let active = match app.scheduler.timer_state() {
        TimerState::Running(id) => Some(id),
        TimerState::Idle => None,
    };
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, active == Some(task.id));
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = if app.search_query.is_empty() {
        format!(" Tasks ({}) ", visible.len())
    } else {
        format!(
            " Tasks ({} of {}) matching \"{}\" ",
            visible.len(),
            app.scheduler.tasks().len(),
            app.search_query
        )
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    // Scroll to keep the selection on screen
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected_index));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [▶] Mon 09:00  Write proposal  (high) 30m · ⏱ 1m 5s
fn create_task_line(task: &Task, running: bool) -> Line<'static> {
    let mut spans = Vec::new();

    if running {
        spans.push(Span::styled("[▶] ".to_string(), running_style()));
    } else {
        spans.push(Span::raw("[ ] ".to_string()));
    }

    spans.push(Span::raw(format!(
        "{} {}  ",
        &task.day.label()[..3],
        task.start_time
    )));
    spans.push(Span::raw(task.title.clone()));
    spans.push(Span::raw("  ".to_string()));
    spans.push(Span::styled(
        format!("({})", task.priority),
        priority_style(task.priority),
    ));
    spans.push(Span::raw(format!(" {} · ", format_minutes(task.duration as u64))));

    let actual = task.actual_seconds();
    let actual_style = if actual > task.duration as u64 * 60 {
        over_estimate_style()
    } else if running {
        running_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(format!("⏱ {}", format_seconds(actual)), actual_style));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use crate::domain::Weekday;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let mut task = Task::from_draft(1, draft("Write proposal", Weekday::Monday, "09:00", 30));
        task.actual_time_spent = Some(65);

        let text = line_text(&create_task_line(&task, false));
        assert_eq!(text, "[ ] Mon 09:00  Write proposal  (medium) 30m · ⏱ 1m 5s");
    }

    #[test]
    fn test_running_marker() {
        let task = Task::from_draft(1, draft("Run", Weekday::Sunday, "07:00", 45));
        let text = line_text(&create_task_line(&task, true));
        assert!(text.starts_with("[▶] Sun 07:00"));
    }
}
