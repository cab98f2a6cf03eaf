pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod summary_pane;

use crate::app::{AppState, StatusKind};
use crate::domain::{format_seconds, UiMode};
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_confirm_delete_modal;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{error_style, hint_style, info_style, modal_title_style, running_style, warning_style};
use summary_pane::{render_overview_pane, render_summary_pane};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);

    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    // Summaries are recomputed from the store on every frame
    render_summary_pane(f, &app.scheduler.daily_summary(), layout.summary_area);
    render_overview_pane(f, &app.scheduler.weekly_overview(), layout.overview_area);

    render_status_bar(f, app, layout.status_area);

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    if app.ui_mode == UiMode::ConfirmDelete {
        render_confirm_delete_modal(f, app, size);
    }
}

/// Bottom bar: search prompt while searching, otherwise timer + last notice
fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let line = if app.ui_mode == UiMode::Searching {
        Line::from(vec![
            Span::styled(" Search: ", modal_title_style()),
            Span::raw(app.search_query.clone()),
            Span::styled("█", modal_title_style()),
        ])
    } else {
        let mut spans = Vec::new();
        if let Some(task) = app.scheduler.active_task() {
            spans.push(Span::styled(
                format!(" ▶ {} {} ", task.title, format_seconds(task.actual_seconds())),
                running_style(),
            ));
        }
        match &app.status {
            Some(status) => {
                let style = match status.kind {
                    StatusKind::Info => info_style(),
                    StatusKind::Warning => warning_style(),
                    StatusKind::Error => error_style(),
                };
                spans.push(Span::styled(format!(" {}", status.text), style));
            }
            None => spans.push(Span::styled(" Ready", hint_style())),
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line), area);
}
