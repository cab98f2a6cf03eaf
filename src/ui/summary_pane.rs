use crate::domain::{format_minutes, format_seconds};
use crate::report::{DayOverview, DaySummary};
use crate::ui::styles::{border_style, day_style, idle_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn pane_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()))
}

/// Lines for the daily summary: per day, estimated/actual time and task titles
pub fn daily_summary_lines(summary: &[DaySummary]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for day in summary {
        lines.push(Line::styled(day.day.to_string(), day_style()));
        lines.push(Line::raw(format!(
            "  Estimated: {}   Actual: {}",
            format_minutes(day.estimated_minutes),
            format_seconds(day.actual_seconds)
        )));
        for title in &day.titles {
            lines.push(Line::raw(format!("  • {}", title)));
        }
        lines.push(Line::raw(""));
    }
    lines
}

/// Lines for the weekly overview: one row per day with tasks
pub fn weekly_overview_lines(overview: &[DayOverview]) -> Vec<Line<'static>> {
    overview
        .iter()
        .map(|day| {
            Line::from(vec![
                Span::styled(format!("{:<10}", day.day.label()), day_style()),
                Span::raw(format!(
                    " {:>2} tasks   est {:>7}   actual {}",
                    day.task_count,
                    format_minutes(day.estimated_minutes),
                    format_seconds(day.actual_seconds)
                )),
            ])
        })
        .collect()
}

pub fn render_summary_pane(f: &mut Frame, summary: &[DaySummary], area: Rect) {
    let lines = if summary.is_empty() {
        vec![Line::styled("Nothing scheduled yet", idle_style())]
    } else {
        daily_summary_lines(summary)
    };

    let paragraph = Paragraph::new(lines)
        .block(pane_block(" Daily Summary "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

pub fn render_overview_pane(f: &mut Frame, overview: &[DayOverview], area: Rect) {
    let lines = if overview.is_empty() {
        vec![Line::styled("Nothing scheduled yet", idle_style())]
    } else {
        weekly_overview_lines(overview)
    };

    let paragraph = Paragraph::new(lines).block(pane_block(" Weekly Overview "));
    f.render_widget(paragraph, area);
}
