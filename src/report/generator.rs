use crate::domain::{format_minutes, format_seconds, Task};
use crate::report::stats::{daily_summary, totals, weekly_overview};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Render the weekly plan as markdown
pub fn render_report(tasks: &[Task], date: NaiveDate) -> String {
    let totals = totals(tasks);
    let mut report = String::new();

    report.push_str(&format!("# Weekly Plan - {}\n\n", date));

    // Summary
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Total Tasks:** {}\n", totals.task_count));
    report.push_str(&format!(
        "- **Tracked:** {} of {} estimated ({})\n\n",
        format_seconds(totals.actual_seconds),
        format_minutes(totals.estimated_minutes),
        format_percent(totals.progress_ratio() * 100.0)
    ));

    if tasks.is_empty() {
        report.push_str("_No tasks scheduled._\n");
        return report;
    }

    // Weekly overview table
    report.push_str("## Weekly Overview\n\n");
    report.push_str("| Day | Tasks | Estimated | Actual |\n");
    report.push_str("|-----|-------|-----------|--------|\n");
    for overview in weekly_overview(tasks) {
        report.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            overview.day,
            overview.task_count,
            format_minutes(overview.estimated_minutes),
            format_seconds(overview.actual_seconds)
        ));
    }
    report.push('\n');

    // Per-day breakdown
    report.push_str("## Daily Summary\n\n");
    for summary in daily_summary(tasks) {
        report.push_str(&format!("### {}\n\n", summary.day));
        report.push_str(&format!(
            "Estimated {} · Actual {}\n\n",
            format_minutes(summary.estimated_minutes),
            format_seconds(summary.actual_seconds)
        ));

        let mut day_tasks: Vec<&Task> = tasks.iter().filter(|t| t.day == summary.day).collect();
        day_tasks.sort_by_key(|t| t.start_time);
        for task in day_tasks {
            report.push_str(&format!(
                "- `{}` **{}** ({}, {}) - {}\n",
                task.start_time,
                task.title,
                task.priority,
                format_minutes(task.duration as u64),
                format_seconds(task.actual_seconds())
            ));
        }
        report.push('\n');
    }

    report
}

/// Write the weekly report; defaults to `<data_dir>/report-YYYY-MM-DD.md`
pub fn generate_report(
    tasks: &[Task],
    data_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    let path = output_path
        .unwrap_or_else(|| data_dir.join(format!("report-{}.md", today.format("%Y-%m-%d"))));

    let report = render_report(tasks, today);
    crate::persistence::atomic_write(&path, &report)?;
    Ok(path)
}
