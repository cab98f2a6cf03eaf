use crate::domain::{Task, Weekday};

/// Estimated vs. actual time for one day, with its task titles in store order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day: Weekday,
    pub estimated_minutes: u64,
    pub actual_seconds: u64,
    pub titles: Vec<String>,
}

/// Task count and time totals for one day of the week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverview {
    pub day: Weekday,
    pub task_count: usize,
    pub estimated_minutes: u64,
    pub actual_seconds: u64,
}

/// Totals across every task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub task_count: usize,
    pub estimated_minutes: u64,
    pub actual_seconds: u64,
}

impl Totals {
    /// Ratio of tracked time to estimated time (0.0 when nothing is estimated)
    pub fn progress_ratio(&self) -> f64 {
        if self.estimated_minutes == 0 {
            return 0.0;
        }
        self.actual_seconds as f64 / (self.estimated_minutes as f64 * 60.0)
    }
}

/// Group by day, keeping days in order of first appearance
fn group_by_day<'a, T>(
    tasks: &'a [Task],
    mut init: impl FnMut(Weekday) -> T,
    mut fold: impl FnMut(&mut T, &'a Task),
    day_of: impl Fn(&T) -> Weekday,
) -> Vec<T> {
    let mut groups: Vec<T> = Vec::new();
    for task in tasks {
        let index = match groups.iter().position(|g| day_of(g) == task.day) {
            Some(index) => index,
            None => {
                groups.push(init(task.day));
                groups.len() - 1
            }
        };
        fold(&mut groups[index], task);
    }
    groups
}

/// Per-day summary; days with no tasks are absent
pub fn daily_summary(tasks: &[Task]) -> Vec<DaySummary> {
    group_by_day(
        tasks,
        |day| DaySummary {
            day,
            estimated_minutes: 0,
            actual_seconds: 0,
            titles: Vec::new(),
        },
        |summary, task| {
            summary.estimated_minutes += task.duration as u64;
            summary.actual_seconds += task.actual_seconds();
            summary.titles.push(task.title.clone());
        },
        |summary| summary.day,
    )
}

/// Per-day counts and totals; days with no tasks are absent
pub fn weekly_overview(tasks: &[Task]) -> Vec<DayOverview> {
    group_by_day(
        tasks,
        |day| DayOverview {
            day,
            task_count: 0,
            estimated_minutes: 0,
            actual_seconds: 0,
        },
        |overview, task| {
            overview.task_count += 1;
            overview.estimated_minutes += task.duration as u64;
            overview.actual_seconds += task.actual_seconds();
        },
        |overview| overview.day,
    )
}

pub fn totals(tasks: &[Task]) -> Totals {
    tasks.iter().fold(Totals::default(), |mut acc, task| {
        acc.task_count += 1;
        acc.estimated_minutes += task.duration as u64;
        acc.actual_seconds += task.actual_seconds();
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, day: Weekday, duration: u32, actual: Option<u64>) -> Task {
        let mut task = Task::from_draft(id, draft(title, day, "09:00", duration));
        task.actual_time_spent = actual;
        task
    }

    #[test]
    fn test_daily_summary_sums_estimates() {
        let tasks = vec![
            task(1, "a", Weekday::Wednesday, 30, None),
            task(2, "b", Weekday::Wednesday, 45, None),
        ];

        let summary = daily_summary(&tasks);
        assert_eq!(
            summary,
            vec![DaySummary {
                day: Weekday::Wednesday,
                estimated_minutes: 75,
                actual_seconds: 0,
                titles: vec!["a".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn test_days_in_first_appearance_order_without_placeholders() {
        let tasks = vec![
            task(1, "fri", Weekday::Friday, 10, Some(5)),
            task(2, "mon", Weekday::Monday, 20, None),
            task(3, "fri2", Weekday::Friday, 30, Some(7)),
        ];

        let overview = weekly_overview(&tasks);
        assert_eq!(
            overview,
            vec![
                DayOverview {
                    day: Weekday::Friday,
                    task_count: 2,
                    estimated_minutes: 40,
                    actual_seconds: 12,
                },
                DayOverview {
                    day: Weekday::Monday,
                    task_count: 1,
                    estimated_minutes: 20,
                    actual_seconds: 0,
                },
            ]
        );

        let days: Vec<Weekday> = daily_summary(&tasks).iter().map(|s| s.day).collect();
        assert_eq!(days, vec![Weekday::Friday, Weekday::Monday]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(daily_summary(&[]).is_empty());
        assert!(weekly_overview(&[]).is_empty());
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_totals_and_progress() {
        let tasks = vec![
            task(1, "a", Weekday::Monday, 30, Some(900)),
            task(2, "b", Weekday::Sunday, 30, None),
        ];
        let totals = totals(&tasks);
        assert_eq!(totals.task_count, 2);
        assert_eq!(totals.estimated_minutes, 60);
        assert_eq!(totals.actual_seconds, 900);
        assert_eq!(totals.progress_ratio(), 0.25);
    }
}
