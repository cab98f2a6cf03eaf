use super::enums::{Priority, Weekday};
use super::time::TimeOfDay;
use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};

/// Unique task identifier (wall-clock milliseconds at creation)
pub type TaskId = u64;

/// A schedulable unit of work on a recurring weekly slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub start_time: TimeOfDay,
    /// Estimated duration in minutes
    pub duration: u32,
    pub day: Weekday,
    /// Seconds accumulated by the timer; absent until a timer first runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time_spent: Option<u64>,
}

impl Task {
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            start_time: draft.start_time,
            duration: draft.duration,
            day: draft.day,
            actual_time_spent: None,
        }
    }

    /// Replace the whole record except `id`; tracked time starts over
    pub fn apply_draft(&mut self, draft: TaskDraft) {
        *self = Self::from_draft(self.id, draft);
    }

    /// Tracked seconds, treating an absent value as zero
    pub fn actual_seconds(&self) -> u64 {
        self.actual_time_spent.unwrap_or(0)
    }

    pub fn occupies(&self, day: Weekday, start_time: TimeOfDay) -> bool {
        self.day == day && self.start_time == start_time
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            start_time: self.start_time,
            duration: self.duration,
            day: self.day,
        }
    }
}

/// User-editable task fields, as submitted by a create or edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub start_time: TimeOfDay,
    pub duration: u32,
    pub day: Weekday,
}

impl TaskDraft {
    /// Build a draft from raw form/CLI text fields
    pub fn parse(
        title: &str,
        description: &str,
        priority: &str,
        start_time: &str,
        duration: &str,
        day: &str,
    ) -> Result<Self, ScheduleError> {
        let duration: u32 = duration
            .trim()
            .parse()
            .map_err(|_| ScheduleError::InvalidDuration(duration.to_string()))?;
        if duration == 0 {
            return Err(ScheduleError::ZeroDuration);
        }

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            priority: priority.parse()?,
            start_time: start_time.parse()?,
            duration,
            day: day.parse()?,
        })
    }
}

/// Format seconds as "Xh Ym Zs" (omits leading zero units)
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format minutes as "Xh Ym" (omits 0 values)
pub fn format_minutes(total: u64) -> String {
    let hours = total / 60;
    let minutes = total % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
pub(crate) fn draft(title: &str, day: Weekday, start: &str, duration: u32) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        priority: Priority::Medium,
        start_time: start.parse().unwrap(),
        duration,
        day,
    }
}
