//! Exact-slot collision detection.
//!
//! Two tasks conflict only when they share both day and start time; durations
//! are not treated as intervals. Resolution moves the candidate forward by its
//! own duration exactly once and does not search for a free slot, so a run of
//! back-to-back tasks can still collide after rescheduling.

use crate::domain::{Task, TimeOfDay};

/// Record of a start-time change made by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reschedule {
    pub from: TimeOfDay,
    pub to: TimeOfDay,
}

/// True iff some task in `existing` occupies the candidate's (day, start time)
pub fn detect_conflict<'a, I>(candidate: &Task, existing: I) -> bool
where
    I: IntoIterator<Item = &'a Task>,
{
    existing
        .into_iter()
        .any(|task| task.occupies(candidate.day, candidate.start_time))
}

/// Advance the candidate's start time by its duration, wrapping at midnight
pub fn resolve(candidate: &mut Task) -> Reschedule {
    let from = candidate.start_time;
    candidate.start_time = from.plus_minutes(candidate.duration);
    Reschedule {
        from,
        to: candidate.start_time,
    }
}

/// Detect and, on conflict, resolve once
pub fn resolve_conflict<'a, I>(candidate: &mut Task, existing: I) -> Option<Reschedule>
where
    I: IntoIterator<Item = &'a Task>,
{
    if detect_conflict(candidate, existing) {
        Some(resolve(candidate))
    } else {
        None
    }
}
