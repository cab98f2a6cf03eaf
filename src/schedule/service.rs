use crate::domain::{Task, TaskDraft, TaskId};
use crate::error::ScheduleError;
use crate::report::stats::{self, DayOverview, DaySummary, Totals};
use crate::schedule::conflict::{resolve_conflict, Reschedule};
use crate::schedule::search::search;
use crate::schedule::storage::Storage;
use crate::schedule::store::TaskStore;
use crate::schedule::timer::{TimerEngine, TimerState};
use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

/// Result of a create intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOutcome {
    pub id: TaskId,
    pub rescheduled: Option<Reschedule>,
}

/// Result of an edit intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub rescheduled: Option<Reschedule>,
}

/// Result of a delete intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Task),
    /// User declined the confirmation; nothing changed
    Cancelled,
}

/// Owns the task store, the timer engine and the storage collaborator.
/// Every user intent goes through here.
pub struct Scheduler {
    store: TaskStore,
    timer: TimerEngine,
    storage: Box<dyn Storage>,
}

impl Scheduler {
    /// Load tasks from `storage` and build a scheduler around them
    pub fn load(storage: Box<dyn Storage>, tick_interval: Duration) -> Result<Self, ScheduleError> {
        let tasks = storage.load()?;
        info!("event=store_load module=schedule count={}", tasks.len());
        Ok(Self {
            store: TaskStore::new(tasks),
            timer: TimerEngine::new(tick_interval),
            storage,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.timer.active().and_then(|id| self.store.get(id))
    }

    /// Flush the full collection to storage
    pub fn save(&mut self) -> Result<(), ScheduleError> {
        if let Err(e) = self.storage.save(self.store.tasks()) {
            error!("event=store_save module=schedule status=error error={:#}", e);
            return Err(e.into());
        }
        debug!("event=store_save module=schedule status=ok count={}", self.store.len());
        Ok(())
    }

    pub fn create(&mut self, draft: TaskDraft) -> Result<CreateOutcome, ScheduleError> {
        let id = self.store.next_id()?;
        let mut task = Task::from_draft(id, draft);
        let rescheduled = resolve_conflict(&mut task, self.store.tasks());

        self.store.insert(task)?;
        self.save()?;

        if let Some(change) = rescheduled {
            info!(
                "event=task_rescheduled module=schedule id={} from={} to={}",
                id, change.from, change.to
            );
        }
        info!("event=task_create module=schedule id={}", id);
        Ok(CreateOutcome { id, rescheduled })
    }

    /// Replace all editable fields of `id`; the task never conflicts with itself
    pub fn edit(&mut self, id: TaskId, draft: TaskDraft) -> Result<EditOutcome, ScheduleError> {
        let mut candidate = self
            .store
            .get(id)
            .cloned()
            .ok_or(ScheduleError::TaskNotFound(id))?;
        candidate.apply_draft(draft);

        let others = self.store.tasks().iter().filter(|t| t.id != id);
        let rescheduled = resolve_conflict(&mut candidate, others);

        self.store.update(id, candidate.to_draft())?;
        self.save()?;

        if let Some(change) = rescheduled {
            info!(
                "event=task_rescheduled module=schedule id={} from={} to={}",
                id, change.from, change.to
            );
        }
        info!("event=task_edit module=schedule id={}", id);
        Ok(EditOutcome { rescheduled })
    }

    /// Delete `id` once the user has confirmed; declining changes nothing
    pub fn delete(&mut self, id: TaskId, confirmed: bool) -> Result<DeleteOutcome, ScheduleError> {
        if !confirmed {
            debug!("event=task_delete module=schedule id={} status=cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self.store.remove(id)?;
        if self.timer.active() == Some(id) {
            self.timer.disarm();
            info!("event=timer_disarm module=schedule id={} reason=deleted", id);
        }
        self.save()?;

        info!("event=task_delete module=schedule id={}", id);
        Ok(DeleteOutcome::Deleted(removed))
    }

    pub fn start(&mut self, id: TaskId) -> Result<(), ScheduleError> {
        self.start_at(id, Instant::now())
    }

    pub fn start_at(&mut self, id: TaskId, now: Instant) -> Result<(), ScheduleError> {
        match self.timer.start(id, &mut self.store, now) {
            Ok(()) => {
                info!("event=timer_start module=schedule id={}", id);
                Ok(())
            }
            Err(warning) => {
                warn!("event=timer_start module=schedule id={} status=rejected reason={}", id, warning);
                Err(warning.into())
            }
        }
    }

    /// Halt the active timer; accumulated time stays in memory until the next save
    pub fn pause(&mut self) -> Result<TaskId, ScheduleError> {
        match self.timer.pause() {
            Ok(id) => {
                info!("event=timer_pause module=schedule id={}", id);
                Ok(id)
            }
            Err(warning) => {
                warn!("event=timer_pause module=schedule status=rejected reason={}", warning);
                Err(warning.into())
            }
        }
    }

    /// Halt the timer for `id` and persist
    pub fn stop(&mut self, id: TaskId) -> Result<(), ScheduleError> {
        if let Err(warning) = self.timer.stop(id) {
            warn!("event=timer_stop module=schedule id={} status=rejected reason={}", id, warning);
            return Err(warning.into());
        }
        self.save()?;
        info!("event=timer_stop module=schedule id={}", id);
        Ok(())
    }

    /// Apply a single tick to the active task
    pub fn tick(&mut self) -> Option<TaskId> {
        self.timer.tick(&mut self.store)
    }

    /// Apply every tick that came due by `now`
    pub fn poll_timer(&mut self, now: Instant) -> u32 {
        let due = self.timer.due_ticks(now);
        let mut applied = 0;
        for _ in 0..due {
            if self.tick().is_none() {
                break;
            }
            applied += 1;
        }
        applied
    }

    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        search(self.store.tasks(), keyword)
    }

    pub fn daily_summary(&self) -> Vec<DaySummary> {
        stats::daily_summary(self.store.tasks())
    }

    pub fn weekly_overview(&self) -> Vec<DayOverview> {
        stats::weekly_overview(self.store.tasks())
    }

    pub fn totals(&self) -> Totals {
        stats::totals(self.store.tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use crate::domain::Weekday;
    use crate::error::TimerWarning;
    use crate::schedule::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn scheduler() -> (Scheduler, MemoryStorage) {
        let storage = MemoryStorage::default();
        let scheduler = Scheduler::load(Box::new(storage.clone()), Duration::from_secs(1)).unwrap();
        (scheduler, storage)
    }

    #[test]
    fn test_create_persists() {
        let (mut s, storage) = scheduler();
        let outcome = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();

        assert_eq!(outcome.rescheduled, None);
        assert_eq!(storage.saved().len(), 1);
        assert_eq!(storage.saved()[0].id, outcome.id);
    }

    #[test]
    fn test_create_same_slot_reschedules() {
        let (mut s, storage) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        let b = s.create(draft("b", Weekday::Monday, "09:00", 45)).unwrap();

        let change = b.rescheduled.unwrap();
        assert_eq!(change.from.to_string(), "09:00");
        assert_eq!(change.to.to_string(), "09:45");
        assert_ne!(s.get(a.id).unwrap().start_time, s.get(b.id).unwrap().start_time);
        assert_eq!(storage.saved()[1].start_time.to_string(), "09:45");
    }

    #[test]
    fn test_ids_are_unique() {
        let (mut s, _) = scheduler();
        let ids: Vec<TaskId> = (0..20)
            .map(|i| {
                let start = format!("{:02}:00", i);
                s.create(draft("t", Weekday::Monday, &start, 10)).unwrap().id
            })
            .collect();
        let mut sorted = ids.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_edit_same_slot_is_not_a_conflict() {
        let (mut s, _) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();

        let outcome = s.edit(a.id, draft("renamed", Weekday::Monday, "09:00", 30)).unwrap();
        assert_eq!(outcome.rescheduled, None);
        assert_eq!(s.get(a.id).unwrap().title, "renamed");
    }

    #[test]
    fn test_edit_into_taken_slot_reschedules() {
        let (mut s, storage) = scheduler();
        s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        let b = s.create(draft("b", Weekday::Tuesday, "09:00", 20)).unwrap();

        let outcome = s.edit(b.id, draft("b", Weekday::Monday, "09:00", 20)).unwrap();
        assert_eq!(outcome.rescheduled.unwrap().to.to_string(), "09:20");
        assert_eq!(storage.saved()[1].start_time.to_string(), "09:20");
    }

    #[test]
    fn test_edit_resets_tracked_time() {
        let (mut s, storage) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        s.start(a.id).unwrap();
        s.tick();
        s.tick();
        s.stop(a.id).unwrap();
        assert_eq!(storage.saved()[0].actual_time_spent, Some(2));

        s.edit(a.id, draft("a", Weekday::Friday, "10:00", 30)).unwrap();
        assert_eq!(s.get(a.id).unwrap().actual_time_spent, None);
        assert_eq!(storage.saved()[0].actual_time_spent, None);
    }

    #[test]
    fn test_create_after_max_id_fails_cleanly() {
        let existing = Task::from_draft(TaskId::MAX, draft("last", Weekday::Monday, "08:00", 10));
        let storage = MemoryStorage::with_tasks(vec![existing]);
        let mut s = Scheduler::load(Box::new(storage.clone()), Duration::from_secs(1)).unwrap();

        let err = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap_err();
        assert!(matches!(err, ScheduleError::IdsExhausted(_)));
        assert_eq!(s.tasks().len(), 1);
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_edit_unknown_task() {
        let (mut s, storage) = scheduler();
        let err = s.edit(5, draft("x", Weekday::Monday, "09:00", 30)).unwrap_err();
        assert!(matches!(err, ScheduleError::TaskNotFound(5)));
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut s, storage) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        let saves = storage.save_count();

        assert_eq!(s.delete(a.id, false).unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(s.tasks().len(), 1);
        assert_eq!(storage.save_count(), saves);

        assert!(matches!(s.delete(a.id, true).unwrap(), DeleteOutcome::Deleted(t) if t.id == a.id));
        assert!(s.tasks().is_empty());
        assert!(storage.saved().is_empty());
    }

    #[test]
    fn test_delete_active_task_disarms_timer() {
        let (mut s, _) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        s.start(a.id).unwrap();

        s.delete(a.id, true).unwrap();
        assert_eq!(s.timer_state(), TimerState::Idle);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn test_second_timer_is_rejected() {
        let (mut s, _) = scheduler();
        let x = s.create(draft("x", Weekday::Monday, "09:00", 30)).unwrap();
        let y = s.create(draft("y", Weekday::Monday, "10:00", 30)).unwrap();
        s.start(y.id).unwrap();

        let err = s.start(x.id).unwrap_err();
        assert!(err.is_warning());
        assert!(matches!(
            err,
            ScheduleError::Timer(TimerWarning::AnotherTaskRunning { active }) if active == y.id
        ));
        assert_eq!(s.active_task().unwrap().id, y.id);
        s.tick();
        assert_eq!(s.get(x.id).unwrap().actual_time_spent, None);
    }

    #[test]
    fn test_pause_does_not_persist_but_stop_does() {
        let (mut s, storage) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();

        s.start(a.id).unwrap();
        s.tick();
        s.tick();
        s.tick();
        let saves = storage.save_count();
        s.pause().unwrap();
        s.tick();

        assert_eq!(s.get(a.id).unwrap().actual_time_spent, Some(3));
        assert_eq!(storage.save_count(), saves);
        assert_eq!(storage.saved()[0].actual_time_spent, None);

        s.start(a.id).unwrap();
        s.tick();
        s.stop(a.id).unwrap();
        assert_eq!(storage.saved()[0].actual_time_spent, Some(4));
    }

    #[test]
    fn test_stop_mismatch_is_warning() {
        let (mut s, storage) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        let saves = storage.save_count();

        let err = s.stop(a.id).unwrap_err();
        assert!(err.is_warning());
        assert_eq!(storage.save_count(), saves);
    }

    #[test]
    fn test_poll_timer_applies_due_ticks() {
        let (mut s, _) = scheduler();
        let a = s.create(draft("a", Weekday::Monday, "09:00", 30)).unwrap();
        let t0 = Instant::now();
        s.start_at(a.id, t0).unwrap();

        assert_eq!(s.poll_timer(t0 + Duration::from_millis(3200)), 3);
        assert_eq!(s.get(a.id).unwrap().actual_time_spent, Some(3));
    }

    #[test]
    fn test_summaries_follow_mutations() {
        let (mut s, _) = scheduler();
        s.create(draft("a", Weekday::Thursday, "09:00", 30)).unwrap();
        let b = s.create(draft("b", Weekday::Thursday, "11:00", 45)).unwrap();
        assert_eq!(s.daily_summary()[0].estimated_minutes, 75);
        assert_eq!(s.daily_summary()[0].actual_seconds, 0);

        s.delete(b.id, true).unwrap();
        assert_eq!(s.weekly_overview()[0].task_count, 1);
        assert_eq!(s.totals().estimated_minutes, 30);
    }

    #[test]
    fn test_load_existing_tasks() {
        let existing = Task::from_draft(10, draft("kept", Weekday::Saturday, "12:00", 60));
        let storage = MemoryStorage::with_tasks(vec![existing.clone()]);
        let s = Scheduler::load(Box::new(storage), Duration::from_secs(1)).unwrap();

        assert_eq!(s.tasks(), &[existing]);
        assert_eq!(s.search("KEPT").len(), 1);
    }
}
