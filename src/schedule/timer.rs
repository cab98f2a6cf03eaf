use crate::domain::TaskId;
use crate::error::TimerWarning;
use crate::schedule::store::TaskStore;
use crate::ticker::Ticker;
use std::time::{Duration, Instant};

/// Timer state; at most one task accumulates time system-wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running(TaskId),
}

/// Tracks elapsed active seconds for at most one task
#[derive(Debug)]
pub struct TimerEngine {
    state: TimerState,
    ticker: Ticker,
}

impl TimerEngine {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            ticker: Ticker::new(interval),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn active(&self) -> Option<TaskId> {
        match self.state {
            TimerState::Running(id) => Some(id),
            TimerState::Idle => None,
        }
    }

    /// Start timing `id`; rejected while another task is running
    pub fn start(
        &mut self,
        id: TaskId,
        store: &mut TaskStore,
        now: Instant,
    ) -> Result<(), TimerWarning> {
        match self.state {
            TimerState::Running(active) if active == id => return Ok(()),
            TimerState::Running(active) => {
                return Err(TimerWarning::AnotherTaskRunning { active })
            }
            TimerState::Idle => {}
        }

        let task = store.get_mut(id).ok_or(TimerWarning::UnknownTask(id))?;
        task.actual_time_spent.get_or_insert(0);

        self.state = TimerState::Running(id);
        self.ticker.start(now);
        Ok(())
    }

    /// Apply one tick to the active task
    pub fn tick(&mut self, store: &mut TaskStore) -> Option<TaskId> {
        let id = self.active()?;
        match store.get_mut(id) {
            Some(task) => {
                *task.actual_time_spent.get_or_insert(0) += 1;
                Some(id)
            }
            None => {
                // Task vanished underneath the timer
                self.disarm();
                None
            }
        }
    }

    /// Number of ticks that came due since the last poll
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        self.ticker.poll(now)
    }

    /// Halt ticking without persisting
    pub fn pause(&mut self) -> Result<TaskId, TimerWarning> {
        let id = self.active().ok_or(TimerWarning::NotRunning)?;
        self.disarm();
        Ok(id)
    }

    /// Halt ticking for `id`; valid only when `id` is the active task
    pub fn stop(&mut self, id: TaskId) -> Result<(), TimerWarning> {
        if self.active() != Some(id) {
            return Err(TimerWarning::NoActiveTimer(id));
        }
        self.disarm();
        Ok(())
    }

    pub fn disarm(&mut self) {
        self.state = TimerState::Idle;
        self.ticker.cancel();
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::ticker::DEFAULT_TICK_MS))
    }
}
