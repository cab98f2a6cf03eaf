use crate::domain::{Task, TaskDraft, TaskId};
use crate::error::ScheduleError;

/// In-memory ordered task collection, the source of truth for a session
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Highest id issued or loaded so far
    last_id: TaskId,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self { tasks, last_id }
    }

    /// Issue the next id from the wall clock
    pub fn next_id(&mut self) -> Result<TaskId, ScheduleError> {
        let now_ms = chrono::Utc::now().timestamp_millis().max(0) as TaskId;
        self.next_id_at(now_ms)
    }

    /// Issue an id for the given clock reading; never repeats within a store
    pub fn next_id_at(&mut self, now_ms: TaskId) -> Result<TaskId, ScheduleError> {
        let floor = self
            .last_id
            .checked_add(1)
            .ok_or(ScheduleError::IdsExhausted(self.last_id))?;
        let id = now_ms.max(floor);
        self.last_id = id;
        Ok(id)
    }

    pub fn insert(&mut self, task: Task) -> Result<TaskId, ScheduleError> {
        if self.get(task.id).is_some() {
            return Err(ScheduleError::DuplicateId(task.id));
        }
        let id = task.id;
        self.last_id = self.last_id.max(id);
        self.tasks.push(task);
        Ok(id)
    }

    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Result<&Task, ScheduleError> {
        let task = self.get_mut(id).ok_or(ScheduleError::TaskNotFound(id))?;
        task.apply_draft(draft);
        Ok(task)
    }

    /// Remove the single task with `id`, preserving the order of the rest
    pub fn remove(&mut self, id: TaskId) -> Result<Task, ScheduleError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ScheduleError::TaskNotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}
