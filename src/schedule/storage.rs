use crate::domain::Task;
use anyhow::Result;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Persistence collaborator for the task collection
pub trait Storage {
    /// Load the persisted tasks; an empty store loads as an empty list
    fn load(&self) -> Result<Vec<Task>>;

    /// Replace the persisted tasks with `tasks`
    fn save(&mut self, tasks: &[Task]) -> Result<()>;
}

/// In-memory storage. Clones share the same backing list, so a test can keep
/// a handle after boxing one into a scheduler.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

#[cfg(test)]
#[derive(Debug, Default)]
struct MemoryInner {
    tasks: Vec<Task>,
    saves: usize,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryInner { tasks, saves: 0 })),
        }
    }

    /// Snapshot of the last saved list
    pub fn saved(&self) -> Vec<Task> {
        self.inner.borrow().tasks.clone()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.inner.borrow().tasks.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.tasks = tasks.to_vec();
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use crate::domain::Weekday;

    #[test]
    fn test_clones_share_backing_list() {
        let handle = MemoryStorage::default();
        let mut boxed: Box<dyn Storage> = Box::new(handle.clone());

        let task = Task::from_draft(1, draft("a", Weekday::Monday, "08:00", 10));
        boxed.save(&[task.clone()]).unwrap();

        assert_eq!(handle.saved(), vec![task]);
        assert_eq!(handle.save_count(), 1);
        assert_eq!(boxed.load().unwrap().len(), 1);
    }
}
