use crate::domain::Task;
use crate::persistence::files::{atomic_write, read_file};
use crate::schedule::Storage;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Stores the task list as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Task>> {
        let content = read_file(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse tasks from {}", self.path.display()))
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
        atomic_write(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use crate::domain::Weekday;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path().join("tasks.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_keeps_optional_time() {
        let temp_dir = tempdir().unwrap();
        let mut storage = JsonFileStorage::new(temp_dir.path().join("tasks.json"));

        let untracked = Task::from_draft(1, draft("Plan", Weekday::Monday, "09:00", 30));
        let mut tracked = Task::from_draft(2, draft("Run", Weekday::Sunday, "07:30", 45));
        tracked.actual_time_spent = Some(125);
        let tasks = vec![untracked, tracked];

        storage.save(&tasks).unwrap();
        assert_eq!(storage.load().unwrap(), tasks);
    }

    #[test]
    fn test_reads_browser_shaped_records() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"id":1700000000000,"title":"Call","description":"mum","priority":"high",
                "startTime":"18:00","duration":15,"day":"Wednesday","actualTimeSpent":3}]"#,
        )
        .unwrap();

        let loaded = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].start_time.to_string(), "18:00");
        assert_eq!(loaded[0].day, Weekday::Wednesday);
        assert_eq!(loaded[0].actual_time_spent, Some(3));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(JsonFileStorage::new(&path).load().is_err());
    }
}
