use crate::domain::Task;

/// Case-insensitive substring match on title or description.
/// An empty keyword returns every task in store order.
pub fn search<'a>(tasks: &'a [Task], keyword: &str) -> Vec<&'a Task> {
    if keyword.is_empty() {
        return tasks.iter().collect();
    }

    let needle = keyword.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::draft;
    use crate::domain::Weekday;

    fn tasks() -> Vec<Task> {
        let mut plan = Task::from_draft(1, draft("Plan sprint", Weekday::Monday, "09:00", 30));
        plan.description = "with the team".to_string();
        let mut gym = Task::from_draft(2, draft("Gym", Weekday::Monday, "18:00", 60));
        gym.description = "legs".to_string();
        let mut read = Task::from_draft(3, draft("Read", Weekday::Tuesday, "21:00", 45));
        read.description = "NOVEL".to_string();
        vec![plan, gym, read]
    }

    fn ids(found: &[&Task]) -> Vec<u64> {
        found.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_matches_title_or_description_case_insensitive() {
        let tasks = tasks();
        // "a" appears in "Plan", "team" and "Read"; not in "Gym"/"legs"
        assert_eq!(ids(&search(&tasks, "a")), vec![1, 3]);
        assert_eq!(ids(&search(&tasks, "novel")), vec![3]);
        assert_eq!(ids(&search(&tasks, "GYM")), vec![2]);
    }

    #[test]
    fn test_empty_keyword_returns_all_in_order() {
        let tasks = tasks();
        assert_eq!(ids(&search(&tasks, "")), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_match() {
        let tasks = tasks();
        assert!(search(&tasks, "zzz").is_empty());
    }
}
