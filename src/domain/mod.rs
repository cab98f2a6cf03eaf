pub mod enums;
pub mod task;
pub mod time;

pub use enums::{Priority, UiMode, Weekday};
pub use task::{format_minutes, format_seconds, Task, TaskDraft, TaskId};
pub use time::TimeOfDay;
