pub mod conflict;
pub mod search;
pub mod service;
pub mod storage;
pub mod store;
pub mod timer;

pub use conflict::Reschedule;
pub use service::{DeleteOutcome, Scheduler};
pub use storage::Storage;
#[cfg(test)]
pub use storage::MemoryStorage;
