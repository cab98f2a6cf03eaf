pub mod files;
pub mod json_store;

pub use files::{atomic_write, config_file, ensure_data_dir, init_local_data_dir, tasks_file};
pub use json_store::JsonFileStorage;
