//! Key/value storage backends for the token store.

mod file_storage;
mod memory_storage;

pub use file_storage::{FileStorage, default_storage_path};
pub use memory_storage::MemoryStorage;
