//! Unifind Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod evidence;
pub mod serialization;
pub mod storage;

pub use adapters::{ConsoleNavigator, DEFAULT_TIMEOUT, ReqwestTransport, SystemClock};
pub use config::{ClientConfig, ConfigError};
pub use evidence::{EvidenceError, load_evidence};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
pub use storage::{FileStorage, MemoryStorage, default_storage_path};
