//! Unifind - terminal client for the university lost & found and events API
//!
//! The binary in `main.rs` parses arguments and sets up logging; this
//! library holds the wiring and the commands so they can be driven from
//! integration tests with a scripted transport.

pub mod app;
pub mod cli;
pub mod commands;

pub use app::{App, storage_for};
pub use cli::Cli;
pub use commands::{CommandError, CommandResult, execute, hint};
