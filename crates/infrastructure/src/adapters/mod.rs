//! Adapters implementing the application ports.

mod console_navigator;
mod reqwest_transport;
mod system_clock;

pub use console_navigator::ConsoleNavigator;
pub use reqwest_transport::{DEFAULT_TIMEOUT, ReqwestTransport};
pub use system_clock::SystemClock;
