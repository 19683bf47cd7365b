//! UCI front end: configuration loading and the line-oriented protocol session.

pub mod config;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use session::UciSession;
