//! Shared utilities for the ProtoCoin ledger.

pub mod logging;
pub mod time;

pub use logging::{init_logging, init_tracing, LogFormat, DEFAULT_LOG_LEVEL};
pub use time::format_duration;
