//! A desktop stopwatch.
//!
//! The interesting part is [`worker`]: a background loop that runs a
//! [`ThreadData`](worker::ThreadData) action at a fixed tick rate and reports
//! `Started`, `Update` and `Finished` notifications to the UI thread. The
//! [`stopwatch`] module is its one concrete user.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod stopwatch;
pub mod worker;

pub use config::StopwatchConfig;
pub use error::{ActionError, ConfigError, WorkerError};
