use thiserror::Error;

/// Error returned by a worker action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("worker has already been started")]
    AlreadyStarted,
    #[error("worker has not been started")]
    NotStarted,
    #[error("worker action failed: {0}")]
    Action(#[source] ActionError),
    #[error("worker task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid tick rate: {0} (must be between 1 and 1000000000)")]
    InvalidTickRate(u32),
    #[error("invalid font size: {0}")]
    InvalidFontSize(f32),
    #[error("invalid value for {key}: {value:?}")]
    Env { key: &'static str, value: String },
}
