use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogifyError {
    /// A configured level name is not one of DEBUG, INFO, WARN, ERROR, FATAL.
    #[error("unknown log severity `{0}`, expected one of DEBUG, INFO, WARN, ERROR, FATAL")]
    InvalidSeverity(String),
    #[error("log file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid LOGIFY_* environment configuration: {0}")]
    Environment(String),
    #[error("a global logger is already installed: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}
