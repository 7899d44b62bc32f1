//! # logify-core
//! Core utilities for logify - severities, the line format and log writers.

mod config;
mod error;
mod log_writer;
mod severity;
mod utils;

pub use config::LogifyEnvConfig;
pub use error::LogifyError;
pub use log_writer::{LogFile, LogStdout, LogWriter, SESSION_SEPARATOR};
pub use severity::Severity;
pub use utils::{LogRecord, ParsedLine, parse_line, render_trace, timestamp_now};
