//! # logify
//! Leveled logger with an optional log file, crash/bug-report hooks and line subscribers.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! logify = "0.1.0"
//! ```
//!
//! ```rust
//! use logify::{Severity, logger_config};
//!
//! let logger = logger_config()
//!     .with_level(Severity::Debug)
//!     .build()
//!     .expect("Unable to build logger");
//! let (_, lines) = logger.subscribe_channel();
//! logger.info("Hello, world!").unwrap();
//! assert!(lines.recv().unwrap().ends_with("[INFO] Hello, world!"));
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//! Each opening writes a blank separator so sessions stay apart.
//!
//! ```rust
//! use logify::logger_config;
//!
//! let logger = logger_config()
//!     .save_to_file(true)
//!     .with_file_name("/tmp/logify_doc_app.log")
//!     .build()
//!     .expect("Unable to create log file");
//! logger.warn("Hello, world!").unwrap();
//! logger.close().unwrap(); // flushes the file
//! assert!(std::fs::read_to_string("/tmp/logify_doc_app.log").unwrap().ends_with("[WARN] Hello, world!\n"));
//! ```
//!
//! ## Errors and fatal records
//! `error` forwards the attached error to a crash reporter. `fatal` additionally
//! calls the bug report hook and terminates the process with status 1.
//!
//! ```rust
//! use std::error::Error;
//! use logify::logger_config;
//!
//! let logger = logger_config()
//!     .with_crash_reporter(|error: &(dyn Error + 'static)| eprintln!("crash: {error}"))
//!     .with_terminator(|code: i32| println!("would exit with {code}"))
//!     .build()
//!     .unwrap();
//! let error = std::io::Error::other("database unreachable");
//! logger.error("request failed", Some(&error)).unwrap();
//! ```

mod collaborators;
mod subscribers;

use std::{
    error::Error,
    io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crossbeam_channel::Receiver;
use log::Log;
use logify_core::{LogFile, LogStdout, LogWriter, LogifyEnvConfig};

pub use collaborators::{BugReport, CrashReporter, ProcessExit, Terminator};
pub use logify_core::{
    LogRecord, LogifyError, ParsedLine, SESSION_SEPARATOR, Severity, parse_line,
};
pub use subscribers::SubscriptionId;

use subscribers::Subscribers;

/// Default log file name used when file persistence is enabled.
pub const DEFAULT_FILE_NAME: &str = "log.txt";

/// Exit status passed to the terminator by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// A leveled logger. Records below the configured severity are dropped; accepted
/// records are published to subscribers, then written to the log file and stdout
/// when those are enabled.
pub struct Logger {
    level: Severity,
    file_name: Option<PathBuf>,
    file: Mutex<Option<LogFile>>,
    stdout: Option<Mutex<LogStdout>>,
    crash_reporter: Option<Box<dyn CrashReporter>>,
    bug_report: Option<Box<dyn BugReport>>,
    terminator: Box<dyn Terminator>,
    subscribers: Subscribers,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Logger {
    /// Minimum severity this logger acts on.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Path of the log file, when file persistence is enabled.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.level <= severity
    }

    pub fn debug(&self, message: &str) -> Result<(), LogifyError> {
        if self.is_enabled(Severity::Debug) {
            self.log(Severity::Debug, message, None)?;
        }
        Ok(())
    }

    pub fn info(&self, message: &str) -> Result<(), LogifyError> {
        if self.is_enabled(Severity::Info) {
            self.log(Severity::Info, message, None)?;
        }
        Ok(())
    }

    pub fn warn(&self, message: &str) -> Result<(), LogifyError> {
        if self.is_enabled(Severity::Warn) {
            self.log(Severity::Warn, message, None)?;
        }
        Ok(())
    }

    /// Logs at ERROR and hands `error`, if any, to the crash reporter.
    pub fn error(
        &self,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> Result<(), LogifyError> {
        if !self.is_enabled(Severity::Error) {
            return Ok(());
        }
        let dispatched = self.log(Severity::Error, message, error);
        self.report_crash(error);
        dispatched
    }

    /// Logs at FATAL, runs both report hooks, flushes the log file and terminates
    /// with [`FATAL_EXIT_CODE`].
    ///
    /// With the default [`ProcessExit`] terminator this never returns.
    pub fn fatal(
        &self,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> Result<(), LogifyError> {
        if !self.is_enabled(Severity::Fatal) {
            return Ok(());
        }
        let dispatched = self.log(Severity::Fatal, message, error);
        self.report_crash(error);
        if let Some(bug_report) = &self.bug_report {
            bug_report.report(message, error);
        }
        let flushed = self.flush_file();
        self.terminator.terminate(FATAL_EXIT_CODE);
        dispatched.and(flushed.map_err(LogifyError::from))
    }

    /// Formats and dispatches a record to every sink, without checking the level.
    ///
    /// Every sink receives the record even if an earlier one fails; the first
    /// write error is returned.
    pub fn log(
        &self,
        severity: Severity,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> Result<(), LogifyError> {
        let record = LogRecord::new(severity, message, error);
        self.subscribers.publish(&record.payload());
        let persisted = match lock(&self.file).as_mut() {
            Some(file) => file.regular(&record),
            None => Ok(()),
        };
        let echoed = match &self.stdout {
            Some(stdout) => lock(stdout).regular(&record),
            None => Ok(()),
        };
        Ok(persisted.and(echoed)?)
    }

    fn report_crash(&self, error: Option<&(dyn Error + 'static)>) {
        if let (Some(reporter), Some(error)) = (&self.crash_reporter, error) {
            reporter.report(error);
        }
    }

    fn flush_file(&self) -> io::Result<()> {
        match lock(&self.file).as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Registers a callback receiving every accepted line, with the error trace
    /// appended on a second line when present.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Subscribes a channel. Lines sent after the receiver is dropped are discarded.
    pub fn subscribe_channel(&self) -> (SubscriptionId, Receiver<String>) {
        self.subscribers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Flushes and releases the log file. Further records still reach subscribers
    /// but are no longer persisted. Closing twice, or without a file, does nothing.
    pub fn close(&self) -> Result<(), LogifyError> {
        if let Some(mut file) = lock(&self.file).take() {
            file.flush()?;
        }
        Ok(())
    }

    /// Whether the log file has been released (always true without one).
    pub fn is_closed(&self) -> bool {
        lock(&self.file).is_none()
    }

    /// Installs this logger behind the `log` facade.
    /// The file is then flushed through `log::logger().flush()`.
    pub fn init_global(self) -> Result<(), LogifyError> {
        let max_level = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        Logger::log(self, record.level().into(), &record.args().to_string(), None).ok();
    }

    fn flush(&self) {
        self.flush_file().ok();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close().ok();
    }
}

/// Builder for configuring and creating a [`Logger`].
pub struct ConfigBuilder {
    level: String,
    crash_reporter: Option<Box<dyn CrashReporter>>,
    bug_report: Option<Box<dyn BugReport>>,
    save_to_file: bool,
    file_name: PathBuf,
    terminator: Box<dyn Terminator>,
    stdout: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            level: Severity::default().to_string(),
            crash_reporter: None,
            bug_report: None,
            save_to_file: false,
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            terminator: Box::new(ProcessExit),
            stdout: false,
        }
    }
}

impl ConfigBuilder {
    /// Starts from `LOGIFY_LEVEL`, `LOGIFY_SAVE_TO_FILE`, `LOGIFY_FILE_NAME` and `LOGIFY_STDOUT`.
    pub fn from_env() -> Result<Self, LogifyError> {
        let env = LogifyEnvConfig::load()?;
        Ok(Self {
            level: env.LEVEL,
            save_to_file: env.SAVE_TO_FILE,
            file_name: PathBuf::from(env.FILE_NAME),
            stdout: env.STDOUT,
            ..Self::default()
        })
    }

    /// Opens the log file if requested. Fails on an unknown level name or when
    /// the file cannot be opened.
    pub fn build(self) -> Result<Logger, LogifyError> {
        let Self {
            level,
            crash_reporter,
            bug_report,
            save_to_file,
            file_name,
            terminator,
            stdout,
        } = self;
        let level = level.parse::<Severity>()?;
        let (file_name, file) = if save_to_file {
            let file = LogFile::new(&file_name)?;
            (Some(file_name), Some(file))
        } else {
            (None, None)
        };
        Ok(Logger {
            level,
            file_name,
            file: Mutex::new(file),
            stdout: stdout.then(|| Mutex::new(LogStdout)),
            crash_reporter,
            bug_report,
            terminator,
            subscribers: Subscribers::default(),
        })
    }

    /// Sets the minimum severity.
    pub fn with_level(self, level: Severity) -> Self {
        Self {
            level: level.to_string(),
            ..self
        }
    }
    /// Sets the minimum severity by name, checked in [`ConfigBuilder::build`].
    pub fn with_level_name(self, name: &str) -> Self {
        Self {
            level: name.into(),
            ..self
        }
    }
    pub fn with_crash_reporter<R: CrashReporter + 'static>(self, reporter: R) -> Self {
        Self {
            crash_reporter: Some(Box::new(reporter)),
            ..self
        }
    }
    pub fn with_bug_report<R: BugReport + 'static>(self, bug_report: R) -> Self {
        Self {
            bug_report: Some(Box::new(bug_report)),
            ..self
        }
    }
    /// Enable or disable the log file.
    pub fn save_to_file(self, yes: bool) -> Self {
        Self {
            save_to_file: yes,
            ..self
        }
    }
    /// Sets the log file path. Only used with `save_to_file(true)`.
    pub fn with_file_name<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            file_name: path.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Replaces process exit on FATAL, e.g. to keep a test process alive.
    pub fn with_terminator<T: Terminator + 'static>(self, terminator: T) -> Self {
        Self {
            terminator: Box::new(terminator),
            ..self
        }
    }
    /// Echo records to stdout with colored levels.
    pub fn with_stdout(self, yes: bool) -> Self {
        Self { stdout: yes, ..self }
    }
    pub fn no_stdout(self) -> Self {
        Self {
            stdout: false,
            ..self
        }
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}
