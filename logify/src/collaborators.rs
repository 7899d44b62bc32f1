use std::error::Error;

/// Receives the error attached to ERROR and FATAL records.
pub trait CrashReporter: Send + Sync {
    fn report(&self, error: &(dyn Error + 'static));
}

impl<F> CrashReporter for F
where
    F: Fn(&(dyn Error + 'static)) + Send + Sync,
{
    fn report(&self, error: &(dyn Error + 'static)) {
        self(error)
    }
}

/// Receives the message and error of FATAL records, before the process terminates.
pub trait BugReport: Send + Sync {
    fn report(&self, message: &str, error: Option<&(dyn Error + 'static)>);
}

impl<F> BugReport for F
where
    F: Fn(&str, Option<&(dyn Error + 'static)>) + Send + Sync,
{
    fn report(&self, message: &str, error: Option<&(dyn Error + 'static)>) {
        self(message, error)
    }
}

/// Ends the program after a FATAL record.
///
/// Real implementations do not return. Test doubles may, in which case
/// `Logger::fatal` returns to its caller.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

impl<F> Terminator for F
where
    F: Fn(i32) + Send + Sync,
{
    fn terminate(&self, code: i32) {
        self(code)
    }
}

/// Exits the current process with [`std::process::exit`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code)
    }
}
