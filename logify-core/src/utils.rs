use std::{error::Error, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::severity::Severity;

/// Timestamp in the `YYYY-MM-DDTHH:MM:SS.mmmZ` form.
pub fn timestamp_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Renders an error and its `source()` chain as a single quoted, escaped line.
pub fn render_trace(error: &(dyn Error + 'static)) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(&format!("\n    caused by: {cause}"));
        source = cause.source();
    }
    format!("{chain:?}")
}

/// Escapes backslashes and line breaks so a message always fits on one line.
fn escape_message(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn unescape_message(escaped: &str) -> String {
    let mut message = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            message.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => message.push('\n'),
            Some('r') => message.push('\r'),
            Some('\\') => message.push('\\'),
            Some(other) => {
                message.push('\\');
                message.push(other);
            }
            None => message.push('\\'),
        }
    }
    message
}

/// A record accepted by the severity gate, formatted once and handed to every sink.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: String,
    pub severity: Severity,
    pub message: String,
    pub trace: Option<String>,
}

impl LogRecord {
    pub fn new(severity: Severity, message: &str, error: Option<&(dyn Error + 'static)>) -> Self {
        Self {
            timestamp: timestamp_now(),
            severity,
            message: message.to_string(),
            trace: error.map(render_trace),
        }
    }

    /// `<timestamp> [<SEVERITY>] <message>`, with line breaks in the message escaped.
    pub fn line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp,
            self.severity,
            escape_message(&self.message)
        )
    }

    pub fn colored_line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp,
            self.severity.colored(),
            escape_message(&self.message)
        )
    }

    /// The line, followed by the trace on its own line when an error was attached.
    pub fn payload(&self) -> String {
        match &self.trace {
            Some(trace) => format!("{}\n{trace}", self.line()),
            None => self.line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub trace: Option<String>,
}

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(\S+) \[(DEBUG|INFO|WARN|ERROR|FATAL)\] ([^\n]*)(?:\n("(?:[^"\\]|\\.)*"))?$"#,
    )
    .expect("line pattern is valid")
});

/// Parses a subscriber payload or a file record back into its parts.
pub fn parse_line(payload: &str) -> Option<ParsedLine> {
    let captures = LINE_PATTERN.captures(payload)?;
    let timestamp = DateTime::parse_from_rfc3339(&captures[1])
        .ok()?
        .with_timezone(&Utc);
    let severity = captures[2].parse().ok()?;
    Some(ParsedLine {
        timestamp,
        severity,
        message: unescape_message(&captures[3]),
        trace: captures.get(4).map(|m| m.as_str().to_string()),
    })
}
