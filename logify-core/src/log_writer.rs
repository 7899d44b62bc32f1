use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::utils::LogRecord;

/// Written once each time a log file is opened, to set sessions apart.
pub const SESSION_SEPARATOR: &str = "\n\n\n";

pub trait LogWriter {
    fn regular(&mut self, record: &LogRecord) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Append-only, buffered log file.
pub struct LogFile {
    path: PathBuf,
    file: BufWriter<File>,
}

impl LogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::options().create(true).append(true).open(&path)?;
        let mut file = BufWriter::new(file);
        file.write_all(SESSION_SEPARATOR.as_bytes())?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, record: &LogRecord) -> io::Result<()> {
        writeln!(self.file, "{}", record.line())?;
        if let Some(trace) = &record.trace {
            writeln!(self.file, "{trace}")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Echoes records to stdout with a colored severity tag.
#[derive(Default, Debug)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&mut self, record: &LogRecord) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", record.colored_line())?;
        if let Some(trace) = &record.trace {
            writeln!(stdout, "{trace}")?;
        }
        stdout.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn test_log_file() {
        let path = "/tmp/logify_test_log_file.log";
        std::fs::remove_file(path).ok();
        let mut log_file = LogFile::new(path).unwrap();
        let error = io::Error::other("disk unplugged");
        log_file
            .regular(&LogRecord::new(Severity::Info, "Hello, world!", None))
            .unwrap();
        log_file
            .regular(&LogRecord::new(Severity::Error, "write failed", Some(&error)))
            .unwrap();
        log_file.flush().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content[SESSION_SEPARATOR.len()..].lines().collect();
        assert!(content.starts_with(SESSION_SEPARATOR));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[INFO] Hello, world!"));
        assert!(lines[1].ends_with("[ERROR] write failed"));
        assert_eq!(lines[2], "\"disk unplugged\"");
    }

    #[test]
    fn test_log_file_appends_across_sessions() {
        let path = "/tmp/logify_test_log_file_sessions.log";
        std::fs::remove_file(path).ok();
        for message in ["first", "second"] {
            let mut log_file = LogFile::new(path).unwrap();
            log_file
                .regular(&LogRecord::new(Severity::Warn, message, None))
                .unwrap();
            log_file.flush().unwrap();
        }
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.matches(SESSION_SEPARATOR).count(), 2);
        assert!(content.find("[WARN] first").unwrap() < content.find("[WARN] second").unwrap());
    }

    #[test]
    fn test_log_stdout() {
        let mut log_stdout = LogStdout;
        log_stdout
            .regular(&LogRecord::new(Severity::Debug, "lorem ipsum", None))
            .unwrap();
        log_stdout.flush().unwrap();
    }
}
