use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

#[derive(Debug, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

impl LogOutput {
    /// `stdout` selects stdout, anything else stderr
    pub fn from_target(target: Option<&str>) -> Self {
        match target {
            Some(t) if t.eq_ignore_ascii_case("stdout") => LogOutput::Stdout,
            _ => LogOutput::Stderr,
        }
    }
}

/// `log` backend writing to a standard stream and optionally a file
pub struct Logger {
    pub write_to_std: Option<LogOutput>,
    pub severity: Level,
    pub file: Option<Arc<Mutex<File>>>,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger. The file, if any, is opened in append mode.
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_std: Option<LogOutput>,
        enable_colors: bool,
    ) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()
                .map(|f| Arc::new(Mutex::new(f)))
        });

        Logger {
            write_to_std,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    /// Current UTC time as HH:MM:SS
    fn get_timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_default()
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[36m",  // Cyan
            Level::Debug => "\x1b[35m", // Magenta
            Level::Trace => "\x1b[37m", // White
        }
    }

    fn format_line(&self, record: &Record, colored: bool) -> String {
        let timestamp = Self::get_timestamp();
        let level_str = record.level().as_str();
        let args = record.args();
        if colored {
            let color = Self::get_color(record.level());
            format!("{color}[{timestamp}] {level_str}\x1b[0m {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        }
    }

    /// Initialize logger with environment variables
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("WIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let file_path = std::env::var("WIKI_LOG_FILE").ok().map(PathBuf::from);
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let output = LogOutput::from_target(std::env::var("WIKI_LOG_TARGET").ok().as_deref());

        let logger = Logger::new(file_path, Some(severity), Some(output), enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if let Some(write_to_std) = &self.write_to_std {
            let line = self.format_line(record, self.enable_colors);
            let _ = match write_to_std {
                LogOutput::Stdout => std::io::stdout().write_all(line.as_bytes()),
                LogOutput::Stderr => std::io::stderr().write_all(line.as_bytes()),
            };
        }

        // Files never get colors
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.write_all(self.format_line(record, false).as_bytes());
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_target_selection() {
        assert_eq!(LogOutput::from_target(Some("stdout")), LogOutput::Stdout);
        assert_eq!(LogOutput::from_target(Some("STDOUT")), LogOutput::Stdout);
        assert_eq!(LogOutput::from_target(Some("stderr")), LogOutput::Stderr);
        assert_eq!(LogOutput::from_target(None), LogOutput::Stderr);
    }

    #[test]
    fn writes_plain_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("wiki.log");
        let logger = Logger::new(Some(path.clone()), Some(Level::Info), None, true);

        logger.log(&Record::builder().level(Level::Info).args(format_args!("saved page")).build());
        logger.log(&Record::builder().level(Level::Debug).args(format_args!("hidden")).build());
        logger.flush();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.ends_with("] INFO saved page\n"));
        assert!(!written.contains('\x1b'));
    }
}
