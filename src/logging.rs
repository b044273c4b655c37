/// Structured logging for the flood awareness service
///
/// Provides context-rich logging with subsystem and sensor identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for long-running `watch` sessions.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl LogLevel {
    /// Parse a level name from configuration. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<LogLevel> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Subsystems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subsystem {
    Sensors,
    Alerts,
    Reports,
    Registry,
    Config,
    System,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subsystem::Sensors => write!(f, "SENSORS"),
            Subsystem::Alerts => write!(f, "ALERTS"),
            Subsystem::Reports => write!(f, "REPORTS"),
            Subsystem::Registry => write!(f, "REGISTRY"),
            Subsystem::Config => write!(f, "CONFIG"),
            Subsystem::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - e.g. a data file not created yet
    Expected,
    /// Unexpected failure - corrupt table or permission problem
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn log(&self, level: LogLevel, subsystem: &Subsystem, sensor_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let id_part = sensor_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!("{} {} {}{}: {}", timestamp, level, subsystem, id_part, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", subsystem, id_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", subsystem, id_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&Path>, console_timestamps: bool) {
    Logger::init(
        min_level,
        log_file.map(|p| p.display().to_string()),
        console_timestamps,
    );
}

fn dispatch(level: LogLevel, subsystem: Subsystem, sensor_id: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, &subsystem, sensor_id, message);
        }
    }
}

/// Log a general informational message
pub fn info(subsystem: Subsystem, sensor_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, subsystem, sensor_id, message);
}

/// Log a warning message
pub fn warn(subsystem: Subsystem, sensor_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, subsystem, sensor_id, message);
}

/// Log an error message
pub fn error(subsystem: Subsystem, sensor_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, subsystem, sensor_id, message);
}

/// Log a debug message
pub fn debug(subsystem: Subsystem, sensor_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, subsystem, sensor_id, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a data file failure.
///
/// A missing file is expected on a fresh data directory (`init` creates it);
/// a malformed row or a permission error means someone edited the table by
/// hand or the deployment is broken.
pub fn classify_store_failure(err: &StoreError) -> FailureType {
    match err {
        StoreError::Io { source, .. } => match source.kind() {
            std::io::ErrorKind::NotFound => FailureType::Expected,
            std::io::ErrorKind::PermissionDenied => FailureType::Unexpected,
            _ => FailureType::Unknown,
        },
        StoreError::Csv { .. } => FailureType::Unexpected,
    }
}

/// Log a data file failure with automatic classification
pub fn log_store_failure(subsystem: Subsystem, operation: &str, err: &StoreError) {
    let failure_type = classify_store_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(subsystem, None, &message),
        FailureType::Unexpected => error(subsystem, None, &message),
        FailureType::Unknown => warn(subsystem, None, &message),
    }
}

// ---------------------------------------------------------------------------
// Cycle Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a `watch` session
pub fn log_watch_summary(cycles: usize, alerts_raised: usize, high_alerts: usize) {
    let message = format!(
        "Watch complete: {} cycles, {} alerts raised ({} HIGH)",
        cycles, alerts_raised, high_alerts
    );

    if high_alerts > 0 {
        error(Subsystem::Alerts, None, &message);
    } else if alerts_raised > 0 {
        warn(Subsystem::Alerts, None, &message);
    } else {
        info(Subsystem::System, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse(" WARN "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_failure_classification() {
        let missing = StoreError::Io {
            path: PathBuf::from("sensors.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(classify_store_failure(&missing), FailureType::Expected);

        let denied = StoreError::Io {
            path: PathBuf::from("alerts.csv"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(classify_store_failure(&denied), FailureType::Unexpected);
    }
}
