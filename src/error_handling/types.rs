use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    InvalidDateRange(String),
    DirectoryDoesNotExist(String),
    NotInRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::InvalidDateRange(e) => write!(f, "Date range error: {}", e),
            ConfigError::DirectoryDoesNotExist(e) => write!(f, "Directory error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

/// A line matched an event pattern but its timestamp or username could not be extracted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    MalformedLine { line: String, reason: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedLine { line, reason } => {
                write!(f, "Malformed line ({}): {:?}", reason, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Fatal conditions raised by the session tracker.
///
/// Every variant aborts the run: once the tracker state is inconsistent the
/// statistics it would produce can no longer be trusted.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    MalformedLine(ParseError),
    OutOfOrderDay {
        previous: NaiveDate,
        requested: NaiveDate,
    },
    NonMonotonicTime {
        day: NaiveDate,
        last_time: NaiveTime,
        found: NaiveTime,
        line: String,
    },
    DoubleJoin {
        username: String,
        day: NaiveDate,
        line: String,
    },
    DayNotStarted,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::MalformedLine(e) => write!(f, "{}", e),
            TrackerError::OutOfOrderDay {
                previous,
                requested,
            } => write!(
                f,
                "Out of order day: {} requested after {} was already processed",
                requested, previous
            ),
            TrackerError::NonMonotonicTime {
                day,
                last_time,
                found,
                line,
            } => write!(
                f,
                "Non monotonic time on {}: {} is earlier than {} in line {:?}",
                day, found, last_time, line
            ),
            TrackerError::DoubleJoin {
                username,
                day,
                line,
            } => write!(
                f,
                "Double join on {}: {} is already online, line {:?}",
                day, username, line
            ),
            TrackerError::DayNotStarted => {
                write!(f, "No day has been started, call begin_day first")
            }
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::MalformedLine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for TrackerError {
    fn from(err: ParseError) -> Self {
        TrackerError::MalformedLine(err)
    }
}

#[derive(Debug)]
pub enum LogSourceError {
    IoError(std::io::Error),
    DirectoryDoesNotExist(String),
    InvalidPattern(String),
    UnreadableFile { path: PathBuf, error: std::io::Error },
}

impl fmt::Display for LogSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSourceError::IoError(e) => write!(f, "Log source IO error: {}", e),
            LogSourceError::DirectoryDoesNotExist(e) => write!(f, "Log directory error: {}", e),
            LogSourceError::InvalidPattern(e) => write!(f, "Log file pattern error: {}", e),
            LogSourceError::UnreadableFile { path, error } => {
                write!(f, "Unable to read log file {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for LogSourceError {}

impl From<std::io::Error> for LogSourceError {
    fn from(err: std::io::Error) -> Self {
        LogSourceError::IoError(err)
    }
}

#[derive(Debug)]
pub enum ReportError {
    IoError(std::io::Error),
    SerializationError(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::IoError(e) => write!(f, "Report IO error: {}", e),
            ReportError::SerializationError(e) => write!(f, "Report serialization error: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::IoError(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::SerializationError(err.to_string())
    }
}

#[derive(Debug)]
pub enum AnalysisError {
    ConfigurationError(ConfigError),
    LogSourceError(LogSourceError),
    Tracker {
        file: PathBuf,
        line_number: usize,
        source: TrackerError,
    },
    ReportError(ReportError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            AnalysisError::LogSourceError(e) => write!(f, "Log source error: {}", e),
            AnalysisError::Tracker {
                file,
                line_number,
                source,
            } => write!(f, "{}:{}: {}", file.display(), line_number, source),
            AnalysisError::ReportError(e) => write!(f, "Report error: {}", e),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<ConfigError> for AnalysisError {
    fn from(err: ConfigError) -> Self {
        AnalysisError::ConfigurationError(err)
    }
}

impl From<LogSourceError> for AnalysisError {
    fn from(err: LogSourceError) -> Self {
        AnalysisError::LogSourceError(err)
    }
}

impl From<ReportError> for AnalysisError {
    fn from(err: ReportError) -> Self {
        AnalysisError::ReportError(err)
    }
}
