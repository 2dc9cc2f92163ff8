//! Process-wide tracing setup.
//!
//! stdout carries the feedback message, so log lines go to stderr and,
//! when available, to a log file in the workflow cache directory.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tfmt, reload, EnvFilter, Registry};

use crate::error::{UnknownLogLevel, WorkflowError};

pub const LOG_FILE_NAME: &str = "workflow.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Name stored in the workflow configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directive())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// Keeps the file writer alive and lets the level change after start-up.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    _guard: Option<WorkerGuard>,
}

impl LogHandle {
    pub fn set_level(&self, level: LogLevel) -> Result<(), WorkflowError> {
        self.filter
            .reload(level.filter())
            .map_err(|e| WorkflowError::Logging(e.to_string()))
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("file", &self._guard.is_some())
            .finish()
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: LogLevel, log_file: Option<&Path>) -> Result<LogHandle, WorkflowError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level.filter());
    let (filter, handle) = reload::Layer::new(env_filter);

    let (file_layer, guard) = match log_file.and_then(|p| Some((p.parent()?, p.file_name()?))) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tfmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tfmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| WorkflowError::Logging(e.to_string()))?;

    Ok(LogHandle {
        filter: handle,
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_names() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" Error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!(
            "loud".parse::<LogLevel>().unwrap_err().to_string(),
            "unknown log level \"loud\""
        );
    }

    #[test]
    fn round_trips_through_config_name() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }
}
