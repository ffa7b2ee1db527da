use std::fmt;

use chrono::{DateTime, Local};

/// Timestamp layout shared by console and log output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message bound for the alert/log sink
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub timestamp: DateTime<Local>,
    pub target_name: String,
    pub message: String,
    pub severity: Severity,
}

impl AlertEvent {
    pub fn new(target_name: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Local::now(),
            target_name: target_name.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `<timestamp> - <LEVEL> - <message>`
    pub fn log_line(&self) -> String {
        format!("{} - {} - {}", self.formatted_timestamp(), self.severity, self.message)
    }
}
