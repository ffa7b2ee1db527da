use std::fmt;

use thiserror::Error;

/// Response received from an HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub reason: Option<String>,
}

impl HttpReply {
    pub fn new(status: u16, reason: Option<String>) -> Self {
        Self { status, reason }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure below the HTTP layer: nothing was received
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Diagnostic value attached to a check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckDetail {
    StatusCode(u16),
    Value(f64),
}

impl fmt::Display for CheckDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusCode(code) => write!(f, "{}", code),
            Self::Value(value) => f.write_str(&format_metric(*value)),
        }
    }
}

/// Outcome of one check, consumed immediately by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub ok: bool,
    pub detail: Option<CheckDetail>,
    pub error: Option<String>,
}

impl CheckResult {
    /// Classify an HTTP probe outcome. A reply is up only for 2xx statuses;
    /// the reason phrase is carried in `error` either way.
    pub fn from_http(outcome: Result<HttpReply, TransportError>) -> Self {
        match outcome {
            Ok(reply) => Self {
                ok: reply.is_success(),
                detail: Some(CheckDetail::StatusCode(reply.status)),
                error: reply.reason,
            },
            Err(e) => Self::failed(e.to_string()),
        }
    }

    pub fn reading(value: f64) -> Self {
        Self {
            ok: true,
            detail: Some(CheckDetail::Value(value)),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: None,
            error: Some(error.into()),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.detail {
            Some(CheckDetail::StatusCode(code)) => Some(code),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self.detail {
            Some(CheckDetail::Value(value)) => Some(value),
            _ => None,
        }
    }
}

/// Round a metric to one decimal place
pub fn round_metric(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render a metric with at most one decimal and no trailing `.0`
pub fn format_metric(value: f64) -> String {
    let rounded = round_metric(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}
