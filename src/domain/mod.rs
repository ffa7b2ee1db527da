pub mod alert;
pub mod check;
pub mod history;
pub mod target;
pub mod threshold;

pub use alert::{AlertEvent, Severity, TIMESTAMP_FORMAT};
pub use check::{format_metric, round_metric, CheckResult, HttpReply, TransportError};
pub use history::{HistoryTracker, DEFAULT_HISTORY_SIZE};
pub use target::{CheckSpec, MonitorTarget, RegistryError, ResourceKind, TargetRegistry};
pub use threshold::{evaluate, ThresholdPolicy};
