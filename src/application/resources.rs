use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::info;

use crate::domain::{
    evaluate, format_metric, AlertEvent, CheckSpec, ResourceKind, Severity, TargetRegistry,
    ThresholdPolicy,
};
use crate::ports::AlertSink;

use super::{Monitor, Sampler, StopSignal};

/// Readings gathered in one pass; `None` marks a failed read
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub timestamp: DateTime<Local>,
    pub readings: Vec<(ResourceKind, Option<f64>)>,
    pub alerts: Vec<String>,
}

impl ResourceSnapshot {
    #[cfg(test)]
    pub fn get(&self, kind: ResourceKind) -> Option<f64> {
        self.readings
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, value)| *value)
    }

    /// `CPU: x%, Memory: y%, Disk: z%, Processes: n`
    pub fn summary(&self) -> String {
        self.readings
            .iter()
            .map(|(kind, value)| match value {
                Some(v) => format!("{}: {}{}", kind.summary_label(), format_metric(*v), kind.unit()),
                None => format!("{}: N/A", kind.summary_label()),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resource variant: samples OS metrics and alerts on threshold breaches
pub struct ResourceMonitor<S: AlertSink> {
    registry: TargetRegistry,
    sampler: Sampler,
    policy: ThresholdPolicy,
    sink: S,
    interval: Duration,
}

impl<S: AlertSink> ResourceMonitor<S> {
    pub fn new(sampler: Sampler, policy: ThresholdPolicy, sink: S, interval: Duration) -> Self {
        Self {
            registry: TargetRegistry::local_resources(),
            sampler,
            policy,
            sink,
            interval,
        }
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn alert(&mut self, kind: ResourceKind, message: &str) {
        let event = AlertEvent::new(kind.as_str(), message, Severity::Warning);
        let line = format!("ALERT: {}", message);
        self.sink.emit(&event, Some(line.as_str()));
    }

    /// Sample every resource, alert per breach, then log the summary
    pub async fn monitor(&mut self, stop: &StopSignal) -> ResourceSnapshot {
        let mut snapshot = ResourceSnapshot {
            timestamp: Local::now(),
            readings: Vec::with_capacity(self.registry.len()),
            alerts: Vec::new(),
        };

        let targets: Vec<(String, ResourceKind)> = self
            .registry
            .iter()
            .filter_map(|t| match t.check_spec() {
                CheckSpec::LocalResource { kind } => Some((t.name().to_string(), *kind)),
                CheckSpec::HttpEndpoint { .. } => None,
            })
            .collect();

        for (name, kind) in targets {
            if stop.is_stopped() {
                return snapshot;
            }
            let result = self.sampler.sample(&CheckSpec::LocalResource { kind }).await;

            match result.value().filter(|_| result.ok) {
                Some(value) => {
                    if evaluate(kind, value, &self.policy) {
                        let message =
                            format!("{}: {}{}", kind.alert_label(), format_metric(value), kind.unit());
                        self.alert(kind, &message);
                        snapshot.alerts.push(message);
                    }
                    snapshot.readings.push((kind, Some(value)));
                }
                None => {
                    let message = format!(
                        "Failed to read {} metric: {}",
                        kind,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                    self.sink.log(&AlertEvent::new(name, message, Severity::Error));
                    snapshot.readings.push((kind, None));
                }
            }
        }

        let summary = snapshot.summary();
        self.sink
            .log(&AlertEvent::new("system", summary, Severity::Info).with_timestamp(snapshot.timestamp));
        snapshot
    }
}

#[async_trait]
impl<S: AlertSink> Monitor for ResourceMonitor<S> {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn on_start(&mut self) {
        info!(policy = ?self.policy, "starting resource monitor");
    }

    async fn run_pass(&mut self, stop: &StopSignal) {
        self.monitor(stop).await;
    }

    fn on_stop(&mut self, interrupted: bool) {
        if interrupted {
            self.sink.console("\nMonitoring stopped by user");
        }
        self.sink.flush();
    }
}
