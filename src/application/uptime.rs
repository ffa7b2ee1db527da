use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tracing::info;

use crate::domain::{AlertEvent, HistoryTracker, Severity, TargetRegistry, TIMESTAMP_FORMAT};
use crate::ports::AlertSink;

use super::{Monitor, Sampler, StopSignal};

/// Outcome of one endpoint within a pass
#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    pub name: String,
    pub up: bool,
    pub status_code: Option<u16>,
    pub reason: Option<String>,
    pub uptime: f64,
}

impl TargetReport {
    pub fn status(&self) -> &'static str {
        if self.up {
            "UP"
        } else {
            "DOWN"
        }
    }

    /// `<name>: <UP|DOWN> (Status Code: .., Reason: .., Uptime: ..%)`
    pub fn message(&self) -> String {
        let status_code = self
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "{}: {} (Status Code: {}, Reason: {}, Uptime: {:.1}%)",
            self.name,
            self.status(),
            status_code,
            self.reason.as_deref().unwrap_or("N/A"),
            self.uptime
        )
    }
}

/// HTTP variant: checks endpoints and tracks rolling uptime
pub struct UptimeMonitor<S: AlertSink> {
    registry: TargetRegistry,
    sampler: Sampler,
    tracker: HistoryTracker,
    sink: S,
    interval: Duration,
}

impl<S: AlertSink> UptimeMonitor<S> {
    pub fn new(
        registry: TargetRegistry,
        sampler: Sampler,
        sink: S,
        interval: Duration,
        history_size: usize,
    ) -> Self {
        let tracker = HistoryTracker::new(registry.names(), history_size);
        Self {
            registry,
            sampler,
            tracker,
            sink,
            interval,
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &HistoryTracker {
        &self.tracker
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// One pass over every endpoint in registration order
    pub async fn check_all(&mut self, stop: &StopSignal) -> Vec<TargetReport> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut reports = Vec::with_capacity(self.registry.len());

        for target in self.registry.iter() {
            if stop.is_stopped() {
                break;
            }
            let result = self.sampler.sample(target.check_spec()).await;
            self.tracker.record(target.name(), result.ok);

            let report = TargetReport {
                name: target.name().to_string(),
                up: result.ok,
                status_code: result.status_code(),
                reason: result.error.clone(),
                uptime: self.tracker.uptime_percentage(target.name()),
            };

            let message = report.message();
            let severity = if report.up { Severity::Info } else { Severity::Error };
            let event = AlertEvent::new(target.name(), message.as_str(), severity);
            let line = format!("[{}] {}", timestamp, message);
            self.sink.emit(&event, Some(line.as_str()));

            reports.push(report);
        }

        reports
    }
}

#[async_trait]
impl<S: AlertSink> Monitor for UptimeMonitor<S> {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn on_start(&mut self) {
        info!(targets = self.registry.len(), "starting uptime monitor");
        let line = format!(
            "Starting health checks (interval: {} seconds)",
            self.interval.as_secs()
        );
        self.sink.console(&line);
    }

    async fn run_pass(&mut self, stop: &StopSignal) {
        self.check_all(stop).await;
    }

    fn on_stop(&mut self, interrupted: bool) {
        if interrupted {
            self.sink.console("\nHealth checking stopped by user");
        }
        self.sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::sampler::fakes::{RecordingSink, ScriptedProbe, ScriptedSource};
    use crate::application::stop_channel;
    use crate::domain::{MonitorTarget, TransportError, DEFAULT_HISTORY_SIZE};

    fn uptime_monitor(probe: ScriptedProbe, targets: Vec<MonitorTarget>) -> UptimeMonitor<RecordingSink> {
        let sampler = Sampler::new(Arc::new(probe), Arc::new(ScriptedSource::default()));
        UptimeMonitor::new(
            TargetRegistry::new(targets).unwrap(),
            sampler,
            RecordingSink::default(),
            Duration::from_secs(300),
            DEFAULT_HISTORY_SIZE,
        )
    }

    #[tokio::test]
    async fn test_uptime_across_cycles() {
        let probe = ScriptedProbe::default().with(
            "http://site",
            vec![
                ScriptedProbe::status(200),
                ScriptedProbe::status(200),
                ScriptedProbe::status(503),
                ScriptedProbe::status(200),
            ],
        );
        let mut monitor = uptime_monitor(probe, vec![MonitorTarget::http("Site", "http://site")]);
        let (_handle, stop) = stop_channel();

        let mut uptimes = Vec::new();
        for _ in 0..4 {
            let reports = monitor.check_all(&stop).await;
            uptimes.push(format!("{:.1}", reports[0].uptime));
        }
        assert_eq!(uptimes, vec!["100.0", "100.0", "66.7", "75.0"]);
    }

    #[tokio::test]
    async fn test_console_and_log_lines() {
        let probe = ScriptedProbe::default()
            .with("http://up", vec![ScriptedProbe::status(200)])
            .with(
                "http://down",
                vec![Err(TransportError::Connect("connection refused".into()))],
            );
        let mut monitor = uptime_monitor(
            probe,
            vec![
                MonitorTarget::http("Main Website", "http://up"),
                MonitorTarget::http("API Server", "http://down"),
            ],
        );
        let (_handle, stop) = stop_channel();
        monitor.check_all(&stop).await;

        let sink = monitor.sink();
        assert_eq!(sink.console.len(), 2);
        assert!(sink.console[0].starts_with('['));
        assert!(sink.console[0]
            .ends_with("] Main Website: UP (Status Code: 200, Reason: OK, Uptime: 100.0%)"));
        assert!(sink.console[1].ends_with(
            "] API Server: DOWN (Status Code: N/A, Reason: Connection failed: connection refused, Uptime: 0.0%)"
        ));

        assert_eq!(sink.events.len(), 2);
        assert_eq!(sink.events[0].severity, Severity::Info);
        assert_eq!(sink.events[0].target_name, "Main Website");
        assert_eq!(sink.events[1].severity, Severity::Error);
        assert!(sink.events[1].message.starts_with("API Server: DOWN"));
    }

    #[tokio::test]
    async fn test_targets_checked_in_registration_order() {
        let probe = Arc::new(
            ScriptedProbe::default()
                .with("http://c", vec![ScriptedProbe::status(200)])
                .with("http://a", vec![ScriptedProbe::status(200)])
                .with("http://b", vec![ScriptedProbe::status(200)]),
        );
        let sampler = Sampler::new(probe.clone(), Arc::new(ScriptedSource::default()));
        let registry = TargetRegistry::new(vec![
            MonitorTarget::http("c", "http://c"),
            MonitorTarget::http("a", "http://a"),
            MonitorTarget::http("b", "http://b"),
        ])
        .unwrap();
        let mut monitor = UptimeMonitor::new(
            registry,
            sampler,
            RecordingSink::default(),
            Duration::from_secs(300),
            DEFAULT_HISTORY_SIZE,
        );
        let (_handle, stop) = stop_channel();
        monitor.check_all(&stop).await;

        assert_eq!(
            *probe.calls.lock().unwrap(),
            vec!["http://c", "http://a", "http://b"]
        );
    }

    #[tokio::test]
    async fn test_stop_skips_remaining_targets() {
        let probe = ScriptedProbe::default().with("http://a", vec![ScriptedProbe::status(200)]);
        let mut monitor = uptime_monitor(probe, vec![MonitorTarget::http("a", "http://a")]);
        let (handle, stop) = stop_channel();
        handle.stop();

        assert!(monitor.check_all(&stop).await.is_empty());
        assert!(monitor.tracker().history("a").is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_messages() {
        let mut monitor = uptime_monitor(ScriptedProbe::default(), vec![]);
        monitor.on_start();
        monitor.on_stop(true);

        let sink = monitor.sink();
        assert_eq!(sink.console[0], "Starting health checks (interval: 300 seconds)");
        assert_eq!(sink.console[1], "\nHealth checking stopped by user");
        assert!(sink.flushed);
    }
}
