use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{CheckResult, CheckSpec};
use crate::ports::{HttpProbe, ResourceSource};

/// Executes one check per call, turning every failure into a `CheckResult`
#[derive(Clone)]
pub struct Sampler {
    http_probe: Arc<dyn HttpProbe>,
    resource_source: Arc<dyn ResourceSource>,
}

impl Sampler {
    pub fn new(http_probe: Arc<dyn HttpProbe>, resource_source: Arc<dyn ResourceSource>) -> Self {
        Self {
            http_probe,
            resource_source,
        }
    }

    pub async fn sample(&self, spec: &CheckSpec) -> CheckResult {
        match spec {
            CheckSpec::HttpEndpoint { url } => {
                let outcome = self.http_probe.get(url).await;
                if let Err(e) = &outcome {
                    debug!(url = url.as_str(), "transport failure: {}", e);
                }
                CheckResult::from_http(outcome)
            }
            CheckSpec::LocalResource { kind } => match self.resource_source.sample(*kind).await {
                Ok(value) => CheckResult::reading(value),
                Err(e) => {
                    warn!(%kind, "Failed to read metric: {}", e);
                    CheckResult::failed(e.to_string())
                }
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::{AlertEvent, HttpReply, ResourceKind, TransportError};
    use crate::ports::{AlertSink, HttpProbe, ResourceSource, SourceError};

    /// Probe replaying scripted outcomes per URL; repeats the last one when exhausted
    #[derive(Default)]
    pub struct ScriptedProbe {
        script: Mutex<HashMap<String, VecDeque<Result<HttpReply, TransportError>>>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedProbe {
        pub fn with(self, url: &str, outcomes: Vec<Result<HttpReply, TransportError>>) -> Self {
            self.script
                .lock()
                .unwrap()
                .insert(url.to_string(), outcomes.into());
            self
        }

        pub fn status(code: u16) -> Result<HttpReply, TransportError> {
            let reason = reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string);
            Ok(HttpReply::new(code, reason))
        }
    }

    #[async_trait]
    impl HttpProbe for ScriptedProbe {
        async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());
            let mut script = self.script.lock().unwrap();
            let queue = script.get_mut(url).expect("unscripted url");
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    /// Source replaying scripted readings per kind
    #[derive(Default)]
    pub struct ScriptedSource {
        script: Mutex<HashMap<ResourceKind, VecDeque<Result<f64, String>>>>,
    }

    impl ScriptedSource {
        pub fn with(self, kind: ResourceKind, readings: Vec<Result<f64, String>>) -> Self {
            self.script.lock().unwrap().insert(kind, readings.into());
            self
        }

        /// Every kind steadily reads `value`
        pub fn steady(value: f64) -> Self {
            ResourceKind::ALL
                .into_iter()
                .fold(Self::default(), |source, kind| source.with(kind, vec![Ok(value)]))
        }
    }

    #[async_trait]
    impl ResourceSource for ScriptedSource {
        async fn sample(&self, kind: ResourceKind) -> Result<f64, SourceError> {
            let mut script = self.script.lock().unwrap();
            let queue = script.get_mut(&kind).expect("unscripted kind");
            let next = if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            };
            next.map_err(SourceError::Parse)
        }
    }

    /// Sink keeping everything in memory
    #[derive(Default)]
    pub struct RecordingSink {
        pub console: Vec<String>,
        pub events: Vec<AlertEvent>,
        pub flushed: bool,
    }

    impl AlertSink for RecordingSink {
        fn console(&mut self, line: &str) {
            self.console.push(line.to_string());
        }

        fn log(&mut self, event: &AlertEvent) {
            self.events.push(event.clone());
        }

        fn flush(&mut self) {
            self.flushed = true;
        }
    }
}
