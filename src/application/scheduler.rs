use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::StopSignal;

/// A monitor variant driven by the scheduler
#[async_trait]
pub trait Monitor: Send {
    /// Idle time between the end of one pass and the start of the next
    fn interval(&self) -> Duration;

    fn on_start(&mut self) {}

    /// Check every target once. Implementations look at `stop` between targets.
    async fn run_pass(&mut self, stop: &StopSignal);

    /// Called exactly once when the scheduler stops
    fn on_stop(&mut self, interrupted: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Fixed-delay loop: pass, idle for the interval, repeat until stopped
pub struct Scheduler<M: Monitor> {
    monitor: M,
    stop: StopSignal,
    state: SchedulerState,
    passes: u64,
}

impl<M: Monitor> Scheduler<M> {
    pub fn new(monitor: M, stop: StopSignal) -> Self {
        Self {
            monitor,
            stop,
            state: SchedulerState::Running,
            passes: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[cfg(test)]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    #[cfg(test)]
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// Run until a stop is requested
    pub async fn run(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.monitor.on_start();

        loop {
            if self.stop.is_stopped() {
                break;
            }
            self.pass().await;
            if self.stop.is_stopped() {
                break;
            }

            let interval = self.monitor.interval();
            debug!(?interval, "idling until next pass");
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = self.stop.stopped() => {}
            }
        }

        self.finish(true);
    }

    /// Run a single pass and stop
    pub async fn run_once(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.monitor.on_start();
        self.pass().await;
        let interrupted = self.stop.is_stopped();
        self.finish(interrupted);
    }

    async fn pass(&mut self) {
        self.monitor.run_pass(&self.stop).await;
        self.passes += 1;
        debug!(passes = self.passes, "pass complete");
    }

    fn finish(&mut self, interrupted: bool) {
        self.state = SchedulerState::Stopped;
        info!(passes = self.passes, "scheduler stopped");
        self.monitor.on_stop(interrupted);
    }
}
