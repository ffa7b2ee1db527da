use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Create a linked stop handle and signal
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopSignal { rx })
}

/// Requests cooperative cancellation of the scheduler
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes a stop request at the scheduler's cancellation points
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once a stop was requested. Never resolves if every handle is
    /// dropped without stopping.
    pub async fn stopped(&mut self) {
        let closed = self.rx.wait_for(|stopped| *stopped).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

/// Turn operator interrupts into stop requests.
///
/// The first interrupt stops the scheduler cooperatively. The second one
/// returns `Ok(())` so the caller can abort without waiting for an in-flight
/// check. Returns the error if the interrupt source fails.
pub async fn forward_interrupts<F, Fut>(handle: StopHandle, mut interrupt: F) -> io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    interrupt().await?;
    info!("Interrupt received, stopping after the current check");
    handle.stop();

    interrupt().await?;
    info!("Second interrupt received, aborting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Notify;

    use super::*;

    #[tokio::test]
    async fn test_stop_is_observed() {
        let (handle, mut signal) = stop_channel();
        assert!(!signal.is_stopped());

        handle.stop();
        assert!(signal.is_stopped());
        tokio::time::timeout(Duration::from_secs(1), signal.stopped())
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_stops() {
        let (handle, mut signal) = stop_channel();
        drop(handle);
        let waited = tokio::time::timeout(Duration::from_secs(5), signal.stopped()).await;
        assert!(waited.is_err());
        assert!(!signal.is_stopped());
    }

    #[tokio::test]
    async fn test_first_interrupt_stops_second_returns() {
        let notify = Arc::new(Notify::new());
        let (handle, mut signal) = stop_channel();

        let source = notify.clone();
        let task = tokio::spawn(forward_interrupts(handle, move || {
            let source = source.clone();
            async move {
                source.notified().await;
                Ok(())
            }
        }));

        notify.notify_one();
        tokio::time::timeout(Duration::from_secs(1), signal.stopped())
            .await
            .unwrap();
        assert!(signal.is_stopped());
        assert!(!task.is_finished());

        notify.notify_one();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_interrupt_source_does_not_stop() {
        let (handle, signal) = stop_channel();
        let result = forward_interrupts(handle, || async {
            Err(io::Error::new(io::ErrorKind::Other, "no signal handler"))
        })
        .await;

        assert!(result.is_err());
        assert!(!signal.is_stopped());
    }
}
