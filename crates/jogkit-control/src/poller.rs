//! Periodic position refresh
//!
//! Drives [`PositionDisplaySync::refresh`] from a tokio task, the way a
//! machine status poll would. Each refresh runs on the blocking pool because
//! the driver's position read has no latency guarantee.

use crate::display::PositionDisplaySync;
use jogkit_core::MotionDriver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest accepted polling period
pub const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running position poller
///
/// Dropping the handle stops the poller after its current refresh.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown_tx: Option<mpsc::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop polling and wait for the task to finish
    pub async fn stop(mut self) {
        self.shutdown_tx.take();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Position poller task failed: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        // Closing the channel ends the loop; the task is left to wind down.
        self.shutdown_tx.take();
    }
}

/// Start refreshing `sync` every `period`
///
/// Must be called from within a tokio runtime. Ticks missed while a slow
/// refresh is running are skipped, not bunched up.
pub fn spawn_position_poller<D>(
    sync: Arc<PositionDisplaySync<D>>,
    period: Duration,
) -> PollerHandle
where
    D: MotionDriver + 'static,
{
    let period = period.max(MIN_POLL_PERIOD);
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::debug!("Position poller started ({:?})", period);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    let sync = sync.clone();
                    if let Err(e) = tokio::task::spawn_blocking(move || sync.refresh()).await {
                        tracing::error!("Position refresh failed: {}", e);
                        break;
                    }
                }
            }
        }

        tracing::debug!("Position poller stopped");
    });

    PollerHandle {
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    }
}
