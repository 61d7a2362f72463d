use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::engine::ProgressEngine;

/// How often progress is recomputed while somebody is looking at it.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically refreshes a [ProgressEngine] until stopped. Start it when a view becomes visible
/// and stop it when the view goes away. Dropping the task also cancels it.
pub struct RefreshTask {
    shutdown: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Spawns the refresh loop on the current tokio runtime.
    pub fn start(engine: ProgressEngine, interval: Duration) -> Self {
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(run_refresh_loop(engine, interval, shutdown.clone()));
        info!("Started progress refresh every {interval:?}");
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the loop and waits until it has exited.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Refresh task ended abnormally {e:?}");
            }
        }
        info!("Stopped progress refresh");
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_refresh_loop(engine: ProgressEngine, interval: Duration, shutdown: CancellationToken) {
    let clock = engine.clock();
    let mut refresh_point = clock.instant();
    loop {
        // Deadlines are absolute so slow refreshes don't push later ones back.
        refresh_point += interval;

        tokio::select! {
            _ = shutdown.cancelled() => {
                return;
            }
            _ = clock.sleep_until(refresh_point) => ()
        }

        let snapshot = engine.refresh();
        debug!("Periodic refresh at {}", snapshot.computed_at);
    }
}
