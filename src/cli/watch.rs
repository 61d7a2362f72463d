use std::time::Duration;

use tokio::select;
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::progress::{
    engine::{ProgressEngine, ProgressSnapshot},
    refresh::RefreshTask,
};

/// Refreshes `engine` every `interval` and hands each published snapshot to `emit`, starting with
/// the current one. Returns once `shutdown` is cancelled.
pub async fn watch_progress(
    engine: ProgressEngine,
    interval: Duration,
    shutdown: CancellationToken,
    mut emit: impl FnMut(&ProgressSnapshot),
) {
    let task = RefreshTask::start(engine.clone(), interval);
    let mut updates = WatchStream::new(engine.subscribe());

    loop {
        select! {
            _ = shutdown.cancelled() => break,
            snapshot = updates.next() => match snapshot {
                Some(snapshot) => emit(&snapshot),
                None => break,
            }
        }
    }

    info!("Stopping watch");
    task.stop().await;
}
