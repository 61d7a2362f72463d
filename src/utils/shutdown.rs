use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Cancels `cancelation` once the process is asked to stop, either with ctrl-c or, on unix, with
/// SIGTERM. Returns early if the token gets cancelled by someone else.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        _ = shutdown_signal() => {
            info!("Received shutdown signal");
            cancelation.cancel();
        },
        _ = cancelation.cancelled() => (),
    };
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                select! {
                    _ = tokio::signal::ctrl_c() => (),
                    _ = terminate.recv() => (),
                };
                return;
            }
            Err(e) => warn!("Can't listen for SIGTERM, only ctrl-c will stop the process {e}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Can't listen for ctrl-c {e}");
        std::future::pending::<()>().await;
    }
}
