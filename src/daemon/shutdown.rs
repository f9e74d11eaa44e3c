use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Waits for Ctrl-C (or SIGTERM on unix) and cancels the token.
///
/// On Windows detached processes can't detect signals sent to them, so `breakwatch stop` ends
/// them forcefully.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                select! {
                    _ = tokio::signal::ctrl_c() => (),
                    _ = terminate.recv() => (),
                    _ = cancelation.cancelled() => return,
                }
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM {e:?}");
                select! {
                    _ = tokio::signal::ctrl_c() => (),
                    _ = cancelation.cancelled() => return,
                }
            }
        }
    }
    #[cfg(not(unix))]
    {
        select! {
            _ = tokio::signal::ctrl_c() => (),
            _ = cancelation.cancelled() => return,
        }
    }

    info!("Shutdown requested");
    cancelation.cancel();
}
