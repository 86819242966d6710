use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Cancels `token` on Ctrl+C so running views (e.g. a quiz timer) can be
/// torn down.
pub async fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::select! {
        res = signal::ctrl_c() => {
            if let Err(e) = res {
                crate::error::log_error(&e);
                return;
            }
            #[cfg(not(windows))]
            println!();
            tracing::info!("Ctrl+C received, stopping.");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}
