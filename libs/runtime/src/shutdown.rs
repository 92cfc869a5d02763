use anyhow::Result;
use tokio_util::sync::CancellationToken;

/// Resolves on SIGTERM / SIGINT (Ctrl+C on every platform).
pub async fn wait_for_shutdown() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
            _ = tokio::signal::ctrl_c() => {},
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok(())
    }
}

/// Spawn a task that cancels `token` on the first shutdown signal.
pub fn cancel_on_shutdown(token: CancellationToken) {
    tokio::spawn(async move {
        match wait_for_shutdown().await {
            Ok(()) => tracing::info!("shutdown signal received"),
            Err(e) => tracing::warn!(error = %e, "signal handler failed; shutting down"),
        }
        token.cancel();
    });
}
