//! Server lifecycle: serve until a shutdown signal, then drain for a bounded grace period.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// After the signal no new connections are accepted. In-flight requests get up to `grace` to
/// finish; past that the call returns anyway and whatever is still running is dropped with
/// the runtime.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (fired_tx, fired_rx) = watch::channel(false);
    let signal = async move {
        shutdown.await;
        tracing::info!("shutting down the server");
        let _ = fired_tx.send(true);
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result,
        _ = grace_deadline(fired_rx, grace) => {
            tracing::warn!(grace_secs = grace.as_secs(), "grace period elapsed, forcing shutdown");
            Ok(())
        }
    }
}

async fn grace_deadline(mut fired: watch::Receiver<bool>, grace: Duration) {
    if fired.wait_for(|v| *v).await.is_err() {
        // Sender gone without firing: the server already returned on its own.
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
