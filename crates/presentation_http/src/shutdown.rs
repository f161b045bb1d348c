//! Serving with graceful shutdown
//!
//! In-flight requests get a bounded window to finish once a shutdown
//! signal arrives; anything still open after that is abandoned.

use std::{io, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};

/// Serve `app` until `shutdown` resolves, then drain for at most `timeout`
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, draining_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("⏳ Waiting up to {:?} for connections to close...", timeout);
            let _ = draining_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    // The deadline starts when the signal fires, not when serving starts
    tokio::select! {
        result = &mut server => result,
        Ok(()) = draining_rx => {
            match tokio::time::timeout(timeout, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?timeout, "Connections still open after shutdown timeout, exiting anyway");
                    Ok(())
                },
            }
        }
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
