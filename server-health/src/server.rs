//! axumサーバー起動・シャットダウンハンドリング

use crate::shutdown::ShutdownController;
use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// 指定アドレスにバインドしてサーバーを起動する
pub async fn run(app: Router, bind_addr: &str, shutdown: ShutdownController) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    serve(app, listener, shutdown).await
}

/// バインド済みのリスナーでサーバーを起動し、シャットダウンシグナルを待機する
pub async fn serve(
    app: Router,
    listener: TcpListener,
    shutdown: ShutdownController,
) -> anyhow::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Health server listening on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
}
