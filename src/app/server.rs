use crate::app::routes::build_router;
use crate::app::state::AppState;
use crate::config::GatewayConfig;
use crate::utils::error::Result;
use tokio::net::TcpListener;

/// Binds the configured address and serves until Ctrl-C / SIGTERM.
pub async fn serve(config: &GatewayConfig, state: AppState) -> Result<()> {
    let app = build_router(state, config.server.body_limit_bytes);

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        "PowerOn gateway listening on {}, forwarding to {}",
        listener.local_addr()?,
        config.poweron.url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PowerOn gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
