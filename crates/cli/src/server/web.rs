use axum::Router;
use ferrous_watch_api::{create_api_routes, AppState};
use ferrous_watch_domain::config::CompressionConfig;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::compression::{
    predicate::{DefaultPredicate, Predicate, SizeAbove},
    CompressionLayer, CompressionLevel,
};
use tracing::info;

pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    compression: &CompressionConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        health_url = format!("http://{}/health", bind_addr),
        metrics_url = format!("http://{}/metrics", bind_addr),
        compression = compression.enabled,
        "Starting web server"
    );

    let app = create_app(state, compression);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Web server started successfully");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await?;

    Ok(())
}

fn create_app(state: AppState, compression: &CompressionConfig) -> Router {
    let app = create_api_routes(state);
    if !compression.enabled {
        return app;
    }

    let predicate = DefaultPredicate::new().and(SizeAbove::new(compression.threshold));
    app.layer(
        CompressionLayer::new()
            .quality(CompressionLevel::Precise(i32::from(compression.level)))
            .compress_when(predicate),
    )
}

/// Resolves on Ctrl-C or SIGTERM and cancels the background jobs.
async fn shutdown_signal(jobs: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, stopping server and background jobs");
    jobs.cancel();
}
