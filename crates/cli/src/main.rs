use clap::Parser;
use ferrous_watch_api::AppState;
use ferrous_watch_domain::CliOverrides;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-watch")]
#[command(version)]
#[command(about = "Ferrous Watch - response caching, rate limiting and health monitoring for HTTP services")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config)?;

    info!("Starting Ferrous Watch v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config).await?;

    let services = di::ObservabilityServices::new(&config, pool)?;
    let app_state = AppState::new(
        services.context.clone(),
        services.analysis_database.clone(),
        &config,
    );

    let shutdown = CancellationToken::new();
    di::build_job_runner(&config, &services.context, shutdown.clone())
        .start()
        .await;

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    server::start_web_server(web_addr, app_state, &config.compression, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
