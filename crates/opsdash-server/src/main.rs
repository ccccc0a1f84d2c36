use anyhow::Result;
use chrono::Utc;
use opsdash_server::app;
use opsdash_server::config::ServerConfig;
use opsdash_server::state::AppState;
use opsdash_server::templates::TemplateRegistry;
use opsdash_storage::ReportStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  opsdash-server [config.toml]    Start the server");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("opsdash=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("--help" | "-h") => {
            print_usage();
            Ok(())
        }
        other => {
            let config_path = other.unwrap_or("config/server.toml");
            run_server(config_path).await
        }
    }
}

async fn run_server(config_path: &str) -> Result<()> {
    let config = ServerConfig::load(config_path)?;
    tracing::info!(
        http_port = config.http_port,
        templates_dir = %config.templates_dir,
        db = %config.database.redacted_url(),
        "opsdash-server starting"
    );

    // Explicit store lifecycle: constructed here, closed after the server
    // stops. Migrations run inside `ReportStore::new`.
    let store = Arc::new(ReportStore::new(&config.database.connection_url()).await?);
    let templates = Arc::new(TemplateRegistry::new(&config.templates_dir));

    let state = AppState {
        store: store.clone(),
        templates,
        config: Arc::new(config.clone()),
        start_time: Utc::now(),
    };

    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let app = app::build_http_app(state);
    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!(http = %http_addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    if let Err(e) = store.close().await {
        tracing::error!(error = %e, "Failed to close database connection");
    }
    tracing::info!("Server stopped");

    Ok(())
}
