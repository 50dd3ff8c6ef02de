use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "esgate-server")]
#[command(about = "REST gateway for Elasticsearch")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "esgate.toml")]
    config: String,

    /// Host to bind to (overrides the configured bind address)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the configured bind address)
    #[arg(short, long)]
    port: Option<u16>,
}

fn resolve_bind_addr(configured: &str, host: Option<String>, port: Option<u16>) -> String {
    let (cfg_host, cfg_port) = configured
        .rsplit_once(':')
        .map(|(h, p)| (h.to_string(), p.to_string()))
        .unwrap_or_else(|| (configured.to_string(), "8080".to_string()));

    let host = host.unwrap_or(cfg_host);
    match port {
        Some(port) => format!("{host}:{port}"),
        None => format!("{host}:{cfg_port}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,esgate=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Config file: {}", args.config);

    // Load config
    let config = esgate::config::Config::load_or_create(std::path::Path::new(&args.config))?;
    let addr = resolve_bind_addr(&config.server.bind_addr, args.host, args.port);

    tracing::info!("Elasticsearch node: {}", config.elastic.node);

    // Wire up the client and service
    let client = Arc::new(esgate::client::ElasticClient::new(&config.elastic)?);
    let service = Arc::new(esgate::service::IndexService::new(
        client,
        config.request.clone(),
    ));
    let app = esgate::gateway_router(service);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
