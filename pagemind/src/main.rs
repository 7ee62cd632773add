use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagemind::api::{create_router, AppState};
use pagemind::config::Config;
use pagemind::db::{Database, DatabaseBackend, LibSqlBackend};
use pagemind::embeddings::EmbeddingProvider;
use pagemind::llm::LlmClient;

#[derive(Parser)]
#[command(name = "pagemind")]
#[command(about = "Scrape web pages and answer questions about them with a local model")]
struct Args {
    /// Bind address override (defaults to PAGEMIND_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port override (defaults to PAGEMIND_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagemind=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    tracing::info!("Loading embedding model: {}...", config.embeddings.model);
    let embeddings = EmbeddingProvider::new(&config.embeddings)?;

    tracing::info!(
        "Answer model: {} via {}",
        config.llm.model,
        config.llm.base_url
    );
    let llm = LlmClient::new(&config.llm)?;

    let state = AppState::new(config.clone(), db, embeddings, llm);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("pagemind starting on http://{}", addr);
    tracing::info!("  Scrape: POST http://{}/scrape", addr);
    tracing::info!("  Query:  POST http://{}/query", addr);
    tracing::info!("  Health: GET  http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
