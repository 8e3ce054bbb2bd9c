//! readlog-ui - Reading log web service
//!
//! A child enters a book title, date and write-up; the service asks a hosted
//! model for a reference summary, a 1-10 rating and an explanation, appends
//! the result to a JSON file and charts ratings over time.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use readlog_common::config::{data_file_path, load_config, resolve_openai_api_key, resolve_root_folder};
use readlog_common::{EntryStore, JsonFileStore};
use readlog_ui::feedback::{FeedbackProvider, OpenAiClient};
use readlog_ui::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for readlog-ui
#[derive(Parser, Debug)]
#[command(name = "readlog-ui")]
#[command(about = "Reading log for kids with AI feedback on book write-ups")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "READLOG_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "READLOG_HOST")]
    host: IpAddr,

    /// Folder holding saved_entries.json (overrides READLOG_ROOT_FOLDER and the config file)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (default: ~/.config/readlog/config.toml)
    #[arg(short, long, env = "READLOG_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (toml_config, config_source) = load_config(args.config.as_deref());

    // RUST_LOG wins over the config file level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting readlog-ui v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let data_path = data_file_path(&root_folder, &toml_config);
    let store = JsonFileStore::new(data_path);
    info!("Entries file: {}", store.path().display());
    let store: Arc<dyn EntryStore> = Arc::new(store);

    // A missing key is reported on submit, not at startup
    let feedback: Option<Arc<dyn FeedbackProvider>> = match resolve_openai_api_key(&toml_config) {
        Ok(api_key) => {
            let client = OpenAiClient::new(api_key, &toml_config.openai)
                .context("Failed to create OpenAI client")?;
            info!(model = client.model(), endpoint = client.endpoint(), "Feedback provider ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    };

    let state = AppState::new(store, feedback);
    let app = build_router(state);

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("readlog-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
