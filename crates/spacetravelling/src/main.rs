mod app;
mod cache;
mod config;
mod export;
mod generate;
mod handlers;
mod render;
mod state;
mod storage;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use spacetravelling_cms::PrismicClient;
use spacetravelling_core::storage::ContentRepository;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app, config::Config, export::export_site, state::AppState,
    storage::inmemory::InMemoryRepository,
};

/// spacetravelling - Blog post pages rendered from Prismic
#[derive(Parser, Debug)]
#[command(name = "spacetravelling")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read posts from a JSON fixture file instead of Prismic
    #[arg(long, global = true, env = "FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pre-render every post and serve the pages over HTTP
    Serve {
        /// Host address to bind the server to
        #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value = "3000", env = "PORT")]
        port: u16,
    },
    /// Render every post to static HTML files
    Build {
        /// Output directory
        #[arg(long, short, default_value = "out")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "spacetravelling=debug,tower_http=debug".into());
    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = Config::from_env();
    let repo = content_repository(&config, cli.fixtures.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => serve(repo, &config, &host, port).await,
        Command::Build { out } => build(repo, &config, out).await,
    }
}

/// Pick the content source: a fixture file when given, Prismic otherwise.
fn content_repository(
    config: &Config,
    fixtures: Option<&std::path::Path>,
) -> Result<Arc<dyn ContentRepository>> {
    if let Some(path) = fixtures {
        tracing::info!(path = %path.display(), "Reading posts from fixtures");
        return Ok(Arc::new(InMemoryRepository::from_json_file(path)?));
    }

    let endpoint = config
        .prismic_endpoint
        .as_deref()
        .context("PRISMIC_API_ENDPOINT must be set when no fixtures are given")?;
    let client = PrismicClient::new(endpoint, config.prismic_access_token.clone())?;
    tracing::info!(endpoint = %client.endpoint(), "Reading posts from Prismic");

    Ok(Arc::new(client))
}

async fn serve(
    repo: Arc<dyn ContentRepository>,
    config: &Config,
    host: &str,
    port: u16,
) -> Result<()> {
    let state = AppState::new(repo, config)?;

    // Pages that fail here are generated on demand by the fallback mode
    match state.prerender().await {
        Ok(rendered) => tracing::info!(
            rendered,
            fallback = %state.fallback,
            revalidate_seconds = state.revalidate.as_secs(),
            "Page cache ready"
        ),
        Err(e) => tracing::error!(error = %e, "Failed to pre-render posts"),
    }
    if state.pages.is_empty().await {
        tracing::warn!("No pages pre-rendered, every post goes through the fallback");
    }

    // Build the application router
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{host}:{port}");
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build(repo: Arc<dyn ContentRepository>, config: &Config, out: PathBuf) -> Result<()> {
    let options = config.render_options()?;

    let report = export_site(repo.as_ref(), &options, &out).await?;

    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        out = %out.display(),
        "Export finished"
    );
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
