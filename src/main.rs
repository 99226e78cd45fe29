//! catalog-search server entry point

use anyhow::{Context, Result};
use catalog_search::{
    config::{self, Settings},
    web::{create_router, AppState},
    MemoryLibrary,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Concurrent music catalog search with Subsonic-compatible endpoints
#[derive(Debug, Parser)]
#[command(name = "catalog-search", version, about)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// YAML catalog to serve
    #[arg(short, long)]
    library: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut settings, source) = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(library) = cli.library {
        settings.library.path = Some(library);
    }

    init_logging(&settings);
    info!("Starting catalog-search v{}", catalog_search::VERSION);
    info!("Loaded settings from {}", source);

    let library = load_library(&settings)?;
    let (artists, albums, songs) = library.counts();
    info!("Serving {} artists, {} albums and {} songs", artists, albums, songs);

    let state = AppState::new(settings.clone(), Arc::new(library));
    let app = create_router(state);

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", settings.server.bind_address))?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging, preferring RUST_LOG over the configured level
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_library(settings: &Settings) -> Result<MemoryLibrary> {
    match &settings.library.path {
        Some(path) => MemoryLibrary::from_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => {
            info!("No catalog configured, serving an empty library");
            Ok(MemoryLibrary::empty())
        }
    }
}
