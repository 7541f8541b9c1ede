//! Storefront catalog server
//!
//! Serves the product catalog API over HTTP, backed by a single JSON
//! document on disk.
//!
//! Usage:
//!   storefront --port 3000 --data data/products.json
//!
//! The catalog file is created on first write. Pass `--seed-demo` to fill
//! an empty catalog with the demo store's products.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use storefront_server::build_router;
use storefront_storage::{Catalog, CatalogStore, JsonFileStore, seed_if_empty};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Storefront product catalog API")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Path to the catalog JSON document
    #[arg(short, long, default_value = "data/products.json")]
    data: PathBuf,

    /// Fill an empty catalog with demo products
    #[arg(long)]
    seed_demo: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Storefront catalog starting...");
    let store = Arc::new(
        JsonFileStore::open(&args.data)
            .with_context(|| format!("Failed to open catalog at {}", args.data.display()))?,
    );

    if args.seed_demo && seed_if_empty(store.as_ref()).context("Failed to seed demo catalog")? {
        info!("Demo catalog written to {}", args.data.display());
    }

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.bind, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP catalog API listening on {}", addr);

    let app = build_router(Catalog::new(store.clone()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutting down, flushing catalog");
    store.flush().context("Failed to flush catalog")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
