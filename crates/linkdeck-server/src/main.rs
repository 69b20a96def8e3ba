//! Linkdeck Server - HTTP persistence backend for link collections.
//!
//! This binary provides the links API that Linkdeck front ends sync against,
//! storing each collection as a single JSON blob in a local SQLite database.

mod handler;
mod server;
mod store;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use store::LinkStore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "linkdeck-server")]
#[command(about = "HTTP storage server for Linkdeck")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Directory holding the SQLite database (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Linkdeck Server");

    // Determine where the database lives
    let data_dir = match args.data_dir {
        Some(path) => path,
        None => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linkdeck"),
    };
    let db_path = data_dir.join("links.db");
    info!("Database: {}", db_path.display());

    let store = LinkStore::open(&db_path)?;

    // Start the server
    let addr = server::start_server(store, &args.host, args.port).await?;

    // Print port for supervising processes to read (intentional stdout)
    println!("LINKS_PORT={}", addr.port());

    info!("Link API available at http://{}/api/links", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
