//! Holocron Daemon - HTTP front end for the cached Star Wars catalog

mod client_id;
mod handler;
mod responses;

use anyhow::{Context, Result};
use clap::Parser;
use holocron::{Catalog, HttpUpstream, DEFAULT_PAGE_SIZE};
use holostore::{KeyValueStore, MemoryStore, RedisStore, DEFAULT_NAMESPACE};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind host
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Bind port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Base URL of the upstream catalog API
    #[arg(long, env = "SWAPI_URL", default_value = "https://swapi.dev/api")]
    swapi_url: String,

    /// Redis connection string (in-memory cache when absent)
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Prefix for every Redis key
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Entries per upstream page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u64,

    /// Upstream request timeout in seconds
    #[arg(long)]
    upstream_timeout_secs: Option<u64>,

    /// Health check mode (for Docker)
    #[arg(long)]
    health: bool,
}

impl Args {
    fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let bind = args.bind();

    if args.health {
        match TcpStream::connect(&bind).await {
            Ok(_) => {
                println!("OK");
                std::process::exit(0);
            }
            Err(_) => {
                eprintln!("FAILED");
                std::process::exit(1);
            }
        }
    }

    info!("Starting Holocron Daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Upstream: {}", args.swapi_url);
    info!("Page size: {}", args.page_size);

    let store = open_store(&args).await?;

    let timeout = args.upstream_timeout_secs.map(Duration::from_secs);
    let upstream = HttpUpstream::with_timeout(&args.swapi_url, timeout)
        .context("Failed to build upstream client")?;
    let catalog = Catalog::with_page_size(store, Arc::new(upstream), args.page_size);

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("Server listening on http://{}", bind);

    println!("\n🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, handler::router(Arc::new(catalog)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn open_store(args: &Args) -> Result<Arc<dyn KeyValueStore>> {
    match &args.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url, args.namespace.as_str())
                .await
                .with_context(|| format!("Failed to connect to Redis at {}", url))?;
            info!("Cache: redis ({}, namespace {:?})", url, args.namespace);
            Ok(Arc::new(store))
        }
        None => {
            warn!("REDIS_URL not set, caching in process memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
