//! REST API server for the delivery map
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT          Port to listen on (default from config: 8080)
//!   --config PATH        Configuration file (TOML)
//!   --catalog-file PATH  Local GeoJSON catalog instead of the configured URL
//!
//! REST endpoints:
//!   GET  /api/v1/health     - Health check
//!   GET  /api/v1/legend     - Category colors and descriptions
//!   GET  /api/v1/centroids  - Marker coordinates per state
//!   POST /api/v1/origins    - Distinct warehouses of a delivery CSV
//!   POST /api/v1/scene      - Full render cycle

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use us_delivery_map::api::{create_rest_router, MapService};
use us_delivery_map::catalog::{CatalogService, CatalogSource};
use us_delivery_map::config::Config;

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "REST backend for the US delivery map")]
struct Args {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local GeoJSON catalog
    #[arg(long)]
    catalog_file: Option<PathBuf>,
}

fn print_banner(addr: &SocketAddr, catalog_shapes: usize) {
    println!("============================================================");
    println!("              US DELIVERY MAP API SERVER");
    println!("============================================================");
    println!();
    println!("  REST:     http://{}/api/v1/", addr);
    println!("  Regions:  {}", catalog_shapes);
    println!();
    println!("REST Endpoints:");
    println!("  GET  /api/v1/health      Health check");
    println!("  GET  /api/v1/legend      Map legend");
    println!("  GET  /api/v1/centroids   Marker coordinates");
    println!("  POST /api/v1/origins     Warehouse list");
    println!("  POST /api/v1/scene       Render scene");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let source = match args.catalog_file {
        Some(path) => CatalogSource::File(path),
        None => config.catalog_source(),
    };
    let catalog = Arc::new(CatalogService::new(source, config.catalog_timeout()));

    // Load before serving so no request sees a missing catalog
    let shapes = catalog.get().await?.len();

    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;
    print_banner(&addr, shapes);

    let service = Arc::new(MapService::new(catalog, config.map_view()));
    let app = create_rest_router(service);

    tracing::info!("Starting REST server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
