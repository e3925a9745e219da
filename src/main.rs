//! One-shot render: reads the delivery (and optional orders) CSV, runs the
//! pipeline and prints the scene as JSON.
//!
//! Run: ./target/release/us_delivery_map --delivery data/delivery.csv --orders data/orders.csv

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use us_delivery_map::catalog::{CatalogService, CatalogSource};
use us_delivery_map::config::Config;
use us_delivery_map::pipeline::{self, RenderRequest};

#[derive(Parser, Debug)]
#[command(name = "us_delivery_map")]
#[command(about = "Render the US delivery lead-time map as a JSON scene")]
struct Args {
    /// Delivery CSV (state_from, state_to, time_dalivery)
    #[arg(long)]
    delivery: PathBuf,

    /// Orders CSV (state_from, state_to, count_deliv)
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Warehouse to include (repeatable); all warehouses when omitted
    #[arg(long = "select")]
    select: Vec<String>,

    /// Select no warehouses at all (blank map)
    #[arg(long, conflicts_with = "select")]
    select_none: bool,

    /// Leave the order-volume layer off the map
    #[arg(long)]
    hide_orders: bool,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local GeoJSON catalog, overrides the configured source
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Write the scene here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let source = match &args.catalog_file {
        Some(path) => CatalogSource::File(path.clone()),
        None => config.catalog_source(),
    };
    let catalog_service = CatalogService::new(source, config.catalog_timeout());
    let catalog = catalog_service.get().await?;

    let delivery_csv = std::fs::read(&args.delivery)
        .with_context(|| format!("reading {}", args.delivery.display()))?;
    let orders_csv = match &args.orders {
        Some(path) => Some(std::fs::read(path).with_context(|| format!("reading {}", path.display()))?),
        None => None,
    };

    let selection = if args.select_none {
        Some(Vec::new())
    } else if args.select.is_empty() {
        None
    } else {
        Some(args.select.clone())
    };

    let request = RenderRequest {
        delivery_csv: &delivery_csv,
        orders_csv: orders_csv.as_deref(),
        selection,
        show_orders: !args.hide_orders,
    };
    let cycle = pipeline::run(&catalog, config.map_view(), &request);

    for warning in &cycle.warnings {
        eprintln!("warning: {}", warning);
    }
    if let Some(e) = &cycle.orders_error {
        eprintln!("error: {}", e);
    }
    if let Some(e) = &cycle.delivery_error {
        bail!("{}", e);
    }

    if let Some(volume) = &cycle.volume_summary {
        eprintln!("Total orders by state:");
        for (state, count) in volume {
            eprintln!("  {:<20} {:>8}", state, count);
        }
    }

    let json = serde_json::to_string_pretty(&cycle)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Scene written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
