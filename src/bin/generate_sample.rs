//! Sample data generator for the delivery map
//!
//! Writes a delivery CSV and an orders CSV with random warehouses and
//! distance-flavoured lead times over the 50 states.
//!
//! Usage:
//!   cargo run --release --bin generate_sample -- [OPTIONS]
//!
//! Options:
//!   --warehouses <N>        Number of warehouse states (default: 5)
//!   --coverage <F>          Probability a warehouse ships to a given state (default: 0.6)
//!   --include-unmapped      Add a "Puerto Rico" warehouse with no marker coordinates
//!   --seed <N>              Random seed for reproducibility (optional)
//!   --delivery-output <P>   Delivery CSV path (default: data/delivery.csv)
//!   --orders-output <P>     Orders CSV path (default: data/orders.csv)

use anyhow::Result;
use clap::Parser;
use csv::WriterBuilder;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use us_delivery_map::centroids::sorted_entries;
use us_delivery_map::models::LatLon;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Generate sample delivery and order CSVs")]
struct Args {
    /// Number of warehouse states
    #[arg(long, default_value = "5")]
    warehouses: usize,

    /// Probability (0.0 - 1.0) that a warehouse ships to a destination
    #[arg(long, default_value = "0.6")]
    coverage: f64,

    /// Add a warehouse that has no centroid entry
    #[arg(long)]
    include_unmapped: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "data/delivery.csv")]
    delivery_output: PathBuf,

    #[arg(long, default_value = "data/orders.csv")]
    orders_output: PathBuf,
}

#[derive(Debug, Serialize)]
struct DeliveryOut<'a> {
    state_from: &'a str,
    state_to: &'a str,
    time_dalivery: u32,
}

#[derive(Debug, Serialize)]
struct OrderOut<'a> {
    state_from: &'a str,
    state_to: &'a str,
    count_deliv: u64,
}

/// Rough lead time: one day per ~8 degrees of separation plus jitter
fn lead_time(from: LatLon, to: LatLon, rng: &mut impl Rng) -> u32 {
    let spread = ((from.lat - to.lat).powi(2) + (from.lon - to.lon).powi(2)).sqrt();
    let base = (spread / 8.0).round() as i32 + 1;
    (base + rng.gen_range(-1..=1)).max(0) as u32
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Sample Data Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Warehouses:       {}", args.warehouses);
    println!("Coverage:         {:.0}%", args.coverage * 100.0);
    println!("Unmapped origin:  {}", args.include_unmapped);
    if let Some(seed) = args.seed {
        println!("Random seed:      {}", seed);
    }
    println!();

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let states = sorted_entries();
    let warehouses: Vec<(&str, LatLon)> = states
        .choose_multiple(&mut rng, args.warehouses.min(states.len()))
        .copied()
        .collect();

    ensure_parent(&args.delivery_output)?;
    ensure_parent(&args.orders_output)?;
    let mut deliveries = WriterBuilder::new().has_headers(true).from_path(&args.delivery_output)?;
    let mut orders = WriterBuilder::new().has_headers(true).from_path(&args.orders_output)?;

    let mut delivery_rows = 0;
    let mut order_rows = 0;

    for (origin, from) in &warehouses {
        for (destination, to) in &states {
            if !rng.gen_bool(args.coverage.clamp(0.0, 1.0)) {
                continue;
            }
            deliveries.serialize(DeliveryOut {
                state_from: origin,
                state_to: destination,
                time_dalivery: lead_time(*from, *to, &mut rng),
            })?;
            delivery_rows += 1;

            orders.serialize(OrderOut {
                state_from: origin,
                state_to: destination,
                count_deliv: rng.gen_range(0..600),
            })?;
            order_rows += 1;
        }
    }

    if args.include_unmapped {
        for (destination, _) in states.iter().take(3) {
            deliveries.serialize(DeliveryOut {
                state_from: "Puerto Rico",
                state_to: destination,
                time_dalivery: rng.gen_range(5..=9),
            })?;
            delivery_rows += 1;
        }
    }

    deliveries.flush()?;
    orders.flush()?;

    println!("Generation complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Warehouses:     {}", warehouses.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", "));
    println!("Delivery rows:  {:>6}  -> {}", delivery_rows, args.delivery_output.display());
    println!("Order rows:     {:>6}  -> {}", order_rows, args.orders_output.display());

    Ok(())
}
