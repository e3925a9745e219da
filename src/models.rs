use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical region (US state) name, e.g. "New York"
pub type RegionId = String;

/// Which of the two uploads a record or error belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Delivery,
    Orders,
}

impl DatasetKind {
    /// Columns that must be present in the CSV header
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Delivery => &["state_from", "state_to", "time_dalivery"],
            DatasetKind::Orders => &["state_from", "state_to", "count_deliv"],
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Delivery => write!(f, "delivery"),
            DatasetKind::Orders => write!(f, "orders"),
        }
    }
}

/// Raw row of the delivery CSV
#[derive(Debug, Deserialize)]
pub struct DeliveryRow {
    pub state_from: String,
    pub state_to: String,
    pub time_dalivery: u32,
}

/// Raw row of the orders CSV
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub state_from: String,
    pub state_to: String,
    pub count_deliv: u64,
}

/// One origin → destination lead time observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipmentRecord {
    pub origin: RegionId,
    pub destination: RegionId,
    pub lead_time_days: u32,
}

/// One origin → destination order count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    pub origin: RegionId,
    pub destination: RegionId,
    pub count: u64,
}

impl From<DeliveryRow> for ShipmentRecord {
    fn from(row: DeliveryRow) -> Self {
        Self {
            origin: row.state_from,
            destination: row.state_to,
            lead_time_days: row.time_dalivery,
        }
    }
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            origin: row.state_from,
            destination: row.state_to,
            count: row.count_deliv,
        }
    }
}

impl ShipmentRecord {
    pub fn new(origin: &str, destination: &str, lead_time_days: u32) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            lead_time_days,
        }
    }
}

impl OrderRecord {
    pub fn new(origin: &str, destination: &str, count: u64) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            count,
        }
    }
}

/// Geographic point as (latitude, longitude)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
