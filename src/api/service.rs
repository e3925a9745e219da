//! Shared logic behind the REST handlers.

use anyhow::Result;
use crate::aggregate::distinct_origins;
use crate::catalog::CatalogService;
use crate::centroids::sorted_entries;
use crate::classify::{legend, LegendEntry};
use crate::compose::MapView;
use crate::dataset::parse_deliveries;
use crate::error::DatasetError;
use crate::models::{LatLon, RegionId};
use crate::pipeline::{self, RenderCycle, RenderRequest};
use std::sync::Arc;

// ============================================================================
// Data Structures
// ============================================================================

/// Raw inputs for one render cycle, as uploaded
#[derive(Debug, Clone, Default)]
pub struct SceneInput {
    pub delivery_csv: String,
    pub orders_csv: Option<String>,
    pub selection: Option<Vec<RegionId>>,
    pub show_orders: bool,
}

#[derive(Debug, Clone)]
pub struct CentroidEntry {
    pub region: &'static str,
    pub location: LatLon,
}

// ============================================================================
// Map Service
// ============================================================================

pub struct MapService {
    catalog: Arc<CatalogService>,
    view: MapView,
}

impl MapService {
    pub fn new(catalog: Arc<CatalogService>, view: MapView) -> Self {
        Self { catalog, view }
    }

    /// Run the full pipeline; only a catalog failure is an `Err` here,
    /// dataset problems are reported inside the cycle
    pub async fn render(&self, input: &SceneInput) -> Result<RenderCycle> {
        let catalog = self.catalog.get().await?;

        let request = RenderRequest {
            delivery_csv: input.delivery_csv.as_bytes(),
            orders_csv: input.orders_csv.as_deref().map(str::as_bytes),
            selection: input.selection.clone(),
            show_orders: input.show_orders,
        };

        Ok(pipeline::run(&catalog, self.view, &request))
    }

    /// Options for the warehouse multi-select
    pub fn origins(&self, delivery_csv: &str) -> Result<Vec<RegionId>, DatasetError> {
        let shipments = parse_deliveries(delivery_csv.as_bytes())?;
        Ok(distinct_origins(&shipments))
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        legend()
    }

    pub fn centroids(&self) -> Vec<CentroidEntry> {
        sorted_entries()
            .into_iter()
            .map(|(region, location)| CentroidEntry { region, location })
            .collect()
    }
}
