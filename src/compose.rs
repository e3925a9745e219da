//! Builds the renderable scene: styled regions, warehouse markers and the
//! optional order-volume layer. Nothing here draws; the output is handed to
//! whatever surface renders it.

use crate::aggregate::{DeliverySummary, Selection, VolumeSummary};
use crate::catalog::GeoShapeCatalog;
use crate::centroids::centroid_for;
use crate::classify::{color_for, legend, size_tier_for, Category, LegendEntry, SizeTier};
use crate::error::PipelineWarning;
use crate::models::{LatLon, RegionId};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const ORDERS_LAYER_NAME: &str = "Orders";

// ============================================================================
// Scene description
// ============================================================================

/// Initial viewport of the map
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLon::new(37.0902, -95.7129),
            zoom: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionStyle {
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u32,
    pub color: &'static str,
}

impl RegionStyle {
    fn for_category(category: Category) -> Self {
        Self {
            fill_color: category.color(),
            fill_opacity: 0.7,
            weight: 1,
            color: "black",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionFeature {
    pub name: RegionId,
    pub category: Category,
    pub min_lead_time_days: Option<u32>,
    pub style: RegionStyle,
    pub tooltip: String,
    pub geometry: Value,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerState {
    Included,
    Excluded,
}

impl MarkerState {
    pub fn color(self) -> &'static str {
        match self {
            MarkerState::Included => "green",
            MarkerState::Excluded => "gray",
        }
    }
}

/// Warehouse (origin) marker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OriginMarker {
    pub region: RegionId,
    pub location: LatLon,
    pub state: MarkerState,
    pub icon: &'static str,
    pub color: &'static str,
    pub tooltip: String,
}

/// Order-volume circle at a destination
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VolumeMarker {
    pub region: RegionId,
    pub location: LatLon,
    pub count: u64,
    pub tier: SizeTier,
    pub radius: u32,
    pub color: &'static str,
    pub fill_opacity: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VolumeLayer {
    pub name: &'static str,
    pub markers: Vec<VolumeMarker>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Scene {
    pub view: MapView,
    pub regions: Vec<RegionFeature>,
    pub origin_markers: Vec<OriginMarker>,
    pub volume_layer: Option<VolumeLayer>,
    /// Whether the renderer should offer a layer toggle
    pub layer_control: bool,
    pub legend: Vec<LegendEntry>,
}

pub fn region_tooltip(name: &str, min_lead_time_days: Option<u32>) -> String {
    match min_lead_time_days {
        Some(days) => format!("{}: minimum delivery time {} days", name, days),
        None => format!("{}: no data", name),
    }
}

// ============================================================================
// Composer
// ============================================================================

pub struct MapComposer<'a> {
    catalog: &'a GeoShapeCatalog,
    view: MapView,
}

impl<'a> MapComposer<'a> {
    pub fn new(catalog: &'a GeoShapeCatalog, view: MapView) -> Self {
        Self { catalog, view }
    }

    /// Style every catalog region, whether or not it appears in the data
    pub fn regions(&self, summary: &DeliverySummary, warnings: &mut Vec<PipelineWarning>) -> Vec<RegionFeature> {
        for destination in summary.keys().filter(|d| !self.catalog.contains(d)) {
            warn!("Destination '{}' has no catalog shape", destination);
            warnings.push(PipelineWarning::UnmappedDestination { region: destination.clone() });
        }

        self.catalog
            .shapes()
            .map(|shape| {
                let min_lead_time_days = summary.get(&shape.name).copied();
                let category = color_for(min_lead_time_days);
                RegionFeature {
                    name: shape.name.clone(),
                    category,
                    min_lead_time_days,
                    style: RegionStyle::for_category(category),
                    tooltip: region_tooltip(&shape.name, min_lead_time_days),
                    geometry: shape.geometry.clone(),
                }
            })
            .collect()
    }

    /// One marker per origin with a centroid; the rest are reported and skipped
    pub fn origin_markers(
        &self,
        origins: &[RegionId],
        selection: &Selection,
        warnings: &mut Vec<PipelineWarning>,
    ) -> Vec<OriginMarker> {
        origins
            .iter()
            .filter_map(|origin| {
                let Some(location) = centroid_for(origin) else {
                    warn!("No coordinates for warehouse: {}", origin);
                    warnings.push(PipelineWarning::UnmappedOrigin { region: origin.clone() });
                    return None;
                };
                let state = if selection.contains(origin) {
                    MarkerState::Included
                } else {
                    MarkerState::Excluded
                };
                Some(OriginMarker {
                    region: origin.clone(),
                    location,
                    state,
                    icon: "star",
                    color: state.color(),
                    tooltip: format!("Warehouse: {}", origin),
                })
            })
            .collect()
    }

    /// Sized order markers; destinations without a centroid are left out silently
    pub fn volume_layer(&self, volume: &VolumeSummary) -> Option<VolumeLayer> {
        if volume.is_empty() {
            return None;
        }

        let markers = volume
            .iter()
            .filter_map(|(region, &count)| {
                let Some(location) = centroid_for(region) else {
                    debug!("Skipping order marker for '{}': no coordinates", region);
                    return None;
                };
                let tier = size_tier_for(count);
                Some(VolumeMarker {
                    region: region.clone(),
                    location,
                    count,
                    tier,
                    radius: tier.radius(),
                    color: "grey",
                    fill_opacity: 0.6,
                    label: format!("{}: {} orders", region, count),
                })
            })
            .collect();

        Some(VolumeLayer {
            name: ORDERS_LAYER_NAME,
            markers,
        })
    }

    /// Assemble the full scene. `volume` is `None` when the order layer is off
    /// or no orders dataset was supplied.
    pub fn compose(
        &self,
        summary: &DeliverySummary,
        origins: &[RegionId],
        selection: &Selection,
        volume: Option<&VolumeSummary>,
    ) -> (Scene, Vec<PipelineWarning>) {
        let mut warnings = Vec::new();
        let regions = self.regions(summary, &mut warnings);
        let origin_markers = self.origin_markers(origins, selection, &mut warnings);
        let volume_layer = volume.and_then(|v| self.volume_layer(v));

        let scene = Scene {
            view: self.view,
            regions,
            origin_markers,
            layer_control: volume_layer.is_some(),
            volume_layer,
            legend: legend(),
        };
        (scene, warnings)
    }
}
