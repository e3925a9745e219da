//! One render cycle: parse → aggregate → classify → compose.
//!
//! Every trigger (upload, selection change, toggle) runs the whole cycle over
//! the current inputs. The delivery and orders datasets fail independently: a
//! broken orders upload never blocks the choropleth.

use crate::aggregate::{
    aggregate_deliveries, aggregate_volume, distinct_origins, DeliverySummary, Selection, VolumeSummary,
};
use crate::catalog::GeoShapeCatalog;
use crate::compose::{MapComposer, MapView, Scene};
use crate::dataset::{parse_deliveries, parse_orders};
use crate::error::{DatasetError, PipelineWarning};
use crate::models::RegionId;
use serde::Serialize;
use tracing::{info, warn};

/// Current inputs of the map
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub delivery_csv: &'a [u8],
    pub orders_csv: Option<&'a [u8]>,
    /// Requested origins; `None` selects every origin
    pub selection: Option<Vec<RegionId>>,
    pub show_orders: bool,
}

impl<'a> RenderRequest<'a> {
    pub fn new(delivery_csv: &'a [u8]) -> Self {
        Self {
            delivery_csv,
            orders_csv: None,
            selection: None,
            show_orders: true,
        }
    }
}

/// Everything a rendering surface needs after one cycle
#[derive(Debug, Clone, Serialize)]
pub struct RenderCycle {
    /// `None` iff the delivery dataset was rejected
    pub scene: Option<Scene>,
    pub origins: Vec<RegionId>,
    pub selection: Selection,
    pub delivery_summary: DeliverySummary,
    /// Present whenever an orders dataset parsed, even if its layer is hidden
    pub volume_summary: Option<VolumeSummary>,
    pub delivery_error: Option<DatasetError>,
    pub orders_error: Option<DatasetError>,
    pub warnings: Vec<PipelineWarning>,
}

impl RenderCycle {
    fn rejected(error: DatasetError) -> Self {
        Self {
            scene: None,
            origins: Vec::new(),
            selection: Selection::default(),
            delivery_summary: DeliverySummary::new(),
            volume_summary: None,
            delivery_error: Some(error),
            orders_error: None,
            warnings: Vec::new(),
        }
    }
}

pub fn run(catalog: &GeoShapeCatalog, view: MapView, request: &RenderRequest<'_>) -> RenderCycle {
    let shipments = match parse_deliveries(request.delivery_csv) {
        Ok(records) => records,
        Err(e) => {
            warn!("Delivery dataset rejected: {}", e);
            return RenderCycle::rejected(e);
        }
    };

    let origins = distinct_origins(&shipments);
    let mut warnings = Vec::new();

    let selection = match &request.selection {
        None => Selection::all(&origins),
        Some(requested) => {
            let (selection, unknown) = Selection::restrict(&origins, requested);
            for region in unknown {
                warn!("Selected warehouse '{}' not in delivery data", region);
                warnings.push(PipelineWarning::UnknownOrigin { region });
            }
            selection
        }
    };

    let delivery_summary = aggregate_deliveries(&shipments, &selection);
    info!(
        "Aggregated {} shipments from {}/{} warehouses into {} destinations",
        shipments.len(),
        selection.len(),
        origins.len(),
        delivery_summary.len()
    );

    let (volume_summary, orders_error) = match request.orders_csv.map(parse_orders) {
        None => (None, None),
        Some(Ok(orders)) => {
            let volume = aggregate_volume(&orders, &selection);
            info!("Order volume computed for {} destinations", volume.len());
            (Some(volume), None)
        }
        Some(Err(e)) => {
            warn!("Orders dataset rejected: {}", e);
            (None, Some(e))
        }
    };

    let overlay = volume_summary.as_ref().filter(|_| request.show_orders);
    let composer = MapComposer::new(catalog, view);
    let (scene, compose_warnings) = composer.compose(&delivery_summary, &origins, &selection, overlay);
    warnings.extend(compose_warnings);

    RenderCycle {
        scene: Some(scene),
        origins,
        selection,
        delivery_summary,
        volume_summary,
        delivery_error: None,
        orders_error,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::classify::Category;
    use crate::compose::MarkerState;

    const STATES: &[&str] = &["California", "New York", "Texas", "Ohio", "Puerto Rico"];

    const DELIVERY: &str = "state_from,state_to,time_dalivery\n\
        California,New York,2\n\
        Texas,New York,5\n\
        California,Texas,4\n";

    fn category_of(scene: &Scene, name: &str) -> Category {
        scene.regions.iter().find(|r| r.name == name).unwrap().category
    }

    #[test]
    fn test_end_to_end_minimum_lead_times() {
        let catalog = sample_catalog(STATES);
        let mut request = RenderRequest::new(DELIVERY.as_bytes());
        request.selection = Some(vec!["California".into(), "Texas".into()]);

        let cycle = run(&catalog, MapView::default(), &request);
        let expected: DeliverySummary =
            [("New York".to_string(), 2), ("Texas".to_string(), 4)].into_iter().collect();
        assert_eq!(cycle.delivery_summary, expected);
        assert!(cycle.warnings.is_empty());

        let scene = cycle.scene.unwrap();
        assert_eq!(category_of(&scene, "New York"), Category::Fastest);
        assert_eq!(category_of(&scene, "Texas"), Category::Medium);
        for name in ["California", "Ohio", "Puerto Rico"] {
            assert_eq!(category_of(&scene, name), Category::NoData);
            let region = scene.regions.iter().find(|r| r.name == name).unwrap();
            assert_eq!(region.style.fill_color, "white");
        }
    }

    #[test]
    fn test_schema_violation_produces_no_map() {
        let catalog = sample_catalog(STATES);
        let csv = "state_from,state_to\nCalifornia,New York\n";
        let cycle = run(&catalog, MapView::default(), &RenderRequest::new(csv.as_bytes()));

        assert!(cycle.scene.is_none());
        assert!(cycle.delivery_summary.is_empty());
        assert!(matches!(cycle.delivery_error, Some(DatasetError::Schema { .. })));
    }

    #[test]
    fn test_unmapped_origin_warns_and_still_renders() {
        let catalog = sample_catalog(STATES);
        let csv = format!("{}Puerto Rico,Ohio,7\n", DELIVERY);
        let cycle = run(&catalog, MapView::default(), &RenderRequest::new(csv.as_bytes()));

        assert_eq!(
            cycle.warnings,
            vec![PipelineWarning::UnmappedOrigin { region: "Puerto Rico".into() }]
        );
        let scene = cycle.scene.unwrap();
        assert_eq!(scene.regions.len(), STATES.len());
        assert_eq!(category_of(&scene, "Ohio"), Category::Slowest);
        assert!(scene.origin_markers.iter().all(|m| m.region != "Puerto Rico"));
        assert_eq!(scene.origin_markers.len(), 2);
    }

    #[test]
    fn test_empty_selection_blank_map() {
        let catalog = sample_catalog(STATES);
        let orders = "state_from,state_to,count_deliv\nTexas,Ohio,300\n";
        let request = RenderRequest {
            delivery_csv: DELIVERY.as_bytes(),
            orders_csv: Some(orders.as_bytes()),
            selection: Some(Vec::new()),
            show_orders: true,
        };

        let cycle = run(&catalog, MapView::default(), &request);
        assert!(cycle.delivery_summary.is_empty());
        assert_eq!(cycle.volume_summary, Some(VolumeSummary::new()));

        let scene = cycle.scene.unwrap();
        assert!(scene.regions.iter().all(|r| r.category == Category::NoData));
        assert!(scene.origin_markers.iter().all(|m| m.state == MarkerState::Excluded));
        assert!(scene.volume_layer.is_none());
    }

    #[test]
    fn test_broken_orders_do_not_block_choropleth() {
        let catalog = sample_catalog(STATES);
        let mut request = RenderRequest::new(DELIVERY.as_bytes());
        request.orders_csv = Some("state_from,state_to,count\nTexas,Ohio,3\n".as_bytes());

        let cycle = run(&catalog, MapView::default(), &request);
        assert!(matches!(cycle.orders_error, Some(DatasetError::Schema { .. })));
        assert!(cycle.volume_summary.is_none());
        let scene = cycle.scene.unwrap();
        assert_eq!(category_of(&scene, "New York"), Category::Fastest);
        assert!(scene.volume_layer.is_none());
    }

    #[test]
    fn test_order_layer_toggle() {
        let catalog = sample_catalog(STATES);
        let orders = "state_from,state_to,count_deliv\nTexas,Ohio,300\nCalifornia,Ohio,450\nTexas,Puerto Rico,20\n";
        let mut request = RenderRequest::new(DELIVERY.as_bytes());
        request.orders_csv = Some(orders.as_bytes());

        let shown = run(&catalog, MapView::default(), &request);
        let layer = shown.scene.as_ref().unwrap().volume_layer.as_ref().unwrap();
        assert_eq!(layer.markers.len(), 1);
        assert_eq!(layer.markers[0].count, 750);
        assert_eq!(layer.markers[0].radius, 20);
        assert!(shown.scene.as_ref().unwrap().layer_control);
        // Puerto Rico is summed even though it gets no marker
        assert_eq!(shown.volume_summary.as_ref().unwrap().get("Puerto Rico"), Some(&20));

        request.show_orders = false;
        let hidden = run(&catalog, MapView::default(), &request);
        assert!(hidden.scene.unwrap().volume_layer.is_none());
        assert_eq!(hidden.volume_summary, shown.volume_summary);
    }

    #[test]
    fn test_unknown_selection_entries_reported() {
        let catalog = sample_catalog(STATES);
        let mut request = RenderRequest::new(DELIVERY.as_bytes());
        request.selection = Some(vec!["Texas".into(), "Oregon".into()]);

        let cycle = run(&catalog, MapView::default(), &request);
        assert_eq!(cycle.selection.len(), 1);
        assert_eq!(cycle.delivery_summary.get("New York"), Some(&5));
        assert_eq!(cycle.warnings, vec![PipelineWarning::UnknownOrigin { region: "Oregon".into() }]);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let catalog = sample_catalog(STATES);
        let orders = "state_from,state_to,count_deliv\nTexas,Ohio,300\nCalifornia,New York,1200\n";
        let mut request = RenderRequest::new(DELIVERY.as_bytes());
        request.orders_csv = Some(orders.as_bytes());

        let first = serde_json::to_string(&run(&catalog, MapView::default(), &request)).unwrap();
        let second = serde_json::to_string(&run(&catalog, MapView::default(), &request)).unwrap();
        assert_eq!(first, second);
    }
}
