//! Region-shape catalog (state boundaries) loaded once and shared.
//!
//! Geometry is kept as opaque GeoJSON; the only value derived from it is a
//! bounding-box centre used as the shape's stable centroid.

use crate::error::CatalogError;
use crate::models::{LatLon, RegionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

// ============================================================================
// GeoJSON input
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: Value,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    name: String,
}

// ============================================================================
// Catalog
// ============================================================================

/// Drawable boundary of one region
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    pub name: RegionId,
    pub geometry: Value,
    pub centroid: LatLon,
}

#[derive(Debug, Default)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    seen: bool,
}

impl Bounds {
    fn extend(&mut self, lon: f64, lat: f64) {
        if !self.seen {
            *self = Bounds { min_lat: lat, max_lat: lat, min_lon: lon, max_lon: lon, seen: true };
            return;
        }
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }

    fn walk(&mut self, value: &Value) {
        match value {
            Value::Array(items) => match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
                // GeoJSON positions are [lon, lat, ...]
                (Some(lon), Some(lat)) => self.extend(lon, lat),
                _ => items.iter().for_each(|item| self.walk(item)),
            },
            Value::Object(map) => map.values().for_each(|v| self.walk(v)),
            _ => {}
        }
    }

    fn center(&self) -> Option<LatLon> {
        self.seen.then(|| {
            LatLon::new((self.min_lat + self.max_lat) / 2.0, (self.min_lon + self.max_lon) / 2.0)
        })
    }
}

/// Read-only registry of region shapes, in source feature order
#[derive(Debug, Clone)]
pub struct GeoShapeCatalog {
    shapes: Vec<Shape>,
    index: HashMap<RegionId, usize>,
}

impl GeoShapeCatalog {
    /// Build the catalog from a GeoJSON FeatureCollection keyed by `properties.name`
    pub fn from_geojson_str(text: &str) -> Result<Self, CatalogError> {
        let collection: FeatureCollection =
            serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut shapes = Vec::with_capacity(collection.features.len());
        let mut index = HashMap::with_capacity(collection.features.len());

        for feature in collection.features {
            let name = feature.properties.name;
            if index.contains_key(&name) {
                warn!("Duplicate region '{}' in catalog, keeping first shape", name);
                continue;
            }

            let mut bounds = Bounds::default();
            bounds.walk(&feature.geometry);
            let centroid = bounds
                .center()
                .ok_or_else(|| CatalogError::Parse(format!("region '{}' has no coordinates", name)))?;

            index.insert(name.clone(), shapes.len());
            shapes.push(Shape { name, geometry: feature.geometry, centroid });
        }

        if shapes.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { shapes, index })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, region: &str) -> Option<&Shape> {
        self.index.get(region).map(|&i| &self.shapes[i])
    }

    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }
}

// ============================================================================
// Loading service
// ============================================================================

/// Where the catalog GeoJSON comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
    /// GeoJSON text already in memory
    Inline(String),
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::Url(DEFAULT_CATALOG_URL.to_string())
    }
}

/// Loads the catalog on first use and hands out the same instance afterwards.
///
/// Construct one per process and share it; every caller of [`get`](Self::get)
/// sees either a fully loaded catalog or an error, never a partial one.
pub struct CatalogService {
    source: CatalogSource,
    timeout: Duration,
    cached: Arc<RwLock<Option<Arc<GeoShapeCatalog>>>>,
}

impl CatalogService {
    pub fn new(source: CatalogSource, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub async fn get(&self) -> Result<Arc<GeoShapeCatalog>, CatalogError> {
        // Check cache first
        {
            let cache = self.cached.read().await;
            if let Some(catalog) = cache.as_ref() {
                return Ok(Arc::clone(catalog));
            }
        }

        let mut cache = self.cached.write().await;
        // Another caller may have loaded it while we waited for the write lock
        if let Some(catalog) = cache.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(self.load().await?);
        info!("Loaded region catalog with {} shapes", catalog.len());
        *cache = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drop the cached catalog so the next `get` reloads it
    pub async fn invalidate(&self) {
        let mut cache = self.cached.write().await;
        *cache = None;
    }

    async fn load(&self) -> Result<GeoShapeCatalog, CatalogError> {
        match &self.source {
            CatalogSource::Url(url) => {
                info!("Fetching region catalog from {}", url);
                let fetch_err = |source| CatalogError::Fetch { url: url.clone(), source };
                let client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(fetch_err)?;
                let response = client.get(url).send().await.map_err(fetch_err)?;
                if !response.status().is_success() {
                    return Err(CatalogError::Status {
                        url: url.clone(),
                        status: response.status().as_u16(),
                    });
                }
                let text = response.text().await.map_err(fetch_err)?;
                GeoShapeCatalog::from_geojson_str(&text)
            }
            CatalogSource::File(path) => {
                info!("Reading region catalog from {}", path.display());
                let text = tokio::fs::read_to_string(path).await.map_err(|source| CatalogError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                GeoShapeCatalog::from_geojson_str(&text)
            }
            CatalogSource::Inline(text) => GeoShapeCatalog::from_geojson_str(text),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small square per region, enough for styling and lookups
    pub(crate) fn sample_geojson(names: &[&str]) -> String {
        let features: Vec<Value> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let x = -120.0 + i as f64 * 2.0;
                serde_json::json!({
                    "type": "Feature",
                    "id": format!("{:02}", i),
                    "properties": { "name": name },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[x, 30.0], [x + 1.0, 30.0], [x + 1.0, 32.0], [x, 32.0], [x, 30.0]]]
                    }
                })
            })
            .collect();
        serde_json::json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    pub(crate) fn sample_catalog(names: &[&str]) -> GeoShapeCatalog {
        GeoShapeCatalog::from_geojson_str(&sample_geojson(names)).unwrap()
    }

    #[test]
    fn test_parse_preserves_order_and_centroid() {
        let catalog = sample_catalog(&["Texas", "Alabama"]);
        let names: Vec<&str> = catalog.shapes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Texas", "Alabama"]);

        let texas = catalog.get("Texas").unwrap();
        assert_eq!(texas.centroid, LatLon::new(31.0, -119.5));
        assert!(catalog.contains("Alabama"));
        assert!(!catalog.contains("Ohio"));
    }

    #[test]
    fn test_multipolygon_centroid() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"Hawaii"},
            "geometry":{"type":"MultiPolygon","coordinates":[[[[-160,20],[-159,20],[-159,22],[-160,20]]],[[[-156,18],[-154,18],[-154,19],[-156,18]]]]}}]}"#;
        let catalog = GeoShapeCatalog::from_geojson_str(text).unwrap();
        assert_eq!(catalog.get("Hawaii").unwrap().centroid, LatLon::new(20.0, -157.0));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = GeoShapeCatalog::from_geojson_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_empty_collection_rejected() {
        let err = GeoShapeCatalog::from_geojson_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_duplicate_region_keeps_first() {
        let catalog = GeoShapeCatalog::from_geojson_str(&sample_geojson(&["Ohio", "Ohio"])).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Ohio").unwrap().centroid, LatLon::new(31.0, -119.5));
    }

    #[tokio::test]
    async fn test_service_memoizes_file_catalog() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), sample_geojson(&["Ohio", "Iowa"])).unwrap();

        let service = CatalogService::new(CatalogSource::File(file.path().to_path_buf()), Duration::from_secs(5));
        let first = service.get().await.unwrap();

        // Source vanishes; cached catalog still served
        let path = file.path().to_path_buf();
        drop(file);
        let second = service.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        service.invalidate().await;
        let err = service.get().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { path: ref p, .. } if *p == path.display().to_string()));
    }

    #[tokio::test]
    async fn test_inline_parse_failure_surfaces() {
        let service = CatalogService::new(CatalogSource::Inline("[]".to_string()), Duration::from_secs(1));
        assert!(matches!(service.get().await, Err(CatalogError::Parse(_))));
    }
}
