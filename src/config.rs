use crate::catalog::{CatalogSource, DEFAULT_CATALOG_URL};
use crate::compose::MapView;
use crate::error::ConfigError;
use crate::models::LatLon;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub map: MapConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub url: String,
    /// Local GeoJSON file; takes precedence over `url` when set
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[catalog]
url = "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json"
timeout_secs = 30

[map]
center_lat = 37.0902
center_lon = -95.7129
zoom = 4

[server]
host = "0.0.0.0"
port = 8080
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                url: DEFAULT_CATALOG_URL.to_string(),
                path: None,
                timeout_secs: 30,
            },
            map: MapConfig {
                center_lat: 37.0902,
                center_lon: -95.7129,
                zoom: 4,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from `path`, or the embedded default when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                tracing::info!("Loading config from: {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_toml(&contents)
            }
            None => {
                tracing::info!("Using default embedded configuration");
                Self::from_toml(DEFAULT_CONFIG)
            }
        }
    }

    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog.path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Url(self.catalog.url.clone()),
        }
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    pub fn map_view(&self) -> MapView {
        MapView {
            center: LatLon::new(self.map.center_lat, self.map.center_lon),
            zoom: self.map.zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.map_view(), MapView::default());
        assert!(matches!(config.catalog_source(), CatalogSource::Url(_)));
    }

    #[test]
    fn test_embedded_matches_default_impl() {
        let embedded = Config::from_toml(DEFAULT_CONFIG).unwrap();
        let built = Config::default();
        assert_eq!(embedded.catalog.url, built.catalog.url);
        assert_eq!(embedded.catalog.timeout_secs, built.catalog.timeout_secs);
        assert_eq!(embedded.server.host, built.server.host);
        assert_eq!(embedded.map.zoom, built.map.zoom);
    }

    #[test]
    fn test_file_config_with_catalog_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[catalog]
url = "http://localhost/states.json"
path = "data/us-states.json"
timeout_secs = 5

[map]
center_lat = 40.0
center_lon = -100.0
zoom = 5

[server]
host = "127.0.0.1"
port = 9000
"#,
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.catalog_timeout(), Duration::from_secs(5));
        assert!(matches!(config.catalog_source(), CatalogSource::File(ref p) if p == Path::new("data/us-states.json")));
        assert_eq!(config.map_view().zoom, 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(Config::from_toml("[map]\nzoom = \"far\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load(Some(Path::new("/nonexistent/delivery-map.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
