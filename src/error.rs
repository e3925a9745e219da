//! Error types for dataset ingestion, catalog loading and configuration.

use crate::models::{DatasetKind, RegionId};
use serde::Serialize;
use thiserror::Error;

/// Failure confined to a single uploaded dataset
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum DatasetError {
    /// The CSV could not be read or a value could not be converted
    #[error("failed to parse {kind} CSV: {message}")]
    Parse { kind: DatasetKind, message: String },

    /// One or more required columns are absent from the header
    #[error("{kind} CSV must contain columns: {}", .required.join(", "))]
    Schema {
        kind: DatasetKind,
        required: Vec<String>,
        missing: Vec<String>,
    },
}

impl DatasetError {
    pub fn kind(&self) -> DatasetKind {
        match self {
            DatasetError::Parse { kind, .. } | DatasetError::Schema { kind, .. } => *kind,
        }
    }
}

/// Region-shape catalog could not be loaded; nothing can be rendered without it
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch region catalog from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("region catalog request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read region catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid region catalog GeoJSON: {0}")]
    Parse(String),

    #[error("region catalog contains no features")]
    Empty,
}

/// Non-fatal problem surfaced to the user; processing continues
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// Warehouse has no centroid-table entry, so no marker is drawn
    #[error("no coordinates for warehouse: {region}")]
    UnmappedOrigin { region: RegionId },

    /// Destination has delivery data but no catalog shape to color
    #[error("destination '{region}' is not in the region catalog")]
    UnmappedDestination { region: RegionId },

    /// Requested selection entry is not an origin of the delivery dataset
    #[error("selected warehouse '{region}' does not appear in the delivery data")]
    UnknownOrigin { region: RegionId },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_all_required_columns() {
        let err = DatasetError::Schema {
            kind: DatasetKind::Delivery,
            required: vec!["state_from".into(), "state_to".into(), "time_dalivery".into()],
            missing: vec!["time_dalivery".into()],
        };
        assert_eq!(
            err.to_string(),
            "delivery CSV must contain columns: state_from, state_to, time_dalivery"
        );
        assert_eq!(err.kind(), DatasetKind::Delivery);
    }

    #[test]
    fn test_parse_error_carries_raw_message() {
        let err = DatasetError::Parse {
            kind: DatasetKind::Orders,
            message: "line 3: invalid digit".into(),
        };
        assert_eq!(err.to_string(), "failed to parse orders CSV: line 3: invalid digit");
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = PipelineWarning::UnmappedOrigin { region: "Puerto Rico".into() };
        assert_eq!(warning.to_string(), "no coordinates for warehouse: Puerto Rico");
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            serde_json::json!({"kind": "unmapped_origin", "region": "Puerto Rico"})
        );
    }
}
