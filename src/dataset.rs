//! CSV ingestion for the delivery and orders uploads.
//!
//! The header is checked against the required column set before any row is
//! read. A single bad row rejects the whole dataset.

use crate::error::DatasetError;
use crate::models::{DatasetKind, DeliveryRow, OrderRecord, OrderRow, ShipmentRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::io::Read;
use tracing::{debug, info};

/// Verify that every required column of `kind` is present in `headers`
pub fn check_schema(kind: DatasetKind, headers: &StringRecord) -> Result<(), DatasetError> {
    let required = kind.required_columns();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::Schema {
            kind,
            required: required.iter().map(|c| c.to_string()).collect(),
            missing,
        })
    }
}

fn read_dataset<R, Row, Record>(kind: DatasetKind, input: R) -> Result<Vec<Record>, DatasetError>
where
    R: Read,
    Row: DeserializeOwned,
    Record: From<Row>,
{
    let parse_err = |e: csv::Error| DatasetError::Parse {
        kind,
        message: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(parse_err)?.clone();
    debug!("{} CSV header: {:?}", kind, headers);
    check_schema(kind, &headers)?;

    let records = reader
        .deserialize::<Row>()
        .map(|row| row.map(Record::from).map_err(parse_err))
        .collect::<Result<Vec<Record>, DatasetError>>()?;

    info!("Parsed {} records from {} CSV", records.len(), kind);
    Ok(records)
}

/// Parse the delivery CSV (`state_from`, `state_to`, `time_dalivery`)
pub fn parse_deliveries<R: Read>(input: R) -> Result<Vec<ShipmentRecord>, DatasetError> {
    read_dataset::<R, DeliveryRow, ShipmentRecord>(DatasetKind::Delivery, input)
}

/// Parse the orders CSV (`state_from`, `state_to`, `count_deliv`)
pub fn parse_orders<R: Read>(input: R) -> Result<Vec<OrderRecord>, DatasetError> {
    read_dataset::<R, OrderRow, OrderRecord>(DatasetKind::Orders, input)
}
