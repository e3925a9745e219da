//! Per-destination reduction of shipment and order rows under an origin selection.

use crate::models::{OrderRecord, RegionId, ShipmentRecord};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Destination → minimum lead time (days) among selected origins
pub type DeliverySummary = BTreeMap<RegionId, u32>;

/// Destination → total order count among selected origins
pub type VolumeSummary = BTreeMap<RegionId, u64>;

/// Origins currently treated as active shipment sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<RegionId>);

impl Selection {
    /// Every known origin (the default)
    pub fn all(origins: &[RegionId]) -> Self {
        Self(origins.iter().cloned().collect())
    }

    /// Keep only requested names that are known origins.
    /// Returns the selection and the requested names that were dropped.
    pub fn restrict(origins: &[RegionId], requested: &[RegionId]) -> (Self, Vec<RegionId>) {
        let known: BTreeSet<&RegionId> = origins.iter().collect();
        let mut selected = BTreeSet::new();
        let mut unknown = Vec::new();

        for name in requested {
            if known.contains(name) {
                selected.insert(name.clone());
            } else if !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }

        (Self(selected), unknown)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.0.contains(region)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionId> {
        self.0.iter()
    }
}

/// Distinct origins of the delivery dataset, sorted by name
pub fn distinct_origins(records: &[ShipmentRecord]) -> Vec<RegionId> {
    records
        .iter()
        .map(|r| r.origin.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Row with an origin → destination lane
trait Lane {
    fn origin(&self) -> &str;
    fn destination(&self) -> &str;
}

impl Lane for ShipmentRecord {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }
}

impl Lane for OrderRecord {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }
}

/// Filter rows to selected origins, group by destination, fold each group with `reduce`
fn group_reduce<T, V>(
    records: &[T],
    selection: &Selection,
    value: impl Fn(&T) -> V,
    reduce: impl Fn(V, V) -> V,
) -> BTreeMap<RegionId, V>
where
    T: Lane,
    V: Copy,
{
    let mut groups = BTreeMap::new();
    if selection.is_empty() {
        return groups;
    }

    for record in records.iter().filter(|r| selection.contains(r.origin())) {
        let v = value(record);
        match groups.entry(record.destination().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(v);
            }
            Entry::Occupied(mut slot) => {
                let merged = reduce(*slot.get(), v);
                slot.insert(merged);
            }
        }
    }

    groups
}

/// Minimum lead time per destination over records whose origin is selected
pub fn aggregate_deliveries(records: &[ShipmentRecord], selection: &Selection) -> DeliverySummary {
    group_reduce(records, selection, |r: &ShipmentRecord| r.lead_time_days, u32::min)
}

/// Total order count per destination over records whose origin is selected
pub fn aggregate_volume(records: &[OrderRecord], selection: &Selection) -> VolumeSummary {
    group_reduce(records, selection, |r: &OrderRecord| r.count, u64::saturating_add)
}
