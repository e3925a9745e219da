//! Hand-curated representative coordinates for the 50 states
//! Used to place warehouse and order-volume markers

use crate::models::LatLon;
use std::collections::HashMap;
use std::sync::LazyLock;

/// State name -> marker coordinate
pub static STATE_CENTERS: LazyLock<HashMap<&'static str, LatLon>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert("Alabama", LatLon::new(32.806671, -86.791130));
    m.insert("Alaska", LatLon::new(61.370716, -152.404419));
    m.insert("Arizona", LatLon::new(33.729759, -111.431221));
    m.insert("Arkansas", LatLon::new(34.969704, -92.373123));
    m.insert("California", LatLon::new(36.116203, -119.681564));
    m.insert("Colorado", LatLon::new(39.059811, -105.311104));
    m.insert("Connecticut", LatLon::new(41.597782, -72.755371));
    m.insert("Delaware", LatLon::new(39.318523, -75.507141));
    m.insert("Florida", LatLon::new(27.766279, -81.686783));
    m.insert("Georgia", LatLon::new(33.040619, -83.643074));
    m.insert("Hawaii", LatLon::new(21.094318, -157.498337));
    m.insert("Idaho", LatLon::new(44.240459, -114.478828));
    m.insert("Illinois", LatLon::new(40.349457, -88.986137));
    m.insert("Indiana", LatLon::new(39.849426, -86.258278));
    m.insert("Iowa", LatLon::new(42.011539, -93.210526));
    m.insert("Kansas", LatLon::new(38.526600, -96.726486));
    m.insert("Kentucky", LatLon::new(37.668140, -84.670067));
    m.insert("Louisiana", LatLon::new(31.169546, -91.867805));
    m.insert("Maine", LatLon::new(44.693947, -69.381927));
    m.insert("Maryland", LatLon::new(39.063946, -76.802101));
    m.insert("Massachusetts", LatLon::new(42.230171, -71.530106));
    m.insert("Michigan", LatLon::new(43.326618, -84.536095));
    m.insert("Minnesota", LatLon::new(45.694454, -93.900192));
    m.insert("Mississippi", LatLon::new(32.741646, -89.678696));
    m.insert("Missouri", LatLon::new(38.456085, -92.288368));
    m.insert("Montana", LatLon::new(46.921925, -110.454353));
    m.insert("Nebraska", LatLon::new(41.125370, -98.268082));
    m.insert("Nevada", LatLon::new(38.313515, -117.055374));
    m.insert("New Hampshire", LatLon::new(43.452492, -71.563896));
    m.insert("New Jersey", LatLon::new(40.298904, -74.521011));
    m.insert("New Mexico", LatLon::new(34.840515, -106.248482));
    m.insert("New York", LatLon::new(42.165726, -74.948051));
    m.insert("North Carolina", LatLon::new(35.630066, -79.806419));
    m.insert("North Dakota", LatLon::new(47.528912, -99.784012));
    m.insert("Ohio", LatLon::new(40.388783, -82.764915));
    m.insert("Oklahoma", LatLon::new(35.565342, -96.928917));
    m.insert("Oregon", LatLon::new(44.572021, -122.070938));
    m.insert("Pennsylvania", LatLon::new(40.590752, -77.209755));
    m.insert("Rhode Island", LatLon::new(41.680893, -71.511780));
    m.insert("South Carolina", LatLon::new(33.856892, -80.945007));
    m.insert("South Dakota", LatLon::new(44.299782, -99.438828));
    m.insert("Tennessee", LatLon::new(35.747845, -86.692345));
    m.insert("Texas", LatLon::new(31.054487, -97.563461));
    m.insert("Utah", LatLon::new(40.150032, -111.862434));
    m.insert("Vermont", LatLon::new(44.045876, -72.710686));
    m.insert("Virginia", LatLon::new(37.769337, -78.169968));
    m.insert("Washington", LatLon::new(47.400902, -121.490494));
    m.insert("West Virginia", LatLon::new(38.491226, -80.954453));
    m.insert("Wisconsin", LatLon::new(44.268543, -89.616508));
    m.insert("Wyoming", LatLon::new(42.755966, -107.302490));

    m
});

/// Marker coordinate for a state, if the table knows it
pub fn centroid_for(region: &str) -> Option<LatLon> {
    STATE_CENTERS.get(region).copied()
}

/// Whether a marker can be placed for this region
pub fn has_centroid(region: &str) -> bool {
    STATE_CENTERS.contains_key(region)
}

/// All entries sorted by state name (for display and sample generation)
pub fn sorted_entries() -> Vec<(&'static str, LatLon)> {
    let mut entries: Vec<(&'static str, LatLon)> =
        STATE_CENTERS.iter().map(|(name, at)| (*name, *at)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}
