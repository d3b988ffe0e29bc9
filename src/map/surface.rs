//! The map markers are drawn on.

use crate::map::marker::Marker;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A map that can display markers.
///
/// Implement this for the rendering library in use. [`MemoryMap`] keeps markers in memory.
pub trait MapSurface {
    /// Identifies a placed marker so it can be removed again.
    type Handle;

    fn add_marker(&mut self, marker: &Marker) -> Self::Handle;

    fn remove_marker(&mut self, handle: Self::Handle);
}

/// A [`MapSurface`] that records the markers placed on it.
#[derive(Debug, Default)]
pub struct MemoryMap {
    next_handle: u64,
    markers: BTreeMap<u64, Marker>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The placed markers as a GeoJSON `FeatureCollection`.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [marker.position.1, marker.position.0],
                    },
                    "properties": {
                        "station": marker.station_id,
                        "timestamp": marker.reading.timestamp,
                        "popup": marker.popup,
                        "reading": marker.reading,
                    },
                })
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features })
    }
}

impl MapSurface for MemoryMap {
    type Handle = u64;

    fn add_marker(&mut self, marker: &Marker) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.markers.insert(handle, marker.clone());
        handle
    }

    fn remove_marker(&mut self, handle: u64) {
        self.markers.remove(&handle);
    }
}
