//! Markers and the registry that tracks the ones currently on the map.

use crate::types::reading::Reading;
use crate::types::station::LatLon;
use std::collections::HashMap;

/// A station marker: where it sits, what its popup says, and what a click shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Identifier reported by the server; used for display and as registry key.
    pub station_id: String,
    /// Identifier the coordinates were looked up with.
    pub lookup_id: String,
    pub position: LatLon,
    pub popup: String,
    /// The reading rendered into the detail panel on click.
    pub reading: Reading,
}

/// Markers currently placed on the map, keyed by [`Marker::station_id`], together with the
/// handle the map surface returned for each.
#[derive(Debug)]
pub struct MarkerRegistry<H> {
    markers: HashMap<String, (Marker, H)>,
}

impl<H> Default for MarkerRegistry<H> {
    fn default() -> Self {
        Self {
            markers: HashMap::new(),
        }
    }
}

impl<H> MarkerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `marker`, returning whatever was tracked under the same station id before.
    pub fn insert(&mut self, marker: Marker, handle: H) -> Option<(Marker, H)> {
        self.markers
            .insert(marker.station_id.clone(), (marker, handle))
    }

    pub fn get(&self, station_id: &str) -> Option<&Marker> {
        self.markers.get(station_id).map(|(marker, _)| marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values().map(|(marker, _)| marker)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Empties the registry and hands back every handle so the markers can be removed.
    pub fn drain_handles(&mut self) -> Vec<H> {
        self.markers.drain().map(|(_, (_, handle))| handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(station_id: &str) -> Marker {
        Marker {
            station_id: station_id.to_string(),
            lookup_id: station_id.to_lowercase(),
            position: LatLon(51.45, 7.01),
            popup: String::new(),
            reading: Reading {
                timestamp: "ts".to_string(),
                entries: vec![],
            },
        }
    }

    #[test]
    fn test_insert_replaces_same_station() {
        let mut registry = MarkerRegistry::new();
        assert!(registry.insert(marker("DENW134"), 1).is_none());
        let previous = registry.insert(marker("DENW134"), 2);
        assert_eq!(previous.map(|(_, handle)| handle), Some(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drain_handles_empties_registry() {
        let mut registry = MarkerRegistry::new();
        registry.insert(marker("DENW134"), 1);
        registry.insert(marker("DENW024"), 2);

        let mut handles = registry.drain_handles();
        handles.sort();

        assert_eq!(handles, vec![1, 2]);
        assert!(registry.is_empty());
        assert!(registry.get("DENW134").is_none());
    }
}
