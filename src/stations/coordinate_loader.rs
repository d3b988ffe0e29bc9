//! Loads the target city's stations from the coordinate query into a [`StationRegistry`].

use crate::proxy::client::ProxySource;
use crate::proxy::query::ProxyQuery;
use crate::stations::error::CoordinateError;
use crate::types::station::{Station, StationRecord};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::collections::HashMap;

/// Stations known for the session, keyed by the code returned by the coordinate query.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: HashMap<String, Station>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub(crate) fn insert(&mut self, station: Station) {
        self.stations.insert(station.id.clone(), station);
    }

    pub(crate) fn clear(&mut self) {
        self.stations.clear();
    }
}

impl FromIterator<Station> for StationRegistry {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        let mut registry = Self::new();
        for station in iter {
            registry.insert(station);
        }
        registry
    }
}

/// Extracts the stations of `city` from a coordinate response.
///
/// Records of other cities are ignored without being parsed. Records of `city` that fail
/// boundary parsing are skipped with a warning.
pub fn parse_city_stations(response: &Value, city: &str) -> Result<Vec<Station>, CoordinateError> {
    let records = response
        .get("data")
        .ok_or(CoordinateError::MissingData)?
        .as_array()
        .ok_or(CoordinateError::DataNotAnArray)?;

    let stations = records
        .iter()
        .filter(|raw| StationRecord::raw_city(raw) == Some(city))
        .filter_map(|raw| match StationRecord::parse(raw) {
            Ok(record) => Some(record.into_station()),
            Err(e) => {
                warn!("Skipping station record {}: {}", raw, e);
                None
            }
        })
        .collect();
    Ok(stations)
}

/// Queries the proxy for all stations and records those of `city` in `registry`.
///
/// Never fails: a network error or a malformed response is logged and leaves `registry`
/// untouched. Returns the number of stations recorded.
pub async fn load_station_coordinates<P: ProxySource>(
    proxy: &P,
    city: &str,
    registry: &mut StationRegistry,
) -> usize {
    let response = match proxy.fetch(&ProxyQuery::StationCoordinates).await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to fetch station coordinates: {}", e);
            return 0;
        }
    };
    debug!("Station coordinates response: {}", response);

    let stations = match parse_city_stations(&response, city) {
        Ok(stations) => stations,
        Err(e) => {
            warn!("Unexpected station coordinates response: {}", e);
            return 0;
        }
    };

    if stations.is_empty() {
        warn!("No monitoring stations found for {}", city);
        return 0;
    }

    let count = stations.len();
    for station in stations {
        registry.insert(station);
    }
    info!("Loaded {} stations for {}", count, city);
    count
}
