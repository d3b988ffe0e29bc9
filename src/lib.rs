//! Latest air-quality readings for the monitoring stations of one city, placed on a map.
//!
//! The pipeline: load the city's stations once ([`AirQualityController::init`]), then, each
//! time the feature is switched on, fetch every station's readings for the hour that just
//! ended and put a marker with a popup on the map. Clicking a marker shows the same reading
//! in the detail panel.

mod config;
mod controller;
mod error;
mod map;
mod panel;
mod proxy;
mod readings;
mod stations;
mod types;

#[cfg(test)]
mod testing;

pub use config::*;
pub use controller::*;
pub use error::AirMapError;
pub use panel::{DetailPanel, PANEL_ELEMENT_ID};

pub use map::marker::{Marker, MarkerRegistry};
pub use map::popup::popup_html;
pub use map::presenter::{build_marker, place_marker, present_stations, teardown};
pub use map::surface::{MapSurface, MemoryMap};

pub use proxy::client::{ProxyClient, ProxySource};
pub use proxy::error::ProxyError;
pub use proxy::query::ProxyQuery;

pub use readings::error::ReadingError;
pub use readings::fetcher::{fetch_station_readings, parse_station_readings};

pub use stations::coordinate_loader::{
    load_station_coordinates, parse_city_stations, StationRegistry,
};
pub use stations::error::{CoordinateError, RecordError};

pub use types::reading::{LatestPolicy, PollutantEntry, Reading, StationReadings};
pub use types::station::{LatLon, Station, StationRecord};
pub use types::time_window::TimeWindow;
