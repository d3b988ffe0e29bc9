//! The two operations the proxy understands, and their query parameters.

use crate::types::time_window::TimeWindow;

/// An operation against the proxy, selected by its `api` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyQuery {
    /// All known stations with their coordinates.
    StationCoordinates,
    /// Measurements of one station within a single-hour window.
    AirQuality { station: String, window: TimeWindow },
}

impl ProxyQuery {
    pub fn api_name(&self) -> &'static str {
        match self {
            ProxyQuery::StationCoordinates => "stationCoordinates",
            ProxyQuery::AirQuality { .. } => "airQuality",
        }
    }

    /// Query parameters in the order the proxy documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("api", self.api_name().to_string())];
        if let ProxyQuery::AirQuality { station, window } = self {
            let date = window.date_param();
            let hour = window.hour_param();
            params.push(("date_from", date.clone()));
            params.push(("date_to", date));
            params.push(("time_from", hour.clone()));
            params.push(("time_to", hour));
            params.push(("station", station.clone()));
        }
        params
    }
}
