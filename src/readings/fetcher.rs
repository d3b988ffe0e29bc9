//! Fetches the readings of one station for a single-hour window.

use crate::proxy::client::ProxySource;
use crate::proxy::query::ProxyQuery;
use crate::readings::error::ReadingError;
use crate::types::reading::{Reading, StationReadings};
use crate::types::time_window::TimeWindow;
use log::{debug, error, warn};
use serde_json::Value;

/// Extracts the readings from an air-quality response.
///
/// The first key of the `data` object is taken as the actual station identifier. It may be
/// formatted differently from `requested_id` and is not checked against it.
pub fn parse_station_readings(
    requested_id: &str,
    response: &Value,
) -> Result<StationReadings, ReadingError> {
    let data = response
        .get("data")
        .ok_or(ReadingError::MissingData)?
        .as_object()
        .ok_or(ReadingError::DataNotAnObject)?;

    let (actual_id, per_timestamp) = data.iter().next().ok_or(ReadingError::EmptyData)?;
    if data.len() > 1 {
        warn!(
            "Response for {} holds {} stations, using the first ({})",
            requested_id,
            data.len(),
            actual_id
        );
    }

    let per_timestamp = per_timestamp
        .as_object()
        .ok_or_else(|| ReadingError::ReadingsNotAnObject(actual_id.clone()))?;

    let readings = per_timestamp
        .iter()
        .filter_map(|(timestamp, record)| {
            let reading = Reading::from_record(timestamp, record);
            if reading.is_none() {
                warn!(
                    "Skipping record of {} at {}: not an array",
                    actual_id, timestamp
                );
            }
            reading
        })
        .collect();

    Ok(StationReadings {
        requested_id: requested_id.to_string(),
        actual_id: actual_id.clone(),
        readings,
    })
}

/// Queries the proxy for `station_id` within `window`.
///
/// Returns `None` when the request fails or the response carries no usable data; the
/// reason is logged.
pub async fn fetch_station_readings<P: ProxySource>(
    proxy: &P,
    station_id: &str,
    window: TimeWindow,
) -> Option<StationReadings> {
    let query = ProxyQuery::AirQuality {
        station: station_id.to_string(),
        window,
    };

    let response = match proxy.fetch(&query).await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to fetch air quality for {}: {}", station_id, e);
            return None;
        }
    };

    match parse_station_readings(station_id, &response) {
        Ok(readings) => {
            debug!(
                "Station id mapping: {} -> {} ({} timestamps)",
                readings.requested_id,
                readings.actual_id,
                readings.readings.len()
            );
            Some(readings)
        }
        Err(e) => {
            warn!("No air quality data for {} at {}: {}", station_id, window, e);
            None
        }
    }
}
