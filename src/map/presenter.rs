//! Turns the latest reading of every known station into a marker on the map.

use crate::map::marker::{Marker, MarkerRegistry};
use crate::map::popup::popup_html;
use crate::map::surface::MapSurface;
use crate::proxy::client::ProxySource;
use crate::readings::fetcher::fetch_station_readings;
use crate::stations::coordinate_loader::StationRegistry;
use crate::types::reading::{LatestPolicy, StationReadings};
use crate::types::station::Station;
use crate::types::time_window::TimeWindow;
use futures_util::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

/// Builds the marker for `station` from its readings, or `None` if there is nothing to show.
///
/// The marker sits at the coordinates stored for the requested station, while the popup
/// names the station as the server reported it.
pub fn build_marker(
    station: &Station,
    readings: &StationReadings,
    policy: LatestPolicy,
) -> Option<Marker> {
    let Some(latest) = readings.latest(policy) else {
        warn!("No measurements for {}", readings.actual_id);
        return None;
    };

    Some(Marker {
        station_id: readings.actual_id.clone(),
        lookup_id: station.id.clone(),
        position: station.location,
        popup: popup_html(&readings.actual_id, latest),
        reading: latest.clone(),
    })
}

/// Adds `marker` to the map and tracks it. A marker already tracked under the same
/// station id is taken off the map.
pub fn place_marker<M: MapSurface>(
    map: &mut M,
    markers: &mut MarkerRegistry<M::Handle>,
    marker: Marker,
) {
    let handle = map.add_marker(&marker);
    debug!("Placed marker for {} at {:?}", marker.station_id, marker.position);
    if let Some((previous, previous_handle)) = markers.insert(marker, handle) {
        debug!("Replacing earlier marker for {}", previous.station_id);
        map.remove_marker(previous_handle);
    }
}

/// Removes every tracked marker from the map and clears the registry.
pub fn teardown<M: MapSurface>(map: &mut M, markers: &mut MarkerRegistry<M::Handle>) {
    let handles = markers.drain_handles();
    let count = handles.len();
    for handle in handles {
        map.remove_marker(handle);
    }
    if count > 0 {
        info!("Removed {} markers", count);
    }
}

/// Fetches every station's readings for `window` concurrently and places a marker for each
/// station with data, in whatever order the responses arrive.
///
/// Once `session` is cancelled, outstanding requests are dropped and nothing more is placed.
/// Returns the number of markers placed.
pub async fn present_stations<P: ProxySource, M: MapSurface>(
    proxy: &P,
    stations: &StationRegistry,
    window: TimeWindow,
    policy: LatestPolicy,
    map: &mut M,
    markers: &mut MarkerRegistry<M::Handle>,
    session: &CancellationToken,
) -> usize {
    let mut pending: FuturesUnordered<_> = stations
        .iter()
        .map(move |station| async move {
            let readings = fetch_station_readings(proxy, &station.id, window).await;
            (station, readings)
        })
        .collect();
    info!("Requesting air quality for {} stations at {}", pending.len(), window);

    let mut placed = 0;
    loop {
        let next = tokio::select! {
            biased;
            _ = session.cancelled() => {
                info!("Session cancelled with {} requests in flight", pending.len());
                break;
            }
            next = pending.next() => next,
        };
        let Some((station, readings)) = next else {
            break;
        };
        let Some(readings) = readings else {
            continue;
        };
        if let Some(marker) = build_marker(station, &readings, policy) {
            place_marker(map, markers, marker);
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::surface::MemoryMap;
    use crate::testing::{reading_response, FakeProxy};
    use crate::types::reading::{PollutantEntry, Reading};
    use crate::types::station::LatLon;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::time::Duration;

    fn window() -> TimeWindow {
        TimeWindow {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            hour: 9,
        }
    }

    fn station(id: &str, location: LatLon) -> Station {
        Station {
            id: id.to_string(),
            name: None,
            city: "Essen".to_string(),
            location,
        }
    }

    fn essen_stations() -> StationRegistry {
        [
            station("DENW134", LatLon(51.4497, 7.0737)),
            station("DENW024", LatLon(51.4286, 6.9656)),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_marker_at_requested_station_with_popup() {
        let proxy = FakeProxy::new()
            .with_reading(
                "DENW134",
                reading_response("DENW134", "2024-05-01 10:00:00", json!([[1, "10"], [5, "20"]])),
            )
            .with_reading("DENW024", json!({ "data": {} }));
        let mut map = MemoryMap::new();
        let mut markers = MarkerRegistry::new();

        let placed = present_stations(
            &proxy,
            &essen_stations(),
            window(),
            LatestPolicy::LastInserted,
            &mut map,
            &mut markers,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(placed, 1);
        assert_eq!(map.len(), 1);
        let marker = markers.get("DENW134").expect("marker for DENW134");
        assert_eq!(marker.position, LatLon(51.4497, 7.0737));
        assert!(marker.popup.contains("ID 1: 10 µg/m³"));
        assert!(marker.popup.contains("ID 5: 20 µg/m³"));
        assert!(markers.get("DENW024").is_none());
    }

    #[tokio::test]
    async fn test_marker_keyed_by_actual_id_positioned_by_requested_id() {
        let stations: StationRegistry = [station("DENW134", LatLon(51.4497, 7.0737))]
            .into_iter()
            .collect();
        let proxy = FakeProxy::new().with_reading(
            "DENW134",
            reading_response("1510", "2024-05-01 10:00:00", json!([[1, "10"]])),
        );
        let mut map = MemoryMap::new();
        let mut markers = MarkerRegistry::new();

        present_stations(
            &proxy,
            &stations,
            window(),
            LatestPolicy::LastInserted,
            &mut map,
            &mut markers,
            &CancellationToken::new(),
        )
        .await;

        let marker = markers.get("1510").expect("marker keyed by server id");
        assert_eq!(marker.lookup_id, "DENW134");
        assert_eq!(marker.position, LatLon(51.4497, 7.0737));
        assert!(marker.popup.starts_with("<h3>Messstation 1510</h3>"));
    }

    #[tokio::test]
    async fn test_station_without_timestamps_gets_no_marker() {
        let proxy = FakeProxy::new()
            .with_reading("DENW134", json!({ "data": { "DENW134": {} } }));
        let mut map = MemoryMap::new();
        let mut markers = MarkerRegistry::new();

        let placed = present_stations(
            &proxy,
            &essen_stations(),
            window(),
            LatestPolicy::LastInserted,
            &mut map,
            &mut markers,
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(placed, 0);
        assert!(map.is_empty());
        assert!(markers.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_session_places_nothing() {
        let proxy = FakeProxy::new()
            .with_reading(
                "DENW134",
                reading_response("DENW134", "2024-05-01 10:00:00", json!([[1, "10"]])),
            )
            .with_delay(Duration::from_secs(30));
        let mut map = MemoryMap::new();
        let mut markers = MarkerRegistry::new();
        let session = CancellationToken::new();

        let canceller = session.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let placed = tokio::time::timeout(
            Duration::from_secs(5),
            present_stations(
                &proxy,
                &essen_stations(),
                window(),
                LatestPolicy::LastInserted,
                &mut map,
                &mut markers,
                &session,
            ),
        )
        .await
        .expect("cancellation should end the session promptly");

        assert_eq!(placed, 0);
        assert!(map.is_empty());
        assert!(markers.is_empty());
    }

    #[test]
    fn test_build_marker_follows_policy() {
        let station = station("DENW134", LatLon(51.4497, 7.0737));
        let readings = StationReadings {
            requested_id: "DENW134".to_string(),
            actual_id: "DENW134".to_string(),
            readings: vec![
                Reading {
                    timestamp: "2024-05-01 10:00:00".to_string(),
                    entries: vec![PollutantEntry::new("1", "10")],
                },
                Reading {
                    timestamp: "2024-05-01 09:00:00".to_string(),
                    entries: vec![PollutantEntry::new("1", "12")],
                },
            ],
        };

        let last = build_marker(&station, &readings, LatestPolicy::LastInserted).unwrap();
        assert_eq!(last.reading.timestamp, "2024-05-01 09:00:00");

        let newest = build_marker(&station, &readings, LatestPolicy::Chronological).unwrap();
        assert_eq!(newest.reading.timestamp, "2024-05-01 10:00:00");
        assert!(newest.popup.contains("ID 1: 10 µg/m³"));
    }

    #[test]
    fn test_place_marker_replaces_duplicate_station() {
        let mut map = MemoryMap::new();
        let mut markers = MarkerRegistry::new();
        let marker = Marker {
            station_id: "DENW134".to_string(),
            lookup_id: "DENW134".to_string(),
            position: LatLon(51.4497, 7.0737),
            popup: String::new(),
            reading: Reading {
                timestamp: "ts".to_string(),
                entries: vec![],
            },
        };

        place_marker(&mut map, &mut markers, marker.clone());
        place_marker(&mut map, &mut markers, marker);

        assert_eq!(map.len(), 1);
        assert_eq!(markers.len(), 1);

        teardown(&mut map, &mut markers);
        assert!(map.is_empty());
        assert!(markers.is_empty());
    }
}
