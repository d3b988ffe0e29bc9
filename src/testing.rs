//! Canned proxy used by the pipeline tests.

use crate::proxy::client::ProxySource;
use crate::proxy::error::ProxyError;
use crate::proxy::query::ProxyQuery;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct FakeProxy {
    stations: Value,
    readings: Mutex<HashMap<String, Value>>,
    delay: Option<Duration>,
    failing: bool,
    requests: Mutex<Vec<ProxyQuery>>,
}

impl FakeProxy {
    pub(crate) fn new() -> Self {
        Self {
            stations: json!({ "data": [] }),
            ..Default::default()
        }
    }

    pub(crate) fn with_stations(mut self, response: Value) -> Self {
        self.stations = response;
        self
    }

    pub(crate) fn with_reading(self, station: &str, response: Value) -> Self {
        self.set_reading(station, response);
        self
    }

    /// Replaces the response for `station`; later sessions see the new one.
    pub(crate) fn set_reading(&self, station: &str, response: Value) {
        self.readings
            .lock()
            .unwrap()
            .insert(station.to_string(), response);
    }

    /// Every request fails as if the proxy were unreachable.
    pub(crate) fn with_failure(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ProxyQuery> {
        self.requests.lock().unwrap().clone()
    }
}

impl ProxySource for FakeProxy {
    async fn fetch(&self, query: &ProxyQuery) -> Result<Value, ProxyError> {
        self.requests.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(unreachable_proxy(query));
        }
        Ok(match query {
            ProxyQuery::StationCoordinates => self.stations.clone(),
            ProxyQuery::AirQuality { station, .. } => self
                .readings
                .lock()
                .unwrap()
                .get(station)
                .cloned()
                .unwrap_or_else(|| json!({})),
        })
    }
}

/// The error a request to an unreachable proxy produces.
fn unreachable_proxy(query: &ProxyQuery) -> ProxyError {
    let url = format!("fake://proxy?api={}", query.api_name());
    let source = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    ProxyError::NetworkRequest(url, source)
}

/// A positional station record in the proxy's layout.
pub(crate) fn station_record(code: &str, city: &str, lon: &str, lat: &str) -> Value {
    json!(["0", code, format!("{} Station", code), city, "", "", "", lon, lat])
}

/// An air-quality response keyed by `actual_id` with a single timestamp.
pub(crate) fn reading_response(actual_id: &str, timestamp: &str, entries: Value) -> Value {
    let mut record = vec![json!(timestamp), json!(1), json!("0")];
    if let Value::Array(entries) = entries {
        record.extend(entries);
    }
    json!({ "data": { actual_id: { timestamp: record } } })
}
