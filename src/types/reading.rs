//! Air-quality readings as returned by the proxy, and selection of the latest one.

use crate::types::station::value_text;
use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Number of leading fields of a per-timestamp record that carry no pollutant data.
pub const DISCARDED_LEADING_FIELDS: usize = 3;

/// One (component, concentration) pair within a reading.
///
/// Both are kept in the server's textual form so they render exactly as delivered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantEntry {
    pub component: String,
    /// Concentration in µg/m³.
    pub concentration: String,
}

impl PollutantEntry {
    pub fn new(component: impl Into<String>, concentration: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            concentration: concentration.into(),
        }
    }

    /// Parses `[component, concentration, ...]`; further fields are ignored.
    pub fn parse(raw: &Value) -> Option<Self> {
        let fields = raw.as_array()?;
        let component = value_text(fields.first()?)?;
        let concentration = value_text(fields.get(1)?)?;
        Some(Self {
            component,
            concentration,
        })
    }

    pub fn concentration_value(&self) -> Option<f64> {
        self.concentration.trim().parse().ok()
    }
}

impl fmt::Display for PollutantEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID {}: {} µg/m³", self.component, self.concentration)
    }
}

/// The measurements of one station at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Timestamp as formatted by the server.
    pub timestamp: String,
    pub entries: Vec<PollutantEntry>,
}

impl Reading {
    /// Builds a reading from the per-timestamp record `[_, _, _, entry, entry, ...]`.
    ///
    /// Returns `None` when the record is not an array. Entries that do not have the
    /// `[component, concentration, ...]` shape are skipped.
    pub fn from_record(timestamp: &str, record: &Value) -> Option<Self> {
        let fields = record.as_array()?;
        let entries = fields
            .iter()
            .skip(DISCARDED_LEADING_FIELDS)
            .filter_map(|raw| {
                let entry = PollutantEntry::parse(raw);
                if entry.is_none() {
                    warn!("Skipping malformed pollutant entry at {}: {}", timestamp, raw);
                }
                entry
            })
            .collect();
        Some(Self {
            timestamp: timestamp.to_string(),
            entries,
        })
    }
}

/// How the latest reading is chosen among the timestamps of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatestPolicy {
    /// The timestamp the server delivered last.
    #[default]
    LastInserted,
    /// The greatest timestamp string. Matches chronological order for the proxy's
    /// `YYYY-MM-DD hh:mm:ss` format.
    Chronological,
}

impl FromStr for LatestPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-inserted" | "last_inserted" | "insertion" => Ok(Self::LastInserted),
            "chronological" => Ok(Self::Chronological),
            other => Err(other.to_string()),
        }
    }
}

/// The result of one air-quality query for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReadings {
    /// The identifier the query was issued for; key into the station registry.
    pub requested_id: String,
    /// The identifier the server keyed its answer by. Display only.
    pub actual_id: String,
    /// Readings in server order.
    pub readings: Vec<Reading>,
}

impl StationReadings {
    /// Picks the latest reading according to `policy`.
    ///
    /// When the server order and the chronological order disagree a warning is logged,
    /// whichever policy is active.
    pub fn latest(&self, policy: LatestPolicy) -> Option<&Reading> {
        let last_inserted = self.readings.last()?;
        let chronological = self
            .readings
            .iter()
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp))?;

        if last_inserted.timestamp != chronological.timestamp {
            warn!(
                "Station {}: last delivered timestamp '{}' is not the chronologically latest '{}'",
                self.actual_id, last_inserted.timestamp, chronological.timestamp
            );
        }

        Some(match policy {
            LatestPolicy::LastInserted => last_inserted,
            LatestPolicy::Chronological => chronological,
        })
    }
}
