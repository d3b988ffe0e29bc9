//! HTML fragments shared by marker popups and the detail panel.

use crate::types::reading::{PollutantEntry, Reading};
use maud::{html, Markup};

/// Measurement time and one line per pollutant entry.
pub(crate) fn reading_lines(timestamp: &str, entries: &[PollutantEntry]) -> Markup {
    html! {
        p { b { "Messzeit:" } " " (timestamp) }
        @for entry in entries {
            p { (entry) }
        }
    }
}

/// Popup summarising `reading` for the station displayed as `station_id`.
///
/// Server-provided text is escaped.
pub fn popup_html(station_id: &str, reading: &Reading) -> String {
    html! {
        h3 { "Messstation " (station_id) }
        (reading_lines(&reading.timestamp, &reading.entries))
    }
    .into_string()
}
