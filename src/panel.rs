//! The detail panel showing one station's latest reading.

use crate::map::popup::reading_lines;
use crate::types::reading::PollutantEntry;
use maud::html;

/// Element id of the panel region.
pub const PANEL_ELEMENT_ID: &str = "air-quality-panel";

/// Holds the rendered contents and visibility of the fixed panel region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPanel {
    html: String,
    visible: bool,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the panel contents with `station_id`'s reading and makes the panel visible.
    pub fn show(&mut self, station_id: &str, timestamp: &str, entries: &[PollutantEntry]) {
        self.html = html! {
            h2 { "Messstation " (station_id) }
            (reading_lines(timestamp, entries))
        }
        .into_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
