//! The main entry point: owns the station and marker state of one map and drives the
//! pipeline from the `air-quality` toggle.

use crate::config::AirMapConfig;
use crate::error::AirMapError;
use crate::map::marker::MarkerRegistry;
use crate::map::presenter::{present_stations, teardown};
use crate::map::surface::MapSurface;
use crate::panel::DetailPanel;
use crate::proxy::client::{ProxyClient, ProxySource};
use crate::stations::coordinate_loader::{load_station_coordinates, StationRegistry};
use crate::types::time_window::TimeWindow;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

/// Element id of the checkbox that toggles the feature.
pub const TOGGLE_ELEMENT_ID: &str = "air-quality";

/// Whether station markers are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Hidden,
    Shown,
}

/// Owns everything one map view needs: the stations of the configured city, the markers
/// currently placed, the detail panel, and the cancellation token of the running session.
///
/// A session starts each time the feature is switched on. Starting the next session or
/// switching off cancels it and clears the map. [`Self::set_enabled`] borrows the
/// controller until every fetch of the session has settled; to abandon a session while
/// its fetches are still in flight, take the token from [`Self::begin_session`], run
/// [`Self::present`] and cancel a clone of the token from another task.
///
/// # Examples
///
/// ```no_run
/// use airmap::{AirMapConfig, AirQualityController, MemoryMap};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), airmap::AirMapError> {
/// let mut controller = AirQualityController::new(AirMapConfig::default(), MemoryMap::new())?;
/// controller.init().await;
///
/// // The checkbox was ticked.
/// let placed = controller.set_enabled(true).await;
/// println!("{} stations on the map", placed);
///
/// // A marker was clicked.
/// controller.click_marker("DENW134");
/// println!("{}", controller.panel().html());
///
/// // The checkbox was cleared.
/// controller.set_enabled(false).await;
/// # Ok(())
/// # }
/// ```
pub struct AirQualityController<P, M: MapSurface> {
    config: AirMapConfig,
    proxy: P,
    map: M,
    stations: StationRegistry,
    markers: MarkerRegistry<M::Handle>,
    panel: DetailPanel,
    session: Option<CancellationToken>,
    toggle: ToggleState,
}

impl<M: MapSurface> AirQualityController<ProxyClient, M> {
    /// Creates a controller talking HTTP to `config.base_url`.
    pub fn new(config: AirMapConfig, map: M) -> Result<Self, AirMapError> {
        let proxy = ProxyClient::new(config.base_url.clone(), config.request_timeout)?;
        Ok(Self::with_proxy(config, proxy, map))
    }
}

impl<P: ProxySource, M: MapSurface> AirQualityController<P, M> {
    pub fn with_proxy(config: AirMapConfig, proxy: P, map: M) -> Self {
        Self {
            config,
            proxy,
            map,
            stations: StationRegistry::new(),
            markers: MarkerRegistry::new(),
            panel: DetailPanel::new(),
            session: None,
            toggle: ToggleState::Hidden,
        }
    }

    /// Resets all state and loads the stations of the configured city.
    ///
    /// Returns the number of stations loaded; zero when loading failed.
    pub async fn init(&mut self) -> usize {
        self.reset();
        load_station_coordinates(&self.proxy, &self.config.city, &mut self.stations).await
    }

    /// Cancels the running session, removes all markers, forgets the stations and hides
    /// the panel.
    pub fn reset(&mut self) {
        self.disable();
        self.stations.clear();
        self.panel.hide();
    }

    /// Handles a change of the `air-quality` checkbox.
    ///
    /// Checked: starts a new session and places markers for the hour that just ended;
    /// resolves once every station's fetch has completed. Unchecked: ends the session and
    /// removes all markers. Returns the number of markers placed.
    pub async fn set_enabled(&mut self, checked: bool) -> usize {
        if checked {
            let session = self.begin_session();
            self.present(&session, TimeWindow::now()).await
        } else {
            self.disable();
            0
        }
    }

    /// Starts a new session, cancelling the previous one and removing its markers, and
    /// returns its token.
    ///
    /// The token can be cloned and cancelled from elsewhere while [`Self::present`] runs.
    pub fn begin_session(&mut self) -> CancellationToken {
        if let Some(previous) = self.session.take() {
            previous.cancel();
        }
        teardown(&mut self.map, &mut self.markers);
        let session = CancellationToken::new();
        self.session = Some(session.clone());
        self.toggle = ToggleState::Shown;
        session
    }

    /// Places a marker for every station with data in `window`, unless `session` is
    /// cancelled first. Returns the number of markers placed.
    pub async fn present(&mut self, session: &CancellationToken, window: TimeWindow) -> usize {
        if session.is_cancelled() {
            debug!("Not presenting for a cancelled session");
            return 0;
        }
        let placed = present_stations(
            &self.proxy,
            &self.stations,
            window,
            self.config.latest_policy,
            &mut self.map,
            &mut self.markers,
            session,
        )
        .await;
        info!(
            "Placed {} of {} station markers for {}",
            placed,
            self.stations.len(),
            window
        );
        placed
    }

    /// Ends the running session and removes every marker.
    pub fn disable(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel();
        }
        teardown(&mut self.map, &mut self.markers);
        self.toggle = ToggleState::Hidden;
    }

    /// Shows the reading behind the marker of `station_id` in the detail panel.
    ///
    /// Returns `false` if no such marker is on the map.
    pub fn click_marker(&mut self, station_id: &str) -> bool {
        let Some(marker) = self.markers.get(station_id) else {
            debug!("Click on unknown marker {}", station_id);
            return false;
        };
        self.panel.show(
            &marker.station_id,
            &marker.reading.timestamp,
            &marker.reading.entries,
        );
        true
    }

    pub fn config(&self) -> &AirMapConfig {
        &self.config
    }

    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    pub fn markers(&self) -> &MarkerRegistry<M::Handle> {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    pub fn toggle_state(&self) -> ToggleState {
        self.toggle
    }
}
