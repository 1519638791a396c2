//! Map presentation model.
//!
//! Turns a reconciled dataset into marker descriptors for the browser map
//! widget. All map state lives in a `MapContext` owned by the caller; there
//! is no process-wide map object.

mod marker;
mod view;

use serde::Serialize;

use crate::domain::{AreaCode, JoinedFacility, JoinedStation};
use crate::reconcile::ReconciledDataset;

pub use marker::{Marker, MarkerKind};
pub use view::{FocusSettings, IconSet, IconSpec, MapView, TileLayer};

/// Camera animation towards a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTarget {
    /// `[latitude, longitude]`
    pub position: [f64; 2],
    pub zoom: u8,
    pub duration_secs: f64,
    pub ease_linearity: f64,
}

/// Map state: view settings, icons, and the marker groups currently shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapContext {
    pub view: MapView,
    pub icons: IconSet,
    stations: Vec<Marker>,
    stairs: Vec<Marker>,
    elevators: Vec<Marker>,
}

impl MapContext {
    /// Create a context with no markers.
    pub fn new(view: MapView, icons: IconSet) -> Self {
        Self {
            view,
            icons,
            stations: Vec::new(),
            stairs: Vec::new(),
            elevators: Vec::new(),
        }
    }

    /// Replace all markers with those of the given dataset.
    pub fn load(&mut self, data: &ReconciledDataset) {
        self.clear();
        self.add_stations(&data.stations);
        self.add_facilities(&data.stairs);
        self.add_facilities(&data.elevators);
    }

    /// Remove every marker.
    pub fn clear(&mut self) {
        self.stations.clear();
        self.stairs.clear();
        self.elevators.clear();
    }

    /// Add one station marker per station.
    pub fn add_stations(&mut self, stations: &[JoinedStation]) {
        self.stations
            .extend(stations.iter().map(Marker::for_station));
    }

    /// Add facility markers to the group matching each facility's kind.
    pub fn add_facilities(&mut self, facilities: &[JoinedFacility]) {
        for joined in facilities {
            let marker = Marker::for_facility(joined);
            self.group_mut(marker.kind).push(marker);
        }
    }

    /// Markers of one kind, in insertion order.
    pub fn markers(&self, kind: MarkerKind) -> &[Marker] {
        match kind {
            MarkerKind::Station => &self.stations,
            MarkerKind::Stairs => &self.stairs,
            MarkerKind::Elevator => &self.elevators,
        }
    }

    /// Total number of markers.
    pub fn len(&self) -> usize {
        self.stations.len() + self.stairs.len() + self.elevators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The station marker of an area, used to highlight the station a
    /// clicked facility belongs to.
    pub fn station_for_area(&self, area: &AreaCode) -> Option<&Marker> {
        self.stations
            .iter()
            .find(|m| m.area_code.as_deref() == Some(area.as_str()))
    }

    /// Where the camera flies when a marker is clicked.
    pub fn focus(&self, marker: &Marker) -> FocusTarget {
        let focus = &self.view.focus;
        FocusTarget {
            position: marker.position,
            zoom: focus.zoom.min(self.view.tiles.max_zoom),
            duration_secs: focus.duration_secs,
            ease_linearity: focus.ease_linearity,
        }
    }

    fn group_mut(&mut self, kind: MarkerKind) -> &mut Vec<Marker> {
        match kind {
            MarkerKind::Station => &mut self.stations,
            MarkerKind::Stairs => &mut self.stairs,
            MarkerKind::Elevator => &mut self.elevators,
        }
    }
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new(MapView::default(), IconSet::default())
    }
}
