//! Marker descriptors.

use std::fmt;

use serde::Serialize;

use crate::domain::{FacilityKind, JoinedFacility, JoinedStation};

/// What a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Station,
    Stairs,
    Elevator,
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Station => "station",
            MarkerKind::Stairs => "stairs",
            MarkerKind::Elevator => "elevator",
        }
    }
}

impl From<FacilityKind> for MarkerKind {
    fn from(kind: FacilityKind) -> Self {
        match kind {
            FacilityKind::Stairs => MarkerKind::Stairs,
            FacilityKind::Elevator => MarkerKind::Elevator,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the widget needs to place and style one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub kind: MarkerKind,
    /// `[latitude, longitude]`
    pub position: [f64; 2],
    pub title: String,
    /// DOM id: the facility identifier, or the station's area code.
    pub element_id: Option<String>,
    pub area_code: Option<String>,
    pub classes: Vec<String>,
    /// Plain-text popup heading; stations only.
    pub popup: Option<String>,
    pub has_disorder: bool,
}

impl Marker {
    /// Marker for a reconciled station.
    pub fn for_station(station: &JoinedStation) -> Self {
        let has_disorder = station.has_disorder();
        let name = station
            .display_name()
            .unwrap_or(station.short_name().as_str())
            .to_string();
        let area_code = station
            .station_info
            .as_ref()
            .map(|info| info.area_code.to_string());

        Self {
            kind: MarkerKind::Station,
            position: station.location.coordinates.lat_lon(),
            title: station.location.name.clone().unwrap_or_else(|| name.clone()),
            element_id: area_code.clone(),
            area_code,
            classes: classes(MarkerKind::Station, has_disorder),
            popup: Some(name),
            has_disorder,
        }
    }

    /// Marker for a stairs or elevator entry. Facilities are always shown
    /// as disordered.
    pub fn for_facility(joined: &JoinedFacility) -> Self {
        let facility = &joined.facility;
        let kind = MarkerKind::from(facility.kind);
        let title = facility
            .description
            .clone()
            .or_else(|| joined.station_info.as_ref().map(|info| info.name.clone()))
            .unwrap_or_else(|| facility.short_name.to_string());

        Self {
            kind,
            position: facility.coordinates.lat_lon(),
            title,
            element_id: Some(facility.id.clone()),
            area_code: Some(facility.area_code.to_string()),
            classes: classes(kind, true),
            popup: None,
            has_disorder: true,
        }
    }
}

fn classes(kind: MarkerKind, has_disorder: bool) -> Vec<String> {
    let state = if has_disorder { "disorder" } else { "no-disorder" };
    vec![format!("{kind}-marker"), state.to_string()]
}
