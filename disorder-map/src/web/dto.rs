//! Data transfer objects for web responses.
//!
//! Field names are camelCase; coordinates are GeoJSON order `[lon, lat]`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AreaCode, FacilityRecord, JoinedFacility, JoinedStation, StationInfo};
use crate::presentation::{FocusTarget, MapContext, Marker, MarkerKind};
use crate::reconcile::ReconcileStats;
use crate::refresh::Dataset;

/// Registry attributes of a station.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfoResult {
    pub name: String,
    pub mode: String,
    pub area_code: String,
}

impl StationInfoResult {
    pub fn from_info(info: &StationInfo) -> Self {
        Self {
            name: info.name.clone(),
            mode: info.mode.to_string(),
            area_code: info.area_code.to_string(),
        }
    }
}

/// A stairs or elevator entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResult {
    /// "stairs" or "elevator"
    pub kind: &'static str,

    /// Facility identifier (`Kennung`)
    pub id: String,

    pub short_name: String,
    pub area_code: String,
    pub coordinates: [f64; 2],
    pub description: Option<String>,
    pub status: Option<String>,

    /// Station matched by the facility's short name; `null` when the
    /// registry does not list it, and inside a station's own `disorders`
    pub station_info: Option<StationInfoResult>,
}

impl FacilityResult {
    /// Create from a bare facility record.
    pub fn from_record(facility: &FacilityRecord) -> Self {
        Self {
            kind: facility.kind.as_str(),
            id: facility.id.clone(),
            short_name: facility.short_name.to_string(),
            area_code: facility.area_code.to_string(),
            coordinates: facility.coordinates.lon_lat(),
            description: facility.description.clone(),
            status: facility.status.clone(),
            station_info: None,
        }
    }

    /// Create from a joined facility.
    pub fn from_joined(joined: &JoinedFacility) -> Self {
        Self {
            station_info: joined.station_info.as_ref().map(StationInfoResult::from_info),
            ..Self::from_record(&joined.facility)
        }
    }
}

/// A reconciled station.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    /// Always "station"
    pub kind: &'static str,
    pub short_name: String,
    pub name: Option<String>,
    pub coordinates: [f64; 2],
    pub station_info: Option<StationInfoResult>,
    pub disorders: Vec<FacilityResult>,
    pub has_disorder: bool,
}

impl StationResult {
    pub fn from_station(station: &JoinedStation) -> Self {
        Self {
            kind: JoinedStation::KIND,
            short_name: station.short_name().to_string(),
            name: station.location.name.clone(),
            coordinates: station.location.coordinates.lon_lat(),
            station_info: station.station_info.as_ref().map(StationInfoResult::from_info),
            disorders: station.disorders.iter().map(FacilityResult::from_record).collect(),
            has_disorder: station.has_disorder(),
        }
    }
}

/// Pipeline counters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    pub registry_stations: usize,
    pub locations: usize,
    pub stairs: usize,
    pub elevators: usize,
    pub unmatched_locations: usize,
    pub filtered_by_mode: usize,
    pub duplicates_dropped: usize,
    pub stations_with_disorder: usize,
}

impl From<ReconcileStats> for StatsResult {
    fn from(stats: ReconcileStats) -> Self {
        Self {
            registry_stations: stats.registry_stations,
            locations: stats.locations,
            stairs: stats.stairs,
            elevators: stats.elevators,
            unmatched_locations: stats.unmatched_locations,
            filtered_by_mode: stats.filtered_by_mode,
            duplicates_dropped: stats.duplicates_dropped,
            stations_with_disorder: stats.stations_with_disorder,
        }
    }
}

/// The full published dataset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetResponse {
    pub stations: Vec<StationResult>,
    pub stairs: Vec<FacilityResult>,
    pub elevators: Vec<FacilityResult>,
    pub stats: StatsResult,
    pub refreshed_at: DateTime<Utc>,
}

impl DatasetResponse {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let data = &dataset.data;
        Self {
            stations: data.stations.iter().map(StationResult::from_station).collect(),
            stairs: data.stairs.iter().map(FacilityResult::from_joined).collect(),
            elevators: data.elevators.iter().map(FacilityResult::from_joined).collect(),
            stats: data.stats.into(),
            refreshed_at: dataset.refreshed_at,
        }
    }
}

/// Marker groups for the map widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    #[serde(flatten)]
    pub map: MapContext,
    pub refreshed_at: DateTime<Utc>,
}

/// Result of a user-triggered refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub stats: StatsResult,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// The station and facilities sharing one area code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse<'a> {
    pub area_code: String,
    pub station: Option<&'a Marker>,
    /// Camera target for the station marker
    pub focus: Option<FocusTarget>,
    pub facilities: Vec<&'a Marker>,
}

impl<'a> AreaResponse<'a> {
    pub fn from_map(map: &'a MapContext, area_code: &AreaCode) -> Self {
        let station = map.station_for_area(area_code);
        let facilities = [MarkerKind::Stairs, MarkerKind::Elevator]
            .into_iter()
            .flat_map(|kind| map.markers(kind))
            .filter(|m| m.area_code.as_deref() == Some(area_code.as_str()))
            .collect();
        Self {
            area_code: area_code.to_string(),
            station,
            focus: station.map(|marker| map.focus(marker)),
            facilities,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
