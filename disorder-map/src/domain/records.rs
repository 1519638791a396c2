//! Typed feed records.
//!
//! These are produced by the feed parser once a feature has passed
//! validation. The reconciliation engine only ever sees these types.

use std::fmt;

use super::{AreaCode, OperatingMode, ShortName};

/// Error returned for coordinates outside the WGS84 range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates [{longitude}, {latitude}]: {reason}")]
pub struct InvalidCoordinates {
    longitude: f64,
    latitude: f64,
    reason: &'static str,
}

/// A WGS84 point in GeoJSON axis order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Create a point, rejecting non-finite or out-of-range values.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        let err = |reason| InvalidCoordinates {
            longitude,
            latitude,
            reason,
        };
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(err("must be finite"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(err("longitude out of range"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(err("latitude out of range"));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// GeoJSON order: `[longitude, latitude]`.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Map widget order: `[latitude, longitude]`.
    pub fn lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// Non-key attributes of a registry station, attached to joined records.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    /// Display name (`Haltestellenname`).
    pub name: String,
    pub mode: OperatingMode,
    pub area_code: AreaCode,
}

/// An entry of the station registry.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub short_name: ShortName,
    pub info: StationInfo,
}

impl StationRecord {
    pub fn new(
        short_name: ShortName,
        name: impl Into<String>,
        mode: OperatingMode,
        area_code: AreaCode,
    ) -> Self {
        Self {
            short_name,
            info: StationInfo {
                name: name.into(),
                mode,
                area_code,
            },
        }
    }

    pub fn area_code(&self) -> &AreaCode {
        &self.info.area_code
    }

    pub fn mode(&self) -> &OperatingMode {
        &self.info.mode
    }
}

/// One physical stop position. Several may share a short name.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLocationRecord {
    pub short_name: ShortName,
    pub coordinates: Coordinates,
    /// Platform label, when the feed carries one.
    pub name: Option<String>,
}

/// The two kinds of facility the disorder feeds report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityKind {
    Stairs,
    Elevator,
}

impl FacilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityKind::Stairs => "stairs",
            FacilityKind::Elevator => "elevator",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stairs or elevator entry from a disorder feed.
///
/// The kind is fixed by the feed the record was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub kind: FacilityKind,
    /// Unique identifier of the facility (`Kennung`).
    pub id: String,
    pub short_name: ShortName,
    pub area_code: AreaCode,
    pub coordinates: Coordinates,
    /// Human readable label (`Bezeichnung`, falling back to `Name`).
    pub description: Option<String>,
    /// Free-text status as published upstream. Carried, not interpreted.
    pub status: Option<String>,
}

impl FacilityRecord {
    pub fn is_stairs(&self) -> bool {
        self.kind == FacilityKind::Stairs
    }

    pub fn is_elevator(&self) -> bool {
        self.kind == FacilityKind::Elevator
    }
}
