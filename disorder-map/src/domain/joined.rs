//! Reconciled output records.

use super::{FacilityRecord, ShortName, StationInfo, StationLocationRecord};

/// A station location enriched with registry data and its disorders.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedStation {
    pub location: StationLocationRecord,
    /// Registry attributes, absent when the short name is unknown.
    pub station_info: Option<StationInfo>,
    /// Stairs first, then elevators, each in feed order.
    pub disorders: Vec<FacilityRecord>,
}

impl JoinedStation {
    /// Marker kind tag for stations.
    pub const KIND: &'static str = "station";

    pub fn short_name(&self) -> &ShortName {
        &self.location.short_name
    }

    /// True iff at least one facility of the station's area is listed.
    pub fn has_disorder(&self) -> bool {
        !self.disorders.is_empty()
    }

    /// Display name from the registry, when matched.
    pub fn display_name(&self) -> Option<&str> {
        self.station_info.as_ref().map(|info| info.name.as_str())
    }
}

/// A stairs or elevator record enriched with its owning station.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedFacility {
    pub facility: FacilityRecord,
    pub station_info: Option<StationInfo>,
}
