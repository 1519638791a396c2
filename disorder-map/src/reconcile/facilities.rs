//! Facility → station join.

use crate::domain::{FacilityRecord, JoinedFacility};

use super::resolver::StationIndex;

/// Attach registry data to every facility entry.
///
/// Nothing is filtered or deduplicated: one output per input, in order,
/// including facilities of bus stops and of unknown stations.
pub fn join_facilities(
    facilities: &[FacilityRecord],
    index: &StationIndex<'_>,
) -> Vec<JoinedFacility> {
    facilities
        .iter()
        .map(|facility| JoinedFacility {
            facility: facility.clone(),
            station_info: index
                .resolve(&facility.short_name)
                .map(|station| station.info.clone()),
        })
        .collect()
}
