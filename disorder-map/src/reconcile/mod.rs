//! Reconciliation of the four transit feeds.
//!
//! Joins the station registry, station locations, and the stairs and
//! elevator disorder feeds into the collections the map draws:
//!
//! 1. every stairs/elevator entry gets its station's registry data;
//! 2. every station location is resolved by short name and annotated with
//!    the disorders listed for its area;
//! 3. stations whose registry mode is not `STRAB` are dropped;
//! 4. stations are collapsed to one per short name, first seen wins.
//!
//! The order of steps 3 and 4 is fixed: deduplicating first would let a
//! dropped bus entry shadow a later rail entry with the same short name.
//!
//! Everything here is pure and synchronous. Missing matches produce empty
//! or absent fields, never errors.

mod disorders;
mod facilities;
mod filter;
mod resolver;

#[cfg(test)]
mod pipeline_tests;

use tracing::debug;

use crate::domain::{
    FacilityRecord, JoinedFacility, JoinedStation, StationLocationRecord, StationRecord,
};

pub use disorders::DisorderIndex;
pub use facilities::join_facilities;
pub use filter::{dedup_by_short_name, retain_rail_stations};
pub use resolver::StationIndex;

/// Output of one reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledDataset {
    pub stairs: Vec<JoinedFacility>,
    pub elevators: Vec<JoinedFacility>,
    /// Rail stations, one per short name.
    pub stations: Vec<JoinedStation>,
    pub stats: ReconcileStats,
}

/// Counters describing what the pipeline kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub registry_stations: usize,
    pub locations: usize,
    pub stairs: usize,
    pub elevators: usize,
    /// Locations whose short name is not in the registry.
    pub unmatched_locations: usize,
    /// Locations dropped for a non-rail operating mode.
    pub filtered_by_mode: usize,
    /// Locations dropped as later duplicates of a short name.
    pub duplicates_dropped: usize,
    /// Output stations with at least one disorder.
    pub stations_with_disorder: usize,
}

/// Run the full join.
pub fn reconcile(
    stations: &[StationRecord],
    locations: &[StationLocationRecord],
    stairs: &[FacilityRecord],
    elevators: &[FacilityRecord],
) -> ReconciledDataset {
    let index = StationIndex::new(stations);
    if index.shadowed() > 0 {
        debug!(
            shadowed = index.shadowed(),
            "registry lists some short names more than once"
        );
    }

    let joined_stairs = join_facilities(stairs, &index);
    let joined_elevators = join_facilities(elevators, &index);

    let disorders = DisorderIndex::new(stairs, elevators);
    let mut unmatched_locations = 0;
    let joined: Vec<JoinedStation> = locations
        .iter()
        .map(|location| {
            let station = index.resolve(&location.short_name);
            if station.is_none() {
                unmatched_locations += 1;
            }
            JoinedStation {
                location: location.clone(),
                station_info: station.map(|s| s.info.clone()),
                disorders: disorders.collect(station),
            }
        })
        .collect();

    let before_filter = joined.len();
    let rail = retain_rail_stations(joined);
    let filtered_by_mode = before_filter - rail.len();

    let before_dedup = rail.len();
    let unique = dedup_by_short_name(rail);
    let duplicates_dropped = before_dedup - unique.len();

    let stats = ReconcileStats {
        registry_stations: stations.len(),
        locations: locations.len(),
        stairs: stairs.len(),
        elevators: elevators.len(),
        unmatched_locations,
        filtered_by_mode,
        duplicates_dropped,
        stations_with_disorder: unique.iter().filter(|s| s.has_disorder()).count(),
    };

    debug!(
        stations = unique.len(),
        affected_areas = disorders.affected_areas(),
        unmatched = stats.unmatched_locations,
        filtered = stats.filtered_by_mode,
        duplicates = stats.duplicates_dropped,
        "reconciliation complete"
    );

    ReconciledDataset {
        stairs: joined_stairs,
        elevators: joined_elevators,
        stations: unique,
        stats,
    }
}
