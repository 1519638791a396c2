//! End-to-end tests for the reconciliation pipeline.

use super::*;
use crate::domain::{
    AreaCode, Coordinates, FacilityKind, OperatingMode, ShortName, StationInfo,
};
use std::collections::HashSet;

fn short(s: &str) -> ShortName {
    ShortName::parse(s).unwrap()
}

fn area(s: &str) -> AreaCode {
    AreaCode::parse(s).unwrap()
}

fn station(short_name: &str, area_code: &str, mode: &str) -> StationRecord {
    StationRecord::new(
        short(short_name),
        format!("Haltestelle {short_name}"),
        OperatingMode::parse(mode),
        area(area_code),
    )
}

fn location(short_name: &str, lon: f64, lat: f64) -> StationLocationRecord {
    StationLocationRecord {
        short_name: short(short_name),
        coordinates: Coordinates::new(lon, lat).unwrap(),
        name: None,
    }
}

fn facility(kind: FacilityKind, id: &str, short_name: &str, area_code: &str) -> FacilityRecord {
    FacilityRecord {
        kind,
        id: id.to_string(),
        short_name: short(short_name),
        area_code: area(area_code),
        coordinates: Coordinates::new(6.95, 50.94).unwrap(),
        description: None,
        status: None,
    }
}

#[test]
fn rail_station_with_duplicate_platforms_and_bus_stop() {
    let stations = vec![station("A", "1", "STRAB"), station("B", "2", "BUS")];
    let locations = vec![
        location("A", 6.0, 50.0),
        location("A", 6.1, 50.1),
        location("B", 7.0, 51.0),
    ];
    let stairs = vec![facility(FacilityKind::Stairs, "S1", "A", "1")];

    let result = reconcile(&stations, &locations, &stairs, &[]);

    assert_eq!(result.stations.len(), 1);
    let a = &result.stations[0];
    assert_eq!(a.short_name().as_str(), "A");
    assert_eq!(a.location.coordinates.lon_lat(), [6.0, 50.0]);
    assert!(a.has_disorder());
    assert_eq!(a.disorders.len(), 1);

    assert_eq!(result.stats.filtered_by_mode, 1);
    assert_eq!(result.stats.duplicates_dropped, 1);
    assert_eq!(result.stats.stations_with_disorder, 1);
}

#[test]
fn all_inputs_empty() {
    let result = reconcile(&[], &[], &[], &[]);

    assert!(result.stations.is_empty());
    assert!(result.stairs.is_empty());
    assert!(result.elevators.is_empty());
    assert_eq!(result.stats, ReconcileStats::default());
}

#[test]
fn unmatched_location_is_kept_without_info() {
    let stations = vec![station("A", "1", "STRAB")];
    let locations = vec![location("Z", 6.0, 50.0)];
    let stairs = vec![facility(FacilityKind::Stairs, "S1", "Z", "1")];

    let result = reconcile(&stations, &locations, &stairs, &[]);

    assert_eq!(result.stations.len(), 1);
    let z = &result.stations[0];
    assert!(z.station_info.is_none());
    // Disorders are found through the registry area code, so none here.
    assert!(!z.has_disorder());
    assert_eq!(result.stats.unmatched_locations, 1);
}

#[test]
fn disorders_matched_by_area_not_short_name() {
    let stations = vec![station("A", "1", "STRAB")];
    let locations = vec![location("A", 6.0, 50.0)];
    // Same area, facility listed under another short name.
    let stairs = vec![facility(FacilityKind::Stairs, "S1", "A-Nord", "1")];
    let elevators = vec![
        facility(FacilityKind::Elevator, "E1", "A", "2"),
        facility(FacilityKind::Elevator, "E2", "X", "1"),
    ];

    let result = reconcile(&stations, &locations, &stairs, &elevators);

    let ids: Vec<_> = result.stations[0]
        .disorders
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(ids, ["S1", "E2"]);
}

#[test]
fn bus_station_filtered_and_rail_station_deduplicated() {
    let stations = vec![station("A", "1", "BUS"), station("B", "2", "STRAB")];
    let locations = vec![
        location("A", 6.0, 50.0),
        location("B", 6.2, 50.2),
        location("B", 6.3, 50.3),
    ];

    let result = reconcile(&stations, &locations, &[], &[]);

    let names: Vec<_> = result
        .stations
        .iter()
        .map(|s| s.short_name().as_str())
        .collect();
    assert_eq!(names, ["B"]);
    assert_eq!(result.stations[0].location.coordinates.longitude(), 6.2);
    assert_eq!(result.stats.filtered_by_mode, 1);
    assert_eq!(result.stats.duplicates_dropped, 1);
}

#[test]
fn mode_filter_runs_before_dedup() {
    // Both locations of a bus stop are dropped by the filter, so none is
    // left for deduplication to drop.
    let stations = vec![station("A", "1", "BUS")];
    let locations = vec![location("A", 6.0, 50.0), location("A", 6.1, 50.1)];

    let result = reconcile(&stations, &locations, &[], &[]);

    assert!(result.stations.is_empty());
    assert_eq!(result.stats.filtered_by_mode, 2);
    assert_eq!(result.stats.duplicates_dropped, 0);
}

#[test]
fn shared_short_name_resolves_to_first_registry_mode() {
    // The bus entry comes first, so every "A" location resolves to BUS and
    // the later rail entry never rescues one of them.
    let stations = vec![station("A", "1", "BUS"), station("A", "2", "STRAB")];
    let locations = vec![location("A", 6.0, 50.0), location("A", 6.1, 50.1)];

    let result = reconcile(&stations, &locations, &[], &[]);

    assert!(result.stations.is_empty());
    assert_eq!(result.stats.filtered_by_mode, 2);
    assert_eq!(result.stats.duplicates_dropped, 0);
}

#[test]
fn facilities_pass_through_unfiltered() {
    let stations = vec![station("A", "1", "STRAB"), station("B", "2", "BUS")];
    let stairs = vec![
        facility(FacilityKind::Stairs, "S1", "A", "1"),
        facility(FacilityKind::Stairs, "S2", "B", "2"),
        facility(FacilityKind::Stairs, "S2", "B", "2"),
    ];
    let elevators = vec![facility(FacilityKind::Elevator, "E1", "Q", "9")];

    let result = reconcile(&stations, &[], &stairs, &elevators);

    assert_eq!(result.stairs.len(), 3);
    assert_eq!(result.elevators.len(), 1);
    assert_eq!(
        result.stairs[1].station_info,
        Some(StationInfo {
            name: "Haltestelle B".to_string(),
            mode: OperatingMode::Bus,
            area_code: area("2"),
        })
    );
    assert!(result.elevators[0].station_info.is_none());
}

#[test]
fn station_info_comes_from_first_registry_entry() {
    let stations = vec![station("A", "1", "STRAB"), station("A", "7", "STRAB")];
    let locations = vec![location("A", 6.0, 50.0)];
    let stairs = vec![facility(FacilityKind::Stairs, "S7", "A", "7")];

    let result = reconcile(&stations, &locations, &stairs, &[]);

    let a = &result.stations[0];
    assert_eq!(a.station_info.as_ref().unwrap().area_code, area("1"));
    assert!(!a.has_disorder());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const KEYS: &str = "[A-F]";
    const AREAS: &str = "[1-4]";

    fn arb_station() -> impl Strategy<Value = StationRecord> {
        (KEYS, AREAS, prop_oneof!["STRAB", "BUS", "BUS STRAB"])
            .prop_map(|(k, a, m)| station(&k, &a, &m))
    }

    fn arb_location() -> impl Strategy<Value = StationLocationRecord> {
        (KEYS, -180.0f64..180.0, -90.0f64..90.0).prop_map(|(k, lon, lat)| location(&k, lon, lat))
    }

    fn arb_facility(kind: FacilityKind) -> impl Strategy<Value = FacilityRecord> {
        ("[a-z]{4}", KEYS, AREAS).prop_map(move |(id, k, a)| facility(kind, &id, &k, &a))
    }

    fn arb_input() -> impl Strategy<
        Value = (
            Vec<StationRecord>,
            Vec<StationLocationRecord>,
            Vec<FacilityRecord>,
            Vec<FacilityRecord>,
        ),
    > {
        (
            prop::collection::vec(arb_station(), 0..8),
            prop::collection::vec(arb_location(), 0..20),
            prop::collection::vec(arb_facility(FacilityKind::Stairs), 0..10),
            prop::collection::vec(arb_facility(FacilityKind::Elevator), 0..10),
        )
    }

    fn first_station<'a>(stations: &'a [StationRecord], key: &ShortName) -> Option<&'a StationRecord> {
        stations.iter().find(|s| &s.short_name == key)
    }

    proptest! {
        /// Joined station info equals the first registry entry's attributes
        #[test]
        fn join_attaches_registry_info((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);
            for joined in &result.stations {
                let expected = first_station(&stations, joined.short_name()).map(|s| s.info.clone());
                prop_assert_eq!(&joined.station_info, &expected);
            }
        }

        /// Every output station is rail or unmatched
        #[test]
        fn output_is_rail_or_unknown((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);
            for joined in &result.stations {
                prop_assert!(joined
                    .station_info
                    .as_ref()
                    .is_none_or(|info| info.mode == OperatingMode::Strab));
            }
        }

        /// Short names are unique and each kept entry is the first surviving location
        #[test]
        fn dedup_first_occurrence((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);

            let mut seen = HashSet::new();
            for joined in &result.stations {
                prop_assert!(seen.insert(joined.short_name().clone()));
            }

            for joined in &result.stations {
                let first = locations
                    .iter()
                    .find(|l| &l.short_name == joined.short_name())
                    .unwrap();
                prop_assert_eq!(&joined.location, first);
            }
        }

        /// Disorder count equals matching stairs plus elevators for the area
        #[test]
        fn disorder_derivation((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);
            for joined in &result.stations {
                prop_assert_eq!(joined.has_disorder(), !joined.disorders.is_empty());

                let expected = match &joined.station_info {
                    Some(info) => stairs
                        .iter()
                        .chain(&elevators)
                        .filter(|f| f.area_code == info.area_code)
                        .count(),
                    None => 0,
                };
                prop_assert_eq!(joined.disorders.len(), expected);

                let first_elevator = joined
                    .disorders
                    .iter()
                    .position(|f| f.is_elevator())
                    .unwrap_or(joined.disorders.len());
                prop_assert!(joined.disorders[first_elevator..].iter().all(|f| f.is_elevator()));
            }
        }

        /// Facility outputs mirror their inputs one to one
        #[test]
        fn facility_passthrough((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);
            prop_assert_eq!(result.stairs.len(), stairs.len());
            prop_assert_eq!(result.elevators.len(), elevators.len());
            for (joined, raw) in result.stairs.iter().zip(&stairs) {
                prop_assert_eq!(&joined.facility, raw);
            }
        }

        /// Counters add up
        #[test]
        fn stats_are_consistent((stations, locations, stairs, elevators) in arb_input()) {
            let result = reconcile(&stations, &locations, &stairs, &elevators);
            let s = result.stats;
            prop_assert_eq!(
                s.locations,
                result.stations.len() + s.filtered_by_mode + s.duplicates_dropped
            );
        }
    }
}
