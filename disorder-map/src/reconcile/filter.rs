//! Post-join station filters.

use std::collections::HashSet;

use crate::domain::JoinedStation;

/// Keep rail-mode stations and stations without registry data.
///
/// A station with no `station_info` has an unknown mode and passes; only an
/// explicit non-`STRAB` mode excludes it.
pub fn retain_rail_stations(stations: Vec<JoinedStation>) -> Vec<JoinedStation> {
    stations
        .into_iter()
        .filter(|station| {
            station
                .station_info
                .as_ref()
                .is_none_or(|info| info.mode.is_rail())
        })
        .collect()
}

/// Collapse stations to one entry per short name, first occurrence wins.
pub fn dedup_by_short_name(stations: Vec<JoinedStation>) -> Vec<JoinedStation> {
    let mut seen = HashSet::new();
    stations
        .into_iter()
        .filter(|station| seen.insert(station.short_name().clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AreaCode, Coordinates, OperatingMode, ShortName, StationInfo, StationLocationRecord,
    };

    fn joined(short: &str, lon: f64, mode: Option<OperatingMode>) -> JoinedStation {
        JoinedStation {
            location: StationLocationRecord {
                short_name: ShortName::parse(short).unwrap(),
                coordinates: Coordinates::new(lon, 50.0).unwrap(),
                name: None,
            },
            station_info: mode.map(|mode| StationInfo {
                name: short.to_string(),
                mode,
                area_code: AreaCode::parse("1").unwrap(),
            }),
            disorders: Vec::new(),
        }
    }

    #[test]
    fn drops_bus_and_other_modes() {
        let stations = vec![
            joined("A", 6.0, Some(OperatingMode::Strab)),
            joined("B", 6.0, Some(OperatingMode::Bus)),
            joined("C", 6.0, Some(OperatingMode::parse("BUS STRAB"))),
        ];
        let kept = retain_rail_stations(stations);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].short_name().as_str(), "A");
    }

    #[test]
    fn unmatched_station_passes_mode_filter() {
        let kept = retain_rail_stations(vec![joined("X", 6.0, None)]);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn dedup_keeps_first_and_order() {
        let stations = vec![
            joined("A", 6.0, None),
            joined("B", 6.5, None),
            joined("A", 6.1, None),
            joined("C", 6.7, None),
            joined("B", 6.6, None),
        ];
        let unique = dedup_by_short_name(stations);

        let names: Vec<_> = unique.iter().map(|s| s.short_name().as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(unique[0].location.coordinates.longitude(), 6.0);
        assert_eq!(unique[1].location.coordinates.longitude(), 6.5);
    }

    #[test]
    fn empty_inputs() {
        assert!(retain_rail_stations(Vec::new()).is_empty());
        assert!(dedup_by_short_name(Vec::new()).is_empty());
    }
}
