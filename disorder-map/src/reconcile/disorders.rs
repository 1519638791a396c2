//! Area code → disorder lookup.

use std::collections::HashMap;

use crate::domain::{AreaCode, FacilityRecord, StationRecord};

/// Disorder feed entries grouped by area code.
///
/// Every stairs entry of an area comes before every elevator entry, and
/// each group keeps feed order. Presence in either feed is what counts as
/// a disorder; the status text is not consulted.
#[derive(Debug)]
pub struct DisorderIndex<'a> {
    by_area: HashMap<&'a AreaCode, Vec<&'a FacilityRecord>>,
}

impl<'a> DisorderIndex<'a> {
    pub fn new(stairs: &'a [FacilityRecord], elevators: &'a [FacilityRecord]) -> Self {
        let mut by_area: HashMap<&AreaCode, Vec<&FacilityRecord>> = HashMap::new();
        for facility in stairs.iter().chain(elevators) {
            by_area.entry(&facility.area_code).or_default().push(facility);
        }
        Self { by_area }
    }

    /// Disorders for a resolved station. An unresolved station has none.
    pub fn collect(&self, station: Option<&StationRecord>) -> Vec<FacilityRecord> {
        station
            .and_then(|s| self.by_area.get(s.area_code()))
            .map(|facilities| facilities.iter().map(|f| (*f).clone()).collect())
            .unwrap_or_default()
    }

    /// Number of distinct areas with at least one disorder.
    pub fn affected_areas(&self) -> usize {
        self.by_area.len()
    }
}
