//! Short name → registry station lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::{ShortName, StationRecord};

/// Lookup table over the station registry.
///
/// Built once per refresh cycle. When the registry lists a short name more
/// than once, the first occurrence in feed order wins, which is what a
/// linear scan would return.
#[derive(Debug)]
pub struct StationIndex<'a> {
    by_short_name: HashMap<&'a ShortName, &'a StationRecord>,
    duplicates: usize,
}

impl<'a> StationIndex<'a> {
    /// Index the given registry.
    pub fn new(stations: &'a [StationRecord]) -> Self {
        let mut by_short_name = HashMap::with_capacity(stations.len());
        let mut duplicates = 0;

        for station in stations {
            match by_short_name.entry(&station.short_name) {
                Entry::Vacant(slot) => {
                    slot.insert(station);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        Self {
            by_short_name,
            duplicates,
        }
    }

    /// Resolve a short name. Exact, case-sensitive match.
    pub fn resolve(&self, short_name: &ShortName) -> Option<&'a StationRecord> {
        self.by_short_name.get(short_name).copied()
    }

    /// Number of distinct short names.
    pub fn len(&self) -> usize {
        self.by_short_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_short_name.is_empty()
    }

    /// Registry entries shadowed by an earlier entry with the same short name.
    pub fn shadowed(&self) -> usize {
        self.duplicates
    }
}
