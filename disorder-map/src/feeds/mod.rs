//! Open data feed fetcher.
//!
//! Retrieves the four GeoJSON feeds the map is built from: the station
//! registry, station locations, and the stairs and elevator disorder lists.
//! Records are validated here, at the parsing boundary, so everything
//! downstream works with typed data.
//!
//! Fetch failures of any kind are logged and surface as an absent feed.

mod client;
mod convert;
mod error;
mod types;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::domain::{FacilityKind, FacilityRecord, StationLocationRecord, StationRecord};

pub use client::FeedClient;
pub use convert::{parse_facilities, parse_locations, parse_stations};
pub use error::{FeedError, RecordError};
pub use types::{Feature, FeatureCollection, Geometry};

/// Default base URL of the KVB open data service.
pub const DEFAULT_BASE_URL: &str = "https://data.webservice-kvb.koeln/service/opendata";

/// The four source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Stations,
    Locations,
    Stairs,
    Elevators,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::Stations,
        FeedKind::Locations,
        FeedKind::Stairs,
        FeedKind::Elevators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Stations => "stations",
            FeedKind::Locations => "locations",
            FeedKind::Stairs => "stairs",
            FeedKind::Elevators => "elevators",
        }
    }

    /// Path below the base URL.
    fn default_path(&self) -> &'static str {
        match self {
            FeedKind::Stations => "haltestellenbereiche/json",
            FeedKind::Locations => "haltestellen/json",
            FeedKind::Stairs => "fahrtreppenstoerung/json",
            FeedKind::Elevators => "aufzugsstoerung/json",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the feeds live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    pub stations_path: String,
    pub locations_path: String,
    pub stairs_path: String,
    pub elevators_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config with default paths below the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            stations_path: FeedKind::Stations.default_path().to_string(),
            locations_path: FeedKind::Locations.default_path().to_string(),
            stairs_path: FeedKind::Stairs.default_path().to_string(),
            elevators_path: FeedKind::Elevators.default_path().to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Override the path of one feed.
    pub fn with_path(mut self, kind: FeedKind, path: impl Into<String>) -> Self {
        let path = path.into();
        match kind {
            FeedKind::Stations => self.stations_path = path,
            FeedKind::Locations => self.locations_path = path,
            FeedKind::Stairs => self.stairs_path = path,
            FeedKind::Elevators => self.elevators_path = path,
        }
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of a feed.
    pub fn url(&self, kind: FeedKind) -> String {
        let path = match kind {
            FeedKind::Stations => &self.stations_path,
            FeedKind::Locations => &self.locations_path,
            FeedKind::Stairs => &self.stairs_path,
            FeedKind::Elevators => &self.elevators_path,
        };
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Something that can produce a raw feature collection for a URL.
///
/// Implementations must not fail: any error becomes `None`.
pub trait FeatureSource: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Option<Arc<FeatureCollection>>> + Send;
}

/// The typed feeds of one fetch cycle. A feed is `None` if it could not be
/// fetched.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub stations: Option<Vec<StationRecord>>,
    pub locations: Option<Vec<StationLocationRecord>>,
    pub stairs: Option<Vec<FacilityRecord>>,
    pub elevators: Option<Vec<FacilityRecord>>,
}

/// All four feeds, present.
#[derive(Debug, Clone, Default)]
pub struct FeedSet {
    pub stations: Vec<StationRecord>,
    pub locations: Vec<StationLocationRecord>,
    pub stairs: Vec<FacilityRecord>,
    pub elevators: Vec<FacilityRecord>,
}

impl FeedSnapshot {
    /// Feeds that are absent, in `FeedKind::ALL` order.
    pub fn missing(&self) -> Vec<FeedKind> {
        let present = [
            self.stations.is_some(),
            self.locations.is_some(),
            self.stairs.is_some(),
            self.elevators.is_some(),
        ];
        FeedKind::ALL
            .into_iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Return the complete set, or the first missing feed.
    pub fn complete(self) -> Result<FeedSet, FeedKind> {
        Ok(FeedSet {
            stations: self.stations.ok_or(FeedKind::Stations)?,
            locations: self.locations.ok_or(FeedKind::Locations)?,
            stairs: self.stairs.ok_or(FeedKind::Stairs)?,
            elevators: self.elevators.ok_or(FeedKind::Elevators)?,
        })
    }
}

/// Fetch all four feeds concurrently and parse them.
///
/// Returns once every fetch has settled.
pub async fn fetch_snapshot<S: FeatureSource>(source: &S, config: &FeedConfig) -> FeedSnapshot {
    let stations_url = config.url(FeedKind::Stations);
    let locations_url = config.url(FeedKind::Locations);
    let stairs_url = config.url(FeedKind::Stairs);
    let elevators_url = config.url(FeedKind::Elevators);

    let (stations, locations, stairs, elevators) = tokio::join!(
        source.fetch(&stations_url),
        source.fetch(&locations_url),
        source.fetch(&stairs_url),
        source.fetch(&elevators_url),
    );

    FeedSnapshot {
        stations: stations.map(|c| parse_stations(&c)),
        locations: locations.map(|c| parse_locations(&c)),
        stairs: stairs.map(|c| parse_facilities(FacilityKind::Stairs, &c)),
        elevators: elevators.map(|c| parse_facilities(FacilityKind::Elevator, &c)),
    }
}
