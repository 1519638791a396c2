//! Published dataset and its refresh cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::feeds::{FeatureSource, FeedConfig, FeedKind, fetch_snapshot};
use crate::reconcile::{ReconcileStats, ReconciledDataset, reconcile};

/// Errors from a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    /// A feed was unavailable after all fetches settled
    #[error("{0} feed unavailable")]
    MissingFeed(FeedKind),
}

/// One reconciled dataset and when it was built.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub data: ReconciledDataset,
    pub refreshed_at: DateTime<Utc>,
}

/// Thread-safe holder of the current dataset.
///
/// Readers get an `Arc` snapshot; a refresh replaces it wholesale. Until the
/// first successful refresh there is no dataset. Refresh cycles run one at a
/// time, in the order they were requested.
pub struct DatasetStore<S> {
    current: RwLock<Option<Arc<Dataset>>>,
    cycle: Mutex<()>,
    source: S,
    feeds: FeedConfig,
}

impl<S: FeatureSource> DatasetStore<S> {
    /// Create an empty store.
    pub fn new(source: S, feeds: FeedConfig) -> Self {
        Self {
            current: RwLock::new(None),
            cycle: Mutex::new(()),
            source,
            feeds,
        }
    }

    /// The current dataset, if one has been built.
    pub async fn current(&self) -> Option<Arc<Dataset>> {
        let guard = self.current.read().await;
        guard.clone()
    }

    /// Fetch all feeds, reconcile them, and publish the result.
    ///
    /// On failure the previously published dataset is kept and the error
    /// is returned.
    pub async fn refresh(&self) -> Result<ReconcileStats, RefreshError> {
        let _cycle = self.cycle.lock().await;
        let snapshot = fetch_snapshot(&self.source, &self.feeds).await;

        let missing = snapshot.missing();
        if !missing.is_empty() {
            warn!(?missing, "skipping reconciliation, feeds unavailable");
        }
        let feeds = snapshot.complete().map_err(RefreshError::MissingFeed)?;

        let data = reconcile(
            &feeds.stations,
            &feeds.locations,
            &feeds.stairs,
            &feeds.elevators,
        );
        let stats = data.stats;
        let stations = data.stations.len();

        let dataset = Arc::new(Dataset {
            data,
            refreshed_at: Utc::now(),
        });

        let mut guard = self.current.write().await;
        *guard = Some(dataset);

        info!(
            stations,
            stairs = stats.stairs,
            elevators = stats.elevators,
            with_disorder = stats.stations_with_disorder,
            "dataset refreshed"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FeatureCollection;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves fixtures by feed; a feed can be switched off between calls.
    struct FixtureSource {
        config: FeedConfig,
        feeds: Mutex<HashMap<FeedKind, Arc<FeatureCollection>>>,
    }

    impl FixtureSource {
        fn new(config: &FeedConfig) -> Self {
            let feeds = HashMap::from([
                (
                    FeedKind::Stations,
                    fixture(
                        r#"{"features": [
                            {"properties": {"kurzname": "A", "Haltestellenname": "Appellhofplatz",
                                "Betriebsbereich": "STRAB", "Haltestellenbereich": 1}},
                            {"properties": {"kurzname": "B", "Haltestellenname": "Breslauer Platz",
                                "Betriebsbereich": "BUS", "Haltestellenbereich": 2}}
                        ]}"#,
                    ),
                ),
                (
                    FeedKind::Locations,
                    fixture(
                        r#"{"features": [
                            {"properties": {"Kurzname": "A"},
                             "geometry": {"type": "Point", "coordinates": [6.0, 50.0]}},
                            {"properties": {"Kurzname": "A"},
                             "geometry": {"type": "Point", "coordinates": [6.1, 50.1]}},
                            {"properties": {"Kurzname": "B"},
                             "geometry": {"type": "Point", "coordinates": [7.0, 51.0]}}
                        ]}"#,
                    ),
                ),
                (
                    FeedKind::Stairs,
                    fixture(
                        r#"{"features": [
                            {"properties": {"Kennung": "T1", "Kurzname": "A",
                                "Haltestellenbereich": "1"},
                             "geometry": {"type": "Point", "coordinates": [6.0, 50.0]}}
                        ]}"#,
                    ),
                ),
                (FeedKind::Elevators, fixture(r#"{"features": []}"#)),
            ]);
            Self {
                config: config.clone(),
                feeds: Mutex::new(feeds),
            }
        }

        fn switch_off(&self, kind: FeedKind) {
            self.feeds.lock().unwrap().remove(&kind);
        }
    }

    impl FeatureSource for FixtureSource {
        async fn fetch(&self, url: &str) -> Option<Arc<FeatureCollection>> {
            let kind = FeedKind::ALL
                .into_iter()
                .find(|k| self.config.url(*k) == url)?;
            self.feeds.lock().unwrap().get(&kind).cloned()
        }
    }

    fn fixture(json: &str) -> Arc<FeatureCollection> {
        Arc::new(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn empty_until_first_refresh() {
        let config = FeedConfig::new("http://fixture");
        let store = DatasetStore::new(FixtureSource::new(&config), config);

        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn refresh_publishes_reconciled_dataset() {
        let config = FeedConfig::new("http://fixture");
        let store = DatasetStore::new(FixtureSource::new(&config), config);

        let stats = store.refresh().await.unwrap();
        assert_eq!(stats.locations, 3);
        assert_eq!(stats.stations_with_disorder, 1);

        let dataset = store.current().await.unwrap();
        assert_eq!(dataset.data.stations.len(), 1);
        assert_eq!(dataset.data.stations[0].short_name().as_str(), "A");
        assert!(dataset.data.stations[0].has_disorder());
        assert_eq!(dataset.data.stairs.len(), 1);
    }

    #[tokio::test]
    async fn missing_feed_keeps_previous_dataset() {
        let config = FeedConfig::new("http://fixture");
        let store = DatasetStore::new(FixtureSource::new(&config), config);

        store.refresh().await.unwrap();
        let before = store.current().await.unwrap();

        store.source.switch_off(FeedKind::Elevators);
        let err = store.refresh().await.unwrap_err();
        assert_eq!(err, RefreshError::MissingFeed(FeedKind::Elevators));

        let after = store.current().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn missing_feed_on_first_refresh_leaves_store_empty() {
        let config = FeedConfig::new("http://fixture");
        let source = FixtureSource::new(&config);
        source.switch_off(FeedKind::Stations);
        let store = DatasetStore::new(source, config);

        assert!(store.refresh().await.is_err());
        assert!(store.current().await.is_none());
    }

    /// Serves empty collections slowly and records how many fetches
    /// overlap.
    #[derive(Default)]
    struct SlowSource {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FeatureSource for SlowSource {
        async fn fetch(&self, _url: &str) -> Option<Arc<FeatureCollection>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Some(Arc::new(FeatureCollection::default()))
        }
    }

    #[tokio::test]
    async fn overlapping_refreshes_run_one_after_another() {
        let store = DatasetStore::new(SlowSource::default(), FeedConfig::new("http://fixture"));

        let (first, second) = tokio::join!(store.refresh(), store.refresh());
        assert!(first.is_ok());
        assert!(second.is_ok());

        // one cycle fetches the four feeds at once; two cycles never overlap
        assert_eq!(store.source.max_in_flight.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn later_refresh_is_published_last() {
        let store = DatasetStore::new(SlowSource::default(), FeedConfig::new("http://fixture"));

        store.refresh().await.unwrap();
        let first = store.current().await.unwrap();
        store.refresh().await.unwrap();
        let second = store.current().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.refreshed_at >= first.refreshed_at);
    }

    #[test]
    fn error_display() {
        let err = RefreshError::MissingFeed(FeedKind::Elevators);
        assert_eq!(err.to_string(), "elevators feed unavailable");
    }
}
