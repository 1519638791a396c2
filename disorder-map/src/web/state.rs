//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFeedClient;
use crate::presentation::{IconSet, MapContext, MapView};
use crate::refresh::DatasetStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Published dataset and the feeds it is refreshed from
    pub store: Arc<DatasetStore<CachedFeedClient>>,

    /// Initial map view
    pub view: Arc<MapView>,

    /// Marker icons
    pub icons: Arc<IconSet>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: DatasetStore<CachedFeedClient>, view: MapView, icons: IconSet) -> Self {
        Self {
            store: Arc::new(store),
            view: Arc::new(view),
            icons: Arc::new(icons),
        }
    }

    /// A fresh map context with this server's view and icons.
    pub fn map_context(&self) -> MapContext {
        MapContext::new((*self.view).clone(), (*self.icons).clone())
    }
}
