use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use disorder_map::cache::CachedFeedClient;
use disorder_map::config::AppConfig;
use disorder_map::feeds::FeedClient;
use disorder_map::presentation::{IconSet, MapView};
use disorder_map::refresh::DatasetStore;
use disorder_map::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("disorder_map=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let client = FeedClient::with_timeout(Duration::from_secs(config.feeds.timeout_secs))?;
    let cached = CachedFeedClient::new(client, &config.cache);
    let store = DatasetStore::new(cached, config.feeds.clone());

    let state = AppState::new(store, MapView::default(), IconSet::default());

    // Serve even if the first load fails; the page shows the error and the
    // background task keeps trying.
    info!(base_url = %config.feeds.base_url, "loading feeds");
    if let Err(e) = state.store.refresh().await {
        warn!(error = %e, "initial refresh failed");
    }

    spawn_refresh(state.store.clone(), config.server.refresh_interval);

    let app = create_router(state, &config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!(addr = %config.server.bind, "disorder map listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Refresh the dataset on a fixed interval.
fn spawn_refresh(store: Arc<DatasetStore<CachedFeedClient>>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await; // first tick is immediate; the initial load already ran
        loop {
            interval.tick().await;
            match store.refresh().await {
                Ok(stats) => info!(
                    with_disorder = stats.stations_with_disorder,
                    "scheduled refresh done"
                ),
                Err(e) => warn!(error = %e, "scheduled refresh failed"),
            }
        }
    });
}
