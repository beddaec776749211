//! Shared startup for the defectdb binaries: config, logging, fixture load.

use defectdb_core::config::{Config, Settings};
use defectdb_store::{FixtureLoader, RecordStore};
use tracing_subscriber::EnvFilter;

pub struct App {
    pub settings: Settings,
    pub store: RecordStore,
}

/// `RUST_LOG` wins over the `log.filter` setting.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub fn bootstrap() -> anyhow::Result<App> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    init_logging(&settings.log.filter);

    let fixture = config.fixture_path()?;
    tracing::debug!(path = %fixture.display(), "loading fixtures");
    let records = FixtureLoader::new().load(&fixture)?;
    Ok(App { settings, store: RecordStore::new(records) })
}
