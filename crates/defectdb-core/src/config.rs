//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys split on `__`, e.g. `APP_QUERY__DEFAULT_PAGE_SIZE`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Fixture file or directory of `*.json` fixtures.
    pub fixture_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    pub default_page_size: usize,
    /// Page sizes offered by the list page selector.
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub save_latency_ms: u64,
    pub delete_latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub query: QuerySettings,
    pub store: StoreSettings,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings { fixture_path: "data/defects.json".to_string() },
            query: QuerySettings { default_page_size: 10, page_size_options: vec![5, 10, 25, 50] },
            store: StoreSettings { save_latency_ms: 1000, delete_latency_ms: 500 },
            log: LogSettings { filter: "info".to_string() },
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let q = &self.query;
        if q.default_page_size == 0 {
            return Err(Error::InvalidConfig("query.default_page_size must be > 0".into()));
        }
        if q.page_size_options.is_empty() {
            return Err(Error::InvalidConfig("query.page_size_options must not be empty".into()));
        }
        if q.page_size_options.contains(&0) {
            return Err(Error::InvalidConfig("query.page_size_options must all be > 0".into()));
        }
        if !q.page_size_options.contains(&q.default_page_size) {
            return Err(Error::InvalidConfig(format!(
                "query.default_page_size {} is not one of {:?}",
                q.default_page_size, q.page_size_options
            )));
        }
        if self.data.fixture_path.trim().is_empty() {
            return Err(Error::InvalidConfig("data.fixture_path must be set".into()));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from the current directory using `RUST_ENV` (default `dev`).
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            other => tracing::debug!(env = other, "no environment overlay for unknown RUST_ENV"),
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    /// Typed, validated settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fixture location after `~`/env expansion, resolved against the config dir.
    pub fn fixture_path(&self) -> Result<PathBuf> {
        let settings = self.settings()?;
        Ok(resolve_with_base(&self.base_dir, &settings.data.fixture_path))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn default_page_size_must_be_an_option() {
        let mut s = Settings::default();
        s.query.default_page_size = 7;
        assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_page_size_rejected() {
        let mut s = Settings::default();
        s.query.page_size_options = vec![0, 10];
        assert!(s.validate().is_err());
    }

    #[test]
    fn relative_paths_join_base() {
        let p = resolve_with_base(Path::new("/srv/app"), "data/defects.json");
        assert_eq!(p, PathBuf::from("/srv/app/data/defects.json"));
        let abs = resolve_with_base(Path::new("/srv/app"), "/tmp/x.json");
        assert_eq!(abs, PathBuf::from("/tmp/x.json"));
    }
}
