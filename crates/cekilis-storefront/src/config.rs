// SPDX-License-Identifier: Apache-2.0

//! Storefront configuration: defaults, an optional TOML file, then
//! environment overrides, validated once before use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cekilis_core::{Error, Result, ResultExt};
use cekilis_model::DEFAULT_CATEGORY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 150;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5_000;

pub const ENV_CEKILIS_PAGE_SIZE: &str = "CEKILIS_PAGE_SIZE";
pub const ENV_CEKILIS_SHOW_ALL_CATEGORY: &str = "CEKILIS_SHOW_ALL_CATEGORY";
pub const ENV_CEKILIS_HTTP_TIMEOUT_MS: &str = "CEKILIS_HTTP_TIMEOUT_MS";
pub const ENV_CEKILIS_STORE_URL: &str = "CEKILIS_STORE_URL";
pub const ENV_CEKILIS_STORE_ROOT: &str = "CEKILIS_STORE_ROOT";

/// Where catalog documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum StoreSource {
    /// Empty in-process store; every fetch reports no documents.
    Memory,
    LocalFs(PathBuf),
    Http(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontConfig {
    pub page_size: usize,
    /// Category key that means "no filter".
    pub show_all_category: String,
    pub http_timeout: Duration,
    pub store: StoreSource,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            show_all_category: DEFAULT_CATEGORY.to_string(),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
            store: StoreSource::Memory,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    page_size: Option<usize>,
    show_all_category: Option<String>,
    http_timeout_ms: Option<u64>,
    store_root: Option<PathBuf>,
    store_url: Option<String>,
}

impl StorefrontConfig {
    /// Defaults, then `path` if it exists, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = path.filter(|p| p.is_file()) {
            let raw = std::fs::read_to_string(path)
                .with_context("read config file")
                .map_err(|e| Error::Config(format!("{e} ({})", path.display())))?;
            config = config.apply_toml_str(&raw)?;
        }
        let config = config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_toml_str(mut self, raw: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(raw)
            .with_context("parse config file")
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
        if let Some(show_all) = file.show_all_category {
            self.show_all_category = show_all;
        }
        if let Some(ms) = file.http_timeout_ms {
            self.http_timeout = Duration::from_millis(ms);
        }
        self.store = pick_store(file.store_root, file.store_url, self.store)?;
        Ok(self)
    }

    /// Apply `CEKILIS_*` overrides read through `lookup`.
    ///
    /// Unlike a silent fallback, an unparseable number is a config error.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(page_size) = env_parse::<usize>(ENV_CEKILIS_PAGE_SIZE, var(ENV_CEKILIS_PAGE_SIZE))? {
            self.page_size = page_size;
        }
        if let Some(show_all) = var(ENV_CEKILIS_SHOW_ALL_CATEGORY) {
            self.show_all_category = show_all;
        }
        if let Some(ms) = env_parse::<u64>(ENV_CEKILIS_HTTP_TIMEOUT_MS, var(ENV_CEKILIS_HTTP_TIMEOUT_MS))? {
            self.http_timeout = Duration::from_millis(ms);
        }
        self.store = pick_store(
            var(ENV_CEKILIS_STORE_ROOT).map(PathBuf::from),
            var(ENV_CEKILIS_STORE_URL),
            self.store,
        )?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be > 0".to_string()));
        }
        if self.show_all_category.trim().is_empty() {
            return Err(Error::Config("show_all_category must not be empty".to_string()));
        }
        if self.http_timeout.is_zero() {
            return Err(Error::Config("http timeout must be > 0".to_string()));
        }
        match &self.store {
            StoreSource::Http(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                Err(Error::Config(format!("store url `{url}` must be http(s)")))
            }
            StoreSource::LocalFs(root) if root.as_os_str().is_empty() => {
                Err(Error::Config("store root must not be empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|v| {
        v.parse::<T>()
            .map_err(|_| Error::Config(format!("{name}=`{v}` is not a valid number")))
    })
    .transpose()
}

fn pick_store(root: Option<PathBuf>, url: Option<String>, current: StoreSource) -> Result<StoreSource> {
    match (root, url) {
        (Some(_), Some(_)) => Err(Error::Config(
            "set only one of store root and store url".to_string(),
        )),
        (Some(root), None) => Ok(StoreSource::LocalFs(root)),
        (None, Some(url)) => Ok(StoreSource::Http(url.trim_end_matches('/').to_string())),
        (None, None) => Ok(current),
    }
}
