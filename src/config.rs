//! Settings for the hovercraft search process, read from a TOML file.
//!
//! ```toml
//! [payload]
//! source = "remote"
//! url = "http://localhost:8080/hovercraft"
//!
//! [remote_search]
//! base_url = "http://localhost:8080"
//!
//! [fuzzy]
//! threshold = 0.35
//! score_order = "ascending"
//! ```

use crate::error::Result;
use crate::generation::IndexOptions;
use crate::search::{FuzzyOptions, RemoteSearchClient, ScoreOrder};
use crate::worker::PayloadSource;
use anyhow::Context;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of a bundled payload.
pub const DEFAULT_PAYLOAD_PATH: &str = "data/hovercraft.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub payload: PayloadSettings,
    /// When set, exact-mode searches are delegated to this server
    pub remote_search: Option<RemoteSearchSettings>,
    pub fuzzy: FuzzySettings,
    pub exact: ExactSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum PayloadSettings {
    File { path: PathBuf },
    Remote { url: String },
}

impl Default for PayloadSettings {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from(DEFAULT_PAYLOAD_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSearchSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FuzzySettings {
    #[serde(flatten)]
    pub options: FuzzyOptions,
    pub score_order: ScoreOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExactSettings {
    pub limit: Option<usize>,
}

impl Settings {
    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse settings")
    }

    /// Where the index builder should load the payload from.
    pub fn payload_source(&self) -> Result<PayloadSource> {
        Ok(match &self.payload {
            PayloadSettings::File { path } => PayloadSource::File(path.clone()),
            PayloadSettings::Remote { url } => PayloadSource::Remote(
                Url::parse(url).with_context(|| format!("Invalid payload URL: {}", url))?,
            ),
        })
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            exact_limit: self.exact.limit,
            fuzzy: self.fuzzy.options,
        }
    }

    /// A client for delegated exact search, if one is configured.
    pub fn remote_search_client(&self, client: &Client) -> Result<Option<RemoteSearchClient>> {
        self.remote_search
            .as_ref()
            .map(|remote| {
                let base_url = Url::parse(&remote.base_url).with_context(|| {
                    format!("Invalid remote search URL: {}", remote.base_url)
                })?;
                Ok(RemoteSearchClient::new(client.clone(), base_url))
            })
            .transpose()
    }
}
