use crate::config::{PayloadSettings, RemoteSearchSettings, Settings};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hovercraft-search")]
#[command(
    about = "Search hover documentation over JSON lines on stdin/stdout",
    long_about = None
)]
pub struct Cli {
    /// TOML settings file; every section is optional
    pub config: Option<PathBuf>,
    /// Load the payload from this file instead of the configured source
    #[arg(long, value_name = "PATH", conflicts_with = "payload_url")]
    pub payload: Option<PathBuf>,
    /// Fetch the payload from this URL instead of the configured source
    #[arg(long, value_name = "URL")]
    pub payload_url: Option<String>,
    /// Delegate exact-mode searches to this server
    #[arg(long, value_name = "URL")]
    pub remote_search: Option<String>,
}

impl Cli {
    /// Settings from the config file (or defaults), with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(path) = &self.payload {
            settings.payload = PayloadSettings::File { path: path.clone() };
        }
        if let Some(url) = &self.payload_url {
            settings.payload = PayloadSettings::Remote { url: url.clone() };
        }
        if let Some(base_url) = &self.remote_search {
            settings.remote_search = Some(RemoteSearchSettings {
                base_url: base_url.clone(),
            });
        }

        Ok(settings)
    }
}
