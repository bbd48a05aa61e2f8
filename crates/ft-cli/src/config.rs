//! Host configuration.
//!
//! Layering, lowest to highest precedence: the user's `config.toml` in
//! the platform config directory, an explicit `--config` file, then
//! `FT_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;

/// What the host configures.
///
/// Only the storage location lives here. Everything the engine derives
/// (fasting goal, day boundaries) is kept in the database or computed
/// from the device clock, so a config file is entirely optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    database_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration, optionally merging an explicit config file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(config_dir) = dirs::config_dir() {
            figment = figment.merge(Toml::file(config_dir.join("ft").join("config.toml")));
        }
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("FT_")).extract()
    }

    /// Resolves the database path.
    ///
    /// Unset means the platform data directory, e.g.
    /// `~/.local/share/ft/ft.db` on Linux.
    pub fn database_path(&self) -> PathBuf {
        self.database_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map_or_else(|| PathBuf::from("."), |dir| dir.join("ft"))
                .join("ft.db")
        })
    }
}
