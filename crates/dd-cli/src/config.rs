//! Configuration loading and management.

use std::path::{Path, PathBuf};

use dd_core::WeekdaySet;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weekdays counted when `--weekdays` is not given. Default: all seven.
    pub allowed_weekdays: WeekdaySet,

    /// Exclusion patterns always applied, e.g. `*-12-25`.
    pub excluded_dates: Vec<String>,

    /// Share a classification cache across the ranges of one batch.
    pub memoize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_weekdays: WeekdaySet::ALL,
            excluded_dates: Vec::new(),
            memoize: true,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DAYDIFF_*)
        figment = figment.merge(Env::prefixed("DAYDIFF_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for daydiff.
///
/// On Linux: `~/.config/daydiff`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daydiff"))
}
