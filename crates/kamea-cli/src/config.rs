//! Optional TOML settings for the `kamea` binary.
//!
//! Looked up from `--config`, then `KAMEA_CONFIG`. Flags given on the
//! command line override anything read here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kamea_core::{DEFAULT_MAX_ITERATIONS, WIDTH};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "KAMEA_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Digit width for conversions and polygon transitions.
    pub width: usize,
    /// Step limit for nuclear mutation.
    pub max_iterations: usize,
    /// Print JSON instead of plain text.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            json: false,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config")
    }

    /// Read the config at `explicit`, else at `$KAMEA_CONFIG`, else defaults.
    /// A path that was named but cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let Some(path) = path else {
            tracing::debug!("no config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(?config, "loaded config from {}", path.display());
        Ok(config)
    }
}
