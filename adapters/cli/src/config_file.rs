//! Loading of the optional TOML configuration file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use scavenger_core::GameConfig;
use serde::Deserialize;

/// Parsed configuration file: an optional pinned seed plus game tuning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ConfigFile {
    /// Run seed pinned by the file, if any.
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Game tuning; omitted sections keep their defaults.
    #[serde(flatten)]
    pub(crate) game: GameConfig,
}

impl ConfigFile {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Parses configuration file contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }
}
