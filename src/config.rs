use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::histogram::DEFAULT_BINS;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tap-histogram.yml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub histogram_bins: usize,
    pub chart: ChartConfig,
    pub keys: KeyConfig,
    pub midi: MidiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Rows used for the tallest bar.
    pub height: usize,
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyConfig {
    pub reset: String,
    pub quit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MidiConfig {
    /// Case-insensitive substring of the port name; empty picks the first port.
    pub port: String,
    pub reset_note: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_BINS,
            chart: ChartConfig::default(),
            keys: KeyConfig::default(),
            midi: MidiConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 10,
            show: true,
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            reset: "x".into(),
            quit: "q".into(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        // an empty document means "all defaults"
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "histogram_bins must be at least 1".into(),
            ));
        }
        if self.chart.height == 0 {
            return Err(ConfigError::Invalid("chart.height must be at least 1".into()));
        }

        let reset = self.keys.reset.trim();
        let quit = self.keys.quit.trim();
        if reset.is_empty() || quit.is_empty() {
            return Err(ConfigError::Invalid(
                "keys.reset and keys.quit must not be blank".into(),
            ));
        }
        if reset.eq_ignore_ascii_case(quit) {
            return Err(ConfigError::Invalid(format!(
                "keys.reset and keys.quit are both \"{reset}\""
            )));
        }
        if let Some(note) = self.midi.reset_note {
            if note > 127 {
                return Err(ConfigError::Invalid(format!(
                    "midi.reset_note {note} is outside 0..=127"
                )));
            }
        }
        Ok(())
    }
}
