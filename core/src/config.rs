//! Configuration
//!
//! Game configuration with three sources, later ones winning: built-in
//! defaults, an optional TOML file, and `MIMIC_*` environment variables.
//! Only ambient knobs live here - tone frequencies and the RNG seed.
//! Difficulty (the win threshold, the listening deadline, the speed
//! tiers) is fixed by the game, not configurable.
//!
//! # Environment Variables
//!
//! - `MIMIC_CONFIG`: path to a TOML config file
//! - `MIMIC_SEED`: RNG seed for reproducible games
//!
//! # File Format
//!
//! ```toml
//! pad_frequencies = [164.81, 220.0, 277.18, 329.63]
//! buzzer_frequency = 42.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::session::PAD_COUNT;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Game configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Tone frequency per pad, in Hz.
    pub pad_frequencies: [f32; PAD_COUNT],
    /// Game-over buzzer frequency, in Hz.
    pub buzzer_frequency: f32,
    /// RNG seed for reproducible games. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pad_frequencies: [164.81, 220.0, 277.18, 329.63],
            buzzer_frequency: 42.0,
            rng_seed: None,
        }
    }
}

/// On-disk shape: every field optional so partial files work.
#[derive(Debug, Default, Deserialize)]
struct GameConfigFile {
    pad_frequencies: Option<[f32; PAD_COUNT]>,
    buzzer_frequency: Option<f32>,
    rng_seed: Option<u64>,
}

impl GameConfig {
    /// Load configuration: defaults, then the config file (from
    /// `MIMIC_CONFIG` or the default path, if present), then environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("MIMIC_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(default_config_path);

        let mut config = match path {
            Some(ref p) if p.exists() => Self::from_path(p)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific TOML file over the defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: GameConfigFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::default();
        if let Some(v) = file.pad_frequencies {
            config.pad_frequencies = v;
        }
        if let Some(v) = file.buzzer_frequency {
            config.buzzer_frequency = v;
        }
        if let Some(v) = file.rng_seed {
            config.rng_seed = Some(v);
        }
        Ok(config)
    }

    /// Apply `MIMIC_*` environment overrides in place.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("MIMIC_SEED") {
            self.rng_seed = Some(v);
        }
    }
}

/// Default config file path (`~/.config/mimic/mimic.toml` on Linux).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mimic").join("mimic.toml"))
}

fn env_parse<V: std::str::FromStr>(name: &str) -> Option<V> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparseable value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.pad_frequencies.len(), 4);
        assert_eq!(config.buzzer_frequency, 42.0);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rng_seed = 1234").unwrap();

        let config = GameConfig::from_path(file.path()).unwrap();
        assert_eq!(config.rng_seed, Some(1234));
        // Untouched fields keep their defaults.
        assert_eq!(config.buzzer_frequency, 42.0);
        assert_eq!(config.pad_frequencies, GameConfig::default().pad_frequencies);
    }

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "pad_frequencies = [100.0, 200.0, 300.0, 400.0]\n\
             buzzer_frequency = 60.0\nrng_seed = 9"
        )
        .unwrap();

        let config = GameConfig::from_path(file.path()).unwrap();
        assert_eq!(config.pad_frequencies, [100.0, 200.0, 300.0, 400.0]);
        assert_eq!(config.buzzer_frequency, 60.0);
        assert_eq!(config.rng_seed, Some(9));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buzzer_frequency = \"loud\"").unwrap();

        let err = GameConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = GameConfig::from_path(Path::new("/nonexistent/mimic.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
