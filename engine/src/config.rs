//! Session configuration: file discovery, parsing, validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use spindle_core::{ConfigError, SpinTuning};

/// Tuning and pacing knobs, loadable from `config.toml`.
///
/// ```toml
/// max_bounce_degree = 170.0
/// bounce_repeats = 3
/// extra_turns = [7, 10]
/// spin_duration_secs = 5.0
/// tick_ms = 8
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpindleConfig {
    /// How far the needle swings on each bounce leg, degrees.
    pub max_bounce_degree: f64,
    /// Yoyo repeats of the bounce phase.
    pub bounce_repeats: u32,
    /// Inclusive `[min, max]` range of extra full turns per spin.
    pub extra_turns: [u32; 2],
    /// Wall-clock length of one spin at 1x playback.
    pub spin_duration_secs: f64,
    /// Frame cadence of the playback loop.
    pub tick_ms: u64,
}

impl Default for SpindleConfig {
    fn default() -> Self {
        Self {
            max_bounce_degree: 170.0,
            bounce_repeats: 3,
            extra_turns: [7, 10],
            spin_duration_secs: 5.0,
            tick_ms: 8,
        }
    }
}

/// Read/parse failure for a config file that does exist.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl SpindleConfig {
    /// Load from the first config file found, falling back to defaults
    /// when none exists. A file that exists but fails to read, parse, or
    /// validate is an error rather than a silent fallback.
    pub fn load() -> Result<Self, ConfigLoadError> {
        for path in Self::candidates() {
            if !path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&path)
                .map_err(|source| ConfigLoadError::Read {
                    path: path.clone(),
                    source,
                })?;
            let config = Self::from_toml(&content)
                .map_err(|source| ConfigLoadError::Parse {
                    path: path.clone(),
                    source,
                })?;
            config.validate()?;
            debug!(path = %path.display(), "config loaded");
            return Ok(config);
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Search order: home directory first, then the working directory
    /// (useful in constrained environments).
    #[must_use]
    pub fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".spindle").join("config.toml"));
        }
        candidates.push(PathBuf::from(".spindle").join("config.toml"));
        candidates
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin_duration_secs <= 0.0 {
            return Err(ConfigError::NonPositiveDuration {
                seconds: self.spin_duration_secs,
            });
        }
        self.tuning().validate()
    }

    #[must_use]
    pub fn tuning(&self) -> SpinTuning {
        SpinTuning {
            max_bounce_degree: self.max_bounce_degree,
            bounce_repeats: self.bounce_repeats,
            extra_turns: self.extra_turns[0]..=self.extra_turns[1],
        }
    }

    #[must_use]
    pub fn spin_duration(&self) -> Duration {
        Duration::from_secs_f64(self.spin_duration_secs)
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
