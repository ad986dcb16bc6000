//! Tunable constants shared by both planners.

use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

/// Rejection raised for non-positive or degenerate tuning values.
///
/// Checked once at configuration time and again defensively at plan time;
/// a rejected value never reaches the angle math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("spin duration must be positive (got {seconds}s)")]
    NonPositiveDuration { seconds: f64 },
    #[error("max bounce degree must be positive (got {degrees})")]
    NonPositiveBounce { degrees: f64 },
    #[error("bounce repeats must be odd so the needle returns to neutral (got {repeats})")]
    EvenBounceRepeats { repeats: u32 },
    #[error("extra turns range must not be empty ({min}..={max})")]
    EmptyTurnRange { min: u32, max: u32 },
}

/// Tuning knobs for one wheel.
///
/// The defaults reproduce the classic game feel: a 170-degree needle
/// sweep bounced four times and seven to ten bonus turns of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinTuning {
    /// How far the needle swings on each bounce leg, degrees.
    pub max_bounce_degree: f64,
    /// Yoyo repeats of the bounce phase; legs played = repeats + 1. Must
    /// be odd so the bounce nets to zero and the needle lands where the
    /// settle phase expects it.
    pub bounce_repeats: u32,
    /// Extra full turns added to every spin to make it visually long.
    pub extra_turns: RangeInclusive<u32>,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            max_bounce_degree: 170.0,
            bounce_repeats: 3,
            extra_turns: 7..=10,
        }
    }
}

impl SpinTuning {
    /// Legs the bounce phase plays, as a travel multiplier.
    #[must_use]
    pub fn bounce_legs(&self) -> u32 {
        self.bounce_repeats + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bounce_degree <= 0.0 {
            return Err(ConfigError::NonPositiveBounce {
                degrees: self.max_bounce_degree,
            });
        }
        if self.bounce_repeats % 2 == 0 {
            return Err(ConfigError::EvenBounceRepeats {
                repeats: self.bounce_repeats,
            });
        }
        if self.extra_turns.is_empty() {
            return Err(ConfigError::EmptyTurnRange {
                min: *self.extra_turns.start(),
                max: *self.extra_turns.end(),
            });
        }
        Ok(())
    }
}

/// Validate a per-spin duration.
pub(crate) fn check_duration(duration: Duration) -> Result<(), ConfigError> {
    if duration.is_zero() {
        return Err(ConfigError::NonPositiveDuration { seconds: 0.0 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_is_valid() {
        assert!(SpinTuning::default().validate().is_ok());
    }

    #[test]
    fn zero_bounce_rejected() {
        let tuning = SpinTuning {
            max_bounce_degree: 0.0,
            ..SpinTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositiveBounce { .. })
        ));
    }

    #[test]
    fn even_bounce_repeats_rejected() {
        let tuning = SpinTuning {
            bounce_repeats: 2,
            ..SpinTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::EvenBounceRepeats { repeats: 2 })
        ));
    }

    #[test]
    fn empty_turn_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let tuning = SpinTuning {
            extra_turns: 10..=7,
            ..SpinTuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::EmptyTurnRange { min: 10, max: 7 })
        ));
    }

    #[test]
    fn zero_duration_rejected() {
        assert!(check_duration(Duration::ZERO).is_err());
        assert!(check_duration(Duration::from_secs(5)).is_ok());
    }
}
