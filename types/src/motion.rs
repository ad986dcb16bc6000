//! Angular motion phases and the programs the schedulers assemble.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time-to-progress mapping applied when a phase (or a whole program) is
/// played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingKind {
    /// Identity mapping.
    Linear,
    /// Deceleration for the wheel's long rotation: near-linear start,
    /// sharp stop at the end.
    WheelStop,
    /// Smooth sweep applied to the needle timeline as a whole.
    NeedleSweep,
}

/// One continuous angular change over a duration.
///
/// With `yoyo` set, the phase plays `repeats + 1` legs of `duration` each,
/// alternating direction; an even leg count nets to zero travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Length of a single leg.
    pub duration: Duration,
    /// Signed angular change of the first leg, degrees.
    pub delta_degrees: f64,
    pub easing: EasingKind,
    pub yoyo: bool,
    /// Extra legs after the first; only meaningful with `yoyo`.
    pub repeats: u32,
}

impl Phase {
    #[must_use]
    pub fn new(duration: Duration, delta_degrees: f64, easing: EasingKind) -> Self {
        Self {
            duration,
            delta_degrees,
            easing,
            yoyo: false,
            repeats: 0,
        }
    }

    #[must_use]
    pub fn yoyo(duration: Duration, delta_degrees: f64, easing: EasingKind, repeats: u32) -> Self {
        Self {
            duration,
            delta_degrees,
            easing,
            yoyo: true,
            repeats,
        }
    }

    /// Number of legs this phase plays.
    #[must_use]
    pub fn legs(&self) -> u32 {
        if self.yoyo { self.repeats + 1 } else { 1 }
    }

    /// Wall-clock length of the whole phase.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.duration * self.legs()
    }

    /// Unsigned degrees travelled across all legs.
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.delta_degrees.abs() * f64::from(self.legs())
    }

    /// Signed angular change once the phase finishes.
    #[must_use]
    pub fn net_delta(&self) -> f64 {
        if self.legs() % 2 == 0 {
            0.0
        } else {
            self.delta_degrees
        }
    }
}

/// Immutable ordered sequence of [`Phase`]s.
///
/// Constructed by the schedulers, consumed read-only by the player.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionProgram {
    phases: Vec<Phase>,
}

impl MotionProgram {
    #[must_use]
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(Phase::total_duration).sum()
    }

    /// Unsigned degrees travelled over the whole program.
    #[must_use]
    pub fn total_travel(&self) -> f64 {
        self.phases.iter().map(Phase::travel).sum()
    }

    /// Signed angular change once the program finishes.
    #[must_use]
    pub fn net_delta(&self) -> f64 {
        self.phases.iter().map(Phase::net_delta).sum()
    }
}
