//! Spin requests, results, and the rotation state carried between spins.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::motion::MotionProgram;
use crate::slices::{SliceError, SliceId};

/// External input triggering one full compute-and-play cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinRequest {
    pub winning_slice: SliceId,
    pub duration: Duration,
}

impl SpinRequest {
    /// Build a request from a raw slice id, validating the id range.
    pub fn new(winning_slice: u8, duration: Duration) -> Result<Self, SliceError> {
        Ok(Self {
            winning_slice: SliceId::new(winning_slice)?,
            duration,
        })
    }
}

/// Output of the compute phase for one spin.
///
/// Consumed by the player during playback, then folded into
/// [`RotationState`] exactly once when the spin completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    /// Final resting deviation of the needle from neutral, degrees.
    pub pointer_final_offset: f64,
    /// Slice-relative resting angle of the wheel, degrees.
    pub spinner_final_offset: f64,
    pub pointer_motion: MotionProgram,
    pub spinner_motion: MotionProgram,
}

/// Resting angles carried from one spin into the next.
///
/// The pointer offset is a magnitude in degrees: the needle physically
/// rests at `-pointer_offset` and is swept forward by exactly that amount
/// at the start of the next spin. The spinner offset is the signed
/// slice-relative angle the wheel came to rest on (slice 0's band dips
/// below zero). There is exactly one writer ([`RotationState::settle`],
/// called once per completed spin) and the state is read only while
/// computing the next spin's plans.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pointer_offset: f64,
    spinner_offset: f64,
}

impl RotationState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pointer_offset: 0.0,
            spinner_offset: 0.0,
        }
    }

    #[must_use]
    pub fn pointer_offset(&self) -> f64 {
        self.pointer_offset
    }

    #[must_use]
    pub fn spinner_offset(&self) -> f64 {
        self.spinner_offset
    }

    /// Wheel-local degree resting under the needle.
    ///
    /// The spinner offset includes the needle's own resting skew, so the
    /// skew cancels out of the indicated position.
    #[must_use]
    pub fn indicated_degree(&self) -> f64 {
        self.spinner_offset - self.pointer_offset
    }

    /// Fold one completed spin's final offsets in. The single mutation
    /// point for the whole session.
    pub fn settle(&mut self, pointer_offset: f64, spinner_offset: f64) {
        debug_assert!(pointer_offset >= 0.0, "pointer offsets are magnitudes");
        self.pointer_offset = pointer_offset;
        self.spinner_offset = spinner_offset;
    }
}
