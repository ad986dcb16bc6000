//! Wheel motion planning: one long eased rotation onto the winning band.

use std::time::Duration;

use spindle_types::{EasingKind, MotionProgram, Phase, SliceId, SliceMap};

use crate::rng::SpinRng;
use crate::tuning::{ConfigError, SpinTuning, check_duration};

/// A planned wheel rotation and the slice-relative offset it leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerPlan {
    /// `slice_target + pointer_settle_offset`: the carry-over undone by the
    /// `previous_offset` term of the next spin's rotation sum.
    pub final_offset: f64,
    pub motion: MotionProgram,
}

/// Plan the wheel's rotation for one spin.
///
/// The rotation lands a random degree inside the winning band under the
/// needle. The needle does not rest at neutral (it settles at
/// `-pointer_settle_offset`), so that skew is folded into the rotation sum
/// exactly once; `previous_offset` likewise carries the wheel's own prior
/// resting skew forward, since the wheel turns continuously and is never
/// snapped back between spins.
pub fn plan_spinner(
    duration: Duration,
    winning_slice: SliceId,
    pointer_settle_offset: f64,
    previous_offset: f64,
    slices: &SliceMap,
    tuning: &SpinTuning,
    rng: &mut dyn SpinRng,
) -> Result<SpinnerPlan, ConfigError> {
    check_duration(duration)?;
    tuning.validate()?;

    let band = slices.band(winning_slice);
    let slice_target = f64::from(rng.degrees_in(
        band.min_degree.ceil() as i32..=(band.max_degree.ceil() as i32 - 1),
    ));
    let bonus_rotation = 360.0 * f64::from(rng.turns_in(tuning.extra_turns.clone()));

    // The pointer skew is compensated here and nowhere else.
    let total_rotation = previous_offset + bonus_rotation - slice_target - pointer_settle_offset;

    let motion = MotionProgram::new(vec![Phase::new(
        duration,
        total_rotation,
        EasingKind::WheelStop,
    )]);

    Ok(SpinnerPlan {
        final_offset: slice_target + pointer_settle_offset,
        motion,
    })
}
