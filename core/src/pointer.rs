//! Needle motion planning: revert, bounce, settle.

use std::time::Duration;

use spindle_types::{EasingKind, MotionProgram, Phase};

use crate::rng::SpinRng;
use crate::tuning::{ConfigError, SpinTuning, check_duration};

/// A planned needle motion and the offset it leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerPlan {
    /// Final resting deviation from neutral, stored as a magnitude; the
    /// needle physically rests at `-settle_offset` degrees.
    pub settle_offset: f64,
    pub motion: MotionProgram,
}

/// Plan the needle's three-phase motion for one spin.
///
/// The needle first sweeps forward by the carry-in offset left behind by
/// the previous spin (returning to neutral without a visual snap), bounces
/// back and forth, then settles on a fresh random offset. Every degree of
/// travel gets the same share of `duration`, so phase lengths are
/// proportional to angular distance rather than split evenly.
pub fn plan_pointer(
    duration: Duration,
    previous_offset: f64,
    tuning: &SpinTuning,
    rng: &mut dyn SpinRng,
) -> Result<PointerPlan, ConfigError> {
    check_duration(duration)?;
    tuning.validate()?;
    debug_assert!(previous_offset >= 0.0, "carry-in offsets are magnitudes");

    let max_bounce = tuning.max_bounce_degree;
    let settle_offset = f64::from(rng.degrees_in(1..=max_bounce.floor().max(1.0) as i32));

    let total_travel = previous_offset + f64::from(tuning.bounce_legs()) * max_bounce + settle_offset;
    let seconds_per_degree = duration.as_secs_f64() / total_travel;

    let motion = MotionProgram::new(vec![
        Phase::new(
            Duration::from_secs_f64(seconds_per_degree * previous_offset),
            previous_offset,
            EasingKind::Linear,
        ),
        Phase::yoyo(
            Duration::from_secs_f64(seconds_per_degree * max_bounce),
            -max_bounce,
            EasingKind::Linear,
            tuning.bounce_repeats,
        ),
        Phase::new(
            Duration::from_secs_f64(seconds_per_degree * settle_offset),
            -settle_offset,
            EasingKind::Linear,
        ),
    ]);

    Ok(PointerPlan {
        settle_offset,
        motion,
    })
}
