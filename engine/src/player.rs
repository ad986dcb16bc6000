//! Playback of one motion program against a wall clock.

use std::time::Duration;

use spindle_core::ease;
use spindle_types::{EasingKind, MotionProgram, Phase};

/// Plays a [`MotionProgram`], mapping elapsed wall-clock time to an angle.
///
/// The player never mutates the program. An optional global curve warps
/// the playhead (the whole timeline is swept through an easing function)
/// without changing either endpoint, which is how the needle gets its
/// organic sweep while each of its phases stays internally linear.
#[derive(Debug, Clone)]
pub struct ProgramPlayer {
    program: MotionProgram,
    global_easing: EasingKind,
    total: Duration,
    elapsed: Duration,
}

impl ProgramPlayer {
    #[must_use]
    pub fn new(program: MotionProgram, global_easing: EasingKind) -> Self {
        let total = program.total_duration();
        Self {
            program,
            global_easing,
            total,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the playhead. Saturates at the program's end.
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.total);
    }

    /// Force the playhead to 100%. A no-op when already finished.
    pub fn finish(&mut self) {
        self.elapsed = self.total;
    }

    /// Playback progress in `[0, 1]`, before the global curve.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total
    }

    #[must_use]
    pub fn program(&self) -> &MotionProgram {
        &self.program
    }

    /// Signed angular delta from the program's start at the current
    /// playhead. Exactly `net_delta()` once finished.
    #[must_use]
    pub fn angle(&self) -> f64 {
        if self.is_finished() {
            return self.program.net_delta();
        }

        let eased = ease(self.global_easing, self.progress());
        let mut remaining = eased * self.total.as_secs_f64();
        let mut accumulated = 0.0;

        for phase in self.program.phases() {
            let span = phase.total_duration().as_secs_f64();
            if remaining >= span {
                accumulated += phase.net_delta();
                remaining -= span;
            } else {
                return accumulated + angle_within(phase, remaining);
            }
        }
        accumulated
    }
}

/// Angle contribution of a phase at `seconds` into it.
///
/// Yoyo legs alternate direction: even legs run from the leg origin out to
/// `delta_degrees`, odd legs run back.
fn angle_within(phase: &Phase, seconds: f64) -> f64 {
    let leg_seconds = phase.duration.as_secs_f64();
    if leg_seconds <= 0.0 {
        return phase.net_delta();
    }

    let leg = ((seconds / leg_seconds) as u32).min(phase.legs() - 1);
    let within = seconds - f64::from(leg) * leg_seconds;
    let leg_progress = ease(phase.easing, within / leg_seconds);

    if !phase.yoyo {
        return phase.delta_degrees * leg_progress;
    }
    if leg % 2 == 0 {
        phase.delta_degrees * leg_progress
    } else {
        phase.delta_degrees * (1.0 - leg_progress)
    }
}
