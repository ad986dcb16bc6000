//! The spin sequencer: one state machine per game session.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use spindle_core::{ConfigError, SpinRng, SpinTuning, plan_pointer, plan_spinner};
use spindle_types::{
    EasingKind, RotationState, SliceError, SliceMap, SpinRequest, SpinResult,
};

use crate::events::SpinObserver;
use crate::player::ProgramPlayer;

/// Rejection raised by [`SpinSession::request_spin`].
#[derive(Debug, Error)]
pub enum SpinError {
    #[error(transparent)]
    UnknownSlice(#[from] SliceError),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    /// A spin was requested while one is already playing. Requests are
    /// rejected rather than queued so the rotation state keeps its single
    /// writer.
    #[error("a spin is already in progress")]
    SpinInProgress,
}

/// Which control affordances the presentation layer should enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub spin_enabled: bool,
    pub rapid_enabled: bool,
    pub skip_enabled: bool,
}

/// Observable lifecycle of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Playing,
}

/// One spin in flight: both players plus the angles they started from.
#[derive(Debug)]
struct ActiveSpin {
    result: SpinResult,
    pointer: ProgramPlayer,
    spinner: ProgramPlayer,
    /// Wheel angle when the spin started; playback adds to it.
    base_rotation: f64,
    /// Needle angle when the spin started (`-previous_offset`).
    base_pointer: f64,
}

/// Owns the rotation state, tuning, and randomness for one game session
/// and sequences spins through `Idle -> Playing -> (complete) -> Idle`.
///
/// Scheduling is synchronous, so the computing step lives inside
/// [`request_spin`](Self::request_spin); playback is driven by
/// [`advance`](Self::advance) from the host's frame loop.
pub struct SpinSession {
    slices: SliceMap,
    tuning: SpinTuning,
    rng: Box<dyn SpinRng>,
    state: RotationState,
    /// Absolute rendered wheel angle, continuous across spins. Reduced
    /// mod 360 at completion for numerical containment only.
    wheel_rotation: f64,
    time_scale: f64,
    active: Option<ActiveSpin>,
}

impl std::fmt::Debug for SpinSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinSession")
            .field("state", &self.state)
            .field("wheel_rotation", &self.wheel_rotation)
            .field("time_scale", &self.time_scale)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl SpinSession {
    #[must_use]
    pub fn new(tuning: SpinTuning, rng: Box<dyn SpinRng>) -> Self {
        Self {
            slices: SliceMap::standard(),
            tuning,
            rng,
            state: RotationState::new(),
            wheel_rotation: 0.0,
            time_scale: 1.0,
            active: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.active.is_some() {
            SessionPhase::Playing
        } else {
            SessionPhase::Idle
        }
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.phase() == SessionPhase::Playing
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        let spinning = self.is_spinning();
        Controls {
            spin_enabled: !spinning,
            rapid_enabled: spinning,
            skip_enabled: spinning,
        }
    }

    #[must_use]
    pub fn rotation_state(&self) -> &RotationState {
        &self.state
    }

    #[must_use]
    pub fn slices(&self) -> &SliceMap {
        &self.slices
    }

    /// Absolute rendered wheel angle, degrees.
    #[must_use]
    pub fn wheel_rotation(&self) -> f64 {
        match &self.active {
            Some(spin) => spin.base_rotation + spin.spinner.angle(),
            None => self.wheel_rotation,
        }
    }

    /// Needle angle relative to neutral, degrees.
    #[must_use]
    pub fn pointer_angle(&self) -> f64 {
        match &self.active {
            Some(spin) => spin.base_pointer + spin.pointer.angle(),
            None => -self.state.pointer_offset(),
        }
    }

    /// Playback progress of the current spin, 1.0 when idle.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.active
            .as_ref()
            .map_or(1.0, |spin| spin.spinner.progress())
    }

    #[must_use]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Compute both motion plans and start playback.
    ///
    /// Rejected without touching any state when a spin is already playing
    /// or when the tuning fails validation.
    pub fn request_spin(
        &mut self,
        request: SpinRequest,
        observer: &mut dyn SpinObserver,
    ) -> Result<(), SpinError> {
        if self.active.is_some() {
            warn!(slice = %request.winning_slice, "spin rejected: already playing");
            return Err(SpinError::SpinInProgress);
        }

        // Pointer first: its settle offset feeds the spinner's sum.
        let pointer = plan_pointer(
            request.duration,
            self.state.pointer_offset(),
            &self.tuning,
            self.rng.as_mut(),
        )?;
        let spinner = plan_spinner(
            request.duration,
            request.winning_slice,
            pointer.settle_offset,
            self.state.spinner_offset(),
            &self.slices,
            &self.tuning,
            self.rng.as_mut(),
        )?;

        debug!(
            slice = %request.winning_slice,
            rotation = spinner.motion.net_delta(),
            settle = pointer.settle_offset,
            "spin planned"
        );

        let result = SpinResult {
            pointer_final_offset: pointer.settle_offset,
            spinner_final_offset: spinner.final_offset,
            pointer_motion: pointer.motion.clone(),
            spinner_motion: spinner.motion.clone(),
        };

        self.active = Some(ActiveSpin {
            pointer: ProgramPlayer::new(pointer.motion, EasingKind::NeedleSweep),
            spinner: ProgramPlayer::new(spinner.motion, EasingKind::Linear),
            base_rotation: self.wheel_rotation,
            base_pointer: -self.state.pointer_offset(),
            result,
        });
        observer.on_spin_start(request.winning_slice);
        Ok(())
    }

    /// Drive playback by one frame's wall-clock delta.
    ///
    /// Completion happens here, exactly once, when both players have
    /// reached their final angle.
    pub fn advance(&mut self, delta: Duration, observer: &mut dyn SpinObserver) {
        let Some(spin) = &mut self.active else {
            return;
        };
        let scaled = delta.mul_f64(self.time_scale);
        spin.pointer.advance(scaled);
        spin.spinner.advance(scaled);

        if spin.pointer.is_finished() && spin.spinner.is_finished() {
            self.complete(observer);
        }
    }

    /// Force the current spin to its resting state immediately.
    ///
    /// Idempotent: skipping while idle (or skipping twice) is a no-op and
    /// leaves the rotation state as a single skip would.
    pub fn skip_to_end(&mut self, observer: &mut dyn SpinObserver) {
        let Some(spin) = &mut self.active else {
            return;
        };
        debug!("skip requested, forcing both programs to completion");
        spin.pointer.finish();
        spin.spinner.finish();
        self.complete(observer);
    }

    /// Change the shared playback rate. Only the wall clock changes; the
    /// planned angles are untouched. Ignored while idle or for
    /// non-positive multipliers.
    pub fn set_time_scale(&mut self, multiplier: f64) {
        if multiplier <= 0.0 {
            warn!(multiplier, "ignoring non-positive time scale");
            return;
        }
        if self.active.is_none() {
            debug!(multiplier, "ignoring time scale change while idle");
            return;
        }
        self.time_scale = multiplier;
    }

    /// Fold the finished spin into the session. The only writer of the
    /// rotation state.
    fn complete(&mut self, observer: &mut dyn SpinObserver) {
        let Some(spin) = self.active.take() else {
            return;
        };
        debug_assert!(spin.pointer.is_finished() && spin.spinner.is_finished());

        // Mod-360 housekeeping: same rendered angle, bounded magnitude.
        self.wheel_rotation =
            (spin.base_rotation + spin.spinner.angle()).rem_euclid(360.0);
        self.state.settle(
            spin.result.pointer_final_offset,
            spin.result.spinner_final_offset,
        );
        self.time_scale = 1.0;

        info!(
            rotation = self.wheel_rotation,
            indicated = self.state.indicated_degree(),
            "spin complete"
        );
        observer.on_pointer_settle(spin.result.pointer_final_offset);
        observer.on_spinner_rest(self.wheel_rotation);
        observer.on_spin_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventQueue, NullObserver, SpinEvent};
    use spindle_core::SeededRng;
    use spindle_types::SliceId;

    const FIVE_SECONDS: Duration = Duration::from_secs(5);
    const TICK: Duration = Duration::from_millis(8);

    fn session(seed: u64) -> SpinSession {
        SpinSession::new(SpinTuning::default(), Box::new(SeededRng::new(seed)))
    }

    fn request(slice: u8) -> SpinRequest {
        SpinRequest::new(slice, FIVE_SECONDS).unwrap()
    }

    fn run_to_completion(session: &mut SpinSession, observer: &mut dyn SpinObserver) {
        let mut guard = 0;
        while session.is_spinning() {
            session.advance(TICK, observer);
            guard += 1;
            assert!(guard < 100_000, "spin never completed");
        }
    }

    #[test]
    fn fresh_session_is_idle() {
        let session = session(1);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.controls().spin_enabled);
        assert!(!session.controls().rapid_enabled);
        assert!(!session.controls().skip_enabled);
    }

    #[test]
    fn spin_lands_inside_the_winning_band() {
        let mut session = session(2);
        let mut observer = NullObserver;
        for round in 0..40 {
            let slice = (round % 13) as u8;
            session.request_spin(request(slice), &mut observer).unwrap();
            run_to_completion(&mut session, &mut observer);

            let indicated = session.rotation_state().indicated_degree();
            assert_eq!(
                session.slices().slice_at(indicated),
                Some(SliceId::new(slice).unwrap()),
                "round {round}: indicated {indicated} missed slice {slice}"
            );
        }
    }

    #[test]
    fn wheel_rotation_is_reduced_but_consistent() {
        let mut session = session(3);
        let mut observer = NullObserver;
        session.request_spin(request(7), &mut observer).unwrap();
        run_to_completion(&mut session, &mut observer);

        let rotation = session.wheel_rotation();
        assert!((0.0..360.0).contains(&rotation));
        // The reduced rotation still cancels the stored offset.
        let cancel = (rotation + session.rotation_state().spinner_offset()).rem_euclid(360.0);
        assert!(cancel < 1e-6 || (360.0 - cancel) < 1e-6);
    }

    #[test]
    fn concurrent_request_is_rejected_without_disturbing_playback() {
        let mut session = session(4);
        let mut observer = NullObserver;
        session.request_spin(request(5), &mut observer).unwrap();
        session.advance(Duration::from_secs(1), &mut observer);
        let angle_before = session.wheel_rotation();

        let err = session.request_spin(request(8), &mut observer).unwrap_err();
        assert!(matches!(err, SpinError::SpinInProgress));
        assert!((session.wheel_rotation() - angle_before).abs() < f64::EPSILON);
        assert!(session.is_spinning());
    }

    #[test]
    fn skip_completes_synchronously() {
        let mut session = session(5);
        let mut events = EventQueue::new();
        session.request_spin(request(9), &mut events).unwrap();
        session.advance(Duration::from_millis(100), &mut events);

        session.skip_to_end(&mut events);
        assert_eq!(session.phase(), SessionPhase::Idle);
        let recorded = events.take();
        assert_eq!(recorded.last(), Some(&SpinEvent::Completed));
    }

    #[test]
    fn skip_is_idempotent() {
        let mut session = session(6);
        let mut observer = NullObserver;
        session.request_spin(request(3), &mut observer).unwrap();
        session.skip_to_end(&mut observer);
        let state_once = *session.rotation_state();
        let rotation_once = session.wheel_rotation();

        session.skip_to_end(&mut observer);
        assert_eq!(*session.rotation_state(), state_once);
        assert!((session.wheel_rotation() - rotation_once).abs() < f64::EPSILON);
    }

    #[test]
    fn state_is_untouched_until_completion() {
        let mut session = session(7);
        let mut observer = NullObserver;
        session.request_spin(request(6), &mut observer).unwrap();
        session.advance(Duration::from_secs(2), &mut observer);
        assert!(session.is_spinning());
        // Mid-flight: the carried state still reads as before the spin.
        assert_eq!(*session.rotation_state(), RotationState::new());
    }

    #[test]
    fn time_scale_shortens_wall_clock_only() {
        let mut fast = session(8);
        let mut slow = session(8);
        let mut observer = NullObserver;

        fast.request_spin(request(5), &mut observer).unwrap();
        slow.request_spin(request(5), &mut observer).unwrap();
        fast.set_time_scale(2.0);

        // The same wall-clock time covers twice the playback at 2x.
        for _ in 0..313 {
            fast.advance(TICK, &mut observer);
            slow.advance(TICK, &mut observer);
        }
        assert!(!slow.is_spinning() || slow.progress() > 0.49);
        assert!(fast.progress() > slow.progress() || !fast.is_spinning());

        run_to_completion(&mut fast, &mut observer);
        run_to_completion(&mut slow, &mut observer);
        // Identical seeds: identical resting state regardless of rate.
        assert_eq!(*fast.rotation_state(), *slow.rotation_state());
    }

    #[test]
    fn time_scale_resets_after_completion() {
        let mut session = session(9);
        let mut observer = NullObserver;
        session.request_spin(request(2), &mut observer).unwrap();
        session.set_time_scale(2.0);
        session.skip_to_end(&mut observer);
        assert!((session.time_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_positive_time_scale_ignored() {
        let mut session = session(10);
        let mut observer = NullObserver;
        session.request_spin(request(2), &mut observer).unwrap();
        session.set_time_scale(0.0);
        assert!((session.time_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn events_arrive_in_order() {
        let mut session = session(11);
        let mut events = EventQueue::new();
        session.request_spin(request(4), &mut events).unwrap();
        run_to_completion(&mut session, &mut events);

        let recorded = events.take();
        assert_eq!(recorded.len(), 4);
        assert!(matches!(recorded[0], SpinEvent::Started { .. }));
        assert!(matches!(recorded[1], SpinEvent::PointerSettled { .. }));
        assert!(matches!(recorded[2], SpinEvent::SpinnerRested { .. }));
        assert_eq!(recorded[3], SpinEvent::Completed);
    }

    #[test]
    fn pointer_starts_where_the_last_spin_left_it() {
        let mut session = session(12);
        let mut observer = NullObserver;
        session.request_spin(request(5), &mut observer).unwrap();
        run_to_completion(&mut session, &mut observer);

        let resting = session.pointer_angle();
        assert!((resting + session.rotation_state().pointer_offset()).abs() < 1e-9);

        // The next spin opens exactly at the resting angle: no snap.
        session.request_spin(request(6), &mut observer).unwrap();
        assert!((session.pointer_angle() - resting).abs() < 1e-9);
    }
}
