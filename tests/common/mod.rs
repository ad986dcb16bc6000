//! Shared helpers for the integration suite.

use std::time::Duration;

use spindle_engine::{NullObserver, SeededRng, SpinRequest, SpinSession, SpinTuning};

pub const SPIN_DURATION: Duration = Duration::from_secs(5);
pub const TICK: Duration = Duration::from_millis(8);

pub fn seeded_session(seed: u64) -> SpinSession {
    SpinSession::new(SpinTuning::default(), Box::new(SeededRng::new(seed)))
}

pub fn request(slice: u8) -> SpinRequest {
    SpinRequest::new(slice, SPIN_DURATION).expect("valid slice id")
}

/// Drive the session with frame ticks until the spin finishes.
pub fn run_to_completion(session: &mut SpinSession) {
    let mut observer = NullObserver;
    let mut guard = 0;
    while session.is_spinning() {
        session.advance(TICK, &mut observer);
        guard += 1;
        assert!(guard < 100_000, "spin never completed");
    }
}
