//! Sequencing contract: mutual exclusion, skip idempotence, carry-over.

use std::time::Duration;

use spindle_engine::{
    EventQueue, NullObserver, SpinError, SpinEvent, SpinRequest,
};

use crate::common::{SPIN_DURATION, TICK, request, run_to_completion, seeded_session};

#[test]
fn second_request_is_rejected_mid_flight() {
    let mut session = seeded_session(1);
    let mut observer = NullObserver;
    session.request_spin(request(4), &mut observer).unwrap();
    session.advance(Duration::from_secs(1), &mut observer);

    let angle = session.wheel_rotation();
    let err = session.request_spin(request(8), &mut observer).unwrap_err();
    assert!(matches!(err, SpinError::SpinInProgress));

    // The in-flight motion is untouched by the rejection.
    assert!((session.wheel_rotation() - angle).abs() < f64::EPSILON);
    run_to_completion(&mut session);
}

#[test]
fn skip_twice_matches_skip_once() {
    let mut once = seeded_session(2);
    let mut twice = seeded_session(2);
    let mut observer = NullObserver;

    once.request_spin(request(7), &mut observer).unwrap();
    once.skip_to_end(&mut observer);

    twice.request_spin(request(7), &mut observer).unwrap();
    twice.skip_to_end(&mut observer);
    twice.skip_to_end(&mut observer);

    assert_eq!(*once.rotation_state(), *twice.rotation_state());
    assert!((once.wheel_rotation() - twice.wheel_rotation()).abs() < f64::EPSILON);
}

#[test]
fn skip_matches_natural_completion() {
    let mut skipped = seeded_session(3);
    let mut played = seeded_session(3);
    let mut observer = NullObserver;

    skipped.request_spin(request(11), &mut observer).unwrap();
    skipped.skip_to_end(&mut observer);

    played.request_spin(request(11), &mut observer).unwrap();
    run_to_completion(&mut played);

    assert_eq!(*skipped.rotation_state(), *played.rotation_state());
}

#[test]
fn invalid_slice_is_rejected_before_any_state_change() {
    let mut session = seeded_session(4);
    let mut observer = NullObserver;

    assert!(SpinRequest::new(99, SPIN_DURATION).is_err());
    assert!(!session.is_spinning());
    assert!(session.rotation_state().indicated_degree().abs() < f64::EPSILON);

    // The session stays requestable after the rejection.
    session.request_spin(request(5), &mut observer).unwrap();
    run_to_completion(&mut session);
}

#[test]
fn pointer_carry_over_is_continuous_between_spins() {
    let mut session = seeded_session(5);
    let mut events = EventQueue::new();

    session.request_spin(request(6), &mut events).unwrap();
    while session.is_spinning() {
        session.advance(TICK, &mut events);
    }

    let settle = events
        .take()
        .iter()
        .find_map(|event| match event {
            SpinEvent::PointerSettled { offset_degrees } => Some(*offset_degrees),
            _ => None,
        })
        .expect("pointer settle event");

    // At rest the needle sits at minus the reported settle offset, and the
    // next spin opens from exactly that angle: no snap between spins.
    let resting = session.pointer_angle();
    assert!((resting + settle).abs() < 1e-9);

    session.request_spin(request(1), &mut events).unwrap();
    assert!((session.pointer_angle() - resting).abs() < 1e-9);

    // The revert leg sweeps exactly the carried offset back to neutral.
    session.advance(TICK, &mut events);
    assert!(session.pointer_angle() > resting - 1e-9);
    run_to_completion(&mut session);
}

#[test]
fn rapid_playback_reaches_the_same_rest_state() {
    let mut rapid = seeded_session(6);
    let mut normal = seeded_session(6);
    let mut observer = NullObserver;

    rapid.request_spin(request(10), &mut observer).unwrap();
    rapid.set_time_scale(2.0);
    normal.request_spin(request(10), &mut observer).unwrap();

    run_to_completion(&mut rapid);
    run_to_completion(&mut normal);

    assert_eq!(*rapid.rotation_state(), *normal.rotation_state());
    assert!((rapid.time_scale() - 1.0).abs() < f64::EPSILON);
}
