//! Landing correctness: the needle must indicate the requested slice.

use spindle_engine::{
    SeededRng, SliceId, SliceMap, SpinTuning, plan_pointer, plan_spinner,
};

use crate::common::{SPIN_DURATION, request, run_to_completion, seeded_session};

#[test]
fn every_slice_lands_in_its_band_across_seeds() {
    let slices = SliceMap::standard();
    for seed in 0..20 {
        let mut session = seeded_session(seed);
        let mut observer = spindle_engine::NullObserver;
        for raw in 0..13_u8 {
            session.request_spin(request(raw), &mut observer).unwrap();
            run_to_completion(&mut session);

            let indicated = session.rotation_state().indicated_degree();
            assert_eq!(
                slices.slice_at(indicated),
                Some(SliceId::new(raw).unwrap()),
                "seed {seed}: slice {raw} indicated {indicated}"
            );
        }
    }
}

#[test]
fn scenario_slice_five_from_fresh_state() {
    // Fresh rotation state, slice 5 (band [124, 152)), 5 second spin.
    let tuning = SpinTuning::default();
    let mut rng = SeededRng::new(1234);

    let pointer = plan_pointer(SPIN_DURATION, 0.0, &tuning, &mut rng).unwrap();
    let spinner = plan_spinner(
        SPIN_DURATION,
        SliceId::new(5).unwrap(),
        pointer.settle_offset,
        0.0,
        &SliceMap::standard(),
        &tuning,
        &mut rng,
    )
    .unwrap();

    // The carried offset minus the needle's skew is the in-band target.
    let target = (spinner.final_offset - pointer.settle_offset).rem_euclid(360.0);
    assert!(
        (124.0..152.0).contains(&target),
        "target {target} escaped [124, 152)"
    );

    // Both programs fill the requested duration (phase durations
    // round-trip through integer nanoseconds).
    let pointer_seconds = pointer.motion.total_duration().as_secs_f64();
    assert!(
        (pointer_seconds - 5.0).abs() < 1e-6,
        "pointer program runs {pointer_seconds}s"
    );
    assert_eq!(spinner.motion.total_duration(), SPIN_DURATION);
}

#[test]
fn rest_angle_is_reduced_and_consistent_after_many_spins() {
    let mut session = seeded_session(77);
    let mut observer = spindle_engine::NullObserver;
    for raw in [5, 0, 12, 3, 9] {
        session.request_spin(request(raw), &mut observer).unwrap();
        run_to_completion(&mut session);

        let rotation = session.wheel_rotation();
        assert!((0.0..360.0).contains(&rotation), "rotation {rotation}");

        // Mod-360 housekeeping never changes the indicated position.
        let cancel =
            (rotation + session.rotation_state().spinner_offset()).rem_euclid(360.0);
        assert!(
            cancel < 1e-6 || (360.0 - cancel) < 1e-6,
            "rotation {rotation} out of step with carried offset"
        );
    }
}
