// Progress smoothing behavior over many frames.

use tree_core::{
    ease_in_out_cubic, transition_scale, Mode, SteppedClock, Transition, ORNAMENT_SMOOTHING,
    TRANSITION_SCALE_FLOOR,
};

#[test]
fn progress_rises_monotonically_without_reaching_one() {
    let mut transition = Transition::new(ORNAMENT_SMOOTHING);
    let mut clock = SteppedClock::new(1.0 / 60.0);
    let mut last = transition.progress();
    for _ in 0..2000 {
        let frame = clock.tick(Mode::Assembled);
        transition.advance(frame.delta, frame.target());
        let p = transition.progress();
        assert!(p >= last);
        assert!(p < 1.0);
        last = p;
    }
    assert!(last > 0.999);
}

#[test]
fn reversal_turns_around_immediately() {
    let mut transition = Transition::new(1.5);
    for _ in 0..30 {
        transition.advance(1.0 / 60.0, 1.0);
    }
    let peak = transition.progress();
    assert!(peak > 0.0 && peak < 1.0);
    transition.advance(1.0 / 60.0, 0.0);
    assert!(transition.progress() < peak);
    for _ in 0..2000 {
        transition.advance(1.0 / 60.0, 0.0);
        assert!(transition.progress() >= 0.0);
    }
    assert!(transition.progress() < 1e-3);
}

#[test]
fn long_frame_lands_on_target_instead_of_overshooting() {
    let mut transition = Transition::new(ORNAMENT_SMOOTHING);
    transition.advance(10.0, 1.0);
    assert_eq!(transition.progress(), 1.0);
    transition.advance(0.0, 0.0);
    assert_eq!(transition.progress(), 1.0);
}

#[test]
fn ease_is_monotonic() {
    let mut last = 0.0;
    for i in 1..=1000 {
        let e = ease_in_out_cubic(i as f32 / 1000.0);
        assert!(e >= last);
        last = e;
    }
}

#[test]
fn scale_envelope_spans_floor_to_full_with_midway_bulge() {
    assert!((transition_scale(0.0) - TRANSITION_SCALE_FLOOR).abs() < 1e-6);
    assert!((transition_scale(1.0) - 1.0).abs() < 1e-6);
    let linear_mid = TRANSITION_SCALE_FLOOR + (1.0 - TRANSITION_SCALE_FLOOR) * 0.5;
    assert!(transition_scale(0.5) > linear_mid + 0.19);
}
