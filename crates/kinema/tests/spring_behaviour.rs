#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

//! Behavioural tests for the spring: rest states, convergence, large steps,
//! retargeting, wrapping and step composition.

use kinema::{Spring, SpringOptions, fps, wrap_signed};

fn spring(position: f64, target: f64, frequency: f64, half_life: f64) -> Spring {
    Spring::new(
        SpringOptions::new(position)
            .target(target)
            .frequency(frequency)
            .half_life(half_life),
    )
}

// =============================================================================
// Rest states
// =============================================================================

#[test]
fn zero_dt_leaves_state_untouched() {
    let mut s = spring(3.25, -7.5, 1.7, 0.3);
    s.velocity = 12.0;
    let before = s;

    s.step(0.0);

    assert_eq!(s.position, before.position);
    assert_eq!(s.velocity, before.velocity);
}

#[test]
fn zero_dt_leaves_wrapped_state_untouched() {
    let mut s = Spring::new(SpringOptions::new(170.0).target(-170.0).wrap(360.0));
    s.velocity = -40.0;
    let before = s;

    s.step(0.0);

    assert_eq!(s, before);
}

#[test]
fn resting_at_target_is_a_fixed_point() {
    let mut s = spring(42.0, 42.0, 2.0, 0.2);
    for _ in 0..1_000 {
        s.step(fps(60));
    }
    assert_eq!(s.position, 42.0);
    assert_eq!(s.velocity, 0.0);

    s.step(10.0);
    assert_eq!(s.position, 42.0);
    assert_eq!(s.velocity, 0.0);
}

// =============================================================================
// Convergence
// =============================================================================

#[test]
fn converges_within_five_seconds() {
    let mut s = spring(0.0, 10.0, 2.0, 0.2);
    for _ in 0..300 {
        s.step(1.0 / 60.0);
    }
    assert!(
        (s.position - 10.0).abs() < 0.01,
        "expected ≈ 10, got {}",
        s.position
    );
    assert!(s.velocity.abs() < 0.01, "expected vel ≈ 0, got {}", s.velocity);
}

#[test]
fn error_envelope_shrinks_every_period() {
    let mut s = spring(0.0, 100.0, 1.0, 0.25);
    let mut worst_per_period = Vec::new();

    // One period of a 1 Hz spring is 60 frames
    for _ in 0..5 {
        let mut worst: f64 = 0.0;
        for _ in 0..60 {
            s.step(fps(60));
            worst = worst.max((s.position - s.target).abs());
        }
        worst_per_period.push(worst);
    }

    for pair in worst_per_period.windows(2) {
        assert!(
            pair[1] < pair[0] / 8.0,
            "error should drop by ~16x per period: {worst_per_period:?}"
        );
    }
}

// =============================================================================
// Large steps
// =============================================================================

#[test]
fn one_huge_step_does_not_blow_up() {
    let mut s = spring(0.0, 10.0, 2.0, 0.2);
    let start = (s.position - s.target).abs();

    s.step(10.0);

    assert!(s.position.is_finite());
    assert!(s.velocity.is_finite());
    assert!((s.position - s.target).abs() <= start);
}

#[test]
fn stalled_frames_never_move_farther_from_target() {
    for &dt in &[0.5, 1.0, 3.0, 60.0, 3_600.0] {
        let mut s = spring(-250.0, 250.0, 8.0, 0.05);
        let start = (s.position - s.target).abs();
        s.step(dt);
        assert!(
            (s.position - s.target).abs() <= start,
            "dt={dt} moved to {}",
            s.position
        );
    }
}

// =============================================================================
// Retargeting
// =============================================================================

#[test]
fn retargeting_is_continuous() {
    let mut s = spring(0.0, 0.0, 2.0, 0.2);
    s.target = 5.0;

    let mut t = 0.0;
    while t < 0.1 {
        s.step(fps(120));
        t += fps(120);
    }
    let at_switch = s.position;
    let velocity_at_switch = s.velocity;
    assert!(at_switch > 0.0, "spring should have started moving up");

    s.target = -5.0;
    // Reassigning the target alone moves nothing
    assert_eq!(s.position, at_switch);
    assert_eq!(s.velocity, velocity_at_switch);

    let mut previous = s.position;
    for _ in 0..240 {
        s.step(fps(120));
        let jump = (s.position - previous).abs();
        // The fastest this spring travels is ~125 units/s, about 1 unit per frame
        assert!(jump < 1.5, "position jumped by {jump}");
        previous = s.position;
    }
    assert!((s.position + 5.0).abs() < 0.05);
}

// =============================================================================
// Wrapping
// =============================================================================

#[test]
fn wrap_takes_the_short_way_round() {
    let mut s = Spring::new(SpringOptions::new(359.0).target(1.0).wrap(360.0));
    let start = s.position;

    s.step(fps(60));

    let moved = wrap_signed(s.position - start, 360.0);
    assert!(moved > 0.0, "expected to increase through 360→0, moved {moved}");
    assert!(moved < 2.0, "should not overshoot on the first frame");
}

#[test]
fn wrap_settles_on_target_modulo() {
    let mut s = Spring::new(
        SpringOptions::new(350.0)
            .target(10.0)
            .frequency(2.0)
            .half_life(0.1)
            .wrap(360.0),
    );
    let mut max_error: f64 = 0.0;
    for _ in 0..300 {
        s.step(fps(60));
        max_error = max_error.max(s.displacement().abs());
        assert!(s.position > -180.0 && s.position <= 180.0);
    }
    // Never travelled the long way (340°) round
    assert!(max_error <= 20.0 + 1e-9, "max error {max_error}");
    assert!(s.displacement().abs() < 1e-3);
    assert!((s.position - 10.0).abs() < 1e-3);
}

#[test]
fn wrap_handles_targets_outside_the_range() {
    let mut s = Spring::new(SpringOptions::new(0.0).target(725.0).wrap(360.0));
    for _ in 0..600 {
        s.step(fps(60));
    }
    assert!((s.position - 5.0).abs() < 1e-6, "got {}", s.position);
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn two_half_steps_equal_one_full_step() {
    let mut split = spring(0.0, 10.0, 1.0, 1.0);
    split.velocity = 3.0;
    let mut whole = split;

    split.step(0.5);
    split.step(0.5);
    whole.step(1.0);

    assert!((split.position - whole.position).abs() < 1e-9);
    assert!((split.velocity - whole.velocity).abs() < 1e-9);
}

#[test]
fn frame_rate_does_not_change_the_path() {
    let mut at_30 = spring(0.0, 1.0, 3.0, 0.15);
    let mut at_144 = at_30;

    for _ in 0..30 {
        at_30.step(fps(30));
    }
    for _ in 0..144 {
        at_144.step(fps(144));
    }

    assert!((at_30.position - at_144.position).abs() < 1e-9);
    assert!((at_30.velocity - at_144.velocity).abs() < 1e-9);
}
