//! Behavioural tests for the interpolation state machine.
//!
//! Each test drives an `AlphaInterp` the way a host loop would: one
//! `interpolate` call per tick with a fixed or varying delta time.

use alpha_interp::{AlphaInterp, DecayMode, InterpCurve, InterpParams, InterpPhase, InterpRate};

// ─── helpers ─────────────────────────────────────────────────────────────────

const CURVES: [InterpCurve; 3] = [
    InterpCurve::InterpTo,
    InterpCurve::ConstantTo,
    InterpCurve::ExpDecay,
];

fn with_curve(curve: InterpCurve, rate: f32) -> AlphaInterp {
    AlphaInterp::with_params(InterpParams {
        interp_in: InterpRate::new(rate, curve),
        interp_out: InterpRate::new(rate, curve),
        ..InterpParams::default()
    })
}

/// A deterministic, uneven sequence of frame times.
fn frame_times(n: usize) -> impl Iterator<Item = f32> {
    (0..n).map(|i| match i % 5 {
        0 => 0.016,
        1 => 0.033,
        2 => 0.0,
        3 => 0.008,
        _ => 0.05,
    })
}

// ─── approach ────────────────────────────────────────────────────────────────

#[test]
fn test_monotonic_approach_without_overshoot() {
    for curve in CURVES {
        for &(start, target) in &[(0.0_f32, 1.0_f32), (1.0, 0.0), (-2.0, 3.5), (4.0, -4.0)] {
            let mut a = with_curve(curve, 3.0);
            a.initialize(start);
            let mut prev_dist = (target - start).abs();
            for dt in frame_times(400) {
                let v = a.interpolate(target, dt);
                let dist = (target - v).abs();
                assert!(
                    dist <= prev_dist,
                    "{:?}: distance grew {} -> {}",
                    curve,
                    prev_dist,
                    dist
                );
                assert!(
                    v >= start.min(target) && v <= start.max(target),
                    "{:?}: overshoot to {}",
                    curve,
                    v
                );
                prev_dist = dist;
            }
            assert!(a.has_completed(), "{:?} should finish {} -> {}", curve, start, target);
        }
    }
}

#[test]
fn test_reaches_target_at_rate() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(10.0));
    a.initialize(0.0);
    let v = a.interpolate(10.0, 1.0);
    assert_eq!(v, 10.0);
    assert_eq!(a.interpolated_value(), 10.0);
    assert!(a.has_completed());
}

#[test]
fn test_default_params_move_ten_units_per_second() {
    let mut a = AlphaInterp::new();
    a.interpolate(10.0, 0.5);
    assert!((a.interpolated_value() - 5.0).abs() < 1e-5);
    a.interpolate(10.0, 0.5);
    assert_eq!(a.interpolated_value(), 10.0);
}

#[test]
fn test_retarget_mid_flight_reverses_direction() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(1.0));
    a.interpolate(1.0, 0.5);
    assert!(a.is_interpolating_in());
    a.interpolate(0.0, 0.25);
    assert!((a.interpolated_value() - 0.25).abs() < 1e-6);
    assert!(a.is_interpolating_out());
    assert_eq!(a.phase(), InterpPhase::InterpolatingOut);
}

// ─── finalize / reset ────────────────────────────────────────────────────────

#[test]
fn test_finalize_always_completes() {
    for curve in CURVES {
        let mut a = with_curve(curve, 0.5);
        a.interpolate(0.8, 0.1);
        a.decay(0.5);
        a.finalize();
        assert!(a.has_completed());
        assert_eq!(a.interpolated_value(), a.last_target_value());
    }
}

#[test]
fn test_reset_always_idle_at_zero() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(1.0));
    a.interpolate(0.6, 0.3);
    a.decay(0.1);
    a.set_paused(true);
    a.reset();
    assert_eq!(a.interpolated_value(), 0.0);
    assert!(a.has_completed());
    assert!(!a.is_paused());
    assert_eq!(a.phase(), InterpPhase::Idle);
}

// ─── pause ───────────────────────────────────────────────────────────────────

#[test]
fn test_pause_freezes_value() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(1.0));
    a.interpolate(1.0, 0.3);
    let before = a.interpolated_value();
    a.set_paused(true);
    a.interpolate(100.0, 5.0);
    for dt in frame_times(50) {
        a.interpolate(100.0, dt * 100.0);
    }
    assert_eq!(a.interpolated_value(), before);
    assert_eq!(a.last_target_value(), 1.0);
}

#[test]
fn test_resume_continues_from_frozen_value() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(1.0));
    a.interpolate(1.0, 0.3);
    a.set_paused(true);
    a.interpolate(1.0, 10.0);
    a.set_paused(false);
    a.interpolate(1.0, 0.2);
    assert!((a.interpolated_value() - 0.5).abs() < 1e-5);
}

// ─── decay ───────────────────────────────────────────────────────────────────

#[test]
fn test_decay_total_bounded_by_amount() {
    let params = InterpParams {
        decay_rate: InterpRate::proportional(4.0),
        ..InterpParams::constant(10.0)
    };
    let mut a = AlphaInterp::with_params(params);
    a.initialize(0.9);
    a.decay(0.3);
    let mut lowest = a.interpolated_value();
    for dt in frame_times(300) {
        // Hold the target where it is so only decay moves the value.
        let target = a.interpolated_value();
        lowest = lowest.min(a.interpolate(target, dt));
    }
    let lost = 0.9 - lowest;
    assert!(lost <= 0.3 + 1e-5, "lost {} > 0.3", lost);
    assert!(lost > 0.29, "decay should have been consumed, lost {}", lost);
    assert_eq!(a.decay_value(), 0.0);
}

#[test]
fn test_decay_never_below_floor_or_raises_value() {
    let params = InterpParams {
        decay_rate: InterpRate::constant(2.0),
        decay_mode: DecayMode::BlockInterpolation,
        decay_floor: 0.1,
        ..InterpParams::constant(10.0)
    };
    let mut a = AlphaInterp::with_params(params);
    a.initialize(0.6);
    a.decay(0.8);
    let mut prev = a.interpolated_value();
    let mut ticks_decaying = 0;
    for dt in frame_times(200) {
        if a.decay_value() <= 0.0 {
            break;
        }
        // Target well above the value: only decay may move it, and only down.
        let v = a.interpolate(1.0, dt);
        assert!(v <= prev + 1e-6, "decay raised value {} -> {}", prev, v);
        assert!(v >= 0.1 - 1e-6, "below floor: {}", v);
        prev = v;
        ticks_decaying += 1;
    }
    assert!(ticks_decaying > 1);
    assert!((prev - 0.1).abs() < 1e-5, "value settled at {}", prev);
}

#[test]
fn test_decay_at_zero_target_stays_zero() {
    let mut a = AlphaInterp::new();
    a.initialize(0.0);
    a.decay(5.0);
    a.interpolate(0.0, 1.0);
    assert_eq!(a.interpolated_value(), 0.0);
}

#[test]
fn test_remove_all_decay_before_tick() {
    let mut a = AlphaInterp::new();
    a.initialize(0.75);
    a.decay(0.5);
    a.remove_all_decay();
    for dt in frame_times(20) {
        a.interpolate(0.75, dt);
    }
    assert_eq!(a.interpolated_value(), 0.75);
}

#[test]
fn test_decay_then_recovery_in_block_mode() {
    let params = InterpParams {
        interp_in: InterpRate::constant(1.0),
        decay_rate: InterpRate::constant(1.0),
        decay_mode: DecayMode::BlockInterpolation,
        ..InterpParams::default()
    };
    let mut a = AlphaInterp::with_params(params);
    a.initialize(1.0);
    a.decay(0.5);

    // Decay drains first, holding interpolation.
    for _ in 0..5 {
        a.interpolate(1.0, 0.1);
    }
    assert!((a.interpolated_value() - 0.5).abs() < 1e-4);
    assert!(a.is_interpolating_in());

    // Then the value recovers toward the target.
    for _ in 0..5 {
        a.interpolate(1.0, 0.1);
    }
    assert!((a.interpolated_value() - 1.0).abs() < 1e-4);
}

// ─── state machine ───────────────────────────────────────────────────────────

#[test]
fn test_phase_walk() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(1.0));
    assert_eq!(a.phase(), InterpPhase::Idle);

    a.interpolate(1.0, 0.5);
    assert_eq!(a.phase(), InterpPhase::InterpolatingIn);

    a.set_paused(true);
    assert_eq!(a.phase(), InterpPhase::Paused);
    assert!(!a.is_active());

    a.set_paused(false);
    a.interpolate(1.0, 0.5);
    assert_eq!(a.phase(), InterpPhase::Idle);

    a.decay(0.2);
    assert_eq!(a.phase(), InterpPhase::InterpolatingOut);
    assert!(a.is_active());
}

#[test]
fn test_reusable_after_completion() {
    let mut a = AlphaInterp::with_params(InterpParams::constant(2.0));
    for round in 0..3 {
        let target = if round % 2 == 0 { 1.0 } else { 0.0 };
        while !a.has_completed() || a.last_target_value() != target {
            a.interpolate(target, 0.1);
        }
        assert_eq!(a.interpolated_value(), target);
    }
}
