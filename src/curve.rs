/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Rate laws used to move a value toward a target over one tick.
//!
//! Every curve here shares the same contract:
//!
//! - `delta_time <= 0` (or NaN) leaves `current` untouched.
//! - `rate <= 0` jumps straight to `target`.
//! - A remaining distance below [`SNAP_DISTANCE`] snaps to `target`.
//! - The result always lies between `current` and `target` (no overshoot).
//!
//! All functions are `no_std` and allocation-free.

/// Default tolerance for "reached target" comparisons.
pub const KINDA_SMALL_NUMBER: f32 = 1.0e-4;

/// Remaining distance below which a curve snaps onto its target.
pub const SNAP_DISTANCE: f32 = 1.0e-4;

/// Which rate law to use when approaching a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpCurve {
    /// Proportional approach: each tick covers `dt × rate` of the remaining
    /// distance (capped at all of it). Smooth, but frame-rate dependent.
    InterpTo,
    /// Linear approach at `rate` units per second. Frame-rate independent.
    #[default]
    ConstantTo,
    /// Exponential smoothing: `target + (current − target) × e^(−rate × dt)`.
    /// Smooth and frame-rate independent.
    ExpDecay,
}

impl InterpCurve {
    /// Advance `current` toward `target` by one tick of `delta_time` seconds.
    pub fn step(self, current: f32, target: f32, delta_time: f32, rate: f32) -> f32 {
        match self {
            InterpCurve::InterpTo => interp_to(current, target, delta_time, rate),
            InterpCurve::ConstantTo => interp_constant_to(current, target, delta_time, rate),
            InterpCurve::ExpDecay => exp_decay_to(current, target, delta_time, rate),
        }
    }

    /// Stable lowercase name, used by the scripting bindings.
    pub fn name(self) -> &'static str {
        match self {
            InterpCurve::InterpTo => "interp_to",
            InterpCurve::ConstantTo => "constant_to",
            InterpCurve::ExpDecay => "exp_decay",
        }
    }

    /// Parse a name produced by [`InterpCurve::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "interp_to" => Some(InterpCurve::InterpTo),
            "constant_to" => Some(InterpCurve::ConstantTo),
            "exp_decay" => Some(InterpCurve::ExpDecay),
            _ => None,
        }
    }
}

/// Proportional approach toward `target`.
pub fn interp_to(current: f32, target: f32, delta_time: f32, rate: f32) -> f32 {
    if !(delta_time > 0.0) {
        return current;
    }
    if rate <= 0.0 {
        return target;
    }
    let dist = target - current;
    if abs(dist) < SNAP_DISTANCE {
        return target;
    }
    let alpha = delta_time * rate;
    if alpha >= 1.0 {
        return target;
    }
    current + dist * alpha
}

/// Linear approach toward `target` at `rate` units per second.
pub fn interp_constant_to(current: f32, target: f32, delta_time: f32, rate: f32) -> f32 {
    if !(delta_time > 0.0) {
        return current;
    }
    if rate <= 0.0 {
        return target;
    }
    let dist = target - current;
    let step = rate * delta_time;
    if abs(dist) < SNAP_DISTANCE || abs(dist) <= step {
        return target;
    }
    if dist > 0.0 {
        current + step
    } else {
        current - step
    }
}

/// Exponential approach toward `target` with decay constant `rate`.
///
/// Frame-rate independent: two ticks of `dt` land on the same value as one
/// tick of `2 × dt` (up to float error).
pub fn exp_decay_to(current: f32, target: f32, delta_time: f32, rate: f32) -> f32 {
    if !(delta_time > 0.0) {
        return current;
    }
    if rate <= 0.0 {
        return target;
    }
    let factor = exp_approx(-rate * delta_time).clamp(0.0, 1.0);
    let next = target + (current - target) * factor;
    if abs(target - next) < SNAP_DISTANCE {
        target
    } else {
        next
    }
}

/// `|a - b| <= tolerance`.
#[inline]
pub fn is_nearly_equal(a: f32, b: f32, tolerance: f32) -> bool {
    abs(a - b) <= tolerance
}

/// Unclamped linear remap of `value` from `[in_a, in_b]` onto `[out_a, out_b]`.
///
/// A degenerate input range maps everything onto `out_a`.
pub fn map_range_unclamped(value: f32, in_a: f32, in_b: f32, out_a: f32, out_b: f32) -> f32 {
    let span = in_b - in_a;
    if abs(span) < f32::EPSILON {
        return out_a;
    }
    let t = (value - in_a) / span;
    out_a + (out_b - out_a) * t
}

#[inline]
pub(crate) fn abs(x: f32) -> f32 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Polynomial approximation to `exp(x)`, `no_std` compatible.
///
/// Range reduction `exp(x) = 2^k × exp(r)` with `k = round(x / ln2)`, so
/// `|r| ≤ 0.5 × ln2`, where the degree-5 Taylor polynomial is accurate to ~1e-6.
fn exp_approx(x: f32) -> f32 {
    // exp(88) > f32::MAX
    let x = x.clamp(-87.0, 88.0);
    const LN2: f32 = 0.693_147_18;
    const INV_LN2: f32 = 1.442_695_04;
    let kf = x * INV_LN2;
    let k = if kf >= 0.0 {
        (kf + 0.5) as i32
    } else {
        (kf - 0.5) as i32
    };
    let r = x - k as f32 * LN2;
    let r2 = r * r;
    let r4 = r2 * r2;
    let poly = 1.0 + r + 0.5 * r2 + (1.0 / 6.0) * r * r2
        + (1.0 / 24.0) * r4
        + (1.0 / 120.0) * r * r4;
    // 2^k via the f32 exponent field (bias 127)
    let k = k.clamp(-126, 127);
    let scale = f32::from_bits(((127 + k) as u32) << 23);
    poly * scale
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_approx_accuracy() {
        let cases: &[(f32, f32)] = &[
            (0.0, 1.0),
            (-1.0, 0.367_879_4),
            (-0.1, 0.904_837_4),
            (-5.0, 0.006_737_947),
            (1.0, 2.718_281_8),
        ];
        for &(x, expected) in cases {
            let got = exp_approx(x);
            assert!(
                (got - expected).abs() <= expected * 1e-4,
                "exp({}) = {}, expected {}",
                x,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_exp_approx_never_exceeds_one_for_negative_input() {
        for i in 1..2000 {
            let x = -(i as f32) * 0.005;
            let e = exp_approx(x);
            assert!(e <= 1.0 && e >= 0.0, "exp({}) = {}", x, e);
        }
    }

    #[test]
    fn test_constant_to_moves_at_rate() {
        let v = interp_constant_to(0.0, 10.0, 0.25, 10.0);
        assert!((v - 2.5).abs() < 1e-6, "got {}", v);

        let v = interp_constant_to(10.0, 0.0, 0.25, 10.0);
        assert!((v - 7.5).abs() < 1e-6, "got {}", v);

        // Step larger than the remaining distance lands exactly on target.
        assert_eq!(interp_constant_to(0.0, 10.0, 1.0, 10.0), 10.0);
        assert_eq!(interp_constant_to(0.0, 10.0, 5.0, 10.0), 10.0);
    }

    #[test]
    fn test_interp_to_proportional() {
        let v = interp_to(0.0, 1.0, 0.05, 10.0);
        assert!((v - 0.5).abs() < 1e-6, "got {}", v);
        assert_eq!(interp_to(0.0, 1.0, 0.1, 10.0), 1.0);
        assert_eq!(interp_to(0.0, 1.0, 1.0, 10.0), 1.0);
    }

    #[test]
    fn test_exp_decay_frame_rate_independent() {
        let one = exp_decay_to(0.0, 1.0, 0.2, 3.0);
        let two = exp_decay_to(exp_decay_to(0.0, 1.0, 0.1, 3.0), 1.0, 0.1, 3.0);
        assert!((one - two).abs() < 1e-4, "one={} two={}", one, two);
    }

    #[test]
    fn test_zero_or_negative_delta_is_noop() {
        for curve in [InterpCurve::InterpTo, InterpCurve::ConstantTo, InterpCurve::ExpDecay] {
            assert_eq!(curve.step(0.3, 1.0, 0.0, 10.0), 0.3);
            assert_eq!(curve.step(0.3, 1.0, -1.0, 10.0), 0.3);
            assert_eq!(curve.step(0.3, 1.0, f32::NAN, 10.0), 0.3);
        }
    }

    #[test]
    fn test_non_positive_rate_jumps() {
        for curve in [InterpCurve::InterpTo, InterpCurve::ConstantTo, InterpCurve::ExpDecay] {
            assert_eq!(curve.step(0.3, 1.0, 0.016, 0.0), 1.0);
            assert_eq!(curve.step(0.3, 1.0, 0.016, -4.0), 1.0);
        }
    }

    #[test]
    fn test_curves_never_overshoot() {
        for curve in [InterpCurve::InterpTo, InterpCurve::ConstantTo, InterpCurve::ExpDecay] {
            for &(from, to) in &[(0.0_f32, 1.0_f32), (1.0, 0.0), (-3.0, 7.0), (5.0, -5.0)] {
                let mut v = from;
                let mut prev_dist = (to - from).abs();
                for _ in 0..500 {
                    v = curve.step(v, to, 0.016, 4.0);
                    let dist = (to - v).abs();
                    assert!(dist <= prev_dist, "{:?} moved away: {} -> {}", curve, prev_dist, dist);
                    let lo = from.min(to);
                    let hi = from.max(to);
                    assert!(v >= lo && v <= hi, "{:?} overshoot: {}", curve, v);
                    prev_dist = dist;
                }
                assert_eq!(v, to, "{:?} should settle exactly on target", curve);
            }
        }
    }

    #[test]
    fn test_curve_names() {
        for curve in [InterpCurve::InterpTo, InterpCurve::ConstantTo, InterpCurve::ExpDecay] {
            assert_eq!(InterpCurve::from_name(curve.name()), Some(curve));
        }
        assert_eq!(InterpCurve::from_name("spring"), None);
    }

    #[test]
    fn test_map_range_unclamped() {
        assert!((map_range_unclamped(0.5, 0.0, 1.0, 10.0, 20.0) - 15.0).abs() < 1e-6);
        assert!((map_range_unclamped(2.0, 0.0, 1.0, 0.0, 10.0) - 20.0).abs() < 1e-5);
        assert_eq!(map_range_unclamped(3.0, 1.0, 1.0, 4.0, 8.0), 4.0);
    }
}
