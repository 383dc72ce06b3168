/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Configuration for [`AlphaInterp`](crate::interp::AlphaInterp).
//!
//! - [`InterpRate`]: rate, curve and on/off switch for one direction of travel.
//! - [`DecayMode`]: whether interpolation continues while decay is pending.
//! - [`MapRange`] / [`ClampRange`]: optional shaping of the requested target.
//! - [`InterpParams`]: the full parameter block, with named presets.
//!
//! Parameters shape *how* the value moves; they never change the state-machine
//! structure (pause, completion, direction).

use crate::curve::{map_range_unclamped, InterpCurve, KINDA_SMALL_NUMBER};

// ─── InterpRate ─────────────────────────────────────────────────────────────

/// Rate and curve used for one direction of travel (or for decay consumption).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpRate {
    /// When `false`, the value snaps straight to the target.
    pub enabled: bool,
    /// Speed of approach. Units depend on [`InterpRate::curve`]:
    /// units/second for `ConstantTo`, 1/second for `InterpTo` and `ExpDecay`.
    pub rate: f32,
    /// Which rate law to apply.
    pub curve: InterpCurve,
}

impl InterpRate {
    /// Enabled rate with an explicit curve.
    pub fn new(rate: f32, curve: InterpCurve) -> Self {
        Self {
            enabled: true,
            rate,
            curve,
        }
    }

    /// Linear approach at `rate` units per second.
    pub fn constant(rate: f32) -> Self {
        Self::new(rate, InterpCurve::ConstantTo)
    }

    /// Proportional approach.
    pub fn proportional(rate: f32) -> Self {
        Self::new(rate, InterpCurve::InterpTo)
    }

    /// Exponential smoothing.
    pub fn exponential(rate: f32) -> Self {
        Self::new(rate, InterpCurve::ExpDecay)
    }

    /// Disabled: every step jumps to the target.
    pub fn instant() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Advance `current` toward `target` over `delta_time`.
    pub fn step(&self, current: f32, target: f32, delta_time: f32) -> f32 {
        if !self.enabled {
            return target;
        }
        self.curve.step(current, target, delta_time, self.rate)
    }
}

impl Default for InterpRate {
    fn default() -> Self {
        Self::constant(10.0)
    }
}

// ─── DecayMode ──────────────────────────────────────────────────────────────

/// How interpolation behaves while the decay accumulator is non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecayMode {
    /// Hold the value still (apart from decay) until decay is exhausted.
    #[default]
    BlockInterpolation,
    /// Keep approaching the target while decay subtracts from the value.
    AllowInterpolation,
}

// ─── Target shaping ─────────────────────────────────────────────────────────

/// Unclamped linear remap of the requested target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapRange {
    /// Input range `(a, b)`.
    pub input: (f32, f32),
    /// Output range `(a, b)`.
    pub output: (f32, f32),
}

impl MapRange {
    /// Construct a remap from `input` onto `output`.
    pub fn new(input: (f32, f32), output: (f32, f32)) -> Self {
        Self { input, output }
    }

    /// Apply the remap.
    pub fn map(&self, value: f32) -> f32 {
        map_range_unclamped(value, self.input.0, self.input.1, self.output.0, self.output.1)
    }
}

/// Clamp applied to the shaped target and again after decay.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl ClampRange {
    /// Construct a clamp range. Bounds are reordered if given backwards.
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// The conventional alpha range `[0, 1]`.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The smaller bound, whichever field holds it. A NaN bound is ignored.
    pub fn lower(&self) -> f32 {
        self.min.min(self.max)
    }

    /// The larger bound, whichever field holds it. A NaN bound is ignored.
    pub fn upper(&self) -> f32 {
        self.min.max(self.max)
    }

    /// Clamp `value` into the range. Bounds written backwards are reordered.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.lower()).min(self.upper())
    }
}

impl Default for ClampRange {
    fn default() -> Self {
        Self::unit()
    }
}

// ─── InterpParams ───────────────────────────────────────────────────────────

/// Full parameter block for an [`AlphaInterp`](crate::interp::AlphaInterp).
///
/// Defaults: linear approach at 10 units/s in both directions, decay enabled and
/// consumed linearly at 10 units/s, decay blocks interpolation, decay floor 0,
/// no target shaping, completion tolerance [`KINDA_SMALL_NUMBER`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpParams {
    /// Curve used while the target is at or above the current value.
    pub interp_in: InterpRate,
    /// Curve used while the target is below the current value.
    pub interp_out: InterpRate,
    /// Curve used to drain the decay accumulator toward zero.
    pub decay_rate: InterpRate,
    /// When `false`, [`decay`](crate::interp::AlphaInterp::decay) is ignored.
    pub enable_decay: bool,
    /// Upper bound for the decay accumulator, if any.
    pub max_decay: Option<f32>,
    /// Interaction between pending decay and interpolation.
    pub decay_mode: DecayMode,
    /// Lowest value decay may push the output to.
    pub decay_floor: f32,
    /// Optional remap of the requested target.
    pub map_range: Option<MapRange>,
    /// Multiplier applied to the (remapped) target.
    pub scale: f32,
    /// Offset added after scaling.
    pub bias: f32,
    /// Optional clamp of the shaped target.
    pub clamp_range: Option<ClampRange>,
    /// Epsilon for "reached target".
    pub completion_tolerance: f32,
    /// When `true`, the first update after construction or reset snaps straight
    /// to the target instead of interpolating from zero.
    pub snap_first_update: bool,
}

impl InterpParams {
    /// Default parameters (see the type docs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear approach at `rate` units/s in both directions.
    pub fn constant(rate: f32) -> Self {
        Self {
            interp_in: InterpRate::constant(rate),
            interp_out: InterpRate::constant(rate),
            ..Self::default()
        }
    }

    /// Classic alpha blending: output clamped to `[0, 1]`, decay capped at 1,
    /// proportional approach at rate 10 in and out.
    pub fn alpha() -> Self {
        Self {
            interp_in: InterpRate::proportional(10.0),
            interp_out: InterpRate::proportional(10.0),
            decay_rate: InterpRate::proportional(10.0),
            max_decay: Some(1.0),
            clamp_range: Some(ClampRange::unit()),
            ..Self::default()
        }
    }

    /// Map, scale/bias and clamp a requested target into the value the
    /// interpolator actually approaches.
    pub fn shape_target(&self, target: f32) -> f32 {
        let mut shaped = match &self.map_range {
            Some(range) => range.map(target),
            None => target,
        };
        shaped = shaped * self.scale + self.bias;
        self.clamp(shaped)
    }

    /// Apply [`InterpParams::clamp_range`], if set.
    pub fn clamp(&self, value: f32) -> f32 {
        match &self.clamp_range {
            Some(range) => range.clamp(value),
            None => value,
        }
    }

    /// Rate for the given direction of travel.
    pub fn rate_for(&self, increasing: bool) -> &InterpRate {
        if increasing {
            &self.interp_in
        } else {
            &self.interp_out
        }
    }

    /// [`InterpParams::completion_tolerance`], with negative or NaN read as zero.
    pub fn tolerance(&self) -> f32 {
        self.completion_tolerance.max(0.0)
    }

    /// Add `amount` to an existing decay accumulator, honouring `max_decay`.
    pub(crate) fn accumulate_decay(&self, existing: f32, amount: f32) -> f32 {
        let total = existing + amount;
        match self.max_decay {
            Some(max) => total.min(max.max(0.0)),
            None => total,
        }
    }
}

impl Default for InterpParams {
    fn default() -> Self {
        Self {
            interp_in: InterpRate::default(),
            interp_out: InterpRate::default(),
            decay_rate: InterpRate::default(),
            enable_decay: true,
            max_decay: None,
            decay_mode: DecayMode::default(),
            decay_floor: 0.0,
            map_range: None,
            scale: 1.0,
            bias: 0.0,
            clamp_range: None,
            completion_tolerance: KINDA_SMALL_NUMBER,
            snap_first_update: false,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
