/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The interpolation / decay / pause state machine.
//!
//! - [`AlphaInterp`]: parameters plus state, advanced once per host tick.
//! - [`InterpState`]: the mutable part (value, targets, decay, pause).
//! - [`InterpDirection`] / [`InterpPhase`]: derived views of the state.
//!
//! # Usage
//!
//! ```rust
//! use alpha_interp::{AlphaInterp, InterpParams};
//!
//! let mut fade = AlphaInterp::with_params(InterpParams::constant(2.0));
//! fade.interpolate(1.0, 0.25);
//! assert!((fade.interpolated_value() - 0.5).abs() < 1e-6);
//! assert!(fade.is_interpolating_in());
//!
//! fade.finalize();
//! assert!(fade.has_completed());
//! ```
//!
//! # Invariants
//!
//! - The value only changes through [`AlphaInterp::interpolate`],
//!   [`AlphaInterp::initialize`], [`AlphaInterp::finalize`] or [`AlphaInterp::reset`].
//! - The decay accumulator is never negative, and decay never raises the value
//!   nor pushes it below the decay floor.
//! - A tick while paused changes nothing, not even the recorded target.
//! - Completion and direction are recomputed after every mutation.

use crate::curve::{is_nearly_equal, SNAP_DISTANCE};
use crate::params::{DecayMode, InterpParams};

// ─── Derived views ──────────────────────────────────────────────────────────

/// Direction of travel relative to the target, derived each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpDirection {
    /// At the target with nothing pending.
    #[default]
    None,
    /// Moving up toward a higher target.
    In,
    /// Moving down: toward a lower target, or being pulled down by decay.
    Out,
}

/// Coarse state-machine phase, for callers that branch on "what is it doing".
///
/// ```text
/// Idle ──(differing target)──▶ InterpolatingIn / InterpolatingOut
///   ▲                                   │
///   └──(target reached, decay drained)──┘
/// any ──set_paused(true)──▶ Paused ──set_paused(false)──▶ re-evaluated next tick
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpPhase {
    /// Completed: value sits on its target and no decay is pending.
    Idle,
    /// Value rising toward the target.
    InterpolatingIn,
    /// Value falling toward the target, or draining decay.
    InterpolatingOut,
    /// Frozen by [`AlphaInterp::set_paused`].
    Paused,
}

// ─── InterpState ────────────────────────────────────────────────────────────

/// Mutable state of an [`AlphaInterp`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpState {
    current: f32,
    last_target: f32,
    resolved_target: f32,
    decay: f32,
    paused: bool,
    initialized: bool,
    direction: InterpDirection,
    completed: bool,
}

impl InterpState {
    /// Idle state at zero.
    pub fn new() -> Self {
        Self {
            current: 0.0,
            last_target: 0.0,
            resolved_target: 0.0,
            decay: 0.0,
            paused: false,
            initialized: false,
            direction: InterpDirection::None,
            completed: true,
        }
    }

    /// Rebuild a state from raw values, e.g. when restoring a snapshot.
    ///
    /// Direction and completion are placeholders until the state is attached
    /// to parameters with [`AlphaInterp::from_state`].
    pub fn from_raw(
        current: f32,
        last_target: f32,
        resolved_target: f32,
        decay: f32,
        paused: bool,
        initialized: bool,
    ) -> Self {
        Self {
            current,
            last_target,
            resolved_target,
            decay: decay.max(0.0),
            paused,
            initialized,
            direction: InterpDirection::None,
            completed: false,
        }
    }

    /// Live interpolated value.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Target as last supplied by the caller.
    pub fn last_target(&self) -> f32 {
        self.last_target
    }

    /// Target after map-range, scale/bias and clamp shaping.
    pub fn resolved_target(&self) -> f32 {
        self.resolved_target
    }

    /// Pending decay still to be subtracted.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Whether ticks are currently ignored.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the state has seen at least one update since reset.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last derived direction.
    pub fn direction(&self) -> InterpDirection {
        self.direction
    }

    /// Last derived completion flag.
    pub fn has_completed(&self) -> bool {
        self.completed
    }
}

impl Default for InterpState {
    fn default() -> Self {
        Self::new()
    }
}

// ─── AlphaInterp ────────────────────────────────────────────────────────────

/// Time-driven scalar interpolator with deferred decay and pause support.
///
/// Owned by the caller (typically a field of a larger per-entity state) and
/// advanced by calling [`AlphaInterp::interpolate`] once per tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaInterp {
    params: InterpParams,
    state: InterpState,
}

impl AlphaInterp {
    /// Idle interpolator at zero with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle interpolator at zero with the given parameters.
    pub fn with_params(params: InterpParams) -> Self {
        Self {
            params,
            state: InterpState::new(),
        }
    }

    /// Attach an existing state to parameters, recomputing derived fields.
    pub fn from_state(params: InterpParams, state: InterpState) -> Self {
        let mut interp = Self { params, state };
        interp.refresh();
        interp
    }

    /// Advance toward `target` by `delta_time` seconds and return the new value.
    ///
    /// While paused this is a no-op. Negative or NaN `delta_time` is treated as
    /// zero: the target is recorded but nothing moves. A NaN target is ignored.
    pub fn interpolate(&mut self, target: f32, delta_time: f32) -> f32 {
        if self.state.paused {
            return self.state.current;
        }
        if target.is_nan() {
            log::warn!("alpha interp: ignoring NaN target");
            return self.state.current;
        }
        let delta_time = if delta_time > 0.0 { delta_time } else { 0.0 };
        let before = self.phase();

        if !self.params.enable_decay {
            self.state.decay = 0.0;
        }

        let resolved = self.params.shape_target(target);
        self.state.last_target = target;
        self.state.resolved_target = resolved;

        if !self.state.initialized && self.params.snap_first_update {
            self.state.current = resolved;
        } else {
            self.state.current = self.advance(resolved, delta_time);
        }
        self.state.initialized = true;
        self.refresh();

        let after = self.phase();
        if after != before {
            log::trace!(
                "alpha interp {:?} -> {:?} (value={}, target={}, decay={})",
                before,
                after,
                self.state.current,
                resolved,
                self.state.decay
            );
        }
        self.state.current
    }

    /// One tick of movement plus decay consumption. Returns the next value.
    fn advance(&mut self, resolved: f32, delta_time: f32) -> f32 {
        let current = self.state.current;
        let decaying = self.state.decay > 0.0;
        let increasing = resolved >= current;

        let mut next = if decaying && self.params.decay_mode == DecayMode::BlockInterpolation {
            current
        } else {
            self.params.rate_for(increasing).step(current, resolved, delta_time)
        };

        if decaying {
            let pending = self.state.decay;
            let mut remaining = self.params.decay_rate.step(pending, 0.0, delta_time);
            if delta_time > 0.0 && remaining < SNAP_DISTANCE {
                remaining = 0.0;
            }
            self.state.decay = remaining;
            let consumed = pending - remaining;
            let floor = self.decay_floor_for(resolved, next);
            let room = (next - floor).max(0.0);
            next -= consumed.min(room);
        }
        next
    }

    /// Lowest value decay may reach from `value`: the configured floor, raised
    /// to the clamp minimum, and to the target when travelling down onto it.
    fn decay_floor_for(&self, resolved: f32, value: f32) -> f32 {
        let mut floor = self.params.decay_floor;
        if let Some(range) = &self.params.clamp_range {
            floor = floor.max(range.lower());
        }
        if resolved < value {
            floor = floor.max(resolved);
        }
        floor
    }

    /// Queue `amount` of decay. Negative, NaN or infinite amounts are ignored,
    /// as is everything when decay is disabled. Consumed by later ticks.
    pub fn decay(&mut self, amount: f32) {
        if !self.params.enable_decay || !(amount > 0.0) || !amount.is_finite() {
            return;
        }
        self.state.decay = self.params.accumulate_decay(self.state.decay, amount);
        self.refresh();
    }

    /// Drop all pending decay. Value already lost to decay stays lost.
    pub fn remove_all_decay(&mut self) {
        self.state.decay = 0.0;
        self.refresh();
    }

    /// Jump to `value` (shaped by the parameters): clears decay and pause.
    pub fn initialize(&mut self, value: f32) {
        let resolved = self.params.shape_target(value);
        self.state = InterpState {
            current: resolved,
            last_target: value,
            resolved_target: resolved,
            initialized: true,
            ..InterpState::new()
        };
        self.refresh();
        log::debug!("alpha interp initialized to {}", resolved);
    }

    /// Snap to the current target, discarding pending decay.
    pub fn finalize(&mut self) {
        self.state.current = self.state.resolved_target;
        self.state.decay = 0.0;
        self.state.initialized = true;
        self.refresh();
        log::debug!("alpha interp finalized at {}", self.state.current);
    }

    /// Equivalent to `initialize(0.0)`, and re-arms
    /// [`InterpParams::snap_first_update`].
    pub fn reset(&mut self) {
        self.initialize(0.0);
        self.state.initialized = false;
    }

    /// Live interpolated value.
    pub fn interpolated_value(&self) -> f32 {
        self.state.current
    }

    /// Target as last supplied to [`AlphaInterp::interpolate`] or
    /// [`AlphaInterp::initialize`].
    pub fn last_target_value(&self) -> f32 {
        self.state.last_target
    }

    /// Pending decay.
    pub fn decay_value(&self) -> f32 {
        self.state.decay
    }

    /// Target reached (within the configured tolerance) and no decay pending.
    pub fn has_completed(&self) -> bool {
        self.state.completed
    }

    /// Like [`AlphaInterp::has_completed`] with an explicit tolerance.
    pub fn has_completed_within(&self, threshold: f32) -> bool {
        self.state.decay <= 0.0
            && is_nearly_equal(self.state.current, self.state.resolved_target, threshold.max(0.0))
    }

    /// Not completed and not paused.
    pub fn is_active(&self) -> bool {
        !self.state.completed && !self.state.paused
    }

    /// Whether ticks are currently frozen.
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Freeze or unfreeze. Target and pending decay survive the pause.
    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused != paused {
            log::trace!("alpha interp paused={}", paused);
        }
        self.state.paused = paused;
    }

    /// Rising toward the target.
    pub fn is_interpolating_in(&self) -> bool {
        self.state.direction == InterpDirection::In
    }

    /// Falling toward the target or draining decay.
    pub fn is_interpolating_out(&self) -> bool {
        self.state.direction == InterpDirection::Out
    }

    /// Current direction of travel.
    pub fn direction(&self) -> InterpDirection {
        self.state.direction
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> InterpPhase {
        if self.state.paused {
            InterpPhase::Paused
        } else if self.state.completed {
            InterpPhase::Idle
        } else if self.state.direction == InterpDirection::In {
            InterpPhase::InterpolatingIn
        } else {
            InterpPhase::InterpolatingOut
        }
    }

    /// Parameters.
    pub fn params(&self) -> &InterpParams {
        &self.params
    }

    /// Mutable parameters. Changes take effect on the next tick.
    pub fn params_mut(&mut self) -> &mut InterpParams {
        &mut self.params
    }

    /// Read-only state.
    pub fn state(&self) -> &InterpState {
        &self.state
    }

    fn refresh(&mut self) {
        let s = &mut self.state;
        let reached = is_nearly_equal(s.current, s.resolved_target, self.params.tolerance());
        s.completed = reached && s.decay <= 0.0;
        s.direction = if !reached {
            if s.resolved_target > s.current {
                InterpDirection::In
            } else {
                InterpDirection::Out
            }
        } else if s.decay > 0.0 {
            InterpDirection::Out
        } else {
            InterpDirection::None
        };
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
