//! Python FFI bindings via PyO3.
//!
//! Exposes [`AlphaInterp`] and [`InterpParams`] to a Python host loop.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from alpha_interp import AlphaInterp, InterpParams
//!
//! params = InterpParams(rate_in=2.0, rate_out=4.0, curve="constant_to")
//! fade = AlphaInterp(params)
//! for _ in range(10):
//!     value = fade.interpolate(1.0, 1 / 60)
//! fade.decay(0.25)
//! print(fade.value, fade.is_interpolating_out(), fade.has_completed())
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::curve::InterpCurve;
use crate::interp::{AlphaInterp as RustAlphaInterp, InterpPhase};
use crate::params::{ClampRange, DecayMode, InterpParams as RustInterpParams, InterpRate};

fn parse_curve(name: &str) -> PyResult<InterpCurve> {
    InterpCurve::from_name(name).ok_or_else(|| {
        PyValueError::new_err(format!(
            "unknown curve {name:?}, expected one of \"interp_to\", \"constant_to\", \"exp_decay\""
        ))
    })
}

fn phase_name(phase: InterpPhase) -> &'static str {
    match phase {
        InterpPhase::Idle => "idle",
        InterpPhase::InterpolatingIn => "interpolating_in",
        InterpPhase::InterpolatingOut => "interpolating_out",
        InterpPhase::Paused => "paused",
    }
}

// ── InterpParams ──────────────────────────────────────────────────────────────

/// Interpolation parameters.
///
/// Args:
///     rate_in:        approach rate while rising (default 10.0)
///     rate_out:       approach rate while falling (default 10.0)
///     curve:          "interp_to", "constant_to" or "exp_decay" (default "constant_to")
///     decay_rate:     how fast queued decay is consumed (default 10.0)
///     block_on_decay: hold interpolation while decay is pending (default True)
///     decay_floor:    lowest value decay may reach (default 0.0)
///     clamp:          optional (min, max) clamp of the target
#[pyclass(name = "InterpParams")]
#[derive(Clone)]
pub struct PyInterpParams {
    inner: RustInterpParams,
}

#[pymethods]
impl PyInterpParams {
    /// Create parameters.
    #[new]
    #[pyo3(signature = (
        rate_in=10.0,
        rate_out=10.0,
        curve="constant_to",
        decay_rate=10.0,
        block_on_decay=true,
        decay_floor=0.0,
        clamp=None
    ))]
    pub fn new(
        rate_in: f32,
        rate_out: f32,
        curve: &str,
        decay_rate: f32,
        block_on_decay: bool,
        decay_floor: f32,
        clamp: Option<(f32, f32)>,
    ) -> PyResult<Self> {
        let curve = parse_curve(curve)?;
        if let Some((lo, hi)) = clamp {
            if !(lo.is_finite() && hi.is_finite()) {
                return Err(PyValueError::new_err("clamp bounds must be finite"));
            }
        }
        Ok(Self {
            inner: RustInterpParams {
                interp_in: InterpRate::new(rate_in, curve),
                interp_out: InterpRate::new(rate_out, curve),
                decay_rate: InterpRate::new(decay_rate, curve),
                decay_mode: if block_on_decay {
                    DecayMode::BlockInterpolation
                } else {
                    DecayMode::AllowInterpolation
                },
                decay_floor,
                clamp_range: clamp.map(|(lo, hi)| ClampRange::new(lo, hi)),
                ..RustInterpParams::default()
            },
        })
    }

    /// Classic [0, 1] alpha preset.
    #[staticmethod]
    pub fn alpha() -> Self {
        Self {
            inner: RustInterpParams::alpha(),
        }
    }

    /// Approach rate while rising.
    #[getter]
    pub fn rate_in(&self) -> f32 {
        self.inner.interp_in.rate
    }

    /// Approach rate while falling.
    #[getter]
    pub fn rate_out(&self) -> f32 {
        self.inner.interp_out.rate
    }

    /// Curve name used while rising.
    #[getter]
    pub fn curve(&self) -> &'static str {
        self.inner.interp_in.curve.name()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "InterpParams(rate_in={:.3}, rate_out={:.3}, curve={:?})",
            self.inner.interp_in.rate,
            self.inner.interp_out.rate,
            self.inner.interp_in.curve.name(),
        )
    }
}

// ── AlphaInterp ───────────────────────────────────────────────────────────────

/// Time-driven interpolator with decay and pause.
///
/// Call `interpolate(target, dt)` once per tick from your host loop.
#[pyclass(name = "AlphaInterp")]
#[derive(Clone)]
pub struct PyAlphaInterp {
    inner: RustAlphaInterp,
}

#[pymethods]
impl PyAlphaInterp {
    /// Create an idle interpolator at 0.0.
    #[new]
    #[pyo3(signature = (params=None))]
    pub fn new(params: Option<PyRef<'_, PyInterpParams>>) -> Self {
        let params = params.map(|p| p.inner.clone()).unwrap_or_default();
        Self {
            inner: RustAlphaInterp::with_params(params),
        }
    }

    /// Advance toward `target` by `delta_time` seconds; returns the new value.
    pub fn interpolate(&mut self, target: f32, delta_time: f32) -> f32 {
        self.inner.interpolate(target, delta_time)
    }

    /// Queue decay, consumed by later ticks.
    pub fn decay(&mut self, amount: f32) {
        self.inner.decay(amount);
    }

    /// Drop all pending decay.
    pub fn remove_all_decay(&mut self) {
        self.inner.remove_all_decay();
    }

    /// Jump to `value`, clearing decay and pause.
    #[pyo3(signature = (value=0.0))]
    pub fn initialize(&mut self, value: f32) {
        self.inner.initialize(value);
    }

    /// Snap to the current target.
    pub fn finalize(&mut self) {
        self.inner.finalize();
    }

    /// Reset to idle at 0.0.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Live interpolated value.
    #[getter]
    pub fn value(&self) -> f32 {
        self.inner.interpolated_value()
    }

    /// Last requested target.
    #[getter]
    pub fn last_target(&self) -> f32 {
        self.inner.last_target_value()
    }

    /// Pending decay.
    #[getter]
    pub fn pending_decay(&self) -> f32 {
        self.inner.decay_value()
    }

    /// True once the target is reached and decay drained.
    pub fn has_completed(&self) -> bool {
        self.inner.has_completed()
    }

    /// Neither completed nor paused.
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Whether ticks are frozen.
    pub fn is_paused(&self) -> bool {
        self.inner.is_paused()
    }

    /// Freeze or unfreeze.
    pub fn set_paused(&mut self, paused: bool) {
        self.inner.set_paused(paused);
    }

    /// Rising toward the target.
    pub fn is_interpolating_in(&self) -> bool {
        self.inner.is_interpolating_in()
    }

    /// Falling toward the target or draining decay.
    pub fn is_interpolating_out(&self) -> bool {
        self.inner.is_interpolating_out()
    }

    /// Phase name: "idle", "interpolating_in", "interpolating_out" or "paused".
    pub fn phase(&self) -> &'static str {
        phase_name(self.inner.phase())
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "AlphaInterp(value={:.4}, target={:.4}, phase={})",
            self.inner.interpolated_value(),
            self.inner.last_target_value(),
            phase_name(self.inner.phase()),
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Alpha interpolation Python bindings.
#[pymodule]
pub fn alpha_interp(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyInterpParams>()?;
    m.add_class::<PyAlphaInterp>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
