//! # alpha-interp
//!
//! Time-driven alpha interpolation with deferred decay, pause and completion
//! tracking, for host loops that tick once per frame.
//!
//! ---
//!
//! ## The model
//!
//! An [`AlphaInterp`] owns a live value and chases the last target it was given.
//! Every tick the host calls [`AlphaInterp::interpolate`] with the target and the
//! elapsed time; the value moves toward the target by a configurable rate law and
//! never overshoots.
//!
//! **Decay** is a deferred subtractive force. [`AlphaInterp::decay`] only queues an
//! amount; later ticks drain the queue and pull the value down by what they drain,
//! never below the decay floor. A hit that dims a glow, a stamina drain that eats
//! into a charge meter: the effect plays out over time instead of in one frame.
//!
//! **Pause** freezes everything. Target and queued decay survive until resumed.
//!
//! ```text
//!   host tick ──▶ interpolate(target, dt) ──▶ shape target ──▶ rate curve ──▶ decay ──▶ value
//!                                             (map/scale/clamp)  (in / out)    (floor)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`interp`] | [`AlphaInterp`], [`InterpPhase`] | The interpolation / decay / pause state machine |
//! | [`params`] | [`InterpParams`], [`InterpRate`], [`DecayMode`] | Configuration and presets |
//! | [`curve`] | [`InterpCurve`] | Rate laws: proportional, constant, exponential |
//! | [`bank`] | [`InterpBank`] | Keyed set of channels ticked by one loop |
//! | [`snapshot`] | `BankSnapshot`, `InterpSnapshot` | Serialisable state capture (requires `serde` feature) |
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default. [`AlphaInterp`] needs no heap; the bank
//! uses `hashbrown`. Enable `serde` for serialisation support and `python-ffi`
//! for the Python bindings. Diagnostics go through the `log` facade; install any
//! logger to see them.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod bank;
pub mod curve;
pub mod interp;
pub mod params;
#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use bank::{InterpBank, PhaseChange, MAX_CHANNELS};
pub use curve::InterpCurve;
pub use interp::{AlphaInterp, InterpDirection, InterpPhase, InterpState};
pub use params::{ClampRange, DecayMode, InterpParams, InterpRate, MapRange};
