//! Serialisable snapshots of interpolators and banks.
//!
//! A snapshot stores raw state only: value, last and shaped target, pending
//! decay, the pause flag and whether the first update has happened. Parameters are *not* stored; the caller supplies
//! them on restore, so tuning changes apply to restored state. Direction and
//! completion are recomputed on restore.
//!
//! Restoring validates the snapshot and fails with [`SnapshotError`] rather
//! than producing a state that breaks the interpolator's invariants.
//!
//! # no_std
//!
//! This module requires the `serde` feature and uses `alloc::vec::Vec`.
//!
//! # Example
//!
//! ```rust,ignore
//! use alpha_interp::snapshot::BankSnapshot;
//!
//! let snapshot = BankSnapshot::from_bank(&bank);
//! let json = serde_json::to_string(&snapshot).unwrap();
//! let restored: BankSnapshot<u32> = serde_json::from_str(&json).unwrap();
//! let bank = restored.restore(InterpParams::default())?;
//! ```

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use crate::bank::{Channel, InterpBank, MAX_CHANNELS};
use crate::interp::{AlphaInterp, InterpState};
use crate::params::InterpParams;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Why a snapshot could not be restored.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotError {
    /// The snapshot was written by an unknown format version.
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u16,
    },
    /// A stored value, target or decay is NaN or infinite.
    NonFiniteValue,
    /// A stored decay accumulator is negative.
    NegativeDecay(f32),
    /// More channels than a bank can hold.
    TooManyChannels {
        /// Number of channel records in the snapshot.
        count: usize,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::UnsupportedVersion { found } => write!(
                f,
                "unsupported snapshot version {} (expected {})",
                found, SNAPSHOT_VERSION
            ),
            SnapshotError::NonFiniteValue => write!(f, "snapshot contains a non-finite value"),
            SnapshotError::NegativeDecay(d) => write!(f, "snapshot decay is negative: {}", d),
            SnapshotError::TooManyChannels { count } => write!(
                f,
                "snapshot has {} channels, at most {} are supported",
                count, MAX_CHANNELS
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SnapshotError {}

fn check_version(found: u16) -> Result<(), SnapshotError> {
    if found == SNAPSHOT_VERSION {
        Ok(())
    } else {
        Err(SnapshotError::UnsupportedVersion { found })
    }
}

// ─── State record ───────────────────────────────────────────────────────────

/// Raw state of one interpolator.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct StateRecord {
    /// Live value.
    pub value: f32,
    /// Target as supplied by the caller.
    pub last_target: f32,
    /// Target after shaping.
    pub resolved_target: f32,
    /// Pending decay.
    pub decay: f32,
    /// Pause flag.
    pub paused: bool,
    /// `false` until the first update after construction or reset.
    pub initialized: bool,
}

impl From<&InterpState> for StateRecord {
    fn from(s: &InterpState) -> Self {
        Self {
            value: s.value(),
            last_target: s.last_target(),
            resolved_target: s.resolved_target(),
            decay: s.decay(),
            paused: s.is_paused(),
            initialized: s.is_initialized(),
        }
    }
}

impl StateRecord {
    /// Check the record can be turned back into a valid state.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let finite = self.value.is_finite()
            && self.last_target.is_finite()
            && self.resolved_target.is_finite()
            && self.decay.is_finite();
        if !finite {
            return Err(SnapshotError::NonFiniteValue);
        }
        if self.decay < 0.0 {
            return Err(SnapshotError::NegativeDecay(self.decay));
        }
        Ok(())
    }

    /// Validate and rebuild an interpolator with `params`.
    pub fn restore(&self, params: InterpParams) -> Result<AlphaInterp, SnapshotError> {
        self.validate()?;
        let state = InterpState::from_raw(
            self.value,
            self.last_target,
            self.resolved_target,
            self.decay,
            self.paused,
            self.initialized,
        );
        Ok(AlphaInterp::from_state(params, state))
    }
}

// ─── Single interpolator ────────────────────────────────────────────────────

/// Snapshot of a single [`AlphaInterp`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct InterpSnapshot {
    /// Format version, always [`SNAPSHOT_VERSION`] for new snapshots.
    pub version: u16,
    /// Captured state.
    pub state: StateRecord,
}

impl InterpSnapshot {
    /// Capture `interp`.
    pub fn from_interp(interp: &AlphaInterp) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state: StateRecord::from(interp.state()),
        }
    }

    /// Rebuild the interpolator with `params`.
    pub fn restore(&self, params: InterpParams) -> Result<AlphaInterp, SnapshotError> {
        check_version(self.version)?;
        self.state.restore(params)
    }
}

// ─── Bank ───────────────────────────────────────────────────────────────────

/// One channel of a [`BankSnapshot`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ChannelRecord<K> {
    /// Channel key.
    pub key: K,
    /// Bank tick of the channel's last update.
    pub last_update_tick: u64,
    /// Captured state.
    pub state: StateRecord,
}

/// Snapshot of a whole [`InterpBank`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct BankSnapshot<K> {
    /// Format version, always [`SNAPSHOT_VERSION`] for new snapshots.
    pub version: u16,
    /// Bank tick counter at capture time.
    pub tick: u64,
    /// All channels, in bank iteration order.
    pub channels: Vec<ChannelRecord<K>>,
}

impl<K: Eq + Hash + Clone> BankSnapshot<K> {
    /// Capture every channel of `bank`.
    pub fn from_bank(bank: &InterpBank<K>) -> Self {
        let channels = bank
            .iter()
            .map(|(key, channel)| ChannelRecord {
                key: key.clone(),
                last_update_tick: channel.last_update_tick,
                state: StateRecord::from(channel.interp.state()),
            })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            tick: bank.tick(),
            channels,
        }
    }

    /// Number of channel records.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Look up a channel record by key.
    pub fn find_channel(&self, key: &K) -> Option<&ChannelRecord<K>> {
        self.channels.iter().find(|r| &r.key == key)
    }

    /// Rebuild a bank; every channel gets a copy of `defaults`.
    ///
    /// Fails on the first invalid record; nothing is partially restored.
    pub fn restore(&self, defaults: InterpParams) -> Result<InterpBank<K>, SnapshotError> {
        check_version(self.version)?;
        if self.channels.len() > MAX_CHANNELS {
            return Err(SnapshotError::TooManyChannels {
                count: self.channels.len(),
            });
        }
        for record in &self.channels {
            record.state.validate()?;
        }

        let mut bank = InterpBank::new(defaults.clone());
        for record in &self.channels {
            let interp = record.state.restore(defaults.clone())?;
            bank.insert_channel(
                record.key.clone(),
                Channel {
                    interp,
                    last_update_tick: record.last_update_tick,
                },
            );
        }
        bank.set_tick(self.tick);
        Ok(bank)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
