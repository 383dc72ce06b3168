/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! A keyed set of interpolators driven by one host loop.
//!
//! [`InterpBank`] maps caller-chosen keys (entity ids, effect names, ...) to
//! independent [`AlphaInterp`] channels. Channels are created on first use with
//! the bank's default parameters and share nothing with each other.
//!
//! # Invariants
//!
//! - Channels are independent: ticking or decaying one never touches another.
//! - At most the bank's capacity (≤ [`MAX_CHANNELS`]) channels are tracked; the
//!   least recently updated channel is evicted to make room.
//! - `no_std` compatible; uses `hashbrown::HashMap` and a fixed-capacity
//!   `heapless::Vec` for per-tick transition reports.

use core::hash::Hash;

use hashbrown::HashMap;
use heapless::Vec as HVec;

use crate::interp::{AlphaInterp, InterpPhase};
use crate::params::InterpParams;

/// Maximum number of channels a bank tracks.
pub const MAX_CHANNELS: usize = 64;

/// One channel of an [`InterpBank`].
#[derive(Clone, Debug)]
pub struct Channel {
    /// The interpolator.
    pub interp: AlphaInterp,
    /// Bank tick of the most recent update through the bank.
    pub last_update_tick: u64,
}

/// A phase transition observed during [`InterpBank::tick_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseChange<K> {
    /// Channel that changed.
    pub key: K,
    /// Phase before the tick.
    pub from: InterpPhase,
    /// Phase after the tick.
    pub to: InterpPhase,
}

/// Transitions reported by one [`InterpBank::tick_all`] call.
pub type PhaseChanges<K> = HVec<PhaseChange<K>, MAX_CHANNELS>;

/// Keyed collection of independent [`AlphaInterp`] channels.
pub struct InterpBank<K: Eq + Hash + Clone> {
    channels: HashMap<K, Channel>,
    defaults: InterpParams,
    capacity: usize,
    tick: u64,
}

impl<K: Eq + Hash + Clone> InterpBank<K> {
    /// Empty bank whose new channels use `defaults`.
    pub fn new(defaults: InterpParams) -> Self {
        Self::with_capacity_limit(defaults, MAX_CHANNELS)
    }

    /// Empty bank tracking at most `limit` channels (capped at [`MAX_CHANNELS`]).
    pub fn with_capacity_limit(defaults: InterpParams, limit: usize) -> Self {
        Self {
            channels: HashMap::new(),
            defaults,
            capacity: limit.clamp(1, MAX_CHANNELS),
            tick: 0,
        }
    }

    // ── Channel access ─────────────────────────────────────────────────────

    /// The channel for `key`, if tracked.
    pub fn get(&self, key: &K) -> Option<&AlphaInterp> {
        self.channels.get(key).map(|c| &c.interp)
    }

    /// Mutable access to a tracked channel.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut AlphaInterp> {
        self.channels.get_mut(key).map(|c| &mut c.interp)
    }

    /// The channel for `key`, created with the default parameters if unseen.
    ///
    /// Evicts the least recently updated channel when the bank is full.
    pub fn get_or_insert(&mut self, key: &K) -> &mut AlphaInterp {
        if !self.channels.contains_key(key) && self.channels.len() >= self.capacity {
            self.evict_oldest();
        }
        let defaults = &self.defaults;
        let tick = self.tick;
        &mut self
            .channels
            .entry(key.clone())
            .or_insert_with(|| Channel {
                interp: AlphaInterp::with_params(defaults.clone()),
                last_update_tick: tick,
            })
            .interp
    }

    /// Insert a pre-built channel, replacing any existing one for `key`.
    pub fn insert(&mut self, key: K, interp: AlphaInterp) {
        if !self.channels.contains_key(&key) && self.channels.len() >= self.capacity {
            self.evict_oldest();
        }
        self.channels.insert(
            key,
            Channel {
                interp,
                last_update_tick: self.tick,
            },
        );
    }

    /// Stop tracking `key`, returning its interpolator.
    pub fn remove(&mut self, key: &K) -> Option<AlphaInterp> {
        self.channels.remove(key).map(|c| c.interp)
    }

    // ── Per-channel operations ─────────────────────────────────────────────

    /// Advance one channel toward `target`. Creates the channel if unseen.
    pub fn interpolate(&mut self, key: &K, target: f32, delta_time: f32) -> f32 {
        self.tick = self.tick.wrapping_add(1);
        let tick = self.tick;
        let value = self.get_or_insert(key).interpolate(target, delta_time);
        if let Some(channel) = self.channels.get_mut(key) {
            channel.last_update_tick = tick;
        }
        value
    }

    /// Queue decay on one channel. Creates the channel if unseen.
    pub fn decay(&mut self, key: &K, amount: f32) {
        self.tick = self.tick.wrapping_add(1);
        let tick = self.tick;
        self.get_or_insert(key).decay(amount);
        if let Some(channel) = self.channels.get_mut(key) {
            channel.last_update_tick = tick;
        }
    }

    /// Current value of a channel, or 0.0 if unseen.
    pub fn value(&self, key: &K) -> f32 {
        self.get(key).map_or(0.0, AlphaInterp::interpolated_value)
    }

    // ── Whole-bank operations ──────────────────────────────────────────────

    /// Advance every channel toward its own last target by `delta_time`.
    ///
    /// Returns the phase transitions that happened during this tick.
    pub fn tick_all(&mut self, delta_time: f32) -> PhaseChanges<K> {
        self.tick = self.tick.wrapping_add(1);
        let mut changes = PhaseChanges::new();
        for (key, channel) in self.channels.iter_mut() {
            let from = channel.interp.phase();
            let target = channel.interp.last_target_value();
            channel.interp.interpolate(target, delta_time);
            let to = channel.interp.phase();
            if from != to {
                // Capacity equals MAX_CHANNELS, so this never overflows.
                let _ = changes.push(PhaseChange {
                    key: key.clone(),
                    from,
                    to,
                });
            }
            if channel.interp.is_active() {
                channel.last_update_tick = self.tick;
            }
        }
        changes
    }

    /// Pause or resume every channel.
    pub fn set_paused_all(&mut self, paused: bool) {
        for channel in self.channels.values_mut() {
            channel.interp.set_paused(paused);
        }
    }

    /// Snap every channel to its target.
    pub fn finalize_all(&mut self) {
        for channel in self.channels.values_mut() {
            channel.interp.finalize();
        }
    }

    /// Reset every channel to idle at zero.
    pub fn reset_all(&mut self) {
        for channel in self.channels.values_mut() {
            channel.interp.reset();
        }
    }

    // ── Collection helpers ─────────────────────────────────────────────────

    /// Number of tracked channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// `true` if no channels are tracked.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of channels that are neither completed nor paused.
    pub fn active_count(&self) -> usize {
        self.channels.values().filter(|c| c.interp.is_active()).count()
    }

    /// Iterate over `(key, channel)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Channel)> {
        self.channels.iter()
    }

    /// Default parameters for new channels.
    pub fn defaults(&self) -> &InterpParams {
        &self.defaults
    }

    /// Maximum number of tracked channels.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bank tick counter (advanced by every update through the bank).
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub(crate) fn insert_channel(&mut self, key: K, channel: Channel) {
        self.channels.insert(key, channel);
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest_key) = self
            .channels
            .iter()
            .min_by_key(|(_, c)| c.last_update_tick)
            .map(|(k, _)| k.clone())
        {
            self.channels.remove(&oldest_key);
            log::debug!("interp bank full ({}), evicted least recently updated channel", self.capacity);
        }
    }
}

impl<K: Eq + Hash + Clone> Default for InterpBank<K> {
    fn default() -> Self {
        Self::new(InterpParams::default())
    }
}

impl<K: Eq + Hash + Clone> core::fmt::Debug for InterpBank<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InterpBank")
            .field("channel_count", &self.channels.len())
            .field("capacity", &self.capacity)
            .field("tick", &self.tick)
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
