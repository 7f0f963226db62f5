//! Randomized cycle timing.
//!
//! Every repeating part of the jiggle draws its durations from a bounded
//! uniform distribution around a base value. Each instance draws its own
//! start delays, and every half-cycle redraws its duration, so concurrently
//! jiggling peers drift out of phase instead of marching in lockstep.
//!
//! The rotation and offset channels intentionally use *different* base
//! periods (0.12 s vs 0.14 s) so the two motions beat against each other
//! within a single instance as well.

use std::time::Duration;

use rand::Rng;

/// Draws `base + variance * uniform(-1, 1)`, in seconds.
///
/// The result is always within `[base - variance, base + variance]`.
pub fn randomize(base: f32, variance: f32, rng: &mut impl Rng) -> f32 {
    base + variance * rng.random_range(-1.0f32..1.0)
}

/// Timing constants for one repeating animation channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CycleSpec {
    /// Base duration of one half-cycle, in seconds.
    pub base: f32,
    /// Uniform variance applied to each half-cycle duration, in seconds.
    pub variance: f32,
    /// Base delay before the channel starts moving, in seconds.
    pub delay_base: f32,
    /// Uniform variance applied to the start delay, in seconds.
    pub delay_variance: f32,
}

impl CycleSpec {
    /// Draws a randomized half-cycle duration.
    pub fn duration(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_secs_f32(randomize(self.base, self.variance, rng).max(0.0))
    }

    /// Draws a randomized start delay.
    pub fn delay(&self, rng: &mut impl Rng) -> Duration {
        Duration::from_secs_f32(randomize(self.delay_base, self.delay_variance, rng).max(0.0))
    }
}

/// Rotation channel timing.
pub(crate) const ROTATION_CYCLE: CycleSpec = CycleSpec {
    base: 0.12,
    variance: 0.009,
    delay_base: 0.06,
    delay_variance: 0.06,
};

/// Vertical bounce channel timing. The base period deliberately differs from
/// the rotation channel's so the two phases drift.
pub(crate) const OFFSET_CYCLE: CycleSpec = CycleSpec {
    base: 0.14,
    variance: 0.009,
    delay_base: 0.07,
    delay_variance: 0.07,
};
