//! The jiggle state machine and per-frame sampler.
//!
//! [`JiggleAnimator`] owns the on/off lifecycle of one jiggling instance and
//! turns wall-clock time into a rotation/offset transform each frame. It is
//! advanced the way component controllers are advanced elsewhere in this
//! crate's lineage: the host calls [`JiggleAnimator::sample`] once per frame
//! with the current [`Instant`], and the animator computes everything from
//! elapsed time. There are no internal threads or timers.
//!
//! The lifecycle has three phases:
//!
//! - `Idle`: at rest.
//! - `Starting`: enabled, waiting out a short startup delay before the loop
//!   begins. Some hosts drop animations that start in the same frame a view
//!   becomes visible (fast scroll-in), so activation is deferred by a
//!   configurable delay and guarded by a generation counter.
//! - `Jiggling`: the repeating loop is running.
//!
//! Disabling while jiggling does not snap to rest; the current transform
//! eases back to zero over [`SETTLE_DURATION`].

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::{debug, trace};

use crate::animation;
use crate::timing::{self, CycleSpec};

/// How long a disabled jiggle takes to ease back to rest.
pub const SETTLE_DURATION: Duration = Duration::from_millis(130);

/// Duration of the one-shot counter-rotation applied at activation, equal to
/// the rotation channel's base period.
const COUNTER_ROTATION: Duration = Duration::from_millis(120);

/// Lifecycle phase of one jiggling instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JigglePhase {
    /// At rest; nothing scheduled.
    Idle,
    /// Enabled, waiting for the deferred activation deadline.
    Starting,
    /// The repeating jiggle loop is running.
    Jiggling,
}

/// Per-frame output of the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JiggleTransform {
    /// Rotation about the view center, in degrees.
    pub rotation_degrees: f32,
    /// Vertical offset, in pixels.
    pub offset_px: f32,
}

impl JiggleTransform {
    /// The rest transform: no rotation, no offset.
    pub const REST: Self = Self {
        rotation_degrees: 0.0,
        offset_px: 0.0,
    };

    /// Returns whether this transform leaves the view untouched.
    pub fn is_rest(&self) -> bool {
        self.rotation_degrees == 0.0 && self.offset_px == 0.0
    }
}

/// A deferred activation the host may redeem with
/// [`JiggleAnimator::activate`].
///
/// Poll-driven hosts can ignore this entirely; [`JiggleAnimator::sample`]
/// activates on its own once the deadline passes. Hosts with a real timer
/// facility schedule a callback for `deadline` and pass `generation` back,
/// which lets the animator discard callbacks that outlived a disable,
/// re-enable, or unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingActivation {
    /// Generation the activation belongs to; stale generations are ignored.
    pub generation: u64,
    /// Earliest instant the jiggle loop may start.
    pub deadline: Instant,
}

/// One repeating autoreverse wave, yielding a level in `[0, 1]`.
///
/// Each completed half-cycle redraws its duration from the channel's
/// [`CycleSpec`], which is what makes two instances (and the two channels of
/// one instance) drift apart over time.
struct Channel {
    start_at: Instant,
    wave: Option<Wave>,
}

struct Wave {
    leg_started: Instant,
    leg_duration: Duration,
    ascending: bool,
}

impl Channel {
    fn new(start_at: Instant) -> Self {
        Self {
            start_at,
            wave: None,
        }
    }

    fn level(&mut self, now: Instant, spec: CycleSpec, rng: &mut Pcg64) -> f32 {
        if now < self.start_at {
            return 0.0;
        }
        let start_at = self.start_at;
        let wave = self.wave.get_or_insert_with(|| Wave {
            leg_started: start_at,
            leg_duration: spec.duration(rng),
            ascending: true,
        });
        while now.saturating_duration_since(wave.leg_started) >= wave.leg_duration {
            wave.leg_started += wave.leg_duration;
            wave.ascending = !wave.ascending;
            wave.leg_duration = spec.duration(rng);
        }
        let t = now.saturating_duration_since(wave.leg_started).as_secs_f32()
            / wave.leg_duration.as_secs_f32();
        let eased = animation::ease_in_out(t);
        if wave.ascending { eased } else { 1.0 - eased }
    }
}

#[derive(Clone, Copy)]
struct Settle {
    from: JiggleTransform,
    started: Instant,
}

/// State machine and sampler for one jiggling instance.
pub struct JiggleAnimator {
    angle_degrees: f32,
    offset_px: f32,
    startup_delay: Duration,
    enabled: bool,
    phase: JigglePhase,
    reversed: bool,
    generation: u64,
    activate_at: Option<Instant>,
    rotation: Option<Channel>,
    offset: Option<Channel>,
    settle: Option<Settle>,
    rng: Pcg64,
}

impl JiggleAnimator {
    /// Creates an animator with the given rotation amplitude (degrees),
    /// bounce amplitude (pixels), and startup delay.
    pub fn new(angle_degrees: f32, offset_px: f32, startup_delay: Duration) -> Self {
        Self::seeded(angle_degrees, offset_px, startup_delay, rand::rng().random())
    }

    /// Like [`JiggleAnimator::new`], but with a fixed randomization seed so
    /// the timing jitter is reproducible.
    pub fn seeded(angle_degrees: f32, offset_px: f32, startup_delay: Duration, seed: u64) -> Self {
        Self {
            angle_degrees,
            offset_px,
            startup_delay,
            enabled: false,
            phase: JigglePhase::Idle,
            reversed: false,
            generation: 0,
            activate_at: None,
            rotation: None,
            offset: None,
            settle: None,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Replaces the amplitudes, e.g. after the decorated view is resized.
    /// The running loop keeps its phase; only the magnitudes change.
    pub fn set_amplitudes(&mut self, angle_degrees: f32, offset_px: f32) {
        self.angle_degrees = angle_degrees;
        self.offset_px = offset_px;
    }

    /// Rotation amplitude in degrees.
    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    /// Bounce amplitude in pixels.
    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> JigglePhase {
        self.phase
    }

    /// The externally-driven target state.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the repeating loop is actively running.
    pub fn is_triggered(&self) -> bool {
        self.phase == JigglePhase::Jiggling
    }

    /// The counter-rotation sign drawn at the last activation.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// The deferred activation currently scheduled, if any.
    pub fn pending_activation(&self) -> Option<PendingActivation> {
        self.activate_at.map(|deadline| PendingActivation {
            generation: self.generation,
            deadline,
        })
    }

    /// Sets the target state.
    ///
    /// Enabling schedules a deferred activation `startup_delay` from `now`
    /// (or starts immediately when the delay is zero). Disabling takes
    /// effect immediately: a pending activation is discarded, and a running
    /// loop eases back to rest over [`SETTLE_DURATION`].
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.generation = self.generation.wrapping_add(1);
        if enabled {
            self.settle = None;
            if self.startup_delay.is_zero() {
                self.begin_jiggling(now);
            } else {
                self.phase = JigglePhase::Starting;
                self.activate_at = Some(now + self.startup_delay);
                debug!(delay_ms = self.startup_delay.as_millis() as u64, "jiggle activation deferred");
            }
        } else {
            if self.phase == JigglePhase::Jiggling {
                let from = self.active_transform(now);
                if !from.is_rest() {
                    self.settle = Some(Settle { from, started: now });
                }
            }
            self.phase = JigglePhase::Idle;
            self.activate_at = None;
            self.rotation = None;
            self.offset = None;
            debug!(settling = self.settle.is_some(), "jiggle disabled");
        }
    }

    /// Promotes `Starting` to `Jiggling` once the activation deadline has
    /// passed. Called implicitly by [`JiggleAnimator::sample`].
    pub fn tick(&mut self, now: Instant) {
        if self.phase == JigglePhase::Starting
            && self.activate_at.is_some_and(|at| now >= at)
        {
            self.begin_jiggling(now);
        }
    }

    /// Redeems a deferred activation scheduled by the host.
    ///
    /// Ignored unless `generation` matches the animator's current
    /// generation and the animator is still waiting to start; a callback
    /// that fires after a disable, re-enable, or unmount therefore has no
    /// effect.
    pub fn activate(&mut self, generation: u64, now: Instant) {
        if generation == self.generation && self.phase == JigglePhase::Starting && self.enabled {
            self.begin_jiggling(now);
        } else {
            trace!(generation, current = self.generation, "stale jiggle activation ignored");
        }
    }

    /// Samples the transform for the current frame.
    pub fn sample(&mut self, now: Instant) -> JiggleTransform {
        self.tick(now);
        if self.phase == JigglePhase::Jiggling {
            return self.active_transform(now);
        }
        if let Some(settle) = self.settle {
            let t = now.saturating_duration_since(settle.started).as_secs_f32()
                / SETTLE_DURATION.as_secs_f32();
            if t >= 1.0 {
                self.settle = None;
                return JiggleTransform::REST;
            }
            let remaining = 1.0 - animation::ease_in_out(t);
            return JiggleTransform {
                rotation_degrees: settle.from.rotation_degrees * remaining,
                offset_px: settle.from.offset_px * remaining,
            };
        }
        JiggleTransform::REST
    }

    /// Teardown for unmount: forces the instance to rest without a settle
    /// animation and invalidates any outstanding deferred activation.
    pub fn reset(&mut self) {
        self.enabled = false;
        self.phase = JigglePhase::Idle;
        self.generation = self.generation.wrapping_add(1);
        self.activate_at = None;
        self.rotation = None;
        self.offset = None;
        self.settle = None;
    }

    fn begin_jiggling(&mut self, now: Instant) {
        self.reversed = self.rng.random();
        self.activate_at = None;
        self.settle = None;
        self.phase = JigglePhase::Jiggling;
        let rotation_delay = timing::ROTATION_CYCLE.delay(&mut self.rng);
        let offset_delay = timing::OFFSET_CYCLE.delay(&mut self.rng);
        self.rotation = Some(Channel::new(now + rotation_delay));
        self.offset = Some(Channel::new(now + offset_delay));
        debug!(reversed = self.reversed, "jiggle loop started");
    }

    /// The transform while the loop runs: an eased autoreversing bounce on
    /// the offset channel, and on the rotation channel the superposition of
    /// a one-shot counter-rotation toward `-sign * angle` with a repeating
    /// wave toward `+sign * 2 * angle`. The net rotation starts at zero and
    /// sweeps the full `-angle..+angle` range without an initial snap.
    fn active_transform(&mut self, now: Instant) -> JiggleTransform {
        let angle = self.angle_degrees;
        let sign = if self.reversed { -1.0 } else { 1.0 };
        match (self.rotation.as_mut(), self.offset.as_mut()) {
            (Some(rotation), Some(offset)) => {
                let counter = counter_progress(rotation.start_at, now);
                let wave = rotation.level(now, timing::ROTATION_CYCLE, &mut self.rng);
                let rotation_degrees =
                    counter * (-sign * angle) + wave * (sign * 2.0 * angle);
                let bounce =
                    offset.level(now, timing::OFFSET_CYCLE, &mut self.rng) * self.offset_px;
                JiggleTransform {
                    rotation_degrees,
                    offset_px: bounce,
                }
            }
            _ => JiggleTransform::REST,
        }
    }
}

/// Eased progress of the one-shot counter-rotation, starting when the
/// rotation channel starts.
fn counter_progress(start_at: Instant, now: Instant) -> f32 {
    let elapsed = now.saturating_duration_since(start_at);
    animation::ease_in_out(elapsed.as_secs_f32() / COUNTER_ROTATION.as_secs_f32())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn animator(seed: u64) -> JiggleAnimator {
        JiggleAnimator::seeded(4.0, 2.4, Duration::from_millis(50), seed)
    }

    #[test]
    fn test_disabled_animator_is_inert() {
        let mut anim = animator(1);
        let t0 = Instant::now();
        assert_eq!(anim.phase(), JigglePhase::Idle);
        assert_eq!(anim.pending_activation(), None);
        for i in 0..20 {
            assert_eq!(anim.sample(t0 + MS * i * 10), JiggleTransform::REST);
        }
        assert_eq!(anim.pending_activation(), None);
    }

    #[test]
    fn test_activation_is_deferred() {
        let mut anim = animator(2);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        assert_eq!(anim.phase(), JigglePhase::Starting);
        assert!(!anim.is_triggered());

        // Still at rest inside the startup window.
        assert_eq!(anim.sample(t0 + MS * 49), JiggleTransform::REST);
        assert_eq!(anim.phase(), JigglePhase::Starting);

        anim.sample(t0 + MS * 50);
        assert_eq!(anim.phase(), JigglePhase::Jiggling);
        assert!(anim.is_triggered());
    }

    #[test]
    fn test_rapid_toggle_inside_window_never_jiggles() {
        let mut anim = animator(3);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.set_enabled(false, t0 + MS * 10);
        assert_eq!(anim.phase(), JigglePhase::Idle);
        assert_eq!(anim.pending_activation(), None);

        // Well past the original deadline: the discarded transition must
        // not have left anything behind.
        assert_eq!(anim.sample(t0 + MS * 100), JiggleTransform::REST);
        assert_eq!(anim.phase(), JigglePhase::Idle);
    }

    #[test]
    fn test_reenable_restarts_the_window() {
        let mut anim = animator(4);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.set_enabled(false, t0 + MS * 10);
        anim.set_enabled(true, t0 + MS * 20);

        // 55ms after the first enable but only 35ms after the second: the
        // new window is still open.
        anim.sample(t0 + MS * 55);
        assert_eq!(anim.phase(), JigglePhase::Starting);

        anim.sample(t0 + MS * 70);
        assert_eq!(anim.phase(), JigglePhase::Jiggling);
    }

    #[test]
    fn test_stale_activation_is_ignored() {
        let mut anim = animator(5);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        let pending = anim.pending_activation().expect("activation scheduled");

        anim.set_enabled(false, t0 + MS * 10);
        anim.activate(pending.generation, t0 + MS * 60);
        assert_eq!(anim.phase(), JigglePhase::Idle);

        // A fresh enable gets a fresh generation; the old one stays dead.
        anim.set_enabled(true, t0 + MS * 20);
        anim.activate(pending.generation, t0 + MS * 80);
        assert_eq!(anim.phase(), JigglePhase::Starting);
    }

    #[test]
    fn test_current_activation_can_be_redeemed() {
        let mut anim = animator(6);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        let pending = anim.pending_activation().expect("activation scheduled");
        anim.activate(pending.generation, pending.deadline);
        assert_eq!(anim.phase(), JigglePhase::Jiggling);
        assert_eq!(anim.pending_activation(), None);
    }

    #[test]
    fn test_zero_startup_delay_starts_immediately() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 7);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        assert_eq!(anim.phase(), JigglePhase::Jiggling);
        assert_eq!(anim.pending_activation(), None);
    }

    #[test]
    fn test_jiggling_produces_bounded_motion() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 8);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);

        let mut saw_rotation = false;
        let mut saw_offset = false;
        // Sample well past the maximum channel start delays (140ms).
        for i in 0..200 {
            let transform = anim.sample(t0 + MS * (150 + i * 7));
            assert!(transform.rotation_degrees.abs() <= 2.0 * 4.0 + 1e-3);
            assert!(transform.offset_px >= -1e-3 && transform.offset_px <= 2.4 + 1e-3);
            saw_rotation |= transform.rotation_degrees.abs() > 0.1;
            saw_offset |= transform.offset_px > 0.1;
        }
        assert!(saw_rotation, "rotation channel never moved");
        assert!(saw_offset, "offset channel never moved");
    }

    #[test]
    fn test_rotation_sweeps_both_signs() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 9);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..400 {
            let transform = anim.sample(t0 + MS * (200 + i * 3));
            min = min.min(transform.rotation_degrees);
            max = max.max(transform.rotation_degrees);
        }
        // The counter-rotation turns the repeating half-sweep into a full
        // sweep around zero.
        assert!(min < -1.0, "never swept negative: min {min}");
        assert!(max > 1.0, "never swept positive: max {max}");
    }

    #[test]
    fn test_disable_settles_to_rest() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 10);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.sample(t0 + MS * 300);

        anim.set_enabled(false, t0 + MS * 300);
        assert_eq!(anim.phase(), JigglePhase::Idle);
        assert!(!anim.is_triggered());

        // During the settle window the transform decays but may be nonzero;
        // after it, the instance is exactly at rest.
        let mid = anim.sample(t0 + MS * 360);
        assert!(mid.rotation_degrees.abs() <= 2.0 * 4.0 + 1e-3);
        let done = anim.sample(t0 + MS * 300 + SETTLE_DURATION + MS * 10);
        assert_eq!(done, JiggleTransform::REST);
    }

    #[test]
    fn test_settle_decays_monotonically_in_magnitude() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 11);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.sample(t0 + MS * 250);
        anim.set_enabled(false, t0 + MS * 250);

        let start = anim.sample(t0 + MS * 251);
        let later = anim.sample(t0 + MS * 330);
        assert!(later.rotation_degrees.abs() <= start.rotation_degrees.abs() + 1e-3);
        assert!(later.offset_px.abs() <= start.offset_px.abs() + 1e-3);
    }

    #[test]
    fn test_reset_tears_down_without_settle() {
        let mut anim = animator(12);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.sample(t0 + MS * 300);
        assert!(anim.is_triggered());

        anim.reset();
        assert_eq!(anim.phase(), JigglePhase::Idle);
        assert!(!anim.is_enabled());
        assert_eq!(anim.pending_activation(), None);
        // No residual settle output after teardown.
        assert_eq!(anim.sample(t0 + MS * 301), JiggleTransform::REST);
    }

    #[test]
    fn test_reset_invalidates_pending_activation() {
        let mut anim = animator(13);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        let pending = anim.pending_activation().expect("activation scheduled");
        anim.reset();
        anim.activate(pending.generation, t0 + MS * 60);
        assert_eq!(anim.phase(), JigglePhase::Idle);
    }

    #[test]
    fn test_set_enabled_is_idempotent() {
        let mut anim = animator(14);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        let first = anim.pending_activation();
        anim.set_enabled(true, t0 + MS * 10);
        assert_eq!(anim.pending_activation(), first);
    }

    #[test]
    fn test_amplitudes_can_change_mid_flight() {
        let mut anim = JiggleAnimator::seeded(4.0, 2.4, Duration::ZERO, 15);
        let t0 = Instant::now();
        anim.set_enabled(true, t0);
        anim.sample(t0 + MS * 200);

        anim.set_amplitudes(1.0, 0.5);
        for i in 0..100 {
            let transform = anim.sample(t0 + MS * (210 + i * 5));
            assert!(transform.rotation_degrees.abs() <= 2.0 + 1e-3);
            assert!(transform.offset_px <= 0.5 + 1e-3);
        }
    }
}
