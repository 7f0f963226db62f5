//! The public jiggle effect surface.
//!
//! [`jiggle`] decorates one view instance with the effect. The host wires
//! the returned [`JiggleEffect`] into its lifecycle: [`JiggleEffect::mount`]
//! when the view appears (supplying its size), [`JiggleEffect::transform`]
//! once per frame to obtain the rotation/offset to apply, and
//! [`JiggleEffect::unmount`] when the view goes away.

use std::time::{Duration, Instant};

use derive_setters::Setters;

use crate::animator::{JiggleAnimator, JigglePhase, JiggleTransform, PendingActivation};
use crate::intensity::{JiggleIntensity, JiggleParameters};

/// Defaults for [`jiggle`].
pub struct JiggleDefaults;

impl JiggleDefaults {
    /// Default deferred-activation delay.
    ///
    /// Starting the loop in the same frame a view becomes visible is
    /// unreliable on some hosts (animations dropped during fast scroll-in),
    /// so activation waits this long by default. Hosts without that problem
    /// can set the delay to zero.
    pub const STARTUP_DELAY: Duration = Duration::from_millis(50);
}

/// Arguments for configuring the [`jiggle`] effect.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct JiggleArgs {
    /// Whether the jiggle is active. Can be changed later through
    /// [`JiggleEffect::set_enabled`].
    pub enabled: bool,
    /// Rotation and bounce amplitudes.
    pub parameters: JiggleParameters,
    /// Delay between enabling and the loop actually starting.
    pub startup_delay: Duration,
}

impl JiggleArgs {
    /// Args for a named intensity preset.
    pub fn intensity(intensity: JiggleIntensity) -> Self {
        Self {
            enabled: true,
            parameters: intensity.parameters(),
            startup_delay: JiggleDefaults::STARTUP_DELAY,
        }
    }

    /// Args from a corner-travel distance and bounce offset, both in
    /// pixels. The rotation angle is derived from the view size at mount.
    pub fn travel(rotation_travel_px: f32, offset_px: f32) -> Self {
        Self {
            enabled: true,
            parameters: JiggleParameters::travel(rotation_travel_px, offset_px),
            startup_delay: JiggleDefaults::STARTUP_DELAY,
        }
    }

    /// Args from an explicit rotation angle in degrees and a bounce offset
    /// in pixels.
    pub fn angle(rotation_degrees: f32, offset_px: f32) -> Self {
        Self {
            enabled: true,
            parameters: JiggleParameters::angle(rotation_degrees, offset_px),
            startup_delay: JiggleDefaults::STARTUP_DELAY,
        }
    }
}

impl Default for JiggleArgs {
    fn default() -> Self {
        Self::intensity(JiggleIntensity::default())
    }
}

/// Attaches the jiggle effect to one view instance.
pub fn jiggle(args: &JiggleArgs) -> JiggleEffect {
    JiggleEffect::new(args.clone())
}

/// Per-instance jiggle state, owned by the decorated view.
pub struct JiggleEffect {
    args: JiggleArgs,
    animator: JiggleAnimator,
    size: Option<(f32, f32)>,
}

impl JiggleEffect {
    /// Creates an unmounted effect from args.
    pub fn new(args: JiggleArgs) -> Self {
        let animator = JiggleAnimator::new(0.0, args.parameters.offset_px, args.startup_delay);
        Self {
            args,
            animator,
            size: None,
        }
    }

    /// Like [`JiggleEffect::new`], but with a fixed randomization seed so
    /// the timing jitter is reproducible.
    pub fn seeded(args: JiggleArgs, seed: u64) -> Self {
        let animator =
            JiggleAnimator::seeded(0.0, args.parameters.offset_px, args.startup_delay, seed);
        Self {
            args,
            animator,
            size: None,
        }
    }

    /// Mounts the effect with the decorated view's size, resolving the
    /// rotation amplitude, and starts the lifecycle if the args enable it.
    pub fn mount(&mut self, width: f32, height: f32, now: Instant) {
        self.size = Some((width, height));
        self.apply_amplitudes(width, height);
        if self.args.enabled {
            self.animator.set_enabled(true, now);
        }
    }

    /// Updates the view size, re-deriving the rotation amplitude for
    /// travel-specified rotations.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Some((width, height));
        self.apply_amplitudes(width, height);
    }

    /// Teardown on unmount: forces the instance to rest with no settle
    /// animation and invalidates any outstanding deferred activation.
    pub fn unmount(&mut self) {
        self.size = None;
        self.animator.reset();
    }

    /// Sets the externally-driven target state.
    ///
    /// Before mount this only records the target, which takes effect at
    /// [`JiggleEffect::mount`].
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        self.args.enabled = enabled;
        if self.size.is_some() {
            self.animator.set_enabled(enabled, now);
        }
    }

    /// Samples the transform to apply this frame. Unmounted effects are
    /// always at rest.
    pub fn transform(&mut self, now: Instant) -> JiggleTransform {
        if self.size.is_none() {
            return JiggleTransform::REST;
        }
        self.animator.sample(now)
    }

    /// The externally-driven target state.
    pub fn is_enabled(&self) -> bool {
        self.args.enabled
    }

    /// Whether the repeating loop is actively running.
    pub fn is_triggered(&self) -> bool {
        self.animator.is_triggered()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> JigglePhase {
        self.animator.phase()
    }

    /// The rotation amplitude in degrees, as resolved at the last
    /// mount/resize (zero before mount).
    pub fn rotation_degrees(&self) -> f32 {
        self.animator.angle_degrees()
    }

    /// The bounce amplitude in pixels.
    pub fn offset_px(&self) -> f32 {
        self.animator.offset_px()
    }

    /// The deferred activation currently scheduled, if any. See
    /// [`PendingActivation`] for how callback-driven hosts use this.
    pub fn pending_activation(&self) -> Option<PendingActivation> {
        self.animator.pending_activation()
    }

    /// Redeems a deferred activation scheduled by the host; stale
    /// generations are ignored.
    pub fn activate(&mut self, generation: u64, now: Instant) {
        self.animator.activate(generation, now);
    }

    fn apply_amplitudes(&mut self, width: f32, height: f32) {
        let degrees = self.args.parameters.resolve_degrees(width, height);
        self.animator
            .set_amplitudes(degrees, self.args.parameters.offset_px);
    }
}
