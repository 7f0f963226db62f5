//! Home-screen style "jiggle" animation for view instances.
//!
//! The effect combines a small randomized rotation with a vertical bounce,
//! mimicking the icon-rearrangement wiggle. Rotation strength is specified
//! as *corner travel* (how far the shape's corner should move, in pixels),
//! so the motion reads the same on shapes of any size; timing is randomized
//! per instance and per cycle so neighboring jiggles visibly drift apart.
//!
//! The crate is host-agnostic: it computes a per-frame
//! [`JiggleTransform`] (rotation in degrees plus a vertical offset in
//! pixels) and the host's render loop applies it to the decorated view.
//!
//! # Usage
//!
//! ```
//! use std::time::Instant;
//!
//! use jiggle::{JiggleArgs, JiggleIntensity, jiggle};
//!
//! let mut effect = jiggle(&JiggleArgs::intensity(JiggleIntensity::Vivacious));
//!
//! // Host lifecycle: mount with the view size, sample every frame, unmount
//! // on teardown.
//! let now = Instant::now();
//! effect.mount(64.0, 64.0, now);
//!
//! // Activation is deferred briefly, so right after mount the view is
//! // still at rest.
//! assert!(effect.transform(now).is_rest());
//! ```
//!
//! Toggling is driven externally, typically by an edit-mode flag:
//!
//! ```
//! use std::time::Instant;
//!
//! use jiggle::{JiggleArgs, JiggleHandle};
//!
//! let handle = JiggleHandle::from_args(&JiggleArgs::travel(1.8, 0.8).enabled(false));
//! let now = Instant::now();
//! handle.with_mut(|effect| effect.mount(48.0, 48.0, now));
//!
//! // Elsewhere, the edit-mode owner flips the shared toggle.
//! handle.set_enabled(true, now);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod animation;

pub mod animator;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod intensity;
pub mod timing;

pub use animator::{JiggleAnimator, JigglePhase, JiggleTransform, PendingActivation, SETTLE_DURATION};
pub use effect::{JiggleArgs, JiggleDefaults, JiggleEffect, jiggle};
pub use error::JiggleError;
pub use handle::JiggleHandle;
pub use intensity::{JiggleIntensity, JiggleParameters, JiggleRotation};
pub use timing::randomize;
