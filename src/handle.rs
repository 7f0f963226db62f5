//! Shared handle over one jiggle effect.
//!
//! The common deployment of this effect is many instances driven by one
//! external toggle (an "edit mode" flag jiggling every icon on a screen),
//! with the toggle owner and the renderer living in different places.
//! [`JiggleHandle`] wraps a [`JiggleEffect`] behind a lock so clones of the
//! handle can be held by both.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::animator::{JigglePhase, JiggleTransform};
use crate::effect::{JiggleArgs, JiggleEffect};

/// Cloneable, shareable handle to one [`JiggleEffect`].
#[derive(Clone)]
pub struct JiggleHandle {
    inner: Arc<Mutex<JiggleEffect>>,
}

impl JiggleHandle {
    /// Wraps an effect in a shared handle.
    pub fn new(effect: JiggleEffect) -> Self {
        Self {
            inner: Arc::new(Mutex::new(effect)),
        }
    }

    /// Creates a handle directly from args.
    pub fn from_args(args: &JiggleArgs) -> Self {
        Self::new(JiggleEffect::new(args.clone()))
    }

    /// Runs `f` with shared access to the effect.
    pub fn with<R>(&self, f: impl FnOnce(&JiggleEffect) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the effect.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut JiggleEffect) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Sets the target state. See [`JiggleEffect::set_enabled`].
    pub fn set_enabled(&self, enabled: bool, now: Instant) {
        self.inner.lock().set_enabled(enabled, now);
    }

    /// Samples the transform for the current frame.
    pub fn transform(&self, now: Instant) -> JiggleTransform {
        self.inner.lock().transform(now)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> JigglePhase {
        self.inner.lock().phase()
    }
}
