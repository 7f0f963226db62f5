//! Error types for strict parameter resolution.

use thiserror::Error;

/// Errors produced by the strict geometry resolution path.
///
/// The lenient entry points ([`crate::geometry::resolve_angle`]) never fail;
/// they clamp and log instead. Use [`crate::geometry::try_resolve_angle`]
/// when invalid input should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum JiggleError {
    /// The shape has zero width and height, so no corner radius exists to
    /// derive a rotation angle from.
    #[error("shape has zero radius; cannot derive a rotation angle")]
    DegenerateShape,
    /// The requested corner travel cannot be produced by any rotation of
    /// this shape (the chord of a rotation about the center is at most the
    /// corner diameter, `2 * radius`).
    #[error("corner travel {travel_px}px is outside (0, {max_px}]px for this shape")]
    TravelOutOfRange {
        /// The requested corner travel, in pixels.
        travel_px: f32,
        /// The largest corner travel this shape can produce (`2 * radius`).
        max_px: f32,
    },
}
