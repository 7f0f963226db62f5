//! Corner-travel geometry.
//!
//! A jiggle is specified either as a rotation angle or as a *corner travel*:
//! the linear distance the outer corner of the shape should move as the shape
//! rotates about its center. Specifying travel instead of an angle keeps the
//! perceived motion consistent across shape sizes, since a large shape needs
//! less angle than a small one to move its corner the same distance.
//!
//! The conversion uses the chord-length relation for a point at radius `r`
//! swinging through angle `θ`: `chord = 2 * r * sin(θ / 2)`, solved for `θ`.

use tracing::warn;

use crate::error::JiggleError;

/// Rotation angle used when the shape is degenerate (zero radius) and no
/// angle can be derived from a corner travel.
pub const FALLBACK_DEGREES: f32 = 2.0;

/// Distance from the center of a `width` x `height` shape to its corner.
pub fn corner_radius(width: f32, height: f32) -> f32 {
    (width * 0.5).hypot(height * 0.5)
}

/// Resolves the rotation angle (in degrees) that moves the corner of a
/// `width` x `height` shape by `travel_px`.
///
/// This is the lenient entry point used by the effect itself: out-of-domain
/// input is clamped rather than rejected, since a cosmetic animation should
/// not fail loudly.
///
/// - `travel_px <= 0` resolves to `0.0` (no rotation).
/// - `travel_px > 2 * radius` clamps to a half turn (180°) and logs a
///   warning.
/// - A zero-size shape resolves to [`FALLBACK_DEGREES`].
pub fn resolve_angle(width: f32, height: f32, travel_px: f32) -> f32 {
    match try_resolve_angle(width, height, travel_px) {
        Ok(angle) => angle,
        Err(JiggleError::DegenerateShape) => {
            warn!(width, height, "zero-size shape; using fallback jiggle angle");
            FALLBACK_DEGREES
        }
        Err(JiggleError::TravelOutOfRange { travel_px, max_px }) => {
            if travel_px <= 0.0 {
                0.0
            } else {
                warn!(travel_px, max_px, "corner travel exceeds shape diameter; clamping to 180°");
                180.0
            }
        }
    }
}

/// Strict variant of [`resolve_angle`].
///
/// Returns the exact chord-relation angle `2 * asin(travel / (2 * r))` in
/// degrees, or an error when the input is outside the formula's domain.
pub fn try_resolve_angle(width: f32, height: f32, travel_px: f32) -> Result<f32, JiggleError> {
    let radius = corner_radius(width, height);
    if radius == 0.0 {
        return Err(JiggleError::DegenerateShape);
    }
    let max_px = 2.0 * radius;
    if travel_px <= 0.0 || travel_px > max_px {
        return Err(JiggleError::TravelOutOfRange { travel_px, max_px });
    }
    Ok(2.0 * (travel_px / max_px).asin().to_degrees())
}
