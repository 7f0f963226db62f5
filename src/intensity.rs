//! Intensity presets and jiggle parameters.

use crate::geometry;

/// Named jiggle strength presets.
///
/// Each preset bundles a corner-travel distance and a vertical bounce
/// amplitude, tuned so that `Moderate` matches the familiar home-screen
/// rearrangement wiggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JiggleIntensity {
    /// Barely-there motion for dense layouts.
    Subtle,
    /// The standard rearrangement wiggle.
    #[default]
    Moderate,
    /// Noticeably lively.
    Vivacious,
    /// Comically exaggerated; mostly useful for debugging the effect.
    Extreme,
}

impl JiggleIntensity {
    /// Returns the preset's parameters as (corner travel, bounce offset).
    pub fn parameters(self) -> JiggleParameters {
        match self {
            JiggleIntensity::Subtle => JiggleParameters::travel(1.2, 0.4),
            JiggleIntensity::Moderate => JiggleParameters::travel(1.8, 0.8),
            JiggleIntensity::Vivacious => JiggleParameters::travel(3.2, 2.4),
            JiggleIntensity::Extreme => JiggleParameters::travel(6.2, 10.0),
        }
    }
}

/// How the rotation half of a jiggle is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JiggleRotation {
    /// Desired linear travel of the shape's outer corner, in pixels. The
    /// rotation angle is derived from the shape size at mount so the motion
    /// looks the same regardless of size.
    Travel(f32),
    /// An explicit rotation amplitude in degrees, used as-is.
    Angle(f32),
}

/// Amplitudes for one jiggle: rotation plus vertical bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JiggleParameters {
    /// Rotation amplitude specification.
    pub rotation: JiggleRotation,
    /// Vertical bounce amplitude, in pixels.
    pub offset_px: f32,
}

impl JiggleParameters {
    /// Parameters from a corner-travel distance and bounce offset.
    pub fn travel(rotation_travel_px: f32, offset_px: f32) -> Self {
        Self {
            rotation: JiggleRotation::Travel(rotation_travel_px),
            offset_px,
        }
    }

    /// Parameters from an explicit rotation angle and bounce offset.
    pub fn angle(rotation_degrees: f32, offset_px: f32) -> Self {
        Self {
            rotation: JiggleRotation::Angle(rotation_degrees),
            offset_px,
        }
    }

    /// Resolves the rotation amplitude to degrees for a concrete shape size.
    pub fn resolve_degrees(&self, width: f32, height: f32) -> f32 {
        match self.rotation {
            JiggleRotation::Angle(degrees) => degrees,
            JiggleRotation::Travel(travel_px) => geometry::resolve_angle(width, height, travel_px),
        }
    }
}

impl From<JiggleIntensity> for JiggleParameters {
    fn from(intensity: JiggleIntensity) -> Self {
        intensity.parameters()
    }
}
