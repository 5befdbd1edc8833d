use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Tuning constants for the gesture mappers.
///
/// The defaults are hand-tuned values, not derived ones; every field can be
/// overridden from the `[gesture]` table of the studio config.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Radians of rotation per input unit of horizontal drag.
    pub rotate_gain: f32,
    /// Scale change per input unit of vertical drag (dragging up grows).
    pub scale_gain: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Dead-zone applied to both axes by the orbit mapper.
    pub move_threshold: f32,
    /// Radians of orbit per input unit of drag.
    pub orbit_gain: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotate_gain: 0.01,
            scale_gain: 0.002,
            scale_min: 0.5,
            scale_max: 2.0,
            move_threshold: 1.2,
            orbit_gain: 0.01,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("rotate_gain", self.rotate_gain),
            ("scale_gain", self.scale_gain),
            ("scale_min", self.scale_min),
            ("scale_max", self.scale_max),
            ("move_threshold", self.move_threshold),
            ("orbit_gain", self.orbit_gain),
        ];
        for (name, value) in fields {
            ensure!(value.is_finite(), "gesture.{name} must be finite, got {value}");
        }

        ensure!(self.scale_min > 0.0, "gesture.scale_min must be positive, got {}", self.scale_min);
        ensure!(
            self.scale_min <= self.scale_max,
            "gesture.scale_min ({}) exceeds gesture.scale_max ({})",
            self.scale_min,
            self.scale_max
        );
        ensure!(
            self.move_threshold >= 0.0,
            "gesture.move_threshold must not be negative, got {}",
            self.move_threshold
        );
        Ok(())
    }

    /// Clamps `scale` into the configured range.
    ///
    /// Written as max/min rather than `f32::clamp` so an unvalidated config
    /// cannot panic here.
    #[inline]
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.max(self.scale_min).min(self.scale_max)
    }
}
