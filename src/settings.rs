//! Recorder settings
//!
//! Loaded from JSON; every field falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::RecorderError;

/// Colors for recorder visuals
pub mod colors {
    /// Line drawn while recording (blue)
    pub const RECORDING_LINE: [f32; 4] = [0.0, 0.5, 1.0, 1.0];
    /// Placement preview (translucent white)
    pub const PREVIEW: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    /// Live and committed ghost platforms (yellow)
    pub const GHOST: [f32; 4] = [1.0, 0.92, 0.016, 1.0];
}

/// Recorder tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSettings {
    // === Recording ===
    /// Minimum spacing between recorded points
    pub min_point_spacing: f32,
    /// Start recording on the first tick instead of waiting for input
    pub record_on_start: bool,
    /// Width of the in-progress recording line
    pub line_width: f32,
    pub line_color: [f32; 4],

    // === Ghost placement ===
    pub preview_color: [f32; 4],
    pub ghost_color: [f32; 4],
    /// Width of preview and ghost strips
    pub ghost_line_width: f32,
    /// Distance between the agent and the ghost's leading edge
    pub ghost_offset_x: f32,
    /// Author a collider when a ghost is promoted
    pub add_physics_collider: bool,
    /// Edge radius of the collider
    pub collider_thickness: f32,

    // === Input ===
    /// Seconds within which a second press counts as a double-press
    pub double_press_window: f32,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            min_point_spacing: MIN_POINT_SPACING,
            record_on_start: false,
            line_width: LINE_WIDTH,
            line_color: colors::RECORDING_LINE,

            preview_color: colors::PREVIEW,
            ghost_color: colors::GHOST,
            ghost_line_width: GHOST_LINE_WIDTH,
            ghost_offset_x: GHOST_OFFSET_X,
            add_physics_collider: true,
            collider_thickness: COLLIDER_THICKNESS,

            double_press_window: DOUBLE_PRESS_WINDOW,
        }
    }
}

impl RecorderSettings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| RecorderError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, RecorderError> {
        serde_json::to_string_pretty(self).map_err(|e| RecorderError::Settings(e.to_string()))
    }

    /// Reject values the recorder cannot work with
    pub fn validate(&self) -> Result<(), RecorderError> {
        let positive = [
            ("min_point_spacing", self.min_point_spacing),
            ("line_width", self.line_width),
            ("ghost_line_width", self.ghost_line_width),
            ("double_press_window", self.double_press_window),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RecorderError::Settings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("ghost_offset_x", self.ghost_offset_x),
            ("collider_thickness", self.collider_thickness),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RecorderError::Settings(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = RecorderSettings::default();
        assert_eq!(s.min_point_spacing, 0.2);
        assert_eq!(s.double_press_window, 0.3);
        assert_eq!(s.ghost_offset_x, 2.0);
        assert!(s.add_physics_collider);
        assert!(!s.record_on_start);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = RecorderSettings::from_json(r#"{ "ghost_offset_x": 3.5, "record_on_start": true }"#)
            .unwrap();
        assert_eq!(s.ghost_offset_x, 3.5);
        assert!(s.record_on_start);
        assert_eq!(s.min_point_spacing, MIN_POINT_SPACING);
    }

    #[test]
    fn test_json_round_trip() {
        let s = RecorderSettings::default();
        let json = s.to_json().unwrap();
        assert_eq!(RecorderSettings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = RecorderSettings::from_json(r#"{ "min_point_spacing": 0.0 }"#).unwrap_err();
        assert!(matches!(err, RecorderError::Settings(ref m) if m.contains("min_point_spacing")));

        let err = RecorderSettings::from_json(r#"{ "collider_thickness": -1.0 }"#).unwrap_err();
        assert!(matches!(err, RecorderError::Settings(_)));

        assert!(RecorderSettings::from_json("not json").is_err());
    }
}
