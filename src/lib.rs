//! Ghost Path - record a walked path and place it back as a platform
//!
//! Core modules:
//! - `sim`: Deterministic recorder core (sampling, placement, undo stacks)
//! - `platform`: Collaborator traits and input edge tracking
//! - `renderer`: CPU-side polyline strips for the host renderer
//! - `settings`: Data-driven recorder tuning

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::RecorderSettings;
pub use sim::{PathRecorder, RecorderError};

use glam::{Vec2, Vec3};

/// Recorder configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Minimum distance between two recorded points
    pub const MIN_POINT_SPACING: f32 = 0.2;
    /// Two secondary presses closer than this (seconds) form a double-press
    pub const DOUBLE_PRESS_WINDOW: f32 = 0.3;

    /// Width of the in-progress recording line
    pub const LINE_WIDTH: f32 = 0.2;
    /// Width of preview and ghost strips
    pub const GHOST_LINE_WIDTH: f32 = 0.3;
    /// Horizontal gap between the agent and the placed ghost
    pub const GHOST_OFFSET_X: f32 = 2.0;
    /// Edge radius of the one-sided platform collider
    pub const COLLIDER_THICKNESS: f32 = 0.15;

    /// Contacts with a normal whose vertical part is below this are side hits
    pub const ONE_WAY_NORMAL_MIN_Y: f32 = 0.5;
}

/// Drop the depth component of a world point
#[inline]
pub fn flatten(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// Horizontal extent of a point set as (min_x, max_x)
///
/// Returns `None` for an empty slice.
pub fn x_bounds(points: &[Vec3]) -> Option<(f32, f32)> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .fold((first.x, first.x), |(lo, hi), p| (lo.min(p.x), hi.max(p.x))),
    )
}
