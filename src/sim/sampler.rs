//! Position sampling under a minimum-spacing rule

use glam::Vec3;

use crate::consts::MIN_POINT_SPACING;

/// Turns a continuous stream of positions into a sparse polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    pub min_spacing: f32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            min_spacing: MIN_POINT_SPACING,
        }
    }
}

impl Sampler {
    pub fn new(min_spacing: f32) -> Self {
        Self { min_spacing }
    }

    /// Point to append for `position`, if any
    ///
    /// The first point of a path is always taken; after that a point is only
    /// taken once the agent is at least `min_spacing` from the last one.
    pub fn sample(&self, path: &[Vec3], position: Vec3) -> Option<Vec3> {
        match path.last() {
            None => Some(position),
            Some(last) if last.distance(position) >= self.min_spacing => Some(position),
            Some(_) => None,
        }
    }
}
