//! Recorded path geometry
//!
//! A finalized [`Path`] always has at least two points and is never mutated;
//! mirroring and translation return new paths.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::RecorderError;
use crate::x_bounds;

/// Horizontal orientation of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal scale (positive scale faces right)
    pub fn from_scale_x(scale_x: f32) -> Self {
        if scale_x > 0.0 { Facing::Right } else { Facing::Left }
    }

    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Facing::Left => "<-",
            Facing::Right => "->",
        }
    }
}

/// Where the agent is and which way it looks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentPose {
    pub position: Vec3,
    pub facing: Facing,
}

impl AgentPose {
    pub fn new(position: Vec3, facing: Facing) -> Self {
        Self { position, facing }
    }
}

/// A finalized polyline with at least two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Vec3>,
}

impl Path {
    /// Minimum number of points in a finalized path
    pub const MIN_POINTS: usize = 2;

    /// Finalize a point list, rejecting anything shorter than two points
    pub fn new(points: Vec<Vec3>) -> Result<Self, RecorderError> {
        if points.len() < Self::MIN_POINTS {
            return Err(RecorderError::InvalidPath(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Midpoint of the horizontal extent
    pub fn center_x(&self) -> f32 {
        // Finalized paths are never empty.
        let (lo, hi) = x_bounds(&self.points).unwrap_or((0.0, 0.0));
        (lo + hi) / 2.0
    }

    /// Mirror about the vertical line through this path's own center
    pub fn mirrored(&self) -> Path {
        self.mirrored_about(self.center_x())
    }

    /// Mirror every point about the vertical line `x = center_x`
    pub fn mirrored_about(&self, center_x: f32) -> Path {
        Path {
            points: self
                .points
                .iter()
                .map(|p| Vec3::new(center_x - (p.x - center_x), p.y, p.z))
                .collect(),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Path {
        Path {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }

    /// Leftmost point (first one in path order on ties)
    pub fn leftmost(&self) -> Vec3 {
        self.points
            .iter()
            .skip(1)
            .fold(self.points[0], |best, p| if p.x < best.x { *p } else { best })
    }

    /// Rightmost point (first one in path order on ties)
    pub fn rightmost(&self) -> Vec3 {
        self.points
            .iter()
            .skip(1)
            .fold(self.points[0], |best, p| if p.x > best.x { *p } else { best })
    }

    /// Total polyline length
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// True if every point matches `other` within `eps`
    pub fn approx_eq(&self, other: &Path, eps: f32) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.abs_diff_eq(*b, eps))
    }
}

/// Snapshot of the last successful recording and the facing it was made with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastRecordedPath {
    pub path: Path,
    pub facing: Facing,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(xs: &[f32]) -> Path {
        Path::new(xs.iter().map(|&x| Vec3::new(x, 0.0, 0.0)).collect()).unwrap()
    }

    #[test]
    fn test_rejects_short_paths() {
        assert_eq!(Path::new(vec![]), Err(RecorderError::InvalidPath(0)));
        assert_eq!(Path::new(vec![Vec3::ONE]), Err(RecorderError::InvalidPath(1)));
        assert!(Path::new(vec![Vec3::ZERO, Vec3::ONE]).is_ok());
    }

    #[test]
    fn test_facing_from_scale() {
        assert_eq!(Facing::from_scale_x(1.0), Facing::Right);
        assert_eq!(Facing::from_scale_x(-1.0), Facing::Left);
        // Zero scale is not "> 0"
        assert_eq!(Facing::from_scale_x(0.0), Facing::Left);
    }

    #[test]
    fn test_mirror_about_center() {
        let path = line(&[0.0, 1.0, 2.0]);
        assert!((path.center_x() - 1.0).abs() < 1e-6);
        let mirrored = path.mirrored();
        assert!(mirrored.approx_eq(&line(&[2.0, 1.0, 0.0]), 1e-6));
    }

    #[test]
    fn test_mirror_keeps_y_and_z() {
        let path = Path::new(vec![Vec3::new(0.0, 3.0, -1.0), Vec3::new(4.0, 5.0, 2.0)]).unwrap();
        let mirrored = path.mirrored();
        assert_eq!(mirrored.points()[0], Vec3::new(4.0, 3.0, -1.0));
        assert_eq!(mirrored.points()[1], Vec3::new(0.0, 5.0, 2.0));
    }

    #[test]
    fn test_extremes_prefer_first_on_ties() {
        let path = Path::new(vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 5.0, 0.0),
        ])
        .unwrap();
        assert_eq!(path.leftmost(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(path.rightmost(), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_length() {
        let path = Path::new(vec![
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 4.0, 0.0),
        ])
        .unwrap();
        assert!((path.length() - 7.0).abs() < 1e-6);
    }

    fn arb_path() -> impl Strategy<Value = Path> {
        prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 2..32).prop_map(|pts| {
            Path::new(pts.into_iter().map(|(x, y)| Vec3::new(x, y, 0.0)).collect()).unwrap()
        })
    }

    proptest! {
        #[test]
        fn mirror_is_involution(path in arb_path()) {
            let center = path.center_x();
            let twice = path.mirrored_about(center).mirrored_about(center);
            prop_assert!(twice.approx_eq(&path, 1e-3));
        }

        #[test]
        fn mirror_preserves_extent(path in arb_path()) {
            let mirrored = path.mirrored();
            let (lo, hi) = x_bounds(path.points()).unwrap();
            let (mlo, mhi) = x_bounds(mirrored.points()).unwrap();
            prop_assert!((lo - mlo).abs() < 1e-3);
            prop_assert!((hi - mhi).abs() < 1e-3);
        }
    }
}
