//! Ghost placement
//!
//! Re-anchors the last recorded path in front of the agent. When the agent
//! faces the other way than it did while recording, the path is mirrored
//! about its own horizontal midpoint first. The anchor is the path's leading
//! edge: its leftmost point when the agent faces right, its rightmost when it
//! faces left. That point lands `offset` units ahead of the agent.
//!
//! Everything here is a pure function of its inputs so it can run every tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::RecorderError;
use super::path::{AgentPose, Facing, LastRecordedPath, Path};

/// A placed copy of the last recorded path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostPlacement {
    pub path: Path,
    /// Facing the placement was computed for
    pub facing: Facing,
}

/// Place a raw point list in front of the agent
///
/// Fails with [`RecorderError::InvalidPath`] when given fewer than two points.
pub fn place(
    points: &[Vec3],
    recorded_facing: Facing,
    agent_position: Vec3,
    agent_facing: Facing,
    offset: f32,
) -> Result<Path, RecorderError> {
    let path = Path::new(points.to_vec())?;
    Ok(place_path(&path, recorded_facing, agent_position, agent_facing, offset))
}

/// Place a finalized path in front of the agent
pub fn place_path(
    path: &Path,
    recorded_facing: Facing,
    agent_position: Vec3,
    agent_facing: Facing,
    offset: f32,
) -> Path {
    let oriented = if recorded_facing != agent_facing {
        path.mirrored()
    } else {
        path.clone()
    };

    let reference = match agent_facing {
        Facing::Right => oriented.leftmost(),
        Facing::Left => oriented.rightmost(),
    };

    let ahead = Vec3::new(offset * agent_facing.sign(), 0.0, 0.0);
    oriented.translated(agent_position + ahead - reference)
}

/// Ghost for the current pose
pub fn compute(last: &LastRecordedPath, pose: AgentPose, offset: f32) -> GhostPlacement {
    GhostPlacement {
        path: place_path(&last.path, last.facing, pose.position, pose.facing, offset),
        facing: pose.facing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn xs(path: &Path) -> Vec<f32> {
        path.points().iter().map(|p| p.x).collect()
    }

    fn recorded_line() -> LastRecordedPath {
        LastRecordedPath {
            path: Path::new(vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ])
            .unwrap(),
            facing: Facing::Right,
        }
    }

    #[test]
    fn test_same_facing_anchors_leftmost() {
        let ghost = compute(
            &recorded_line(),
            AgentPose::new(Vec3::new(5.0, 0.0, 0.0), Facing::Right),
            2.0,
        );
        assert_eq!(xs(&ghost.path), vec![7.0, 8.0, 9.0]);
        assert_eq!(ghost.facing, Facing::Right);
    }

    #[test]
    fn test_opposite_facing_mirrors_and_anchors_rightmost() {
        let ghost = compute(
            &recorded_line(),
            AgentPose::new(Vec3::new(5.0, 0.0, 0.0), Facing::Left),
            2.0,
        );
        assert_eq!(xs(&ghost.path), vec![3.0, 2.0, 1.0]);
        assert_eq!(ghost.facing, Facing::Left);
    }

    #[test]
    fn test_left_recorded_left_placed() {
        // Recorded walking left: no mirror, anchor on the rightmost point
        let last = LastRecordedPath {
            path: Path::new(vec![Vec3::new(4.0, 1.0, 0.0), Vec3::new(3.0, 2.0, 0.0)]).unwrap(),
            facing: Facing::Left,
        };
        let ghost = compute(&last, AgentPose::new(Vec3::new(10.0, 0.0, 0.0), Facing::Left), 2.0);
        // Anchor (4, 1) lands on (8, 0)
        assert_eq!(ghost.path.points()[0], Vec3::new(8.0, 0.0, 0.0));
        assert_eq!(ghost.path.points()[1], Vec3::new(7.0, 1.0, 0.0));
    }

    #[test]
    fn test_vertical_offset_follows_agent() {
        let ghost = compute(
            &recorded_line(),
            AgentPose::new(Vec3::new(0.0, 3.0, 0.0), Facing::Right),
            2.0,
        );
        assert!(ghost.path.points().iter().all(|p| p.y == 3.0));
    }

    #[test]
    fn test_short_input_is_invalid_path() {
        assert_eq!(
            place(&[Vec3::ZERO], Facing::Right, Vec3::ZERO, Facing::Right, 2.0),
            Err(RecorderError::InvalidPath(1))
        );
        assert_eq!(
            place(&[], Facing::Right, Vec3::ZERO, Facing::Left, 2.0),
            Err(RecorderError::InvalidPath(0))
        );
    }

    #[test]
    fn test_source_path_untouched() {
        let last = recorded_line();
        let before = last.path.clone();
        let _ = compute(&last, AgentPose::new(Vec3::new(5.0, 0.0, 0.0), Facing::Left), 2.0);
        assert_eq!(last.path, before);
    }

    fn arb_points() -> impl Strategy<Value = Vec<Vec3>> {
        prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 2..24)
            .prop_map(|pts| pts.into_iter().map(|(x, y)| Vec3::new(x, y, 0.0)).collect())
    }

    fn arb_facing() -> impl Strategy<Value = Facing> {
        prop_oneof![Just(Facing::Left), Just(Facing::Right)]
    }

    proptest! {
        #[test]
        fn placement_is_deterministic(
            points in arb_points(),
            recorded in arb_facing(),
            facing in arb_facing(),
            (ax, ay) in (-50.0f32..50.0, -50.0f32..50.0),
            offset in 0.0f32..5.0,
        ) {
            let agent = Vec3::new(ax, ay, 0.0);
            let a = place(&points, recorded, agent, facing, offset).unwrap();
            let b = place(&points, recorded, agent, facing, offset).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn leading_edge_sits_offset_ahead(
            points in arb_points(),
            recorded in arb_facing(),
            facing in arb_facing(),
            (ax, ay) in (-50.0f32..50.0, -50.0f32..50.0),
            offset in 0.0f32..5.0,
        ) {
            let agent = Vec3::new(ax, ay, 0.0);
            let placed = place(&points, recorded, agent, facing, offset).unwrap();
            let edge = match facing {
                Facing::Right => placed.leftmost(),
                Facing::Left => placed.rightmost(),
            };
            prop_assert!((edge.x - (ax + offset * facing.sign())).abs() < 1e-3);
        }
    }
}
