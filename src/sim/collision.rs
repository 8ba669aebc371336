//! One-way edge colliders for committed platforms
//!
//! Each platform gets a thickened polyline that only collides from above, so
//! the agent can jump up through a ghost platform and land on top of it.

use glam::{Vec2, Vec3};
use std::collections::BTreeMap;

use super::ids::PlatformId;
use crate::consts::ONE_WAY_NORMAL_MIN_Y;
use crate::flatten;
use crate::platform::ColliderService;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the edge centerline (if hit)
    pub point: Vec2,
    /// Surface normal pointing toward the probe center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
    /// Platform that was hit
    pub platform: Option<PlatformId>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
            platform: None,
        }
    }
}

/// Check a circle against one thickened segment
///
/// Returns `None` when the circle does not reach the segment.
pub fn circle_segment_collision(
    center: Vec2,
    radius: f32,
    a: Vec2,
    b: Vec2,
    thickness: f32,
) -> Option<CollisionResult> {
    let seg = b - a;
    let len_sq = seg.length_squared();
    let t = if len_sq < 1e-8 {
        0.0
    } else {
        ((center - a).dot(seg) / len_sq).clamp(0.0, 1.0)
    };
    let closest = a + seg * t;
    let dist = center.distance(closest);
    let reach = radius + thickness;

    if dist >= reach {
        return None;
    }

    let mut normal = (center - closest).normalize_or_zero();
    if normal == Vec2::ZERO {
        // Center sits on the edge: use the segment's upward perpendicular
        let perp = Vec2::new(-seg.y, seg.x).normalize_or_zero();
        normal = if perp.y < 0.0 { -perp } else { perp };
        if normal == Vec2::ZERO {
            normal = Vec2::Y;
        }
    }

    Some(CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: reach - dist,
        platform: None,
    })
}

/// A platform's collision polyline
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCollider {
    pub points: Vec<Vec2>,
    pub thickness: f32,
}

impl EdgeCollider {
    /// Deepest contact from above, if any
    pub fn contact_from_above(&self, center: Vec2, radius: f32) -> Option<CollisionResult> {
        self.points
            .windows(2)
            .filter_map(|w| circle_segment_collision(center, radius, w[0], w[1], self.thickness))
            .filter(|c| c.normal.y >= ONE_WAY_NORMAL_MIN_Y)
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
    }
}

/// All platform colliders
#[derive(Debug, Clone, Default)]
pub struct EdgeColliderSet {
    colliders: BTreeMap<PlatformId, EdgeCollider>,
}

impl EdgeColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform: PlatformId) -> Option<&EdgeCollider> {
        self.colliders.get(&platform)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Solid ground under a round probe (e.g. the agent's feet)
    ///
    /// Only contacts whose normal points up count, so edges are passable
    /// from below and from the side.
    pub fn ground_contact(&self, position: Vec3, radius: f32) -> CollisionResult {
        let center = flatten(position);
        self.colliders
            .iter()
            .filter_map(|(id, collider)| {
                collider.contact_from_above(center, radius).map(|mut c| {
                    c.platform = Some(*id);
                    c
                })
            })
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration))
            .unwrap_or_else(CollisionResult::miss)
    }

    pub fn is_grounded(&self, position: Vec3, radius: f32) -> bool {
        self.ground_contact(position, radius).hit
    }
}

impl ColliderService for EdgeColliderSet {
    fn attach_one_sided_collider(&mut self, platform: PlatformId, points: &[Vec3], thickness: f32) {
        if self.colliders.contains_key(&platform) {
            log::warn!("{} already has a collider; keeping the original", platform);
            return;
        }
        self.colliders.insert(
            platform,
            EdgeCollider {
                points: points.iter().copied().map(flatten).collect(),
                thickness,
            },
        );
    }

    fn destroy_collider(&mut self, platform: PlatformId) {
        self.colliders.remove(&platform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_platform() -> EdgeColliderSet {
        let mut set = EdgeColliderSet::new();
        set.attach_one_sided_collider(
            PlatformId(1),
            &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 0.0)],
            0.15,
        );
        set
    }

    #[test]
    fn test_lands_from_above() {
        let set = flat_platform();
        let contact = set.ground_contact(Vec3::new(2.0, 0.5, 0.0), 0.4);
        assert!(contact.hit);
        assert_eq!(contact.platform, Some(PlatformId(1)));
        assert!(contact.normal.y > 0.99);
        assert!((contact.penetration - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_passable_from_below() {
        let set = flat_platform();
        assert!(!set.is_grounded(Vec3::new(2.0, -0.5, 0.0), 0.4));
    }

    #[test]
    fn test_side_contact_ignored() {
        let set = flat_platform();
        // Touching the right end cap from the side
        assert!(!set.is_grounded(Vec3::new(4.3, 0.0, 0.0), 0.4));
    }

    #[test]
    fn test_out_of_reach() {
        let set = flat_platform();
        assert!(!set.is_grounded(Vec3::new(2.0, 2.0, 0.0), 0.4));
    }

    #[test]
    fn test_attach_once_and_destroy() {
        let mut set = flat_platform();
        set.attach_one_sided_collider(
            PlatformId(1),
            &[Vec3::new(10.0, 0.0, 0.0), Vec3::new(11.0, 0.0, 0.0)],
            0.15,
        );
        assert_eq!(set.get(PlatformId(1)).unwrap().points[0], Vec2::ZERO);

        set.destroy_collider(PlatformId(1));
        assert!(set.is_empty());
        assert!(!set.is_grounded(Vec3::new(2.0, 0.5, 0.0), 0.4));
    }

    #[test]
    fn test_center_on_edge_uses_up_normal() {
        let hit = circle_segment_collision(
            Vec2::new(1.0, 0.0),
            0.2,
            Vec2::new(2.0, 0.0),
            Vec2::ZERO,
            0.1,
        )
        .unwrap();
        assert_eq!(hit.normal, Vec2::Y);
        assert!((hit.penetration - 0.3).abs() < 1e-6);
    }
}
