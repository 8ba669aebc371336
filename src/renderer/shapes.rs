//! Shape generation for recorder visuals

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::flatten;

/// Marker color for the newest archived path
pub const DEBUG_LATEST: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
/// Marker color for older archived paths
pub const DEBUG_OLDER: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Generate a constant-width strip along a polyline
///
/// Two triangles per segment. Fewer than two points yields nothing.
pub fn polyline_strip(points: &[Vec3], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let p1 = flatten(pair[0]);
        let p2 = flatten(pair[1]);

        // Zero-length segments would produce degenerate quads
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = Vec2::new(-dir.y, dir.x);

        let v1a = p1 + perp * half;
        let v1b = p1 - perp * half;
        let v2a = p2 + perp * half;
        let v2b = p2 - perp * half;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Debug overlay for archived paths: a dot per point plus a thin connecting line
///
/// The newest path is drawn green, older ones cyan.
pub fn debug_overlay<'a>(
    paths: impl ExactSizeIterator<Item = &'a [Vec3]>,
    marker_radius: f32,
) -> Vec<Vertex> {
    let count = paths.len();
    let mut vertices = Vec::new();

    for (i, points) in paths.enumerate() {
        let color = if i + 1 == count { DEBUG_LATEST } else { DEBUG_OLDER };
        for p in points {
            vertices.extend(circle(flatten(*p), marker_radius, color, 8));
        }
        vertices.extend(polyline_strip(points, marker_radius * 0.25, color));
    }

    vertices
}
