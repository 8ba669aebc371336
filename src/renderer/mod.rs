//! CPU-side strip renderer
//!
//! Keeps one triangle strip per visual, rebuilt whenever the recorder hands
//! over new points. The host uploads [`StripRenderer::visible_vertices`] each
//! frame however it likes.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec3;
use std::collections::BTreeMap;

use crate::platform::PolylineRenderer;
use crate::sim::VisualId;

/// A built strip and whether it is currently shown
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    pub points: Vec<Vec3>,
    pub width: f32,
    pub color: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub visible: bool,
}

/// Retained strips keyed by visual id
#[derive(Debug, Clone, Default)]
pub struct StripRenderer {
    strips: BTreeMap<VisualId, Strip>,
}

impl StripRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VisualId) -> Option<&Strip> {
        self.strips.get(&id)
    }

    pub fn is_visible(&self, id: VisualId) -> bool {
        self.strips.get(&id).is_some_and(|s| s.visible)
    }

    /// Number of strips currently shown
    pub fn visible_count(&self) -> usize {
        self.strips.values().filter(|s| s.visible).count()
    }

    /// Number of strips held, shown or not
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    /// All visible strips in id order, ready for upload
    pub fn visible_vertices(&self) -> Vec<Vertex> {
        self.strips
            .values()
            .filter(|s| s.visible)
            .flat_map(|s| s.vertices.iter().copied())
            .collect()
    }
}

impl PolylineRenderer for StripRenderer {
    fn render_polyline(&mut self, id: VisualId, points: &[Vec3], width: f32, color: [f32; 4]) {
        let strip = Strip {
            points: points.to_vec(),
            width,
            color,
            vertices: shapes::polyline_strip(points, width, color),
            visible: true,
        };
        self.strips.insert(id, strip);
    }

    fn hide_polyline(&mut self, id: VisualId) {
        if let Some(strip) = self.strips.get_mut(&id) {
            strip.visible = false;
        }
    }

    fn destroy_visual(&mut self, id: VisualId) {
        self.strips.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlatformId;

    const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

    #[test]
    fn test_render_hide_destroy() {
        let mut renderer = StripRenderer::new();
        let id = VisualId::Platform(PlatformId(1));
        renderer.render_polyline(id, &[Vec3::ZERO, Vec3::X], 0.3, YELLOW);
        assert!(renderer.is_visible(id));
        assert_eq!(renderer.visible_vertices().len(), 6);

        renderer.hide_polyline(id);
        assert!(!renderer.is_visible(id));
        assert!(renderer.visible_vertices().is_empty());
        assert_eq!(renderer.len(), 1);

        renderer.destroy_visual(id);
        assert!(renderer.is_empty());
        // Unknown ids are ignored
        renderer.destroy_visual(id);
        renderer.hide_polyline(VisualId::Preview);
    }

    #[test]
    fn test_rerender_replaces_and_shows() {
        let mut renderer = StripRenderer::new();
        renderer.render_polyline(VisualId::Preview, &[Vec3::ZERO, Vec3::X], 0.3, YELLOW);
        renderer.hide_polyline(VisualId::Preview);
        renderer.render_polyline(
            VisualId::Preview,
            &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            0.3,
            YELLOW,
        );
        let strip = renderer.get(VisualId::Preview).unwrap();
        assert!(strip.visible);
        assert_eq!(strip.points.len(), 3);
        assert_eq!(strip.vertices.len(), 12);
    }
}
