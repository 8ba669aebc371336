//! Undo stacks: finished recordings and committed platforms
//!
//! Both are append-ordered. "Most recent" always means the tail; entries are
//! never reordered.

use serde::{Deserialize, Serialize};

use super::ghost::GhostPlacement;
use super::ids::{PathId, PlatformId};
use super::path::{Facing, Path};

/// A finished recording kept as undo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedPath {
    pub id: PathId,
    pub path: Path,
}

/// Finished recordings, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathArchive {
    entries: Vec<ArchivedPath>,
}

impl PathArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: PathId, path: Path) {
        self.entries.push(ArchivedPath { id, path });
    }

    pub fn pop(&mut self) -> Option<ArchivedPath> {
        self.entries.pop()
    }

    /// Remove everything, oldest first
    pub fn drain(&mut self) -> Vec<ArchivedPath> {
        std::mem::take(&mut self.entries)
    }

    pub fn last(&self) -> Option<&ArchivedPath> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchivedPath> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of points over all archived paths
    pub fn total_points(&self) -> usize {
        self.entries.iter().map(|e| e.path.len()).sum()
    }
}

/// A ghost promoted to a permanent, collidable platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedPlatform {
    pub id: PlatformId,
    pub path: Path,
    pub facing: Facing,
    /// Whether a collider was authored at promotion
    pub collidable: bool,
}

impl CommittedPlatform {
    pub fn from_ghost(id: PlatformId, ghost: GhostPlacement, collidable: bool) -> Self {
        Self {
            id,
            path: ghost.path,
            facing: ghost.facing,
            collidable,
        }
    }
}

/// Committed platforms, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformRegistry {
    platforms: Vec<CommittedPlatform>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, platform: CommittedPlatform) {
        self.platforms.push(platform);
    }

    /// Remove the most recently committed platform
    pub fn pop(&mut self) -> Option<CommittedPlatform> {
        self.platforms.pop()
    }

    /// Remove everything, oldest first
    pub fn drain(&mut self) -> Vec<CommittedPlatform> {
        std::mem::take(&mut self.platforms)
    }

    pub fn last(&self) -> Option<&CommittedPlatform> {
        self.platforms.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommittedPlatform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn path(x: f32) -> Path {
        Path::new(vec![Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 0.0, 0.0)]).unwrap()
    }

    fn platform(id: u32) -> CommittedPlatform {
        CommittedPlatform {
            id: PlatformId(id),
            path: path(id as f32),
            facing: Facing::Right,
            collidable: true,
        }
    }

    #[test]
    fn test_archive_is_lifo() {
        let mut archive = PathArchive::new();
        archive.push(PathId(1), path(0.0));
        archive.push(PathId(2), path(5.0));
        assert_eq!(archive.total_points(), 4);
        assert_eq!(archive.pop().map(|e| e.id), Some(PathId(2)));
        assert_eq!(archive.pop().map(|e| e.id), Some(PathId(1)));
        assert!(archive.pop().is_none());
    }

    #[test]
    fn test_registry_order_and_pop() {
        let mut registry = PlatformRegistry::new();
        for id in 1..=3 {
            registry.push(platform(id));
        }
        let ids: Vec<_> = registry.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(registry.pop().map(|p| p.id), Some(PlatformId(3)));
        assert_eq!(registry.last().map(|p| p.id), Some(PlatformId(2)));
    }

    #[test]
    fn test_drain() {
        let mut registry = PlatformRegistry::new();
        registry.push(platform(1));
        registry.push(platform(2));
        let drained = registry.drain();
        assert_eq!(drained.len(), 2);
        assert!(registry.is_empty());
    }
}
