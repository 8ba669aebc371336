//! Handles for recorded paths, platforms and their visuals
//!
//! Ids are allocated from a monotonically increasing counter and never reused,
//! so a handle to a removed entry resolves to nothing instead of a newer one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a recorded path (in progress or archived)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathId(pub u32);

/// Identifies a ghost platform, live or committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// A strip the render service draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisualId {
    /// Line drawn while a path is being recorded
    Recording(PathId),
    /// Placement preview shown while the secondary button is held
    Preview,
    /// A live or committed ghost platform
    Platform(PlatformId),
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path_{}", self.0)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Platform_{}", self.0)
    }
}

impl fmt::Display for VisualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualId::Recording(id) => write!(f, "Recording({})", id),
            VisualId::Preview => f.write_str("Preview"),
            VisualId::Platform(id) => write!(f, "{}", id),
        }
    }
}
