//! Deterministic recorder core
//!
//! All recording and placement logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Stable iteration order (insertion order, ids never reused)
//! - No rendering, physics or input discovery; collaborators are injected

pub mod archive;
pub mod collision;
pub mod error;
pub mod ghost;
pub mod ids;
pub mod path;
pub mod recorder;
pub mod sampler;
pub mod session;
pub mod state;
pub mod tick;

pub use archive::{ArchivedPath, CommittedPlatform, PathArchive, PlatformRegistry};
pub use collision::{CollisionResult, EdgeCollider, EdgeColliderSet, circle_segment_collision};
pub use error::{ErrorKind, RecorderError};
pub use ghost::{GhostPlacement, compute, place, place_path};
pub use ids::{PathId, PlatformId, VisualId};
pub use path::{AgentPose, Facing, LastRecordedPath, Path};
pub use recorder::{PathRecorder, PressOutcome};
pub use sampler::Sampler;
pub use session::RecordingSession;
pub use state::{LiveGhost, PendingPlacement, PlacementPhase, PressTiming, RecorderState};
pub use tick::TickInput;
