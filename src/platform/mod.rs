//! Platform abstraction layer
//!
//! The recorder core talks to the host engine only through these traits:
//! - Agent pose polling
//! - Polyline drawing
//! - One-sided collider authoring
//! - Input edges (see [`input`])

pub mod input;

pub use input::{ButtonEdges, ButtonTracker};

use glam::Vec3;
use std::cell::Cell;
use std::rc::Rc;

use crate::sim::{AgentPose, PlatformId, RecorderError, VisualId};

/// Source of the tracked agent's pose, polled once per tick
pub trait AgentPoseSource {
    fn agent_pose(&self) -> AgentPose;
}

/// Draws polylines as coloured strips
///
/// Calls are fire-and-forget; destroying an unknown id is a no-op.
pub trait PolylineRenderer {
    fn render_polyline(&mut self, id: VisualId, points: &[Vec3], width: f32, color: [f32; 4]);
    fn hide_polyline(&mut self, id: VisualId);
    fn destroy_visual(&mut self, id: VisualId);
}

/// Builds and tears down platform collision geometry
pub trait ColliderService {
    /// Author a one-sided edge for `platform`; called once per platform
    fn attach_one_sided_collider(&mut self, platform: PlatformId, points: &[Vec3], thickness: f32);
    fn destroy_collider(&mut self, platform: PlatformId);
}

impl<T: AgentPoseSource + ?Sized> AgentPoseSource for &T {
    fn agent_pose(&self) -> AgentPose {
        (**self).agent_pose()
    }
}

impl<T: AgentPoseSource + ?Sized> AgentPoseSource for Box<T> {
    fn agent_pose(&self) -> AgentPose {
        (**self).agent_pose()
    }
}

impl AgentPoseSource for AgentPose {
    fn agent_pose(&self) -> AgentPose {
        *self
    }
}

/// Pose cell shared between the host (writer) and the recorder (reader)
#[derive(Debug, Clone, Default)]
pub struct SharedPose(Rc<Cell<AgentPose>>);

impl SharedPose {
    pub fn new(pose: AgentPose) -> Self {
        Self(Rc::new(Cell::new(pose)))
    }

    pub fn set(&self, pose: AgentPose) {
        self.0.set(pose);
    }

    pub fn set_position(&self, position: Vec3) {
        let mut pose = self.0.get();
        pose.position = position;
        self.0.set(pose);
    }

    pub fn get(&self) -> AgentPose {
        self.0.get()
    }
}

impl AgentPoseSource for SharedPose {
    fn agent_pose(&self) -> AgentPose {
        self.0.get()
    }
}

/// Pick the pose source for the recorder
///
/// Prefers the configured agent; falls back to the hosting entity with a
/// warning. With neither available this is a configuration fault, reported
/// once here and never retried.
pub fn resolve_pose_source<P: AgentPoseSource>(
    configured: Option<P>,
    host: Option<P>,
) -> Result<P, RecorderError> {
    match (configured, host) {
        (Some(agent), _) => {
            log::info!("Pose source: configured agent");
            Ok(agent)
        }
        (None, Some(host)) => {
            log::warn!("No agent configured, tracking the hosting entity instead");
            Ok(host)
        }
        (None, None) => {
            let err = RecorderError::MissingCollaborator;
            err.report();
            Err(err)
        }
    }
}
