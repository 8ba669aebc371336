//! In-progress recording

use glam::Vec3;

use super::error::RecorderError;
use super::ids::PathId;
use super::path::Path;
use super::sampler::Sampler;

/// One active recording; dropping it discards the points
#[derive(Debug, Clone)]
pub struct RecordingSession {
    id: PathId,
    points: Vec<Vec3>,
}

impl RecordingSession {
    /// Start a session whose first point is the agent's current position
    pub fn begin(id: PathId, start: Vec3) -> Self {
        Self {
            id,
            points: vec![start],
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Feed one position; returns true if a point was appended
    pub fn record(&mut self, sampler: &Sampler, position: Vec3) -> bool {
        match sampler.sample(&self.points, position) {
            Some(p) => {
                self.points.push(p);
                true
            }
            None => false,
        }
    }

    /// Close the session, yielding a finalized path
    pub fn finish(self) -> Result<Path, RecorderError> {
        if self.points.len() < Path::MIN_POINTS {
            return Err(RecorderError::DegenerateRecording {
                points: self.points.len(),
            });
        }
        Path::new(self.points)
    }
}
