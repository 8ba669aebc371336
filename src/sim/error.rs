//! Recorder error taxonomy
//!
//! Every error here is recovered locally: `tick` logs it and skips the action.

use thiserror::Error;

/// Broad class of a [`RecorderError`], used to pick how loudly to report it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation not allowed in the current state (warned, no state change)
    InvalidOperation,
    /// Input too small to act on (silently dropped)
    DegenerateInput,
    /// Geometry handed to placement had fewer than two points
    InvalidPath,
    /// No agent pose source could be resolved
    MissingCollaborator,
    /// Settings failed to parse or validate
    Config,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecorderError {
    #[error("already recording")]
    AlreadyRecording,

    #[error("not recording")]
    NotRecording,

    #[error("cannot place platforms while recording; release the record button first")]
    PlacementWhileRecording,

    #[error("recording discarded: {points} point(s), need at least 2")]
    DegenerateRecording { points: usize },

    #[error("no recorded path to place")]
    NoRecordedPath,

    #[error("path needs at least 2 points, got {0}")]
    InvalidPath(usize),

    #[error("agent pose source unresolved and no host entity to fall back to")]
    MissingCollaborator,

    #[error("invalid settings: {0}")]
    Settings(String),
}

impl RecorderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecorderError::AlreadyRecording
            | RecorderError::NotRecording
            | RecorderError::PlacementWhileRecording => ErrorKind::InvalidOperation,
            RecorderError::DegenerateRecording { .. } | RecorderError::NoRecordedPath => {
                ErrorKind::DegenerateInput
            }
            RecorderError::InvalidPath(_) => ErrorKind::InvalidPath,
            RecorderError::MissingCollaborator => ErrorKind::MissingCollaborator,
            RecorderError::Settings(_) => ErrorKind::Config,
        }
    }

    /// Log at the level matching the error's kind
    pub fn report(&self) {
        match self.kind() {
            ErrorKind::InvalidOperation => log::warn!("{}", self),
            ErrorKind::DegenerateInput => log::debug!("{}", self),
            ErrorKind::InvalidPath | ErrorKind::MissingCollaborator | ErrorKind::Config => {
                log::error!("{}", self)
            }
        }
    }
}
