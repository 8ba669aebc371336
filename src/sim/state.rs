//! Recorder state
//!
//! Everything the recorder mutates lives in [`RecorderState`]. Collaborators
//! never see it; they only receive geometry.

use serde::{Deserialize, Serialize};

use super::archive::{PathArchive, PlatformRegistry};
use super::ghost::GhostPlacement;
use super::ids::{PathId, PlatformId};
use super::path::LastRecordedPath;
use super::session::RecordingSession;

/// Where the placement state machine stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPhase {
    /// Nothing shown
    NoGhost,
    /// Secondary button held, preview follows the agent (no collider)
    PreviewVisible,
    /// A live ghost exists and follows the agent until promoted
    GhostCommitted,
}

/// The single uncommitted ghost
#[derive(Debug, Clone, PartialEq)]
pub struct LiveGhost {
    pub id: PlatformId,
    pub placement: GhostPlacement,
}

/// Marks the ghost created by the most recent commit
///
/// Only consulted by the double-press gesture. Held as a handle, so a ghost
/// that is already gone simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPlacement {
    pub platform: PlatformId,
    /// Recorder clock (seconds) when the ghost was created
    pub created_at: f64,
}

/// Secondary-button timing used to tell single from double presses
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PressTiming {
    /// Time of the last single press or release
    pub last_press_time: Option<f64>,
    /// A single press is waiting for its release
    pub armed: bool,
}

impl PressTiming {
    /// True if a press at `now` completes a double-press
    ///
    /// The lower bound is strict: a press at the same instant as the previous
    /// one never counts.
    pub fn is_double(&self, now: f64, window: f32) -> bool {
        match self.last_press_time {
            Some(last) => {
                let dt = now - last;
                dt > 0.0 && dt <= f64::from(window)
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete recorder state
#[derive(Debug, Clone)]
pub struct RecorderState {
    /// Recorder clock in seconds
    ///
    /// `f64` so a tick still advances it after days of uptime.
    pub time: f64,
    /// Tick counter
    pub time_ticks: u64,
    /// Active recording, if any
    pub session: Option<RecordingSession>,
    pub last_recorded: Option<LastRecordedPath>,
    pub archive: PathArchive,
    pub registry: PlatformRegistry,
    pub live_ghost: Option<LiveGhost>,
    pub pending: Option<PendingPlacement>,
    pub preview_visible: bool,
    pub press: PressTiming,
    /// `record_on_start` has been honoured
    pub started: bool,
    next_path_id: u32,
    next_platform_id: u32,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecorderState {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            time_ticks: 0,
            session: None,
            last_recorded: None,
            archive: PathArchive::new(),
            registry: PlatformRegistry::new(),
            live_ghost: None,
            pending: None,
            preview_visible: false,
            press: PressTiming::default(),
            started: false,
            next_path_id: 1,
            next_platform_id: 1,
        }
    }

    /// Allocate a path id (never reused)
    pub fn next_path_id(&mut self) -> PathId {
        let id = PathId(self.next_path_id);
        self.next_path_id += 1;
        id
    }

    /// Allocate a platform id (never reused)
    pub fn next_platform_id(&mut self) -> PlatformId {
        let id = PlatformId(self.next_platform_id);
        self.next_platform_id += 1;
        id
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> PlacementPhase {
        if self.preview_visible {
            PlacementPhase::PreviewVisible
        } else if self.live_ghost.is_some() {
            PlacementPhase::GhostCommitted
        } else {
            PlacementPhase::NoGhost
        }
    }

    /// Live ghost plus committed platforms
    pub fn platform_count(&self) -> usize {
        self.registry.len() + usize::from(self.live_ghost.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_never_reused() {
        let mut state = RecorderState::new();
        let a = state.next_platform_id();
        let b = state.next_platform_id();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(state.next_path_id(), PathId(1));
        assert_eq!(state.next_path_id(), PathId(2));
    }

    #[test]
    fn test_double_press_window() {
        let mut timing = PressTiming::default();
        assert!(!timing.is_double(1.0, 0.3));

        timing.last_press_time = Some(1.0);
        assert!(timing.is_double(1.2, 0.3));
        assert!(timing.is_double(1.25, 0.3));
        assert!(!timing.is_double(1.5, 0.3));
        // Same instant is never a double-press
        assert!(!timing.is_double(1.0, 0.3));

        timing.reset();
        assert!(!timing.is_double(1.1, 0.3));
    }

    #[test]
    fn test_double_press_window_late_clock() {
        let timing = PressTiming {
            last_press_time: Some(600_000.0),
            armed: false,
        };
        assert!(timing.is_double(600_000.0 + 1.0 / 60.0, 0.3));
        assert!(!timing.is_double(600_000.5, 0.3));
    }

    #[test]
    fn test_initial_phase() {
        let state = RecorderState::new();
        assert_eq!(state.phase(), PlacementPhase::NoGhost);
        assert!(!state.is_recording());
        assert_eq!(state.platform_count(), 0);
    }
}
