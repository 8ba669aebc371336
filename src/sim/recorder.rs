//! Path recorder: recording lifecycle, ghost placement and undo
//!
//! Collaborators are handed in at construction; the recorder never looks
//! them up. Operations return `Result` so callers can report rejections,
//! but none of them leave the state half-updated.

use super::archive::CommittedPlatform;
use super::error::RecorderError;
use super::ghost::{self, GhostPlacement};
use super::ids::{PathId, PlatformId, VisualId};
use super::path::{LastRecordedPath, Path};
use super::sampler::Sampler;
use super::session::RecordingSession;
use super::state::{LiveGhost, PendingPlacement, PlacementPhase, RecorderState};
use crate::platform::{AgentPoseSource, ColliderService, PolylineRenderer};
use crate::settings::RecorderSettings;

/// What a secondary press turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// First press: preview shown if there was a path to place
    Single { preview_shown: bool },
    /// Second press inside the window: undo, with how many platforms went away
    Double { removed: usize },
}

pub struct PathRecorder<P, R, C>
where
    P: AgentPoseSource,
    R: PolylineRenderer,
    C: ColliderService,
{
    settings: RecorderSettings,
    sampler: Sampler,
    pub(super) state: RecorderState,
    pose: P,
    renderer: R,
    colliders: C,
}

impl<P, R, C> PathRecorder<P, R, C>
where
    P: AgentPoseSource,
    R: PolylineRenderer,
    C: ColliderService,
{
    pub fn new(settings: RecorderSettings, pose: P, renderer: R, colliders: C) -> Self {
        log::info!(
            "PathRecorder ready (spacing {}, offset {}, double-press {}s, record on start: {})",
            settings.min_point_spacing,
            settings.ghost_offset_x,
            settings.double_press_window,
            settings.record_on_start
        );
        Self {
            sampler: Sampler::new(settings.min_point_spacing),
            settings,
            state: RecorderState::new(),
            pose,
            renderer,
            colliders,
        }
    }

    // === Accessors ===

    pub fn settings(&self) -> &RecorderSettings {
        &self.settings
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn colliders(&self) -> &C {
        &self.colliders
    }

    pub fn pose_source(&self) -> &P {
        &self.pose
    }

    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }

    pub fn phase(&self) -> PlacementPhase {
        self.state.phase()
    }

    pub fn last_recorded(&self) -> Option<&LastRecordedPath> {
        self.state.last_recorded.as_ref()
    }

    pub fn live_ghost(&self) -> Option<&LiveGhost> {
        self.state.live_ghost.as_ref()
    }

    pub fn pending(&self) -> Option<PendingPlacement> {
        self.state.pending
    }

    pub fn platforms(&self) -> impl Iterator<Item = &CommittedPlatform> {
        self.state.registry.iter()
    }

    /// Archived recordings, oldest first
    pub fn recorded_paths(&self) -> impl Iterator<Item = &Path> {
        self.state.archive.iter().map(|e| &e.path)
    }

    /// Ghost the agent would get right now, without showing it
    pub fn current_ghost(&self) -> Result<GhostPlacement, RecorderError> {
        let last = self
            .state
            .last_recorded
            .as_ref()
            .ok_or(RecorderError::NoRecordedPath)?;
        Ok(ghost::compute(
            last,
            self.pose.agent_pose(),
            self.settings.ghost_offset_x,
        ))
    }

    // === Recording ===

    /// Begin a new recording at the agent's current position
    ///
    /// A live ghost is promoted to a permanent platform first, and any
    /// preview is dropped: nothing can be placed while recording.
    pub fn start_recording(&mut self) -> Result<PathId, RecorderError> {
        if self.state.is_recording() {
            return Err(RecorderError::AlreadyRecording);
        }

        if let Some(promoted) = self.promote_live_ghost() {
            log::debug!("{} made permanent before recording", promoted);
        }
        self.hide_preview();
        self.state.press.armed = false;

        let id = self.state.next_path_id();
        let start = self.pose.agent_pose().position;
        let session = RecordingSession::begin(id, start);
        self.renderer.render_polyline(
            VisualId::Recording(id),
            session.points(),
            self.settings.line_width,
            self.settings.line_color,
        );
        self.state.session = Some(session);

        log::info!("Recording {} started at {}", id, start);
        Ok(id)
    }

    /// Finish the current recording
    ///
    /// Fewer than two points discards the recording. Otherwise it becomes the
    /// path future ghosts are placed from and is archived.
    pub fn stop_recording(&mut self) -> Result<PathId, RecorderError> {
        let session = self
            .state
            .session
            .take()
            .ok_or(RecorderError::NotRecording)?;
        let id = session.id();
        self.renderer.destroy_visual(VisualId::Recording(id));

        let path = session.finish()?;

        // Ghost state never straddles two source paths
        if let Some(promoted) = self.promote_live_ghost() {
            log::debug!("{} made permanent before replacing the source path", promoted);
        }

        let facing = self.pose.agent_pose().facing;
        log::info!(
            "Recording {} stopped: {} points over {:.2} units, facing {}",
            id,
            path.len(),
            path.length(),
            facing.arrow()
        );
        self.state.last_recorded = Some(LastRecordedPath {
            path: path.clone(),
            facing,
        });
        self.state.archive.push(id, path);
        Ok(id)
    }

    /// Sample the agent into the active recording
    pub(super) fn record_position(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let position = self.pose.agent_pose().position;
        if session.record(&self.sampler, position) {
            log::trace!("{}: point {} at {}", session.id(), session.points().len(), position);
            self.renderer.render_polyline(
                VisualId::Recording(session.id()),
                session.points(),
                self.settings.line_width,
                self.settings.line_color,
            );
        }
    }

    // === Placement ===

    /// Secondary button went down
    pub fn secondary_press(&mut self) -> Result<PressOutcome, RecorderError> {
        if self.state.is_recording() {
            return Err(RecorderError::PlacementWhileRecording);
        }

        let now = self.state.time;
        if self
            .state
            .press
            .is_double(now, self.settings.double_press_window)
        {
            let removed = self.undo_placements();
            return Ok(PressOutcome::Double { removed });
        }

        self.state.press.armed = true;
        self.state.press.last_press_time = Some(now);

        if self.state.preview_visible {
            return Ok(PressOutcome::Single {
                preview_shown: true,
            });
        }
        match self.show_preview() {
            Ok(()) => Ok(PressOutcome::Single {
                preview_shown: true,
            }),
            Err(e) => {
                e.report();
                Ok(PressOutcome::Single {
                    preview_shown: false,
                })
            }
        }
    }

    /// Secondary button went up; commits the preview if one is showing
    ///
    /// Returns the id of the new live ghost.
    pub fn secondary_release(&mut self) -> Option<PlatformId> {
        if self.state.is_recording() || !self.state.press.armed {
            return None;
        }

        let now = self.state.time;
        let committed = if self.state.preview_visible {
            self.commit_placement(now)
        } else {
            None
        };

        self.state.press.armed = false;
        // A second press right after this release is a double-press
        self.state.press.last_press_time = Some(now);
        committed
    }

    fn show_preview(&mut self) -> Result<(), RecorderError> {
        let placement = self.current_ghost()?;
        self.renderer.render_polyline(
            VisualId::Preview,
            placement.path.points(),
            self.settings.ghost_line_width,
            self.settings.preview_color,
        );
        self.state.preview_visible = true;
        log::debug!("Preview shown: {} points", placement.path.len());
        Ok(())
    }

    fn hide_preview(&mut self) {
        if self.state.preview_visible {
            self.renderer.hide_polyline(VisualId::Preview);
            self.state.preview_visible = false;
        }
    }

    /// Replace the preview with a fresh live ghost
    fn commit_placement(&mut self, now: f64) -> Option<PlatformId> {
        self.hide_preview();
        self.promote_live_ghost();

        let last = self.state.last_recorded.as_ref()?;
        let placement = ghost::compute(last, self.pose.agent_pose(), self.settings.ghost_offset_x);
        let id = self.state.next_platform_id();
        self.renderer.render_polyline(
            VisualId::Platform(id),
            placement.path.points(),
            self.settings.ghost_line_width,
            self.settings.ghost_color,
        );
        log::debug!(
            "{} placed: {} points, facing {}",
            id,
            placement.path.len(),
            placement.facing.arrow()
        );

        self.state.live_ghost = Some(LiveGhost { id, placement });
        self.state.pending = Some(PendingPlacement {
            platform: id,
            created_at: now,
        });
        Some(id)
    }

    /// Move the live ghost into the registry and give it a collider
    fn promote_live_ghost(&mut self) -> Option<PlatformId> {
        let LiveGhost { id, placement } = self.state.live_ghost.take()?;

        // Promotion confirms the pending placement
        if self.state.pending.is_some_and(|p| p.platform == id) {
            self.state.pending = None;
        }

        let collidable = self.settings.add_physics_collider;
        if collidable {
            self.colliders.attach_one_sided_collider(
                id,
                placement.path.points(),
                self.settings.collider_thickness,
            );
        }
        self.state
            .registry
            .push(CommittedPlatform::from_ghost(id, placement, collidable));
        log::debug!(
            "{} is now permanent platform #{}",
            id,
            self.state.registry.len()
        );
        Some(id)
    }

    /// Double-press: drop the pending ghost, then the latest permanent platform
    ///
    /// Two independent pops; at most two platforms go away.
    fn undo_placements(&mut self) -> usize {
        self.hide_preview();
        let mut removed = 0;

        if let Some(pending) = self.state.pending.take() {
            let is_live = self
                .state
                .live_ghost
                .as_ref()
                .is_some_and(|g| g.id == pending.platform);
            if is_live {
                self.state.live_ghost = None;
                self.renderer
                    .destroy_visual(VisualId::Platform(pending.platform));
                log::info!(
                    "Undo: removed pending {} (placed at {:.2}s)",
                    pending.platform,
                    pending.created_at
                );
                removed += 1;
            } else {
                log::debug!("Pending {} already gone", pending.platform);
            }
        }

        if let Some(platform) = self.state.registry.pop() {
            log::info!("Undo: removed permanent {}", platform.id);
            self.destroy_platform(&platform);
            removed += 1;
        }

        self.state.press.reset();
        removed
    }

    fn destroy_platform(&mut self, platform: &CommittedPlatform) {
        self.renderer.destroy_visual(VisualId::Platform(platform.id));
        if platform.collidable {
            self.colliders.destroy_collider(platform.id);
        }
    }

    /// Re-place the preview for the agent's current pose
    pub(super) fn refresh_preview(&mut self) {
        if !self.state.preview_visible {
            return;
        }
        let Some(last) = self.state.last_recorded.as_ref() else {
            return;
        };
        let placement = ghost::compute(last, self.pose.agent_pose(), self.settings.ghost_offset_x);
        self.renderer.render_polyline(
            VisualId::Preview,
            placement.path.points(),
            self.settings.ghost_line_width,
            self.settings.preview_color,
        );
    }

    /// Re-place the live ghost for the agent's current pose
    pub(super) fn refresh_live_ghost(&mut self) {
        let (Some(last), Some(live)) = (
            self.state.last_recorded.as_ref(),
            self.state.live_ghost.as_mut(),
        ) else {
            return;
        };
        live.placement = ghost::compute(last, self.pose.agent_pose(), self.settings.ghost_offset_x);
        self.renderer.render_polyline(
            VisualId::Platform(live.id),
            live.placement.path.points(),
            self.settings.ghost_line_width,
            self.settings.ghost_color,
        );
    }

    // === Bulk undo ===

    /// Remove the most recent archived recording
    pub fn undo_last_line(&mut self) -> Option<PathId> {
        let entry = self.state.archive.pop()?;
        self.renderer.destroy_visual(VisualId::Recording(entry.id));
        log::info!("Removed recording {}", entry.id);
        Some(entry.id)
    }

    /// Remove every archived recording; returns how many were removed
    pub fn clear_all_lines(&mut self) -> usize {
        let entries = self.state.archive.drain();
        for entry in &entries {
            self.renderer.destroy_visual(VisualId::Recording(entry.id));
        }
        log::info!("Cleared {} recordings", entries.len());
        entries.len()
    }

    /// Remove the live ghost and every committed platform
    pub fn clear_all_platforms(&mut self) -> usize {
        let mut removed = 0;
        self.state.pending = None;
        if let Some(live) = self.state.live_ghost.take() {
            self.renderer.destroy_visual(VisualId::Platform(live.id));
            removed += 1;
        }
        for platform in self.state.registry.drain() {
            self.destroy_platform(&platform);
            removed += 1;
        }
        log::info!("Cleared {} platforms", removed);
        removed
    }

    /// Release every visual and collider the recorder still owns
    pub fn teardown(&mut self) {
        self.state.preview_visible = false;
        self.renderer.destroy_visual(VisualId::Preview);
        if let Some(session) = self.state.session.take() {
            self.renderer.destroy_visual(VisualId::Recording(session.id()));
        }
        self.state.press.reset();
        if self.state.platform_count() > 0 {
            self.clear_all_platforms();
        }
    }
}

impl<P, R, C> Drop for PathRecorder<P, R, C>
where
    P: AgentPoseSource,
    R: PolylineRenderer,
    C: ColliderService,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
