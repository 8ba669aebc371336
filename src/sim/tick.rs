//! Per-tick update
//!
//! One pass per simulation tick, in a fixed order: input edges first, then
//! position sampling, then preview and ghost re-placement. A commit made this
//! tick is therefore reflected in this tick's geometry.

use super::recorder::{PathRecorder, PressOutcome};
use crate::platform::{AgentPoseSource, ButtonEdges, ColliderService, PolylineRenderer};

/// Input edges for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Record button went down (start recording)
    pub primary_pressed: bool,
    /// Record button went up (stop recording)
    pub primary_released: bool,
    /// Place button went down
    pub secondary_pressed: bool,
    /// Place button went up
    pub secondary_released: bool,
    /// Place button is down; the preview only follows the agent while held
    pub secondary_held: bool,
}

impl TickInput {
    pub fn from_buttons(primary: ButtonEdges, secondary: ButtonEdges) -> Self {
        Self {
            primary_pressed: primary.pressed,
            primary_released: primary.released,
            secondary_pressed: secondary.pressed,
            secondary_released: secondary.released,
            secondary_held: secondary.held,
        }
    }
}

impl<P, R, C> PathRecorder<P, R, C>
where
    P: AgentPoseSource,
    R: PolylineRenderer,
    C: ColliderService,
{
    /// Advance the recorder by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.state.time += f64::from(dt);
        self.state.time_ticks += 1;

        if !self.state.started {
            self.state.started = true;
            if self.settings().record_on_start {
                if let Err(e) = self.start_recording() {
                    e.report();
                }
            }
        }

        self.handle_input(input);

        if self.state.is_recording() {
            self.record_position();
        }

        if input.secondary_held {
            self.refresh_preview();
        }
        self.refresh_live_ghost();
    }

    fn handle_input(&mut self, input: &TickInput) {
        if input.primary_pressed {
            if let Err(e) = self.start_recording() {
                e.report();
            }
        }
        if input.primary_released && self.state.is_recording() {
            if let Err(e) = self.stop_recording() {
                e.report();
            }
        }

        if input.secondary_pressed {
            match self.secondary_press() {
                // The undo gesture consumes the rest of this tick's placement input
                Ok(PressOutcome::Double { .. }) => return,
                Ok(PressOutcome::Single { .. }) => {}
                Err(e) => {
                    e.report();
                    return;
                }
            }
        }

        if input.secondary_released {
            self.secondary_release();
        }
    }
}
