//! Edge-triggered button state
//!
//! Raw "is the button down" samples are turned into press/release edges once
//! per tick. A press and release between two ticks collapse into whatever the
//! held state is at the next sample; there is no sub-tick fidelity.

/// Edges observed for one button during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEdges {
    /// Went down this tick
    pub pressed: bool,
    /// Went up this tick
    pub released: bool,
    /// Down at the end of this tick
    pub held: bool,
}

/// Tracks one button across ticks
#[derive(Debug, Clone, Default)]
pub struct ButtonTracker {
    down: bool,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the raw state and return this tick's edges
    pub fn sample(&mut self, down: bool) -> ButtonEdges {
        let edges = ButtonEdges {
            pressed: down && !self.down,
            released: !down && self.down,
            held: down,
        };
        self.down = down;
        edges
    }
}
