//! Floor call model.
//!
//! A call is created when a floor's call control is activated while that
//! floor is callable, and lives until the journey serving it completes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Floor index into the configured floor positions.
pub type FloorIndex = usize;

/// A request for a lift to travel to a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Calling floor.
    pub floor_index: FloorIndex,
    /// Shaft position of the calling floor.
    pub target_position: f64,
    /// Virtual time of activation (ms).
    pub requested_at_ms: u64,
}

impl Call {
    /// Creates a call issued at t=0.
    pub fn new(floor_index: FloorIndex, target_position: f64) -> Self {
        Self {
            floor_index,
            target_position,
            requested_at_ms: 0,
        }
    }

    /// Sets the activation time.
    pub fn at(mut self, requested_at_ms: u64) -> Self {
        self.requested_at_ms = requested_at_ms;
        self
    }
}

/// State of a floor's call control.
///
/// Mirrors the call button of the presentation layer:
/// `Callable → Waiting | Busy → Arrived → Callable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FloorState {
    /// No outstanding call; activation accepted.
    #[default]
    Callable,
    /// A lift has been dispatched and is on its way.
    Waiting,
    /// No lift was available; the call sits in the wait queue.
    Busy,
    /// The serving lift is holding at this floor.
    Arrived,
}

impl FloorState {
    /// Whether this floor already has an outstanding call.
    pub fn is_pending(self) -> bool {
        self != Self::Callable
    }
}

impl fmt::Display for FloorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Callable => "call",
            Self::Waiting => "waiting",
            Self::Busy => "busy",
            Self::Arrived => "arrived",
        };
        f.write_str(label)
    }
}
