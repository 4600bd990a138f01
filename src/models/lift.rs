//! Lift model.
//!
//! A lift is a single dispatchable car. It is either free to take a call
//! (`Idle`), travelling to a call (`Moving`), or holding at the called floor
//! before becoming callable again (`Arrived`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lift identifier: the lift's index within the fleet.
pub type LiftId = usize;

/// Operational status of a lift.
///
/// Exactly one status holds at any time. Only `Idle` lifts may be selected
/// by a dispatch policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiftStatus {
    /// Free to serve a call.
    #[default]
    Idle,
    /// Travelling to an assigned floor.
    Moving,
    /// Holding at the assigned floor.
    Arrived,
}

impl LiftStatus {
    /// Whether a dispatch policy may select a lift in this status.
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// Lower-case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::Arrived => "arrived",
        }
    }
}

impl fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lift in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    /// Fleet index.
    pub id: LiftId,
    /// Last commanded position.
    ///
    /// Jumps to the call's target when a journey begins; the visual
    /// interpolation belongs to the display layer.
    pub position: f64,
    /// Current status.
    pub status: LiftStatus,
}

impl Lift {
    /// Creates an idle lift at `position`.
    pub fn new(id: LiftId, position: f64) -> Self {
        Self {
            id,
            position,
            status: LiftStatus::Idle,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: LiftStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the lift can be dispatched.
    pub fn is_idle(&self) -> bool {
        self.status.is_idle()
    }

    /// Absolute distance from the lift's position to `target`.
    pub fn distance_to(&self, target: f64) -> f64 {
        (target - self.position).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lift_is_idle() {
        let lift = Lift::new(3, 120.0);
        assert_eq!(lift.id, 3);
        assert!(lift.is_idle());
        assert_eq!(lift.status, LiftStatus::Idle);
    }

    #[test]
    fn test_distance_is_absolute() {
        let lift = Lift::new(0, 100.0);
        assert!((lift.distance_to(150.0) - 50.0).abs() < 1e-10);
        assert!((lift.distance_to(40.0) - 60.0).abs() < 1e-10);
        assert!(lift.distance_to(100.0).abs() < 1e-10);
    }

    #[test]
    fn test_only_idle_is_dispatchable() {
        assert!(LiftStatus::Idle.is_idle());
        assert!(!LiftStatus::Moving.is_idle());
        assert!(!LiftStatus::Arrived.is_idle());
        assert!(!Lift::new(0, 0.0).with_status(LiftStatus::Arrived).is_idle());
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&LiftStatus::Arrived).unwrap();
        assert_eq!(json, "\"arrived\"");
        let back: LiftStatus = serde_json::from_str("\"moving\"").unwrap();
        assert_eq!(back, LiftStatus::Moving);
    }
}
