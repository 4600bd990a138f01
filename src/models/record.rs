//! Completed journey record.
//!
//! One record per finished journey, kept for KPI evaluation.

use serde::{Deserialize, Serialize};

use super::{FloorIndex, LiftId};

/// Timeline of one completed journey.
///
/// Invariant: `requested_at_ms <= dispatched_at_ms <= arrived_at_ms <= reset_at_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRecord {
    /// Serving lift.
    pub lift: LiftId,
    /// Served floor.
    pub floor: FloorIndex,
    /// Call activation time (ms).
    pub requested_at_ms: u64,
    /// Lift assignment time (ms).
    pub dispatched_at_ms: u64,
    /// Arrival at the floor (ms).
    pub arrived_at_ms: u64,
    /// Lift back to idle (ms).
    pub reset_at_ms: u64,
}

impl JourneyRecord {
    /// Time the call spent waiting for a lift (ms).
    pub fn wait_ms(&self) -> u64 {
        self.dispatched_at_ms.saturating_sub(self.requested_at_ms)
    }

    /// Time from activation to arrival (ms).
    pub fn response_ms(&self) -> u64 {
        self.arrived_at_ms.saturating_sub(self.requested_at_ms)
    }

    /// Time the lift was occupied by this journey (ms).
    pub fn busy_ms(&self) -> u64 {
        self.reset_at_ms.saturating_sub(self.dispatched_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        let r = JourneyRecord {
            lift: 0,
            floor: 2,
            requested_at_ms: 1_000,
            dispatched_at_ms: 3_000,
            arrived_at_ms: 4_500,
            reset_at_ms: 6_000,
        };
        assert_eq!(r.wait_ms(), 2_000);
        assert_eq!(r.response_ms(), 3_500);
        assert_eq!(r.busy_ms(), 3_000);
    }
}
