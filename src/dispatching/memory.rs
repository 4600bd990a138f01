//! Per-floor dispatch memory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{FloorIndex, LiftId};

/// Dispatch history passed to policies.
///
/// Tracks, per floor, how many calls it has issued and which lift served
/// it last. Only the round-robin policy reads it; the engine keeps it
/// current for every policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchMemory {
    /// Lift most recently dispatched to each floor.
    pub last_lift_for_floor: HashMap<FloorIndex, LiftId>,
    /// Calls issued per floor (activations, not retries).
    pub call_count: HashMap<FloorIndex, u64>,
}

impl DispatchMemory {
    /// Creates empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the last lift for a floor.
    pub fn with_last_lift(mut self, floor: FloorIndex, lift: LiftId) -> Self {
        self.last_lift_for_floor.insert(floor, lift);
        self
    }

    /// Sets the call count for a floor.
    pub fn with_call_count(mut self, floor: FloorIndex, count: u64) -> Self {
        self.call_count.insert(floor, count);
        self
    }

    /// Counts a new call from `floor`. Returns the updated count.
    pub fn record_call(&mut self, floor: FloorIndex) -> u64 {
        let count = self.call_count.entry(floor).or_insert(0);
        *count += 1;
        *count
    }

    /// Remembers that `lift` was sent to `floor`.
    pub fn record_dispatch(&mut self, floor: FloorIndex, lift: LiftId) {
        self.last_lift_for_floor.insert(floor, lift);
    }

    /// Calls issued by `floor` so far.
    pub fn call_count(&self, floor: FloorIndex) -> u64 {
        self.call_count.get(&floor).copied().unwrap_or(0)
    }

    /// Lift last sent to `floor`.
    pub fn last_lift(&self, floor: FloorIndex) -> Option<LiftId> {
        self.last_lift_for_floor.get(&floor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_call_increments() {
        let mut memory = DispatchMemory::new();
        assert_eq!(memory.call_count(4), 0);
        assert_eq!(memory.record_call(4), 1);
        assert_eq!(memory.record_call(4), 2);
        assert_eq!(memory.call_count(4), 2);
        assert_eq!(memory.call_count(1), 0);
    }

    #[test]
    fn test_record_dispatch_overwrites() {
        let mut memory = DispatchMemory::new();
        assert_eq!(memory.last_lift(0), None);
        memory.record_dispatch(0, 2);
        memory.record_dispatch(0, 1);
        assert_eq!(memory.last_lift(0), Some(1));
    }

    #[test]
    fn test_builder() {
        let memory = DispatchMemory::new()
            .with_last_lift(3, 0)
            .with_call_count(3, 5);
        assert_eq!(memory.last_lift(3), Some(0));
        assert_eq!(memory.call_count(3), 5);
    }
}
