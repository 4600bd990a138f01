//! Built-in dispatch policies.
//!
//! - **Nearest-idle**: minimum distance among idle lifts
//! - **Avoid-repeat round-robin**: rotating scan that skips the lift last
//!   sent to the calling floor
//!
//! Both scan the fleet in index order and never look at non-idle lifts.

use super::{DispatchMemory, DispatchPolicy};
use crate::models::{Call, LiftFleet, LiftId};

/// Nearest idle lift.
///
/// Among idle lifts, picks the one minimizing `|target - position|`.
/// Exact ties go to the lowest index (first found in scan order).
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestIdle;

impl DispatchPolicy for NearestIdle {
    fn name(&self) -> &'static str {
        "nearest-idle"
    }

    fn select(&self, call: &Call, fleet: &LiftFleet, _memory: &DispatchMemory) -> Option<LiftId> {
        let mut best: Option<(LiftId, f64)> = None;

        for lift in fleet.iter().filter(|l| l.is_idle()) {
            let distance = lift.distance_to(call.target_position);
            // Strict `<` keeps the earlier lift on ties
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((lift.id, distance));
            }
        }

        best.map(|(id, _)| id)
    }

    fn description(&self) -> &'static str {
        "Nearest idle lift, lowest index on ties"
    }
}

/// Round-robin that avoids repeating the floor's last lift.
///
/// The scan starts at `(call_count[floor] - 1) mod n` and wraps around the
/// fleet, returning the first idle lift that is not
/// `last_lift_for_floor[floor]`. The engine counts the call before
/// selecting, so a floor's first call starts at lift 0.
///
/// If the only idle lift is the one last sent to this floor, the policy
/// returns `None` and the call waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvoidRepeatRoundRobin;

impl DispatchPolicy for AvoidRepeatRoundRobin {
    fn name(&self) -> &'static str {
        "avoid-repeat-round-robin"
    }

    fn select(&self, call: &Call, fleet: &LiftFleet, memory: &DispatchMemory) -> Option<LiftId> {
        let n = fleet.len();
        if n == 0 {
            return None;
        }

        let floor = call.floor_index;
        let offset = (memory.call_count(floor).saturating_sub(1) % n as u64) as usize;
        let last = memory.last_lift(floor);

        (0..n)
            .map(|i| (offset + i) % n)
            .filter_map(|idx| fleet.get(idx))
            .find(|lift| lift.is_idle() && Some(lift.id) != last)
            .map(|lift| lift.id)
    }

    fn description(&self) -> &'static str {
        "Rotating scan skipping the floor's previous lift"
    }
}
