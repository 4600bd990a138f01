//! Lift selection policies and dispatch bookkeeping.
//!
//! A [`DispatchPolicy`] looks at a call, the fleet and the per-floor
//! [`DispatchMemory`] and names one idle lift, or none. Policies are
//! read-only: committing the choice is the engine's job.
//!
//! # Usage
//!
//! ```
//! use u_lift::dispatching::{policies, DispatchMemory, DispatchPolicy};
//! use u_lift::models::{Call, LiftFleet};
//!
//! let fleet = LiftFleet::at_positions(&[0.0, 100.0, 200.0]);
//! let call = Call::new(1, 150.0);
//!
//! let chosen = policies::NearestIdle.select(&call, &fleet, &DispatchMemory::new());
//! assert_eq!(chosen, Some(1));
//! ```

mod memory;
pub mod policies;
mod queue;

pub use memory::DispatchMemory;
pub use queue::{WaitQueue, WaitingEntry};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{Call, LiftFleet, LiftId};

/// Chooses which idle lift serves a call.
///
/// # Contract
/// - Must only return the id of a lift whose status is `Idle`.
/// - Must not mutate anything; the same inputs yield the same answer.
/// - `None` means "no lift available now"; the engine queues the call.
pub trait DispatchPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "nearest-idle").
    fn name(&self) -> &'static str;

    /// Selects a lift for `call`, or `None` if none qualifies.
    fn select(&self, call: &Call, fleet: &LiftFleet, memory: &DispatchMemory) -> Option<LiftId>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Built-in policy selector, as named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyKind {
    /// [`policies::NearestIdle`].
    #[default]
    NearestIdle,
    /// [`policies::AvoidRepeatRoundRobin`].
    AvoidRepeatRoundRobin,
}

impl PolicyKind {
    /// Instantiates the policy.
    pub fn build(self) -> Box<dyn DispatchPolicy> {
        match self {
            Self::NearestIdle => Box::new(policies::NearestIdle),
            Self::AvoidRepeatRoundRobin => Box::new(policies::AvoidRepeatRoundRobin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_kind() {
        assert_eq!(PolicyKind::NearestIdle.build().name(), "nearest-idle");
        assert_eq!(
            PolicyKind::AvoidRepeatRoundRobin.build().name(),
            "avoid-repeat-round-robin"
        );
    }

    #[test]
    fn test_kind_serde_names() {
        let kind: PolicyKind = serde_json::from_str("\"avoidRepeatRoundRobin\"").unwrap();
        assert_eq!(kind, PolicyKind::AvoidRepeatRoundRobin);
        assert_eq!(
            serde_json::to_string(&PolicyKind::NearestIdle).unwrap(),
            "\"nearestIdle\""
        );
    }
}
