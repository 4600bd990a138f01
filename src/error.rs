//! Error types.
//!
//! Only conditions the caller must act on are errors. "No lift available"
//! is the `Queued` outcome and a duplicate activation is the `Ignored`
//! outcome; neither appears here.

use thiserror::Error;

use crate::models::{FloorIndex, LiftId, LiftStatus};
use crate::validation::ValidationError;

/// Configuration could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more validation checks failed.
    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    /// The configuration document is not valid JSON for the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A call or engine event could not be processed.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The call names a floor outside the configured range.
    #[error("floor {floor} is out of range (building has {floor_count} floors)")]
    InvalidFloorIndex {
        /// Requested floor.
        floor: FloorIndex,
        /// Number of configured floors.
        floor_count: usize,
    },

    /// A journey transition was rejected.
    #[error(transparent)]
    Journey(#[from] JourneyError),
}

/// A journey state machine transition was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JourneyError {
    /// A journey was requested for a lift that is not idle.
    #[error("lift {lift} is {status} and cannot start a journey")]
    LiftBusy {
        /// Requested lift.
        lift: LiftId,
        /// Its current status.
        status: LiftStatus,
    },

    /// The lift id is not part of the fleet.
    #[error("lift {lift} is not part of the fleet")]
    UnknownLift {
        /// Requested lift.
        lift: LiftId,
    },

    /// A timer fired for a lift whose journey is not in the matching phase.
    #[error("lift {lift} cannot handle {event} while {status}")]
    IllegalTransition {
        /// Affected lift.
        lift: LiftId,
        /// Lift status when the event arrived.
        status: LiftStatus,
        /// Event name.
        event: &'static str,
    },
}
