//! Lift dispatch domain models.
//!
//! Plain data types shared by the dispatching policies, the engine and the
//! simulation driver. Positions are abstract numeric coordinates along the
//! shaft (e.g. pixel offsets or metres); only distances between them matter.
//!
//! # Domain Mappings
//!
//! | u-lift | Building | Warehouse | Parking |
//! |--------|----------|-----------|---------|
//! | Lift | Elevator car | Stacker crane | Car lift |
//! | Call | Hall call | Retrieval request | Bay request |
//! | Journey | Trip + door dwell | Pick cycle | Park cycle |

mod call;
mod fleet;
mod lift;
mod record;

pub use call::{Call, FloorIndex, FloorState};
pub use fleet::LiftFleet;
pub use lift::{Lift, LiftId, LiftStatus};
pub use record::JourneyRecord;
