//! Lift fleet dispatch core for the U-Engine ecosystem.
//!
//! Decides which idle lift serves a floor call, drives each dispatched lift
//! through a timed journey (`Idle → Moving → Arrived → Idle`), and parks calls
//! that cannot be served yet in a wait queue that is retried as lifts free up.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Lift`, `LiftFleet`, `Call`, `FloorState`,
//!   `JourneyRecord`
//! - **`dispatching`**: The `DispatchPolicy` seam, the two built-in policies
//!   (nearest-idle, avoid-repeat round-robin), per-floor `DispatchMemory` and
//!   the `WaitQueue`
//! - **`scheduler`**: `DispatchEngine` (call intake, retry pass, journey state
//!   machine) and `DispatchKpi`
//! - **`clock`**: `Clock` abstraction and the instant-advancing `VirtualClock`
//! - **`simulation`**: Single-threaded event loop and seeded traffic generator
//! - **`notify`**: Display / audio notification boundary
//! - **`config`** / **`validation`**: Simulation options and their checks
//!
//! # Time Representation
//!
//! All times are virtual milliseconds since the simulation epoch (t=0).
//! Nothing in this crate reads the wall clock.
//!
//! # References
//!
//! - Barney (2003), "Elevator Traffic Handbook: Theory and Practice"
//! - Strakosch & Caporale (2010), "The Vertical Transportation Handbook"

pub mod clock;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod simulation;
pub mod validation;

pub use clock::{Clock, VirtualClock};
pub use config::SimulationConfig;
pub use error::{ConfigError, DispatchError, JourneyError};
pub use scheduler::{DispatchEngine, DispatchOutcome, EngineEvent};
pub use simulation::Simulation;
