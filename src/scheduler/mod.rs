//! Dispatch engine, journey state machine and KPI evaluation.
//!
//! # Algorithm
//!
//! `DispatchEngine` accepts floor calls, asks the configured
//! [`DispatchPolicy`](crate::dispatching::DispatchPolicy) for an idle lift,
//! and either starts a journey or queues the call. Journeys advance only
//! when their timers fire on the clock; a lift returning to idle triggers an
//! immediate wait-queue retry, in addition to the periodic retry tick.
//!
//! # KPI
//!
//! `DispatchKpi` summarizes completed journeys: wait and response times,
//! per-lift utilization.

mod engine;
mod journey;
mod kpi;

pub use engine::{DispatchEngine, DispatchOutcome, EngineEvent};
pub use journey::{travel_duration_ms, Journey, JourneyPhase};
pub use kpi::DispatchKpi;
