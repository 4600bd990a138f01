//! Dispatch engine.
//!
//! Owns all mutable dispatch state (fleet, memory, wait queue, floor call
//! states, in-flight journeys) and is the only thing that mutates it.
//!
//! # Algorithm
//!
//! On a call:
//! 1. Count the call for its floor.
//! 2. Ask the policy for a lift.
//! 3. Lift found → start its journey. Otherwise → append to the wait queue.
//!
//! On a retry (tick, or a lift returning to idle): one front-to-back pass
//! over the wait queue, dispatching every entry the policy can place.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::journey::Journey;
use crate::clock::{Clock, TimerId};
use crate::config::SimulationConfig;
use crate::dispatching::{DispatchMemory, DispatchPolicy, WaitQueue};
use crate::error::{ConfigError, DispatchError};
use crate::models::{Call, FloorIndex, FloorState, JourneyRecord, LiftFleet, LiftId};
use crate::notify::Notifier;

/// Deferred work the engine schedules on its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineEvent {
    /// A lift's travel time elapsed.
    TravelComplete {
        /// Travelling lift.
        lift: LiftId,
    },
    /// A lift's hold at the floor elapsed.
    HoldComplete {
        /// Holding lift.
        lift: LiftId,
    },
    /// Periodic wait-queue retry.
    RetryTick,
}

impl EngineEvent {
    /// Event name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TravelComplete { .. } => "travel-complete",
            Self::HoldComplete { .. } => "hold-complete",
            Self::RetryTick => "retry-tick",
        }
    }
}

/// Result of submitting a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// A lift was assigned and its journey started.
    Dispatched(LiftId),
    /// No lift qualified; the call is in the wait queue.
    Queued,
    /// The floor already has an outstanding call; nothing happened.
    Ignored,
}

/// Orchestrates calls, the wait queue and lift journeys.
///
/// Every method that can start or advance a journey takes the clock
/// explicitly; the engine never owns time.
///
/// # Example
/// ```
/// use u_lift::clock::VirtualClock;
/// use u_lift::config::SimulationConfig;
/// use u_lift::notify::NullNotifier;
/// use u_lift::scheduler::{DispatchEngine, DispatchOutcome};
///
/// let config = SimulationConfig::new(2, vec![0.0, 80.0]);
/// let mut engine = DispatchEngine::new(config, NullNotifier).unwrap();
/// let mut clock = VirtualClock::new();
///
/// assert_eq!(engine.activate(1, &mut clock).unwrap(), DispatchOutcome::Dispatched(0));
/// assert_eq!(engine.activate(1, &mut clock).unwrap(), DispatchOutcome::Ignored);
/// ```
pub struct DispatchEngine {
    pub(super) config: SimulationConfig,
    pub(super) fleet: LiftFleet,
    pub(super) memory: DispatchMemory,
    pub(super) wait_queue: WaitQueue,
    pub(super) policy: Box<dyn DispatchPolicy>,
    pub(super) notifier: Box<dyn Notifier>,
    pub(super) floor_states: Vec<FloorState>,
    pub(super) journeys: Vec<Option<Journey>>,
    pub(super) completed: Vec<JourneyRecord>,
}

impl DispatchEngine {
    /// Creates an engine with the configured policy.
    ///
    /// Fails if the configuration does not validate (e.g. an empty fleet).
    pub fn new(config: SimulationConfig, notifier: impl Notifier + 'static) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let fleet = LiftFleet::new(config.fleet_size, config.resolved_initial_position());

        info!(
            lifts = config.fleet_size,
            floors = config.floor_count(),
            policy = ?config.dispatch_policy,
            "dispatch engine initialized"
        );

        Ok(Self {
            policy: config.dispatch_policy.build(),
            notifier: Box::new(notifier),
            floor_states: vec![FloorState::Callable; config.floor_count()],
            journeys: vec![None; config.fleet_size],
            memory: DispatchMemory::new(),
            wait_queue: WaitQueue::new(),
            completed: Vec::new(),
            fleet,
            config,
        })
    }

    /// Replaces the policy with a custom one.
    pub fn with_policy<P: DispatchPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Schedules the first periodic retry tick.
    pub fn start<C: Clock<EngineEvent>>(&self, clock: &mut C) -> TimerId {
        clock.schedule_after(self.config.retry_interval_ms, EngineEvent::RetryTick)
    }

    /// A floor's call control was activated at the current virtual time.
    ///
    /// Out-of-range floors are rejected; a floor with an outstanding call
    /// is ignored.
    pub fn activate<C: Clock<EngineEvent>>(
        &mut self,
        floor: FloorIndex,
        clock: &mut C,
    ) -> Result<DispatchOutcome, DispatchError> {
        let target = self.config.floor_position(floor).ok_or_else(|| {
            warn!(floor, floors = self.config.floor_count(), "call rejected: floor out of range");
            DispatchError::InvalidFloorIndex {
                floor,
                floor_count: self.config.floor_count(),
            }
        })?;
        let call = Call::new(floor, target).at(clock.now_ms());
        self.submit_call(call, clock)
    }

    /// Submits a call for dispatch.
    ///
    /// If the chosen lift turns out not to be idle (only possible with a
    /// faulty custom policy), the call is queued and the error returned.
    pub fn submit_call<C: Clock<EngineEvent>>(
        &mut self,
        call: Call,
        clock: &mut C,
    ) -> Result<DispatchOutcome, DispatchError> {
        let floor = call.floor_index;
        let state = self
            .floor_states
            .get(floor)
            .copied()
            .ok_or(DispatchError::InvalidFloorIndex {
                floor,
                floor_count: self.config.floor_count(),
            })?;

        if state.is_pending() {
            warn!(floor, %state, "duplicate call ignored");
            return Ok(DispatchOutcome::Ignored);
        }

        let calls = self.memory.record_call(floor);
        let selected = self.policy.select(&call, &self.fleet, &self.memory);
        debug!(floor, calls, policy = self.policy.name(), ?selected, "policy consulted");

        match selected {
            Some(lift) => {
                if let Err(err) = self.begin_journey(lift, call.clone(), clock) {
                    self.enqueue(call, clock.now_ms());
                    return Err(err.into());
                }
                Ok(DispatchOutcome::Dispatched(lift))
            }
            None => {
                self.enqueue(call, clock.now_ms());
                Ok(DispatchOutcome::Queued)
            }
        }
    }

    /// One pass over the wait queue.
    ///
    /// Each entry, in order, gets one `select`; placed entries leave the
    /// queue, the others stay where they were. Returns how many were
    /// dispatched.
    pub fn retry_wait_queue<C: Clock<EngineEvent>>(&mut self, clock: &mut C) -> Result<usize, DispatchError> {
        if self.wait_queue.is_empty() {
            return Ok(0);
        }

        let pending = self.wait_queue.take();
        let mut retained = Vec::with_capacity(pending.len());
        let mut dispatched = 0;
        let mut failure = None;

        for entry in pending {
            if failure.is_some() {
                retained.push(entry);
                continue;
            }
            match self.policy.select(&entry.call, &self.fleet, &self.memory) {
                Some(lift) => match self.begin_journey(lift, entry.call.clone(), clock) {
                    Ok(()) => dispatched += 1,
                    Err(err) => {
                        failure = Some(err);
                        retained.push(entry);
                    }
                },
                None => retained.push(entry),
            }
        }

        self.wait_queue.restore(retained);
        if dispatched > 0 {
            info!(dispatched, waiting = self.wait_queue.len(), "wait queue retried");
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(dispatched),
        }
    }

    /// Handles a fired clock event.
    pub fn handle_event<C: Clock<EngineEvent>>(
        &mut self,
        event: EngineEvent,
        clock: &mut C,
    ) -> Result<(), DispatchError> {
        match event {
            EngineEvent::TravelComplete { lift } => self.complete_travel(lift, clock)?,
            EngineEvent::HoldComplete { lift } => self.complete_hold(lift, clock)?,
            EngineEvent::RetryTick => {
                clock.schedule_after(self.config.retry_interval_ms, EngineEvent::RetryTick);
                self.retry_wait_queue(clock)?;
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, call: Call, now_ms: u64) {
        let floor = call.floor_index;
        self.wait_queue.push(call, now_ms);
        self.set_floor_state(floor, FloorState::Busy);
        self.notifier.on_call_queued(floor);
        info!(floor, waiting = self.wait_queue.len(), "no lift available, call queued");
    }

    pub(super) fn set_floor_state(&mut self, floor: FloorIndex, state: FloorState) {
        if let Some(slot) = self.floor_states.get_mut(floor) {
            *slot = state;
        }
    }

    // ======================== Accessors ========================

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Fleet snapshot.
    pub fn fleet(&self) -> &LiftFleet {
        &self.fleet
    }

    /// Per-floor dispatch memory.
    pub fn memory(&self) -> &DispatchMemory {
        &self.memory
    }

    /// Calls waiting for a lift.
    pub fn wait_queue(&self) -> &WaitQueue {
        &self.wait_queue
    }

    /// Call control state of a floor.
    pub fn floor_state(&self, floor: FloorIndex) -> Option<FloorState> {
        self.floor_states.get(floor).copied()
    }

    /// In-flight journey of a lift.
    pub fn journey(&self, lift: LiftId) -> Option<&Journey> {
        self.journeys.get(lift).and_then(Option::as_ref)
    }

    /// All in-flight journeys.
    pub fn active_journeys(&self) -> impl Iterator<Item = &Journey> {
        self.journeys.iter().flatten()
    }

    /// Whether any lift is mid-journey.
    pub fn has_active_journeys(&self) -> bool {
        self.journeys.iter().any(Option::is_some)
    }

    /// Records of finished journeys, in completion order.
    pub fn completed_journeys(&self) -> &[JourneyRecord] {
        &self.completed
    }

    /// Name of the active policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

impl std::fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("policy", &self.policy.name())
            .field("fleet", &self.fleet)
            .field("waiting", &self.wait_queue.len())
            .field("active_journeys", &self.active_journeys().count())
            .field("completed", &self.completed.len())
            .finish()
    }
}
