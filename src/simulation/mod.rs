//! Single-threaded simulation driver.
//!
//! Pairs a [`DispatchEngine`] with a [`VirtualClock`] and runs the event
//! loop: fire the earliest due timer, let the engine react, repeat. Nothing
//! blocks and all state changes happen inside one event at a time, so no
//! locking is involved.
//!
//! # Example
//! ```
//! use u_lift::config::SimulationConfig;
//! use u_lift::models::LiftStatus;
//! use u_lift::notify::NullNotifier;
//! use u_lift::Simulation;
//!
//! let config = SimulationConfig::new(1, vec![0.0, 40.0]).with_speed(40.0);
//! let mut sim = Simulation::new(config, NullNotifier).unwrap();
//!
//! sim.activate(1).unwrap();
//! sim.advance_by(1_000).unwrap();
//! assert_eq!(sim.fleet().status_of(0), Some(LiftStatus::Arrived));
//!
//! sim.run_until_settled(60_000).unwrap();
//! assert!(sim.fleet().all_idle());
//! ```

mod traffic;

pub use traffic::{CallArrival, TrafficGenerator};

use tracing::debug;

use crate::clock::{Clock, VirtualClock};
use crate::config::SimulationConfig;
use crate::dispatching::{DispatchPolicy, WaitQueue};
use crate::error::{ConfigError, DispatchError};
use crate::models::{FloorIndex, LiftFleet};
use crate::notify::Notifier;
use crate::scheduler::{DispatchEngine, DispatchKpi, DispatchOutcome, EngineEvent};

/// Event loop over a dispatch engine and its virtual clock.
#[derive(Debug)]
pub struct Simulation {
    engine: DispatchEngine,
    clock: VirtualClock<EngineEvent>,
}

impl Simulation {
    /// Creates a simulation at t=0 and schedules the first retry tick.
    pub fn new(config: SimulationConfig, notifier: impl Notifier + 'static) -> Result<Self, ConfigError> {
        let engine = DispatchEngine::new(config, notifier)?;
        let mut clock = VirtualClock::new();
        engine.start(&mut clock);
        Ok(Self { engine, clock })
    }

    /// Replaces the dispatch policy.
    pub fn with_policy<P: DispatchPolicy + 'static>(mut self, policy: P) -> Self {
        self.engine = self.engine.with_policy(policy);
        self
    }

    /// Current virtual time (ms).
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Activates a floor's call control now.
    pub fn activate(&mut self, floor: FloorIndex) -> Result<DispatchOutcome, DispatchError> {
        self.engine.activate(floor, &mut self.clock)
    }

    /// Fires the next timer due at or before `until_ms`, if any.
    pub fn step(&mut self, until_ms: u64) -> Result<Option<EngineEvent>, DispatchError> {
        let Some(fired) = self.clock.pop_due(until_ms) else {
            return Ok(None);
        };
        debug!(at_ms = fired.due_ms, timer = fired.id, event = fired.event.name(), "timer fired");
        self.engine.handle_event(fired.event, &mut self.clock)?;
        Ok(Some(fired.event))
    }

    /// Fires every timer due up to `until_ms`, then moves the clock there.
    ///
    /// Returns the number of events handled.
    pub fn advance_to(&mut self, until_ms: u64) -> Result<usize, DispatchError> {
        let mut fired = 0;
        while self.step(until_ms)?.is_some() {
            fired += 1;
        }
        self.clock.advance_to(until_ms);
        Ok(fired)
    }

    /// Advances the clock by `delta_ms`.
    pub fn advance_by(&mut self, delta_ms: u64) -> Result<usize, DispatchError> {
        self.advance_to(self.now_ms().saturating_add(delta_ms))
    }

    /// Runs until no journey is in flight or `limit_ms` is reached.
    ///
    /// Calls that no policy will ever place (a single-lift fleet under
    /// avoid-repeat, for example) stay queued; they do not keep the loop
    /// alive. Returns the virtual time reached.
    pub fn run_until_settled(&mut self, limit_ms: u64) -> Result<u64, DispatchError> {
        while self.engine.has_active_journeys() {
            match self.clock.next_due_ms() {
                Some(due) if due <= limit_ms => {
                    self.advance_to(due)?;
                }
                _ => break,
            }
        }
        Ok(self.now_ms())
    }

    /// Feeds call arrivals in time order, advancing the clock to each one.
    ///
    /// Arrivals earlier than the current time are activated immediately.
    pub fn run_traffic(
        &mut self,
        arrivals: impl IntoIterator<Item = CallArrival>,
    ) -> Result<Vec<(CallArrival, DispatchOutcome)>, DispatchError> {
        let mut outcomes = Vec::new();
        for arrival in arrivals {
            self.advance_to(arrival.at_ms)?;
            let outcome = self.activate(arrival.floor)?;
            outcomes.push((arrival, outcome));
        }
        Ok(outcomes)
    }

    /// KPIs over completed journeys, with the elapsed time as horizon.
    pub fn kpi(&self) -> DispatchKpi {
        DispatchKpi::calculate(
            self.engine.completed_journeys(),
            self.engine.fleet().len(),
            self.now_ms(),
        )
    }

    /// The engine.
    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    /// Fleet snapshot.
    pub fn fleet(&self) -> &LiftFleet {
        self.engine.fleet()
    }

    /// Calls waiting for a lift.
    pub fn wait_queue(&self) -> &WaitQueue {
        self.engine.wait_queue()
    }

    /// The clock.
    pub fn clock(&self) -> &VirtualClock<EngineEvent> {
        &self.clock
    }
}
