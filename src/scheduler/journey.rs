//! Journey state machine.
//!
//! One journey drives one lift through a served call:
//!
//! ```text
//! Idle ──assign──▶ Moving ──travel timer──▶ Arrived ──hold timer──▶ Idle
//! ```
//!
//! Each arrow is one function below. The travel timer is scheduled when the
//! journey begins, the hold timer only once the travel timer has fired, so a
//! lift's transitions are strictly ordered. There is no abort path: once a
//! journey begins it runs to `Idle`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::engine::{DispatchEngine, EngineEvent};
use crate::clock::Clock;
use crate::error::{DispatchError, JourneyError};
use crate::models::{Call, FloorState, JourneyRecord, LiftId, LiftStatus};

/// Journey phase. A lift without a journey is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JourneyPhase {
    /// Travel timer pending.
    Moving,
    /// Hold timer pending.
    Arrived,
}

/// An in-flight journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    /// Assigned lift.
    pub lift: LiftId,
    /// Call being served.
    pub call: Call,
    /// Current phase.
    pub phase: JourneyPhase,
    /// Assignment time (ms).
    pub dispatched_at_ms: u64,
    /// Travel duration (ms).
    pub travel_ms: u64,
    /// Arrival time, once arrived (ms).
    pub arrived_at_ms: Option<u64>,
}

impl Journey {
    /// Expected arrival time (ms).
    pub fn eta_at_ms(&self) -> u64 {
        self.dispatched_at_ms + self.travel_ms
    }

    /// Travel duration in seconds, as announced to the display.
    pub fn eta_secs(&self) -> f64 {
        self.travel_ms as f64 / 1000.0
    }
}

/// Travel time between two positions at `speed` units per second (ms, rounded).
pub fn travel_duration_ms(from: f64, to: f64, speed: f64) -> u64 {
    let secs = (to - from).abs() / speed;
    (secs * 1000.0).round() as u64
}

impl DispatchEngine {
    /// `Idle → Moving`.
    ///
    /// Validates before touching anything: a lift that is unknown, not idle
    /// or already bound to a journey is refused with no state change.
    pub(super) fn begin_journey<C: Clock<EngineEvent>>(
        &mut self,
        lift: LiftId,
        call: Call,
        clock: &mut C,
    ) -> Result<(), JourneyError> {
        let (status, from) = self
            .fleet
            .get(lift)
            .map(|l| (l.status, l.position))
            .ok_or(JourneyError::UnknownLift { lift })?;
        let unbound = matches!(self.journeys.get(lift), Some(None));
        if !status.is_idle() || !unbound {
            return Err(JourneyError::LiftBusy { lift, status });
        }

        let now = clock.now_ms();
        let floor = call.floor_index;
        let travel_ms = travel_duration_ms(from, call.target_position, self.config.speed);

        self.fleet.set_status(lift, LiftStatus::Moving);
        self.fleet.set_position(lift, call.target_position);
        self.memory.record_dispatch(floor, lift);
        self.set_floor_state(floor, FloorState::Waiting);

        let timer = clock.schedule_after(travel_ms, EngineEvent::TravelComplete { lift });
        info!(lift, floor, from, to = call.target_position, travel_ms, timer, "journey started");

        let journey = Journey {
            lift,
            call,
            phase: JourneyPhase::Moving,
            dispatched_at_ms: now,
            travel_ms,
            arrived_at_ms: None,
        };
        self.notifier.on_moving_started();
        self.notifier.on_journey_begin(lift, floor, journey.eta_secs());
        if let Some(slot) = self.journeys.get_mut(lift) {
            *slot = Some(journey);
        }
        Ok(())
    }

    /// `Moving → Arrived`: schedules the hold timer.
    pub(super) fn complete_travel<C: Clock<EngineEvent>>(
        &mut self,
        lift: LiftId,
        clock: &mut C,
    ) -> Result<(), JourneyError> {
        let status = self
            .fleet
            .status_of(lift)
            .ok_or(JourneyError::UnknownLift { lift })?;
        let Some(journey) = self
            .journeys
            .get_mut(lift)
            .and_then(Option::as_mut)
            .filter(|j| j.phase == JourneyPhase::Moving)
        else {
            return Err(JourneyError::IllegalTransition {
                lift,
                status,
                event: "travel-complete",
            });
        };

        let now = clock.now_ms();
        journey.phase = JourneyPhase::Arrived;
        journey.arrived_at_ms = Some(now);
        let floor = journey.call.floor_index;

        self.fleet.set_status(lift, LiftStatus::Arrived);
        self.set_floor_state(floor, FloorState::Arrived);

        let hold_ms = self.config.hold_duration_ms;
        let timer = clock.schedule_after(hold_ms, EngineEvent::HoldComplete { lift });
        debug!(lift, floor, hold_ms, timer, "lift arrived");

        self.notifier.on_journey_arrived(lift, floor);
        self.notifier.on_arrived();
        Ok(())
    }

    /// `Arrived → Idle`: frees the lift and retries the wait queue.
    pub(super) fn complete_hold<C: Clock<EngineEvent>>(
        &mut self,
        lift: LiftId,
        clock: &mut C,
    ) -> Result<(), DispatchError> {
        let status = self
            .fleet
            .status_of(lift)
            .ok_or(JourneyError::UnknownLift { lift })?;
        let Some(journey) = self
            .journeys
            .get_mut(lift)
            .and_then(|slot| slot.take_if(|j| j.phase == JourneyPhase::Arrived))
        else {
            return Err(JourneyError::IllegalTransition {
                lift,
                status,
                event: "hold-complete",
            }
            .into());
        };

        let now = clock.now_ms();
        let floor = journey.call.floor_index;
        self.fleet.set_status(lift, LiftStatus::Idle);
        self.set_floor_state(floor, FloorState::Callable);
        self.completed.push(JourneyRecord {
            lift,
            floor,
            requested_at_ms: journey.call.requested_at_ms,
            dispatched_at_ms: journey.dispatched_at_ms,
            arrived_at_ms: journey.arrived_at_ms.unwrap_or(now),
            reset_at_ms: now,
        });
        info!(lift, floor, "lift idle");

        self.notifier.on_journey_reset(lift, floor);
        self.retry_wait_queue(clock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;
    use crate::config::SimulationConfig;
    use crate::notify::{Notification, NotificationLog, RecordingNotifier};
    use proptest::prelude::*;

    #[test]
    fn test_travel_duration() {
        assert_eq!(travel_duration_ms(100.0, 150.0, 50.0), 1_000);
        assert_eq!(travel_duration_ms(150.0, 100.0, 50.0), 1_000);
        assert_eq!(travel_duration_ms(0.0, 100.0, 40.0), 2_500);
        assert_eq!(travel_duration_ms(0.0, 0.0, 40.0), 0);
        assert_eq!(travel_duration_ms(0.0, 1.0, 3.0), 333);
    }

    #[test]
    fn test_notification_sequence() {
        let log = NotificationLog::new();
        let config = SimulationConfig::new(1, vec![0.0, 80.0]);
        let mut engine = DispatchEngine::new(config, RecordingNotifier::new(log.clone())).unwrap();
        let mut clock = VirtualClock::new();

        engine.activate(1, &mut clock).unwrap();
        while let Some(fired) = clock.pop_due(10_000) {
            engine.handle_event(fired.event, &mut clock).unwrap();
        }

        assert_eq!(
            log.snapshot(),
            vec![
                Notification::MovingStarted,
                Notification::JourneyBegin {
                    lift: 0,
                    floor: 1,
                    eta_secs: 2.0
                },
                Notification::JourneyArrived { lift: 0, floor: 1 },
                Notification::Arrived,
                Notification::JourneyReset { lift: 0, floor: 1 },
            ]
        );
    }

    #[test]
    fn test_arrival_cannot_repeat() {
        let config = SimulationConfig::new(1, vec![0.0, 40.0]);
        let mut engine = DispatchEngine::new(config, crate::notify::NullNotifier).unwrap();
        let mut clock = VirtualClock::new();
        engine.activate(1, &mut clock).unwrap();

        engine.complete_travel(0, &mut clock).unwrap();
        let err = engine.complete_travel(0, &mut clock).unwrap_err();
        assert_eq!(
            err,
            JourneyError::IllegalTransition {
                lift: 0,
                status: LiftStatus::Arrived,
                event: "travel-complete"
            }
        );
    }

    #[test]
    fn test_hold_before_arrival_is_illegal() {
        let config = SimulationConfig::new(1, vec![0.0, 40.0]);
        let mut engine = DispatchEngine::new(config, crate::notify::NullNotifier).unwrap();
        let mut clock = VirtualClock::new();
        engine.activate(1, &mut clock).unwrap();

        assert!(engine.complete_hold(0, &mut clock).is_err());
        // The journey survives the stray event
        assert_eq!(engine.journey(0).map(|j| j.phase), Some(JourneyPhase::Moving));
    }

    #[test]
    fn test_eta() {
        let journey = Journey {
            lift: 0,
            call: Call::new(0, 0.0),
            phase: JourneyPhase::Moving,
            dispatched_at_ms: 4_000,
            travel_ms: 1_250,
            arrived_at_ms: None,
        };
        assert_eq!(journey.eta_at_ms(), 5_250);
        assert!((journey.eta_secs() - 1.25).abs() < 1e-10);
    }

    proptest! {
        // Closure: each journey reaches Idle exactly at dispatch + travel + hold,
        // passing through every phase once.
        #[test]
        fn prop_journey_reaches_idle_on_time(
            positions in prop::collection::vec((0i32..40).prop_map(|p| f64::from(p) * 25.0), 1..6),
            lifts in 1usize..4,
            calls in prop::collection::vec((0usize..6, 0u64..5_000), 1..12),
            hold in 0u64..3_000,
        ) {
            let floors = positions.len();
            let config = SimulationConfig::new(lifts, positions).with_hold_duration_ms(hold);
            let log = NotificationLog::new();
            let mut engine = DispatchEngine::new(config, RecordingNotifier::new(log.clone())).unwrap();
            let mut clock = VirtualClock::new();
            engine.start(&mut clock);

            let mut calls = calls;
            calls.sort_by_key(|&(_, at)| at);
            for (floor, at) in calls {
                while let Some(fired) = clock.pop_due(at) {
                    engine.handle_event(fired.event, &mut clock).unwrap();
                }
                clock.advance_to(at);
                engine.activate(floor % floors, &mut clock).unwrap();

                // Mutual exclusion: one journey per lift, bound lifts are non-idle
                for j in engine.active_journeys() {
                    prop_assert!(!engine.fleet().status_of(j.lift).unwrap().is_idle());
                }
            }

            let horizon = clock.now_ms() + 1_000_000;
            while engine.has_active_journeys() {
                let Some(fired) = clock.pop_due(horizon) else { break };
                engine.handle_event(fired.event, &mut clock).unwrap();
            }

            prop_assert!(!engine.has_active_journeys());
            prop_assert!(engine.wait_queue().is_empty());
            for r in engine.completed_journeys() {
                prop_assert!(r.requested_at_ms <= r.dispatched_at_ms);
                prop_assert_eq!(r.reset_at_ms - r.arrived_at_ms, hold);
            }

            let begins = log.snapshot().iter().filter(|n| matches!(n, Notification::JourneyBegin { .. })).count();
            let resets = log.snapshot().iter().filter(|n| matches!(n, Notification::JourneyReset { .. })).count();
            prop_assert_eq!(begins, resets);
            prop_assert_eq!(resets, engine.completed_journeys().len());
        }
    }
}
