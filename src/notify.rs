//! Presentation boundary.
//!
//! The dispatch core reports what happens through fire-and-forget
//! notifications. Rendering, sound and button styling live on the other
//! side of these traits and never feed anything back.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::models::{FloorIndex, LiftId};

/// Visual notifications for lifts and call controls.
pub trait DisplayNotifier {
    /// A lift has been assigned and starts travelling.
    fn on_journey_begin(&mut self, lift: LiftId, floor: FloorIndex, eta_secs: f64);

    /// The lift reached the floor.
    fn on_journey_arrived(&mut self, lift: LiftId, floor: FloorIndex);

    /// The lift is idle again and the floor is callable.
    fn on_journey_reset(&mut self, lift: LiftId, floor: FloorIndex);

    /// No lift was free; the floor's call waits in the queue.
    fn on_call_queued(&mut self, _floor: FloorIndex) {}
}

/// Audio cues.
pub trait AudioNotifier {
    /// A lift started moving.
    fn on_moving_started(&mut self);

    /// A lift arrived.
    fn on_arrived(&mut self);
}

/// Everything the engine notifies.
pub trait Notifier: DisplayNotifier + AudioNotifier {}

impl<T: DisplayNotifier + AudioNotifier> Notifier for T {}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl DisplayNotifier for NullNotifier {
    fn on_journey_begin(&mut self, _lift: LiftId, _floor: FloorIndex, _eta_secs: f64) {}
    fn on_journey_arrived(&mut self, _lift: LiftId, _floor: FloorIndex) {}
    fn on_journey_reset(&mut self, _lift: LiftId, _floor: FloorIndex) {}
}

impl AudioNotifier for NullNotifier {
    fn on_moving_started(&mut self) {}
    fn on_arrived(&mut self) {}
}

/// A single notification, as captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notification {
    JourneyBegin {
        lift: LiftId,
        floor: FloorIndex,
        eta_secs: f64,
    },
    JourneyArrived {
        lift: LiftId,
        floor: FloorIndex,
    },
    JourneyReset {
        lift: LiftId,
        floor: FloorIndex,
    },
    CallQueued {
        floor: FloorIndex,
    },
    MovingStarted,
    Arrived,
}

/// Shared, append-only notification log.
///
/// Clones share the same log, so a caller can keep one handle while the
/// engine owns the notifier writing into it.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog(Rc<RefCell<Vec<Notification>>>);

impl NotificationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all notifications so far.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.0.borrow().clone()
    }

    /// Number of notifications so far.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Drops all recorded notifications.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, n: Notification) {
        self.0.borrow_mut().push(n);
    }
}

/// Records notifications into a [`NotificationLog`].
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    log: NotificationLog,
}

impl RecordingNotifier {
    /// Creates a notifier writing into `log`.
    pub fn new(log: NotificationLog) -> Self {
        Self { log }
    }

    /// Handle to the underlying log.
    pub fn log(&self) -> NotificationLog {
        self.log.clone()
    }
}

impl DisplayNotifier for RecordingNotifier {
    fn on_journey_begin(&mut self, lift: LiftId, floor: FloorIndex, eta_secs: f64) {
        self.log.push(Notification::JourneyBegin {
            lift,
            floor,
            eta_secs,
        });
    }

    fn on_journey_arrived(&mut self, lift: LiftId, floor: FloorIndex) {
        self.log.push(Notification::JourneyArrived { lift, floor });
    }

    fn on_journey_reset(&mut self, lift: LiftId, floor: FloorIndex) {
        self.log.push(Notification::JourneyReset { lift, floor });
    }

    fn on_call_queued(&mut self, floor: FloorIndex) {
        self.log.push(Notification::CallQueued { floor });
    }
}

impl AudioNotifier for RecordingNotifier {
    fn on_moving_started(&mut self) {
        self.log.push(Notification::MovingStarted);
    }

    fn on_arrived(&mut self) {
        self.log.push(Notification::Arrived);
    }
}

/// Formats an ETA as shown next to a travelling lift, e.g. `"1 min 5 sec"`.
///
/// Minutes and seconds are truncated; negative or non-finite input shows
/// as `"0 min 0 sec"`.
pub fn format_eta(eta_secs: f64) -> String {
    let total = if eta_secs.is_finite() && eta_secs > 0.0 {
        eta_secs.floor() as u64
    } else {
        0
    };
    format!("{} min {} sec", total / 60, total % 60)
}
