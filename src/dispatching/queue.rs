//! Wait queue for calls no lift could take.
//!
//! Insertion-ordered. A retry pass walks the entries once, front to back;
//! entries that get a lift leave, the rest keep their relative order.

use serde::{Deserialize, Serialize};

use crate::models::{Call, FloorIndex};

/// A queued call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingEntry {
    /// The waiting call.
    pub call: Call,
    /// Virtual time it entered the queue (ms).
    pub enqueued_at_ms: u64,
}

/// Ordered holding area for undispatched calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitQueue {
    entries: Vec<WaitingEntry>,
}

impl WaitQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    pub fn push(&mut self, call: Call, enqueued_at_ms: u64) {
        self.entries.push(WaitingEntry {
            call,
            enqueued_at_ms,
        });
    }

    /// Number of waiting calls.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waiting entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.entries.iter()
    }

    /// Whether `floor` has a waiting call.
    pub fn contains_floor(&self, floor: FloorIndex) -> bool {
        self.entries.iter().any(|e| e.call.floor_index == floor)
    }

    /// Takes every entry out for a retry pass.
    ///
    /// Hand the undispatched ones back with [`restore`](Self::restore).
    pub fn take(&mut self) -> Vec<WaitingEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Puts entries back ahead of anything queued during the pass.
    pub fn restore(&mut self, retained: Vec<WaitingEntry>) {
        let queued_meanwhile = std::mem::replace(&mut self.entries, retained);
        self.entries.extend(queued_meanwhile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut queue = WaitQueue::new();
        queue.push(Call::new(3, 0.0), 10);
        queue.push(Call::new(1, 0.0), 20);

        let floors: Vec<_> = queue.iter().map(|e| e.call.floor_index).collect();
        assert_eq!(floors, vec![3, 1]);
        assert!(queue.contains_floor(1));
        assert!(!queue.contains_floor(2));
    }

    #[test]
    fn test_take_and_restore() {
        let mut queue = WaitQueue::new();
        queue.push(Call::new(0, 0.0), 0);
        queue.push(Call::new(1, 0.0), 0);
        queue.push(Call::new(2, 0.0), 0);

        let taken = queue.take();
        assert!(queue.is_empty());

        // Floor 1 was dispatched; a new call arrived mid-pass
        let retained: Vec<_> = taken
            .into_iter()
            .filter(|e| e.call.floor_index != 1)
            .collect();
        queue.push(Call::new(9, 0.0), 5);
        queue.restore(retained);

        let floors: Vec<_> = queue.iter().map(|e| e.call.floor_index).collect();
        assert_eq!(floors, vec![0, 2, 9]);
    }
}
