//! Seeded random call traffic.
//!
//! Produces floor call arrivals with a uniformly chosen floor and a uniform
//! gap between consecutive arrivals. The same seed always yields the same
//! sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::FloorIndex;

/// Default lower bound of the inter-arrival gap (ms).
pub const DEFAULT_MIN_GAP_MS: u64 = 500;
/// Default upper bound of the inter-arrival gap (ms).
pub const DEFAULT_MAX_GAP_MS: u64 = 3_000;

/// A floor call at a point in virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallArrival {
    /// Arrival time (ms).
    pub at_ms: u64,
    /// Calling floor.
    pub floor: FloorIndex,
}

/// Infinite, reproducible stream of call arrivals.
///
/// # Example
/// ```
/// use u_lift::simulation::TrafficGenerator;
///
/// let a: Vec<_> = TrafficGenerator::new(9, 4).take(5).collect();
/// let b: Vec<_> = TrafficGenerator::new(9, 4).take(5).collect();
/// assert_eq!(a, b);
/// assert!(a.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
/// ```
#[derive(Debug, Clone)]
pub struct TrafficGenerator {
    rng: StdRng,
    floor_count: usize,
    min_gap_ms: u64,
    max_gap_ms: u64,
    next_at_ms: u64,
}

impl TrafficGenerator {
    /// Creates a generator over `floor_count` floors.
    pub fn new(seed: u64, floor_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            floor_count,
            min_gap_ms: DEFAULT_MIN_GAP_MS,
            max_gap_ms: DEFAULT_MAX_GAP_MS,
            next_at_ms: 0,
        }
    }

    /// Sets the inter-arrival gap range (inclusive). Bounds may be given in
    /// either order.
    pub fn with_gap_ms(mut self, min_gap_ms: u64, max_gap_ms: u64) -> Self {
        self.min_gap_ms = min_gap_ms.min(max_gap_ms);
        self.max_gap_ms = min_gap_ms.max(max_gap_ms);
        self
    }

    /// Offsets the first arrival.
    pub fn starting_at(mut self, at_ms: u64) -> Self {
        self.next_at_ms = at_ms;
        self
    }

    /// Draws the next arrival. `None` only when there are no floors.
    pub fn next_arrival(&mut self) -> Option<CallArrival> {
        if self.floor_count == 0 {
            return None;
        }
        let gap = self.rng.random_range(self.min_gap_ms..=self.max_gap_ms);
        self.next_at_ms = self.next_at_ms.saturating_add(gap);
        let floor = self.rng.random_range(0..self.floor_count);
        Some(CallArrival {
            at_ms: self.next_at_ms,
            floor,
        })
    }
}

impl Iterator for TrafficGenerator {
    type Item = CallArrival;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_arrival()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_traffic() {
        let a: Vec<_> = TrafficGenerator::new(1234, 6).take(100).collect();
        let b: Vec<_> = TrafficGenerator::new(1234, 6).take(100).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a: Vec<_> = TrafficGenerator::new(1, 6).take(50).collect();
        let b: Vec<_> = TrafficGenerator::new(2, 6).take(50).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bounds() {
        let arrivals: Vec<_> = TrafficGenerator::new(5, 3)
            .with_gap_ms(2_000, 100)
            .starting_at(10_000)
            .take(200)
            .collect();

        let mut prev = 10_000;
        for a in &arrivals {
            assert!(a.floor < 3);
            let gap = a.at_ms - prev;
            assert!((100..=2_000).contains(&gap), "gap {gap}");
            prev = a.at_ms;
        }
    }

    #[test]
    fn test_fixed_gap() {
        let times: Vec<_> = TrafficGenerator::new(0, 2)
            .with_gap_ms(250, 250)
            .take(4)
            .map(|a| a.at_ms)
            .collect();
        assert_eq!(times, vec![250, 500, 750, 1_000]);
    }

    #[test]
    fn test_no_floors_yields_nothing() {
        assert_eq!(TrafficGenerator::new(0, 0).next(), None);
    }
}
