//! Lift fleet aggregate.
//!
//! Single owner of every lift's position and status. Cross-lift rules
//! (one journey per lift) are enforced by the dispatch engine, not here.

use serde::{Deserialize, Serialize};

use super::{Lift, LiftId, LiftStatus};

/// The set of lifts under dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiftFleet {
    lifts: Vec<Lift>,
}

impl LiftFleet {
    /// Creates `size` idle lifts parked at `initial_position`.
    pub fn new(size: usize, initial_position: f64) -> Self {
        Self {
            lifts: (0..size).map(|id| Lift::new(id, initial_position)).collect(),
        }
    }

    /// Creates a fleet from explicit lifts. Ids are reassigned to indices.
    pub fn from_lifts(lifts: impl IntoIterator<Item = Lift>) -> Self {
        Self {
            lifts: lifts
                .into_iter()
                .enumerate()
                .map(|(id, lift)| Lift { id, ..lift })
                .collect(),
        }
    }

    /// Creates idle lifts at the given positions (one lift per position).
    pub fn at_positions(positions: &[f64]) -> Self {
        Self::from_lifts(positions.iter().map(|&p| Lift::new(0, p)))
    }

    /// Number of lifts.
    pub fn len(&self) -> usize {
        self.lifts.len()
    }

    /// Whether the fleet has no lifts.
    pub fn is_empty(&self) -> bool {
        self.lifts.is_empty()
    }

    /// All lifts in index order.
    pub fn lifts(&self) -> &[Lift] {
        &self.lifts
    }

    /// Iterates lifts in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Lift> {
        self.lifts.iter()
    }

    /// Returns a lift by id.
    pub fn get(&self, id: LiftId) -> Option<&Lift> {
        self.lifts.get(id)
    }

    /// Status of a lift, `None` if the id is out of range.
    pub fn status_of(&self, id: LiftId) -> Option<LiftStatus> {
        self.get(id).map(|l| l.status)
    }

    /// Position of a lift, `None` if the id is out of range.
    pub fn position_of(&self, id: LiftId) -> Option<f64> {
        self.get(id).map(|l| l.position)
    }

    /// Sets a lift's status. Returns `false` for an unknown id.
    pub fn set_status(&mut self, id: LiftId, status: LiftStatus) -> bool {
        match self.lifts.get_mut(id) {
            Some(lift) => {
                lift.status = status;
                true
            }
            None => false,
        }
    }

    /// Sets a lift's position. Returns `false` for an unknown id.
    pub fn set_position(&mut self, id: LiftId, position: f64) -> bool {
        match self.lifts.get_mut(id) {
            Some(lift) => {
                lift.position = position;
                true
            }
            None => false,
        }
    }

    /// Number of idle lifts.
    pub fn idle_count(&self) -> usize {
        self.lifts.iter().filter(|l| l.is_idle()).count()
    }

    /// Whether every lift is idle.
    pub fn all_idle(&self) -> bool {
        self.lifts.iter().all(Lift::is_idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fleet() {
        let fleet = LiftFleet::new(3, 400.0);
        assert_eq!(fleet.len(), 3);
        assert!(fleet.all_idle());
        for (i, lift) in fleet.iter().enumerate() {
            assert_eq!(lift.id, i);
            assert!((lift.position - 400.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_accessors() {
        let mut fleet = LiftFleet::at_positions(&[0.0, 100.0]);
        assert_eq!(fleet.status_of(1), Some(LiftStatus::Idle));
        assert_eq!(fleet.position_of(1), Some(100.0));

        assert!(fleet.set_status(1, LiftStatus::Moving));
        assert!(fleet.set_position(1, 250.0));
        assert_eq!(fleet.status_of(1), Some(LiftStatus::Moving));
        assert_eq!(fleet.position_of(1), Some(250.0));
        assert_eq!(fleet.idle_count(), 1);
        assert!(!fleet.all_idle());
    }

    #[test]
    fn test_unknown_lift() {
        let mut fleet = LiftFleet::new(2, 0.0);
        assert_eq!(fleet.status_of(5), None);
        assert_eq!(fleet.position_of(5), None);
        assert!(!fleet.set_status(5, LiftStatus::Moving));
        assert!(!fleet.set_position(5, 10.0));
    }

    #[test]
    fn test_from_lifts_reindexes() {
        let fleet = LiftFleet::from_lifts(vec![
            Lift::new(7, 0.0),
            Lift::new(7, 50.0).with_status(LiftStatus::Arrived),
        ]);
        assert_eq!(fleet.get(0).map(|l| l.id), Some(0));
        assert_eq!(fleet.get(1).map(|l| l.id), Some(1));
        assert_eq!(fleet.status_of(1), Some(LiftStatus::Arrived));
    }
}
