//! Dispatch quality metrics (KPIs).
//!
//! Computes service indicators from completed journey records.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completed journeys | Records evaluated |
//! | Avg / Max Wait | activation → lift assigned |
//! | Avg / Max Response | activation → lift arrived |
//! | Utilization | Journey time (assign → idle) / horizon, per lift |

use serde::{Deserialize, Serialize};

use crate::models::JourneyRecord;

/// Dispatch performance indicators.
///
/// All time values are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchKpi {
    /// Number of completed journeys.
    pub completed_journeys: usize,
    /// Mean time a call waited for a lift (ms).
    pub avg_wait_ms: f64,
    /// Longest wait of any call (ms).
    pub max_wait_ms: u64,
    /// Mean time from activation to arrival (ms).
    pub avg_response_ms: f64,
    /// Longest time from activation to arrival (ms).
    pub max_response_ms: u64,
    /// Per-lift utilization (0.0..1.0), indexed by lift id.
    pub utilization_by_lift: Vec<f64>,
    /// Mean utilization across the fleet (0.0..1.0).
    pub avg_utilization: f64,
}

impl DispatchKpi {
    /// Computes KPIs from journey records.
    ///
    /// # Arguments
    /// * `records` - Completed journeys.
    /// * `lift_count` - Fleet size (lifts without records count as 0% busy).
    /// * `horizon_ms` - Observation window for utilization.
    pub fn calculate(records: &[JourneyRecord], lift_count: usize, horizon_ms: u64) -> Self {
        let mut busy_by_lift = vec![0u64; lift_count];
        let mut total_wait: u64 = 0;
        let mut total_response: u64 = 0;
        let mut max_wait: u64 = 0;
        let mut max_response: u64 = 0;

        for record in records {
            total_wait += record.wait_ms();
            total_response += record.response_ms();
            max_wait = max_wait.max(record.wait_ms());
            max_response = max_response.max(record.response_ms());

            if let Some(busy) = busy_by_lift.get_mut(record.lift) {
                *busy += record.busy_ms();
            }
        }

        let n = records.len();
        let mean = |total: u64| if n == 0 { 0.0 } else { total as f64 / n as f64 };

        let utilization_by_lift: Vec<f64> = busy_by_lift
            .iter()
            .map(|&busy| {
                if horizon_ms == 0 {
                    0.0
                } else {
                    (busy as f64 / horizon_ms as f64).min(1.0)
                }
            })
            .collect();

        let avg_utilization = if utilization_by_lift.is_empty() {
            0.0
        } else {
            utilization_by_lift.iter().sum::<f64>() / utilization_by_lift.len() as f64
        };

        Self {
            completed_journeys: n,
            avg_wait_ms: mean(total_wait),
            max_wait_ms: max_wait,
            avg_response_ms: mean(total_response),
            max_response_ms: max_response,
            utilization_by_lift,
            avg_utilization,
        }
    }

    /// Whether service meets the given thresholds.
    pub fn meets_thresholds(&self, max_wait_ms: u64, min_utilization: f64) -> bool {
        self.max_wait_ms <= max_wait_ms && self.avg_utilization >= min_utilization
    }
}
