//! Simulation configuration.
//!
//! Serialized field names follow the presentation layer's option names
//! (`fleetSize`, `floorPositions`, `holdDurationMs`, ...), so a JSON
//! document written for the front end loads as-is.

use serde::{Deserialize, Serialize};

use crate::dispatching::PolicyKind;
use crate::error::ConfigError;
use crate::models::FloorIndex;
use crate::validation::validate_config;

/// Default lift speed (position units per second).
pub const DEFAULT_SPEED: f64 = 40.0;
/// Default pause at the called floor before the lift is callable again (ms).
pub const DEFAULT_HOLD_DURATION_MS: u64 = 1_500;
/// Default wait-queue retry tick (ms).
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1_000;

/// Options recognized by the dispatch core.
///
/// # Example
/// ```
/// use u_lift::config::SimulationConfig;
/// use u_lift::dispatching::PolicyKind;
///
/// let config = SimulationConfig::from_json_str(r#"{
///     "fleetSize": 2,
///     "floorPositions": [0, 120, 240],
///     "dispatchPolicy": "avoidRepeatRoundRobin"
/// }"#).unwrap();
///
/// assert_eq!(config.fleet_size, 2);
/// assert_eq!(config.dispatch_policy, PolicyKind::AvoidRepeatRoundRobin);
/// assert_eq!(config.hold_duration_ms, 1_500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Number of lifts.
    pub fleet_size: usize,
    /// Shaft position of each floor, indexed by floor.
    pub floor_positions: Vec<f64>,
    /// Travel speed (position units per second).
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Hold at the called floor after arrival (ms).
    #[serde(default = "default_hold_duration_ms")]
    pub hold_duration_ms: u64,
    /// Wait-queue retry tick (ms).
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Lift selection policy.
    #[serde(default)]
    pub dispatch_policy: PolicyKind,
    /// Where every lift starts. `None` = position of floor 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_position: Option<f64>,
}

fn default_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_hold_duration_ms() -> u64 {
    DEFAULT_HOLD_DURATION_MS
}

fn default_retry_interval_ms() -> u64 {
    DEFAULT_RETRY_INTERVAL_MS
}

impl SimulationConfig {
    /// Creates a configuration with default timing and the nearest-idle policy.
    pub fn new(fleet_size: usize, floor_positions: Vec<f64>) -> Self {
        Self {
            fleet_size,
            floor_positions,
            speed: DEFAULT_SPEED,
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            dispatch_policy: PolicyKind::default(),
            initial_position: None,
        }
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Returns `self` if it passes validation.
    pub fn validated(self) -> Result<Self, ConfigError> {
        validate_config(&self).map_err(ConfigError::Invalid)?;
        Ok(self)
    }

    /// Sets the travel speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the hold duration.
    pub fn with_hold_duration_ms(mut self, hold_duration_ms: u64) -> Self {
        self.hold_duration_ms = hold_duration_ms;
        self
    }

    /// Sets the retry tick interval.
    pub fn with_retry_interval_ms(mut self, retry_interval_ms: u64) -> Self {
        self.retry_interval_ms = retry_interval_ms;
        self
    }

    /// Sets the dispatch policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.dispatch_policy = policy;
        self
    }

    /// Sets the lifts' starting position.
    pub fn with_initial_position(mut self, position: f64) -> Self {
        self.initial_position = Some(position);
        self
    }

    /// Number of floors.
    pub fn floor_count(&self) -> usize {
        self.floor_positions.len()
    }

    /// Position of a floor, `None` if out of range.
    pub fn floor_position(&self, floor: FloorIndex) -> Option<f64> {
        self.floor_positions.get(floor).copied()
    }

    /// Starting position of every lift.
    pub fn resolved_initial_position(&self) -> f64 {
        self.initial_position
            .or_else(|| self.floor_positions.first().copied())
            .unwrap_or(0.0)
    }
}
