//! Movement rules and run configuration.
//!
//! Both structs are plain data.  Applications typically deserialize a
//! `SimConfig` from JSON (enable the `serde` feature) and hand it to the turn
//! processor; every client in a multiplayer session must use identical
//! `MovementRules` or forecasts will disagree with the server.

use crate::{CoreError, CoreResult};

// ── MovementRules ─────────────────────────────────────────────────────────────

/// Numeric constants shared by the forecast and the authoritative movement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementRules {
    /// Distance below which a fleet counts as having reached a system, and
    /// the smallest per-turn movement budget worth simulating.
    pub epsilon: f64,

    /// Upper bound on fleet speed regardless of member ships.
    pub max_ship_speed: f64,

    /// Fuel deducted from every ship when the fleet departs a system.
    pub fuel_per_jump: f64,

    /// Maximum number of turns the path forecast simulates before giving up.
    pub horizon_turns: u32,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            epsilon:        0.1,
            max_ship_speed: 500.0,
            fuel_per_jump:  1.0,
            horizon_turns:  200,
        }
    }
}

impl MovementRules {
    /// Reject rule sets that would make the movement loops misbehave.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(CoreError::Config(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        if !(self.max_ship_speed.is_finite() && self.max_ship_speed >= 0.0) {
            return Err(CoreError::Config(format!(
                "max_ship_speed must be finite and non-negative, got {}",
                self.max_ship_speed
            )));
        }
        if !(self.fuel_per_jump.is_finite() && self.fuel_per_jump > 0.0) {
            return Err(CoreError::Config(format!(
                "fuel_per_jump must be finite and positive, got {}",
                self.fuel_per_jump
            )));
        }
        if self.horizon_turns == 0 {
            return Err(CoreError::Config("horizon_turns must be at least 1".into()));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total turns processed by a full run of the turn processor.
    pub total_turns: u32,

    /// Emit a snapshot every N turns.  0 disables snapshots.
    pub output_interval_turns: u32,

    /// Movement constants.
    pub rules: MovementRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_turns:           50,
            output_interval_turns: 1,
            rules:                 MovementRules::default(),
        }
    }
}

impl SimConfig {
    /// Validate the run configuration, including its rules.
    pub fn validate(&self) -> CoreResult<()> {
        self.rules.validate()
    }

    /// `true` if a snapshot is due at `turn`.
    #[inline]
    pub fn snapshot_due(&self, turn: crate::Turn) -> bool {
        self.output_interval_turns > 0 && turn.0.is_multiple_of(self.output_interval_turns)
    }
}
