//! Simulation observer trait for progress reporting and data collection.

use fm_core::{EmpireId, FleetId, SystemId, Turn};
use fm_fleet::FleetStore;
use fm_movement::MovementOutcome;

use crate::TurnSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// turn pipeline.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: arrival logger
///
/// ```rust,ignore
/// struct Arrivals(Vec<(Turn, FleetId)>);
///
/// impl SimObserver for Arrivals {
///     fn on_fleet_moved(&mut self, turn: Turn, fleet: FleetId, outcome: &MovementOutcome) {
///         if outcome.arrived.is_some() {
///             self.0.push((turn, fleet));
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each turn, before any processing.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called for every fleet that covered distance or departed a system
    /// during the movement phase.
    fn on_fleet_moved(&mut self, _turn: Turn, _fleet: FleetId, _outcome: &MovementOutcome) {}

    /// Called when `empire` explores `system` for the first time.
    fn on_explored(&mut self, _turn: Turn, _empire: EmpireId, _system: SystemId) {}

    /// Called once per fleet whose state changed this turn (orders given
    /// between turns included), in ascending id order.
    fn on_fleet_changed(&mut self, _turn: Turn, _fleet: FleetId) {}

    /// Called at the end of each turn.
    fn on_turn_end(&mut self, _turn: Turn, _summary: &TurnSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_turns`
    /// turns) with read-only access to every fleet and ship.
    fn on_snapshot(&mut self, _turn: Turn, _fleets: &FleetStore) {}

    /// Called once after the final turn completes.
    fn on_sim_end(&mut self, _final_turn: Turn) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
