//! Fluent builder for constructing a [`Sim`].

use fm_core::{CoreError, SimConfig, Turn, TurnClock};
use fm_fleet::FleetStore;
use fm_galaxy::{Knowledge, Router, StarGraph};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total turns, snapshot interval, movement rules
/// - [`StarGraph`]: from [`fm_galaxy::StarGraphBuilder`] or
///   [`fm_galaxy::generate_galaxy`]
/// - `R: Router`: the routing algorithm (e.g. [`fm_galaxy::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.knowledge(k)`      | `Knowledge::new()` (nothing known)       |
/// | `.fleets(s)`         | `FleetStore::new(&config.rules)` (empty) |
/// | `.starting_turn(t)`  | `Turn(0)`                                |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, graph, DijkstraRouter)
///     .knowledge(knowledge)
///     .fleets(store)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router> {
    config:    SimConfig,
    graph:     StarGraph,
    router:    R,
    knowledge: Option<Knowledge>,
    fleets:    Option<FleetStore>,
    start:     Turn,
}

impl<R: Router> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, graph: StarGraph, router: R) -> Self {
        Self {
            config,
            graph,
            router,
            knowledge: None,
            fleets:    None,
            start:     Turn::ZERO,
        }
    }

    /// Supply the empires' starting knowledge.
    pub fn knowledge(mut self, knowledge: Knowledge) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Supply pre-populated fleets and ships.
    ///
    /// The store must have been created with the same movement rules as the
    /// config so fleet speeds are capped consistently.
    pub fn fleets(mut self, fleets: FleetStore) -> Self {
        self.fleets = Some(fleets);
        self
    }

    /// Resume from `turn` (e.g. a loaded game).
    pub fn starting_turn(mut self, turn: Turn) -> Self {
        self.start = turn;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] for invalid rules or a fleet store built with a
    ///   different speed cap.
    /// - [`SimError::Invariant`] if a fleet or ship refers to a system that is
    ///   not in the graph.
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let fleets = match self.fleets {
            Some(store) => {
                if store.max_ship_speed() != self.config.rules.max_ship_speed {
                    return Err(SimError::Config(format!(
                        "fleet store speed cap {} does not match rules ({})",
                        store.max_ship_speed(),
                        self.config.rules.max_ship_speed
                    )));
                }
                store
            }
            None => FleetStore::new(&self.config.rules),
        };

        // ── Every referenced system must exist ────────────────────────────
        for fleet in fleets.fleets() {
            let referenced = [fleet.system, fleet.destination, fleet.prev_system, fleet.next_system];
            if let Some(missing) = referenced.into_iter().flatten().find(|s| !self.graph.contains(*s)) {
                return Err(CoreError::SystemNotFound(missing).into());
            }
        }
        for ship in fleets.ships().values() {
            if let Some(s) = ship.system
                && !self.graph.contains(s)
            {
                return Err(CoreError::SystemNotFound(s).into());
            }
        }

        tracing::debug!(
            systems = self.graph.system_count(),
            lanes = self.graph.lane_count(),
            fleets = fleets.fleet_count(),
            start = self.start.0,
            "sim built"
        );

        Ok(Sim {
            clock:     TurnClock::starting_at(self.start),
            config:    self.config,
            graph:     self.graph,
            knowledge: self.knowledge.unwrap_or_default(),
            fleets,
            router:    self.router,
        })
    }
}
