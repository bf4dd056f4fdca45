//! The `Sim` struct and its turn loop.

use std::collections::BTreeSet;

use fm_core::{EmpireId, FleetId, SimConfig, SystemId, Turn, TurnClock};
use fm_fleet::{FleetStore, TravelRoute};
use fm_galaxy::{Knowledge, Router, StarGraph};
use fm_movement::{
    MovementContext, MovementError, MovementEvent, advance_one_turn, current_route, eta,
    move_path, trim_route,
};

use crate::{Forecast, SimError, SimObserver, SimResult};

// ── TurnSummary ───────────────────────────────────────────────────────────────

/// Aggregate counters for one processed turn.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSummary {
    pub turn:       Turn,
    /// Fleets that covered distance or departed a system.
    pub moved:      usize,
    /// Fleets that reached their final destination.
    pub arrived:    usize,
    /// Fleets that refuelled while holding position.
    pub resupplied: usize,
    /// Fleets whose destination could not be routed to this turn.
    pub blocked:    usize,
    /// Systems explored for the first time (per empire).
    pub explored:   usize,
    /// Total distance covered by all fleets.
    pub distance:   f64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main turn processor.
///
/// `Sim<R>` owns the galaxy, the empires' knowledge, and every fleet and
/// ship, and drives the per-turn pipeline described in the crate docs.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    /// Run configuration (total turns, snapshot interval, movement rules).
    pub config: SimConfig,

    /// Tracks the turn about to be processed.
    pub clock: TurnClock,

    /// Systems and lanes.  Fixed for the lifetime of the sim.
    pub graph: StarGraph,

    /// Per-empire known lanes, explored systems, visibility and supply.
    /// Callers may update supply and visibility between turns.
    pub knowledge: Knowledge,

    /// Every fleet and ship.
    pub fleets: FleetStore,

    /// Shortest-path oracle used for every route.
    pub router: R,
}

impl<R: Router> Sim<R> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current turn to `config.total_turns`.
    ///
    /// Calls observer hooks at every turn boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current.0 < self.config.total_turns {
            self.run_turn(observer)?;
        }
        observer.on_sim_end(self.clock.current);
        Ok(())
    }

    /// Run exactly `n` turns from the current one (ignores `total_turns`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_turns<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_turn(observer)?;
        }
        Ok(())
    }

    /// Process the current turn and advance the clock.
    pub fn run_turn<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TurnSummary> {
        let now = self.clock.current;
        observer.on_turn_start(now);
        let summary = self.process_turn(now, observer)?;
        observer.on_turn_end(now, &summary);
        if self.config.snapshot_due(now) {
            observer.on_snapshot(now, &self.fleets);
        }
        tracing::info!(
            turn = now.0,
            moved = summary.moved,
            arrived = summary.arrived,
            explored = summary.explored,
            "turn processed"
        );
        self.clock.advance();
        Ok(summary)
    }

    // ── Orders & queries ──────────────────────────────────────────────────

    /// Order `fleet` to `destination`.  Takes effect in the next movement
    /// phase.
    ///
    /// # Errors
    ///
    /// Rejected orders ([`MovementError::is_usage`]) and unreachable
    /// destinations leave the fleet unchanged.
    pub fn order_move(&mut self, fleet: FleetId, destination: SystemId) -> SimResult<()> {
        let ctx = MovementContext::new(&self.graph, &self.knowledge, &self.router, &self.config.rules);
        fm_movement::order_move(&mut self.fleets, fleet, destination, &ctx).map_err(|e| {
            tracing::warn!(fleet = %fleet, destination = %destination, error = %e, "move order rejected");
            SimError::from(e)
        })
    }

    /// The route `fleet` would follow now, computed fresh if its cache is
    /// stale.  Never writes to the cache.
    pub fn travel_route(&self, fleet: FleetId) -> SimResult<TravelRoute> {
        Ok(current_route(self.fleets.fleet(fleet)?, &self.context())?)
    }

    /// The part of `fleet`'s route that `observer` may see.
    pub fn visible_route(
        &self,
        fleet:                FleetId,
        observer:             Option<EmpireId>,
        apparent_destination: Option<SystemId>,
    ) -> SimResult<TravelRoute> {
        let f = self.fleets.fleet(fleet)?;
        Ok(trim_route(f, apparent_destination, observer, &self.knowledge)?)
    }

    /// Route, waypoints and ETAs for one fleet.
    ///
    /// A destination the fleet cannot currently route to forecasts as an
    /// empty route with [`Eta::Unknown`](fm_movement::Eta::Unknown).
    pub fn forecast(&self, fleet: FleetId) -> SimResult<Forecast> {
        let ctx = self.context();
        let route = match current_route(self.fleets.fleet(fleet)?, &ctx) {
            Ok(route) => route,
            Err(MovementError::Routing(e)) => {
                tracing::debug!(fleet = %fleet, error = %e, "no route to forecast");
                TravelRoute::Empty
            }
            Err(e) => return Err(e.into()),
        };
        let path = move_path(&self.fleets, fleet, &route, &ctx)?;
        let (eta, next_eta) = eta(&path);
        Ok(Forecast { fleet, route, path, eta, next_eta })
    }

    /// Forecasts for every fleet, in ascending id order.
    ///
    /// With the `parallel` Cargo feature the forecasts are computed on
    /// Rayon's thread pool.
    pub fn forecast_all(&self) -> SimResult<Vec<Forecast>> {
        let ids = self.fleets.fleet_ids();

        #[cfg(not(feature = "parallel"))]
        {
            ids.iter().map(|&id| self.forecast(id)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            ids.par_iter().map(|&id| self.forecast(id)).collect()
        }
    }

    fn context(&self) -> MovementContext<'_> {
        MovementContext::new(&self.graph, &self.knowledge, &self.router, &self.config.rules)
    }

    // ── Core turn processing ──────────────────────────────────────────────

    fn process_turn<O: SimObserver>(&mut self, now: Turn, observer: &mut O) -> SimResult<TurnSummary> {
        let mut summary = TurnSummary { turn: now, ..TurnSummary::default() };

        // ── Phase 1: stale every route ────────────────────────────────────
        self.fleets.invalidate_routes();

        // ── Phase 2: movement ─────────────────────────────────────────────
        //
        // Knowledge is read-only here; exploration is collected and applied
        // in phase 3.
        let mut events = Vec::new();
        {
            let ctx = MovementContext::new(&self.graph, &self.knowledge, &self.router, &self.config.rules);
            for id in self.fleets.fleet_ids() {
                let outcome = match advance_one_turn(&mut self.fleets, id, &ctx) {
                    Ok(o) => o,
                    Err(e @ MovementError::Routing(_)) => {
                        // Destination no longer reachable: the fleet holds
                        // position and keeps its order.
                        tracing::warn!(fleet = %id, error = %e, "route failed");
                        summary.blocked += 1;
                        continue;
                    }
                    Err(e) if e.is_usage() => {
                        tracing::warn!(fleet = %id, error = %e, "movement rejected");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                if outcome.resupplied {
                    summary.resupplied += 1;
                }
                if outcome.moved() || outcome.jumps > 0 {
                    summary.moved += 1;
                    summary.distance += outcome.distance;
                    observer.on_fleet_moved(now, id, &outcome);
                }
                if outcome.arrived.is_some() {
                    summary.arrived += 1;
                }
                events.extend(outcome.events);
            }
        }

        // ── Phase 3: apply exploration ────────────────────────────────────
        for event in events {
            match event {
                MovementEvent::Explored { empire, system } => {
                    if self.knowledge.explore(empire, system, &self.graph) {
                        summary.explored += 1;
                        tracing::info!(empire = %empire, system = %system, "system explored");
                        observer.on_explored(now, empire, system);
                    }
                }
            }
        }

        // ── Phase 4: state-changed notifications ──────────────────────────
        let changed: BTreeSet<FleetId> = self.fleets.drain_changes().into_iter().collect();
        for id in changed {
            observer.on_fleet_changed(now, id);
        }

        Ok(summary)
    }
}
