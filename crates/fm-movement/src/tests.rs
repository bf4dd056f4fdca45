//! Unit tests for fm-movement.
//!
//! Every test runs on the same small hand-built galaxy:
//!
//! ```text
//!                 D (250,300)
//!                 │
//!   A (0,0) ──── B (250,0) ──── C (500,0)
//! ```

#[cfg(test)]
mod helpers {
    use fm_core::{EmpireId, FleetId, MovementRules, Point, ShipId, SystemId};
    use fm_fleet::{FleetStore, Ship};
    use fm_galaxy::{Knowledge, StarGraph, StarGraphBuilder};

    pub const OWNER: EmpireId = EmpireId(1);
    pub const RIVAL: EmpireId = EmpireId(2);

    pub const A: SystemId = SystemId(0);
    pub const B: SystemId = SystemId(1);
    pub const C: SystemId = SystemId(2);
    pub const D: SystemId = SystemId(3);

    pub struct World {
        pub graph:     StarGraph,
        pub knowledge: Knowledge,
        pub rules:     MovementRules,
        pub store:     FleetStore,
        pub fleet:     FleetId,
    }

    pub fn galaxy() -> StarGraph {
        let mut b = StarGraphBuilder::new();
        b.add_system("A", Point::new(0.0, 0.0));
        b.add_system("B", Point::new(250.0, 0.0));
        b.add_system("C", Point::new(500.0, 0.0));
        b.add_system("D", Point::new(250.0, 300.0));
        b.add_lane(A, B);
        b.add_lane(B, C);
        b.add_lane(B, D);
        b.build()
    }

    /// One fleet owned by `OWNER` at A holding a single ship.  `OWNER` knows
    /// every lane; nobody supplies anything.
    pub fn world(speed: f64, fuel: f64, max_fuel: f64) -> World {
        world_owned(Some(OWNER), speed, fuel, max_fuel)
    }

    pub fn world_owned(owner: Option<EmpireId>, speed: f64, fuel: f64, max_fuel: f64) -> World {
        let graph = galaxy();
        let mut knowledge = Knowledge::new();
        for s in [A, B, C, D] {
            knowledge.reveal_lanes_of(OWNER, s, &graph);
        }
        let rules = MovementRules::default();
        let mut store = FleetStore::new(&rules);
        let fleet = store.create_fleet("Scouts", owner, Point::new(0.0, 0.0), Some(A));
        let ship = store.insert_ship(
            Ship::new(ShipId(0), owner, "Scout")
                .with_speed(speed)
                .with_fuel(fuel, max_fuel),
        );
        store.add_ship(fleet, ship).unwrap();
        store.drain_changes();
        World { graph, knowledge, rules, store, fleet }
    }

    /// Put the fleet mid-lane at `position`, heading from `prev` to `next`.
    pub fn place_in_transit(w: &mut World, prev: SystemId, next: SystemId, position: Point) {
        w.store.leave_system(w.fleet).unwrap();
        w.store.move_fleet_to(w.fleet, position).unwrap();
        let f = w.store.fleet_mut(w.fleet).unwrap();
        f.prev_system = Some(prev);
        f.next_system = Some(next);
    }
}

// ── ETA projection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod eta {
    use fm_core::{Point, SystemId};
    use crate::{Eta, MovePathNode, eta};

    fn node(eta: Eta, system: Option<SystemId>) -> MovePathNode {
        MovePathNode { position: Point::default(), turn_end: true, eta, system }
    }

    #[test]
    fn empty_path_is_unknown() {
        assert_eq!(eta(&[]), (Eta::Unknown, Eta::Unknown));
    }

    #[test]
    fn single_node_is_used_for_both() {
        assert_eq!(eta(&[node(Eta::Never, None)]), (Eta::Never, Eta::Never));
    }

    #[test]
    fn next_stop_is_first_system_after_start() {
        let path = [
            node(Eta::Turns(0), Some(SystemId(0))),
            node(Eta::Turns(1), None),
            node(Eta::Turns(2), Some(SystemId(1))),
            node(Eta::Turns(4), Some(SystemId(2))),
        ];
        assert_eq!(eta(&path), (Eta::Turns(4), Eta::Turns(2)));
    }

    #[test]
    fn falls_back_to_final_eta() {
        let path = [node(Eta::Turns(0), Some(SystemId(0))), node(Eta::Turns(201), None)];
        assert_eq!(eta(&path), (Eta::Turns(201), Eta::Turns(201)));
    }

    #[test]
    fn wire_codes() {
        assert_eq!(Eta::Unknown.code(), 1 << 30);
        assert_eq!(Eta::OutOfRange.code(), (1 << 30) - 1);
        assert_eq!(Eta::Never.code(), (1 << 30) - 2);
        assert_eq!(Eta::Turns(7).code(), 7);
        for e in [Eta::Unknown, Eta::OutOfRange, Eta::Never, Eta::Turns(3)] {
            assert_eq!(Eta::from_code(e.code()), e);
        }
        assert_eq!(Eta::from_code(-1), Eta::Unknown);
    }
}

// ── Routing & orders ──────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use fm_core::{Point, SystemId};
    use fm_fleet::TravelRoute;
    use fm_galaxy::DijkstraRouter;
    use super::helpers::*;
    use crate::route::{compute_route_with, set_route_with};
    use crate::{
        MovementContext, MovementError, ReversalPolicy, compute_route, current_route,
        ensure_route, order_move, set_route,
    };

    #[test]
    fn order_from_a_system() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();

        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.final_destination(), Some(C));
        assert_eq!(f.previous_system(), Some(A));
        assert_eq!(f.next_system(), Some(B));
        assert_eq!(f.travel_route(), &TravelRoute::Systems(vec![A, B, C]));
        assert!((f.route.distance() - 500.0).abs() < 1e-9);
        assert_eq!(w.store.pending_changes(), &[w.fleet]);
    }

    #[test]
    fn order_to_current_system_stops() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        order_move(&mut w.store, w.fleet, A, &ctx).unwrap();

        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.final_destination(), None);
        assert_eq!(f.previous_system(), None);
        assert_eq!(f.next_system(), None);
        assert!(f.travel_route().is_empty());
    }

    #[test]
    fn empty_route_is_rejected() {
        let mut w = world(100.0, 3.0, 3.0);
        let err = set_route(&mut w.store, w.fleet, vec![], 0.0, &w.graph).unwrap_err();
        assert!(matches!(err, MovementError::EmptyRoute(_)));
        assert!(err.is_usage());
        assert!(w.store.pending_changes().is_empty());
    }

    #[test]
    fn unknown_current_route_is_rejected() {
        let mut w = world(100.0, 3.0, 3.0);
        w.store.fleet_mut(w.fleet).unwrap().route.set(TravelRoute::Unknown, 0.0);
        let err = set_route(&mut w.store, w.fleet, vec![A, B], 250.0, &w.graph).unwrap_err();
        assert!(matches!(err, MovementError::UnknownRoute(_)));
    }

    #[test]
    fn reversal_mid_leg_is_rejected() {
        let mut w = world(100.0, 3.0, 3.0);
        place_in_transit(&mut w, A, B, Point::new(100.0, 0.0));
        let before = w.store.fleet(w.fleet).unwrap().clone();

        let err = set_route(&mut w.store, w.fleet, vec![A], 100.0, &w.graph).unwrap_err();
        assert!(matches!(err, MovementError::DirectionReversal { toward, .. } if toward == A));
        assert!(err.is_usage());
        assert_eq!(w.store.fleet(w.fleet).unwrap(), &before);
    }

    #[test]
    fn turning_back_goes_through_next_system() {
        let mut w = world(100.0, 3.0, 3.0);
        place_in_transit(&mut w, A, B, Point::new(100.0, 0.0));
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, A, &ctx).unwrap();

        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.travel_route().systems(), &[B, A]);
        assert_eq!(f.next_system(), Some(B));
        assert_eq!(f.previous_system(), Some(A));
        // 150 left on the current leg plus 250 back.
        assert!((f.route.distance() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn reversal_policy_allowed_picks_shorter_direction() {
        let mut w = world(100.0, 3.0, 3.0);
        place_in_transit(&mut w, A, B, Point::new(100.0, 0.0));
        w.store.fleet_mut(w.fleet).unwrap().destination = Some(A);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);

        let f = w.store.fleet(w.fleet).unwrap();
        let (forbidden, d1) = compute_route_with(f, &ctx, ReversalPolicy::Forbidden).unwrap();
        let (allowed, d2) = compute_route_with(f, &ctx, ReversalPolicy::Allowed).unwrap();
        assert_eq!(forbidden.systems(), &[B, A]);
        assert!((d1 - 400.0).abs() < 1e-9);
        assert_eq!(allowed.systems(), &[A]);
        assert!((d2 - 100.0).abs() < 1e-9);

        set_route_with(&mut w.store, w.fleet, vec![A], 100.0, &w.graph, ReversalPolicy::Allowed)
            .unwrap();
        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.previous_system(), Some(B));
        assert_eq!(f.next_system(), Some(A));
    }

    #[test]
    fn unowned_fleet_routes_with_full_knowledge() {
        let mut w = world_owned(None, 100.0, 3.0, 3.0);
        w.knowledge = fm_galaxy::Knowledge::new();
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, D, &ctx).unwrap();
        assert_eq!(w.store.fleet(w.fleet).unwrap().travel_route().systems(), &[A, B, D]);
    }

    #[test]
    fn unknown_lanes_are_a_routing_error() {
        let mut w = world(100.0, 3.0, 3.0);
        w.knowledge = fm_galaxy::Knowledge::new();
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let err = order_move(&mut w.store, w.fleet, C, &ctx).unwrap_err();
        assert!(matches!(err, MovementError::Routing(_)));
        assert!(!err.is_usage());
    }

    #[test]
    fn unknown_system_is_an_invariant_error() {
        let mut w = world(100.0, 3.0, 3.0);
        let err = set_route(&mut w.store, w.fleet, vec![A, SystemId(40)], 1.0, &w.graph).unwrap_err();
        assert!(matches!(err, MovementError::Invariant(_)));
    }

    #[test]
    fn no_destination_means_no_route() {
        let w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let f = w.store.fleet(w.fleet).unwrap();
        assert!(matches!(compute_route(f, &ctx), Err(MovementError::NoDestination(_))));
        assert_eq!(current_route(f, &ctx).unwrap(), TravelRoute::Empty);
    }

    #[test]
    fn invalidated_route_is_rebuilt_by_ensure_route() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        let before = w.store.fleet(w.fleet).unwrap().route.clone();

        w.store.invalidate_routes();
        let f = w.store.fleet(w.fleet).unwrap();
        assert!(f.travel_route().is_empty());
        assert_eq!(current_route(f, &ctx).unwrap(), before.route().clone());
        assert!(w.store.fleet(w.fleet).unwrap().route.is_stale(), "current_route must not write");

        ensure_route(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(w.store.fleet(w.fleet).unwrap().route, before);
    }
}

// ── Path forecast ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use fm_core::Point;
    use fm_fleet::TravelRoute;
    use fm_galaxy::DijkstraRouter;
    use super::helpers::*;
    use crate::{Eta, MovementContext, eta, move_path, order_move};

    #[test]
    fn nowhere_to_go_is_empty() {
        let w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        for route in [
            TravelRoute::Empty,
            TravelRoute::Unknown,
            TravelRoute::Systems(vec![B, B]),
            TravelRoute::Systems(vec![A]),
        ] {
            assert!(move_path(&w.store, w.fleet, &route, &ctx).unwrap().is_empty(), "{route:?}");
        }
    }

    #[test]
    fn zero_speed_never_arrives() {
        let w = world(0.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B]), &ctx).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].eta, Eta::Never);
        assert_eq!(path[0].system, Some(A));
    }

    #[test]
    fn empty_tank_without_supply_is_out_of_range() {
        let w = world(100.0, 0.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B]), &ctx).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].eta, Eta::OutOfRange);
    }

    #[test]
    fn simple_leg_takes_three_turns() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, B, &ctx).unwrap();

        let route = w.store.fleet(w.fleet).unwrap().travel_route().clone();
        let path = move_path(&w.store, w.fleet, &route, &ctx).unwrap();
        assert_eq!(path.first().map(|n| n.system), Some(Some(A)));
        let last = path.last().unwrap();
        assert_eq!(last.system, Some(B));
        assert_eq!(last.position, Point::new(250.0, 0.0));
        assert!(last.turn_end);
        assert_eq!(eta(&path), (Eta::Turns(3), Eta::Turns(3)));
    }

    #[test]
    fn forecast_is_pure_and_repeatable() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        let fleet_before = w.store.fleet(w.fleet).unwrap().clone();
        let ships_before = w.store.ships().clone();

        let route = fleet_before.travel_route().clone();
        let first = move_path(&w.store, w.fleet, &route, &ctx).unwrap();
        let second = move_path(&w.store, w.fleet, &route, &ctx).unwrap();
        assert_eq!(first, second);
        assert_eq!(w.store.fleet(w.fleet).unwrap(), &fleet_before);
        assert_eq!(w.store.ships(), &ships_before);
    }

    #[test]
    fn waits_a_turn_to_refuel_at_supply() {
        let mut w = world(100.0, 0.0, 3.0);
        w.knowledge.set_supply_range(OWNER, [A]);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B]), &ctx).unwrap();
        assert_eq!(eta(&path).0, Eta::Turns(4));
    }

    #[test]
    fn runs_dry_at_unsupplied_waypoint() {
        let w = world(100.0, 1.0, 1.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B, C]), &ctx).unwrap();
        let last = path.last().unwrap();
        assert_eq!(last.eta, Eta::OutOfRange);
        assert_eq!(last.system, Some(B));
        assert!(last.turn_end);
        assert_eq!(eta(&path), (Eta::OutOfRange, Eta::Turns(3)));
    }

    #[test]
    fn stops_at_the_horizon() {
        let w = world(0.2, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B, C]), &ctx).unwrap();
        let last = path.last().unwrap();
        assert_eq!(last.eta, Eta::Turns(w.rules.horizon_turns + 1));
        assert!(last.turn_end);
        assert_eq!(last.system, None);
    }

    #[test]
    fn every_turn_boundary_is_marked() {
        let w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let path = move_path(&w.store, w.fleet, &TravelRoute::Systems(vec![A, B]), &ctx).unwrap();
        let ends: Vec<_> = path
            .iter()
            .filter(|n| n.turn_end)
            .map(|n| (n.position.x.round() as i64, n.eta))
            .collect();
        assert_eq!(
            ends,
            vec![
                (0, Eta::Turns(0)),
                (100, Eta::Turns(1)),
                (200, Eta::Turns(2)),
                (250, Eta::Turns(3)),
            ]
        );
    }
}

// ── Authoritative movement ────────────────────────────────────────────────────

#[cfg(test)]
mod executor {
    use fm_core::{Point, SystemId};
    use fm_fleet::{ObjectRef, TravelRoute};
    use fm_galaxy::DijkstraRouter;
    use super::helpers::*;
    use crate::{
        Eta, MovementContext, MovementEvent, advance_one_turn, current_route, eta, move_path,
        order_move,
    };

    #[test]
    fn simple_leg_arrives_on_turn_three() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, B, &ctx).unwrap();

        let t1 = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(t1.jumps, 1);
        assert!((t1.distance - 100.0).abs() < 1e-9);
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 2.0);
        assert_eq!(w.store.fleet(w.fleet).unwrap().system, None);
        assert!(!w.store.occupancy().contains(A, ObjectRef::Fleet(w.fleet)));

        let t2 = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(t2.jumps, 0);
        assert!((t2.distance - 100.0).abs() < 1e-9);
        assert_eq!(t2.arrived, None);

        let t3 = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(t3.arrived, Some(B));
        assert!((t3.distance - 50.0).abs() < 1e-9);
        assert_eq!(t3.events, vec![MovementEvent::Explored { empire: OWNER, system: B }]);

        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.system, Some(B));
        assert_eq!(f.position, Point::new(250.0, 0.0));
        assert_eq!(f.final_destination(), None);
        assert_eq!(f.previous_system(), None);
        assert_eq!(f.next_system(), None);
        assert!(f.travel_route().is_empty());
        assert_eq!(f.route.distance(), 0.0);
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 2.0);
        assert!(w.store.occupancy().contains(B, ObjectRef::Fleet(w.fleet)));
        let ship = w.store.ship(fm_core::ShipId(0)).unwrap();
        assert_eq!(ship.position, Point::new(250.0, 0.0));
        assert_eq!(ship.system, Some(B));
    }

    #[test]
    fn remaining_distance_never_increases() {
        let mut w = world(70.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();

        let mut last = w.store.fleet(w.fleet).unwrap().route.distance();
        for _ in 0..20 {
            advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
            let f = w.store.fleet(w.fleet).unwrap();
            if f.final_destination().is_none() {
                break;
            }
            let d = f.route.distance();
            assert!(d <= last + 1e-9, "{d} > {last}");
            last = d;
        }
        assert_eq!(w.store.fleet(w.fleet).unwrap().system, Some(C));
    }

    #[test]
    fn idle_fleet_refuels_at_supply() {
        let mut w = world(100.0, 0.0, 3.0);
        w.knowledge.set_supply_range(OWNER, [A]);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);

        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert!(out.resupplied);
        assert!(!out.moved());
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 3.0);
        assert_eq!(w.store.fleet(w.fleet).unwrap().position, Point::new(0.0, 0.0));
    }

    #[test]
    fn idle_fleet_without_supply_does_nothing() {
        let mut w = world(100.0, 0.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert!(!out.resupplied);
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 0.0);
    }

    #[test]
    fn passes_through_waypoints_in_one_turn() {
        let mut w = world(300.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();

        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(out.reached, vec![B]);
        assert_eq!(out.jumps, 2);
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 1.0);
        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.system, None);
        assert_eq!(f.previous_system(), Some(B));
        assert_eq!(f.next_system(), Some(C));
        assert!((f.position.x - 300.0).abs() < 1e-9);
    }

    #[test]
    fn halts_at_waypoint_when_out_of_fuel() {
        let mut w = world(300.0, 1.0, 1.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();

        advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.system, Some(B));
        assert_eq!(f.final_destination(), Some(C));
        assert!(w.store.occupancy().contains(B, ObjectRef::Fleet(w.fleet)));

        // Stuck: B is not supplied.
        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert!(!out.moved());
        assert_eq!(w.store.fleet(w.fleet).unwrap().system, Some(B));
    }

    #[test]
    fn unowned_fleet_does_not_explore() {
        let mut w = world_owned(None, 500.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, B, &ctx).unwrap();
        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(out.arrived, Some(B));
        assert!(out.events.is_empty());
    }

    #[test]
    fn stale_cache_is_rebuilt_before_moving() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();

        w.store.invalidate_routes();
        advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        let f = w.store.fleet(w.fleet).unwrap();
        assert!((f.position.x - 200.0).abs() < 1e-9);
        assert_eq!(f.travel_route(), &TravelRoute::Systems(vec![B, C]));
        assert!((f.route.distance() - 300.0).abs() < 1e-9);
    }

    /// The final ETA forecast for the fleet as it stands, from whatever route
    /// the cache currently holds.
    fn forecast_now(w: &World) -> Eta {
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        let route = current_route(w.store.fleet(w.fleet).unwrap(), &ctx).unwrap();
        eta(&move_path(&w.store, w.fleet, &route, &ctx).unwrap()).0
    }

    /// Forecast before every executed turn; return the forecasts and the turn
    /// the fleet arrived on, if it did within `limit` turns.
    fn forecast_and_run(w: &mut World, limit: u32) -> (Vec<Eta>, Option<u32>) {
        let mut forecasts = Vec::new();
        for turn in 1..=limit {
            forecasts.push(forecast_now(w));
            let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
            advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
            if w.store.fleet(w.fleet).unwrap().final_destination().is_none() {
                return (forecasts, Some(turn));
            }
            // Every other turn, drop the cache so both the popped cache and a
            // route rebuilt from the fleet's position are forecast.
            if turn % 2 == 0 {
                w.store.invalidate_routes();
            }
        }
        (forecasts, None)
    }

    #[test]
    fn execution_matches_forecast() {
        let cases: [(f64, f64, f64, &[SystemId], SystemId); 8] = [
            // (speed, fuel, max_fuel, supplied systems, destination)
            (100.0, 3.0, 3.0, &[], B),
            (300.0, 3.0, 3.0, &[], C),
            (70.0, 5.0, 5.0, &[], D),
            (100.0, 0.0, 3.0, &[A], B),
            (250.0, 3.0, 3.0, &[], C),
            // Turns end exactly on B.
            (250.0, 2.0, 2.0, &[], C),
            (250.0, 1.0, 1.0, &[B], C),
            (125.0, 1.0, 1.0, &[B], D),
        ];
        for (speed, fuel, max, supply, dest) in cases {
            let mut w = world(speed, fuel, max);
            w.knowledge.set_supply_range(OWNER, supply.iter().copied());
            {
                let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
                order_move(&mut w.store, w.fleet, dest, &ctx).unwrap();
            }
            let (forecasts, arrived) = forecast_and_run(&mut w, 50);
            let arrived = arrived.unwrap_or_else(|| panic!("speed {speed} fuel {fuel} -> {dest} never arrived"));
            for (k, forecast) in forecasts.iter().enumerate() {
                assert_eq!(
                    *forecast,
                    Eta::Turns(arrived - k as u32),
                    "speed {speed} fuel {fuel} -> {dest}, forecast before turn {}",
                    k + 1
                );
            }
        }
    }

    #[test]
    fn forecast_after_stopping_on_a_waypoint_charges_departure() {
        // Lands on B with one jump of fuel left over, which is not enough to
        // leave C afterwards.
        let mut w = world(250.0, 1.0, 1.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        assert_eq!(forecast_now(&w), Eta::OutOfRange);

        advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(f.system, Some(B));
        assert_eq!(f.travel_route(), &TravelRoute::Systems(vec![C]));
        assert_eq!(w.store.fuel(w.fleet).unwrap(), 0.0);
        assert_eq!(forecast_now(&w), Eta::OutOfRange);

        let (forecasts, arrived) = forecast_and_run(&mut w, 5);
        assert_eq!(arrived, None);
        assert!(forecasts.iter().all(|e| *e == Eta::OutOfRange), "{forecasts:?}");
        assert_eq!(w.store.fleet(w.fleet).unwrap().system, Some(B));
    }

    #[test]
    fn forecast_after_stopping_on_a_supplied_waypoint_waits_to_refuel() {
        let mut w = world(250.0, 1.0, 1.0);
        w.knowledge.set_supply_range(OWNER, [B]);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        assert_eq!(forecast_now(&w), Eta::Turns(3));

        advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(w.store.fleet(w.fleet).unwrap().system, Some(B));
        assert_eq!(forecast_now(&w), Eta::Turns(2));

        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert!(out.resupplied);
        assert_eq!(forecast_now(&w), Eta::Turns(1));

        let out = advance_one_turn(&mut w.store, w.fleet, &ctx).unwrap();
        assert_eq!(out.arrived, Some(C));
    }
}

// ── Route redaction ───────────────────────────────────────────────────────────

#[cfg(test)]
mod visibility {
    use fm_fleet::TravelRoute;
    use fm_galaxy::{DijkstraRouter, Knowledge};
    use super::helpers::*;
    use crate::{MovementContext, MovementError, order_move, trim, trim_route};

    fn full_route() -> TravelRoute {
        TravelRoute::Systems(vec![A, B, C])
    }

    #[test]
    fn nothing_reachable_gives_unknown_marker() {
        let k = Knowledge::new();
        assert_eq!(trim(&full_route(), None, Some(RIVAL), &k).unwrap(), TravelRoute::Unknown);
    }

    #[test]
    fn keeps_reachable_prefix() {
        let mut k = Knowledge::new();
        k.reveal_lane(RIVAL, A, B);
        assert_eq!(
            trim(&full_route(), None, Some(RIVAL), &k).unwrap(),
            TravelRoute::Systems(vec![A, B])
        );
    }

    #[test]
    fn stops_at_apparent_destination() {
        let k = Knowledge::new();
        assert_eq!(
            trim(&full_route(), Some(B), None, &k).unwrap(),
            TravelRoute::Systems(vec![A, B])
        );
        assert!(matches!(
            trim(&full_route(), Some(D), None, &k),
            Err(MovementError::ApparentDestinationOffRoute(s)) if s == D
        ));
    }

    #[test]
    fn empty_and_unknown_pass_through() {
        let k = Knowledge::new();
        assert_eq!(trim(&TravelRoute::Empty, None, Some(RIVAL), &k).unwrap(), TravelRoute::Empty);
        assert_eq!(trim(&TravelRoute::Unknown, None, None, &k).unwrap(), TravelRoute::Unknown);
    }

    #[test]
    fn trims_a_fleets_cached_route() {
        let mut w = world(100.0, 3.0, 3.0);
        let ctx = MovementContext::new(&w.graph, &w.knowledge, &DijkstraRouter, &w.rules);
        order_move(&mut w.store, w.fleet, C, &ctx).unwrap();
        let f = w.store.fleet(w.fleet).unwrap();
        assert_eq!(trim_route(f, None, Some(OWNER), &w.knowledge).unwrap(), full_route());
        assert_eq!(trim_route(f, None, Some(RIVAL), &w.knowledge).unwrap(), TravelRoute::Unknown);
    }
}
