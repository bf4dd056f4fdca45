//! Two empires on a generated galaxy, and the simple standing orders that
//! keep their fleets busy.

use std::collections::BTreeSet;

use anyhow::Result;

use fm_core::{EmpireId, FleetId, MovementRules, ShipId, SystemId};
use fm_fleet::{FleetStore, Ship};
use fm_galaxy::{Knowledge, Router, StarGraph};
use fm_sim::Sim;

pub const RED:  EmpireId = EmpireId(0);
pub const BLUE: EmpireId = EmpireId(1);

/// Starting state for the skirmish.
pub struct Scenario {
    pub knowledge: Knowledge,
    pub fleets:    FleetStore,
    /// `(empire, home system)` pairs.
    pub homes:     Vec<(EmpireId, SystemId)>,
}

/// System 0 for `RED`, the system farthest from it for `BLUE`.
fn home_systems(graph: &StarGraph) -> Result<(SystemId, SystemId)> {
    let red = SystemId(0);
    let origin = graph.position(red)?;
    let mut blue = red;
    let mut best = 0.0;
    for i in 1..graph.system_count() {
        let s = SystemId(i as u32);
        let d = origin.distance(graph.position(s)?);
        if d > best {
            best = d;
            blue = s;
        }
    }
    Ok((red, blue))
}

/// Build a ship owned by `empire`, sitting at `home`, with `role` applied.
#[allow(clippy::too_many_arguments)]
fn commission(
    store:  &mut FleetStore,
    graph:  &StarGraph,
    empire: EmpireId,
    home:   SystemId,
    name:   &str,
    speed:  f64,
    fuel:   f64,
    role:   fn(Ship) -> Ship,
) -> Result<ShipId> {
    let ship = Ship::new(store.next_ship_id(), Some(empire), name)
        .with_speed(speed)
        .with_fuel(fuel, fuel)
        .at_system(home, graph.position(home)?);
    Ok(store.insert_ship(role(ship)))
}

fn spawn_fleet(
    store:  &mut FleetStore,
    graph:  &StarGraph,
    empire: EmpireId,
    home:   SystemId,
    name:   &str,
    ships:  &[ShipId],
) -> Result<FleetId> {
    let fleet = store.create_fleet(name, Some(empire), graph.position(home)?, Some(home));
    store.add_ships(fleet, ships)?;
    Ok(fleet)
}

/// Per empire: two scouts, a battle group and a colony convoy at home.
///
/// Each empire knows the lanes around its home and can refuel at home and at
/// its neighbours.
pub fn setup(graph: &StarGraph, rules: &MovementRules) -> Result<Scenario> {
    let (red_home, blue_home) = home_systems(graph)?;
    let homes = vec![(RED, red_home), (BLUE, blue_home)];

    let mut knowledge = Knowledge::new();
    let mut fleets = FleetStore::new(rules);

    for &(empire, home) in &homes {
        knowledge.explore(empire, home, graph);
        knowledge.set_supply_range(empire, std::iter::once(home).chain(graph.neighbors(home)));

        for n in 1..=2 {
            let scout = commission(&mut fleets, graph, empire, home, "Pathfinder", 120.0, 4.0, |s| s)?;
            spawn_fleet(&mut fleets, graph, empire, home, &format!("Scout Wing {n}"), &[scout])?;
        }

        let mut line = Vec::new();
        for (name, speed) in [("Bulwark", 60.0), ("Lance", 75.0), ("Sabre", 90.0)] {
            line.push(commission(&mut fleets, graph, empire, home, name, speed, 6.0, Ship::armed)?);
        }
        spawn_fleet(&mut fleets, graph, empire, home, "Home Fleet", &line)?;

        let colony = commission(&mut fleets, graph, empire, home, "Seedship", 50.0, 3.0, Ship::colony_ship)?;
        let escort = commission(&mut fleets, graph, empire, home, "Warden", 80.0, 3.0, Ship::armed)?;
        spawn_fleet(&mut fleets, graph, empire, home, "Colony Convoy", &[colony, escort])?;
    }
    fleets.drain_changes();

    Ok(Scenario { knowledge, fleets, homes })
}

// ── Standing orders ───────────────────────────────────────────────────────────

/// Give every idle fleet something to do.  Returns the number of orders
/// accepted.
///
/// - Fleets short on fuel return home.
/// - Colony convoys settle the nearest explored system other than home.
/// - Battle groups head for the enemy home once it is known.
/// - Scouts head for the nearest known, unexplored system no other scout of
///   the same empire is already bound for.
pub fn give_orders<R: Router>(sim: &mut Sim<R>, homes: &[(EmpireId, SystemId)]) -> Result<usize> {
    let reserve = 2.0 * sim.config.rules.fuel_per_jump;
    let mut claimed: BTreeSet<(EmpireId, SystemId)> = sim
        .fleets
        .fleets()
        .filter_map(|f| Some((f.primary_owner()?, f.destination?)))
        .collect();
    let mut accepted = 0;

    for id in sim.fleets.fleet_ids() {
        let fleet = sim.fleets.fleet(id)?;
        let (Some(here), None, Some(empire)) = (fleet.system, fleet.destination, fleet.primary_owner())
        else {
            continue;
        };
        let Some(&(_, home)) = homes.iter().find(|(e, _)| *e == empire) else {
            continue;
        };
        let armed = sim.fleets.has_armed_ships(id)?;
        let colony = sim.fleets.has_colony_ships(id)?;

        let target = if sim.fleets.fuel(id)? < reserve && here != home {
            Some(home)
        } else if colony {
            (here == home).then(|| nearest(sim, here, empire, |s| s != home && explored(sim, empire, s)))
                .flatten()
        } else if armed {
            homes
                .iter()
                .find(|(e, h)| *e != empire && sim.knowledge.is_reachable(*h, Some(empire)))
                .map(|&(_, h)| h)
                .filter(|&h| h != here)
        } else {
            nearest(sim, here, empire, |s| {
                !explored(sim, empire, s) && !claimed.contains(&(empire, s))
            })
        };

        let Some(target) = target else { continue };
        if sim.order_move(id, target).is_ok() {
            claimed.insert((empire, target));
            accepted += 1;
        }
    }
    Ok(accepted)
}

fn explored<R: Router>(sim: &Sim<R>, empire: EmpireId, system: SystemId) -> bool {
    sim.knowledge.is_explored(system, empire)
}

/// The known system closest to `here` (straight-line) that satisfies `keep`.
fn nearest<R: Router>(
    sim:    &Sim<R>,
    here:   SystemId,
    empire: EmpireId,
    keep:   impl Fn(SystemId) -> bool,
) -> Option<SystemId> {
    let origin = sim.graph.position(here).ok()?;
    sim.knowledge
        .empire(empire)?
        .known_systems
        .iter()
        .copied()
        .filter(|&s| s != here && keep(s))
        .filter_map(|s| Some((s, origin.distance(sim.graph.position(s).ok()?))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(s, _)| s)
}
