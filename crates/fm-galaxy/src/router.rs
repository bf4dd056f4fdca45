//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The movement engine only ever asks one question of the graph: "what is the
//! shortest path from A to B that *this empire* knows about?".  That question
//! goes through the [`Router`] trait so servers can swap in A*, cached
//! all-pairs tables, or lane-blockade aware search without touching the
//! movement code.
//!
//! # Path shape
//!
//! A [`Path`] lists every system visited, **including both endpoints**.  A
//! query with `from == to` yields the single-system path `[from]` with length
//! zero; the movement layer treats that as "already there".

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use fm_core::{EmpireId, SystemId};

use crate::{GalaxyError, GalaxyResult, Knowledge, StarGraph};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Systems in travel order, from source to destination inclusive.
    pub systems: Vec<SystemId>,
    /// Sum of lane lengths along the path.
    pub length: f64,
}

impl Path {
    /// `true` if the source and destination are the same system.
    pub fn is_trivial(&self) -> bool {
        self.systems.len() <= 1
    }

    pub fn first(&self) -> Option<SystemId> {
        self.systems.first().copied()
    }

    pub fn last(&self) -> Option<SystemId> {
        self.systems.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path oracle.
///
/// Implementations must be `Send + Sync` so forecasts can run on Rayon
/// worker threads.
pub trait Router: Send + Sync {
    /// Shortest path from `from` to `to` using only lanes known to
    /// `observer` (`None` = every lane).
    ///
    /// # Errors
    ///
    /// - [`GalaxyError::SystemNotFound`] if either endpoint is not in `graph`.
    /// - [`GalaxyError::NoRoute`] if `to` cannot be reached.
    fn shortest_path(
        &self,
        graph:     &StarGraph,
        knowledge: &Knowledge,
        from:      SystemId,
        to:        SystemId,
        observer:  Option<EmpireId>,
    ) -> GalaxyResult<Path>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR lane graph, filtered by lane knowledge.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        graph:     &StarGraph,
        knowledge: &Knowledge,
        from:      SystemId,
        to:        SystemId,
        observer:  Option<EmpireId>,
    ) -> GalaxyResult<Path> {
        dijkstra(graph, knowledge, from, to, observer)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total-ordered `f64` cost so it can live in a `BinaryHeap`.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(
    graph:     &StarGraph,
    knowledge: &Knowledge,
    from:      SystemId,
    to:        SystemId,
    observer:  Option<EmpireId>,
) -> GalaxyResult<Path> {
    for s in [from, to] {
        if !graph.contains(s) {
            return Err(GalaxyError::SystemNotFound(s));
        }
    }
    if from == to {
        return Ok(Path { systems: vec![from], length: 0.0 });
    }

    let n = graph.system_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_lane = vec![usize::MAX; n];
    dist[from.index()] = 0.0;

    // Secondary key SystemId gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, SystemId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), system))) = heap.pop() {
        if system == to {
            return Ok(reconstruct(graph, &prev_lane, to, cost));
        }
        if cost > dist[system.index()] {
            continue;
        }

        for lane in graph.out_lanes(system) {
            let neighbor = graph.lane_to[lane];
            if !knowledge.lane_known(observer, system, neighbor) {
                continue;
            }
            let new_cost = cost + graph.lane_length[lane];
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_lane[neighbor.index()] = lane;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(GalaxyError::NoRoute { from, to })
}

fn reconstruct(graph: &StarGraph, prev_lane: &[usize], to: SystemId, length: f64) -> Path {
    let mut systems = vec![to];
    let mut cur = to;
    loop {
        let lane = prev_lane[cur.index()];
        if lane == usize::MAX {
            break;
        }
        cur = graph.lane_from[lane];
        systems.push(cur);
    }
    systems.reverse();
    Path { systems, length }
}
