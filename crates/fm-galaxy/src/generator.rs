//! Seeded procedural galaxy generation.
//!
//! Used by the demo scenario and by the randomized determinism tests.  The
//! same `(params, seed)` pair always produces the same galaxy, down to the
//! system names, because every draw comes from one `SmallRng`.
//!
//! # Algorithm
//!
//! 1. Scatter systems uniformly in a `width × height` rectangle, rejecting
//!    candidates closer than `min_separation` to an existing system (bounded
//!    retries; a rejected slot is simply skipped).
//! 2. Connect every system to its `lanes_per_system` nearest neighbours
//!    using an R-tree.
//! 3. Join any disconnected components to the component of system 0 through
//!    the shortest possible lane, so every system is routable under full
//!    knowledge.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

use fm_core::{Point, SystemId};

use crate::network::SystemEntry;
use crate::{StarGraph, StarGraphBuilder};

const PLACEMENT_ATTEMPTS: usize = 32;

const SYLLABLES: [&str; 16] = [
    "al", "bar", "cor", "dan", "el", "fir", "gal", "hel",
    "ir", "kan", "lor", "mir", "nos", "or", "ras", "tau",
];

/// Parameters for [`generate_galaxy`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GalaxyParams {
    /// Target number of systems (fewer if placement keeps colliding).
    pub systems:          usize,
    pub width:            f64,
    pub height:           f64,
    /// Nearest-neighbour lanes per system before connectivity repair.
    pub lanes_per_system: usize,
    /// Minimum distance between two systems.
    pub min_separation:   f64,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            systems:          40,
            width:            1_000.0,
            height:           1_000.0,
            lanes_per_system: 3,
            min_separation:   40.0,
        }
    }
}

/// Generate a connected galaxy from `params` and `seed`.
pub fn generate_galaxy(params: &GalaxyParams, seed: u64) -> StarGraph {
    let mut rng = SmallRng::seed_from_u64(seed);

    // ── 1. Scatter systems ────────────────────────────────────────────────
    let mut positions: Vec<Point> = Vec::with_capacity(params.systems);
    for _ in 0..params.systems {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Point::new(
                rng.gen_range(0.0..params.width.max(f64::MIN_POSITIVE)),
                rng.gen_range(0.0..params.height.max(f64::MIN_POSITIVE)),
            );
            if positions.iter().all(|p| p.distance(candidate) >= params.min_separation) {
                positions.push(candidate);
                break;
            }
        }
    }

    let mut builder = StarGraphBuilder::with_capacity(
        positions.len(),
        positions.len() * params.lanes_per_system,
    );
    for &pos in &positions {
        let name = star_name(&mut rng);
        builder.add_system(name, pos);
    }

    // ── 2. Nearest-neighbour lanes ────────────────────────────────────────
    let tree = RTree::bulk_load(
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| SystemEntry { point: [p.x, p.y], id: SystemId(i as u32) })
            .collect(),
    );
    let mut lanes: Vec<(SystemId, SystemId)> = Vec::new();
    for (i, p) in positions.iter().enumerate() {
        let me = SystemId(i as u32);
        // The nearest hit is the system itself.
        for other in tree
            .nearest_neighbor_iter(&[p.x, p.y])
            .skip(1)
            .take(params.lanes_per_system)
        {
            lanes.push((me, other.id));
        }
    }

    // ── 3. Connectivity repair ────────────────────────────────────────────
    let mut components = UnionFind::new(positions.len());
    for &(a, b) in &lanes {
        components.union(a.index(), b.index());
    }
    for i in 1..positions.len() {
        if components.find(i) == components.find(0) {
            continue;
        }
        // Shortest lane from i's component into system 0's component.
        let mut best: Option<(f64, usize, usize)> = None;
        for a in 0..positions.len() {
            if components.find(a) != components.find(i) {
                continue;
            }
            for b in 0..positions.len() {
                if components.find(b) != components.find(0) {
                    continue;
                }
                let d = positions[a].distance(positions[b]);
                if best.is_none_or(|(bd, _, _)| d < bd) {
                    best = Some((d, a, b));
                }
            }
        }
        if let Some((_, a, b)) = best {
            lanes.push((SystemId(a as u32), SystemId(b as u32)));
            components.union(a, b);
        }
    }

    for (a, b) in lanes {
        builder.add_lane(a, b);
    }

    let graph = builder.build();
    tracing::debug!(
        systems = graph.system_count(),
        lanes = graph.lane_count() / 2,
        seed,
        "generated galaxy"
    );
    graph
}

fn star_name(rng: &mut SmallRng) -> String {
    let count = rng.gen_range(2..=3);
    let mut name = String::new();
    for _ in 0..count {
        name.push_str(SYLLABLES[rng.gen_range(0..SYLLABLES.len())]);
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

// ── Union-find ────────────────────────────────────────────────────────────────

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Smaller root wins so the result is independent of call order.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}
