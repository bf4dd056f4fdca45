//! Star-lane graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing lanes.
//! Given a `SystemId s`, its outgoing lanes occupy the index range
//! `system_out_start[s] .. system_out_start[s+1]` of the lane arrays.
//!
//! Lanes are undirected in the game but stored as two directed entries so
//! the Dijkstra inner loop is a contiguous scan.  Lane length is always the
//! Euclidean distance between the two systems: fleets fly straight lines, so
//! any other cost would make routing disagree with movement.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a position to the nearest `SystemId`.  Used
//! when placing empires and by the galaxy generator to pick lane neighbours.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fm_core::{Point, SystemId};

use crate::{GalaxyError, GalaxyResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index.
#[derive(Clone)]
pub(crate) struct SystemEntry {
    pub(crate) point: [f64; 2],
    pub(crate) id:    SystemId,
}

impl RTreeObject for SystemEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SystemEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── StarGraph ─────────────────────────────────────────────────────────────────

/// Star systems and the lanes between them.
///
/// Do not construct directly; use [`StarGraphBuilder`].
pub struct StarGraph {
    // ── System data ───────────────────────────────────────────────────────
    /// Position of each system.  Indexed by `SystemId`.
    pub system_pos: Vec<Point>,

    /// Display name of each system.
    pub system_name: Vec<String>,

    // ── CSR lane adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `system_count + 1`.
    pub system_out_start: Vec<u32>,

    /// Source system of each directed lane entry.
    pub lane_from: Vec<SystemId>,

    /// Destination system of each directed lane entry.
    pub lane_to: Vec<SystemId>,

    /// Length of each lane (Euclidean distance between its endpoints).
    pub lane_length: Vec<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<SystemEntry>,
}

impl StarGraph {
    /// Construct an empty galaxy with no systems or lanes.
    pub fn empty() -> Self {
        StarGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn system_count(&self) -> usize {
        self.system_pos.len()
    }

    /// Number of directed lane entries (twice the number of game lanes).
    pub fn lane_count(&self) -> usize {
        self.lane_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system_pos.is_empty()
    }

    #[inline]
    pub fn contains(&self, system: SystemId) -> bool {
        system.index() < self.system_pos.len()
    }

    // ── System lookups ────────────────────────────────────────────────────

    /// Position of `system`.
    ///
    /// # Errors
    ///
    /// [`GalaxyError::SystemNotFound`] if the id is out of range.
    #[inline]
    pub fn position(&self, system: SystemId) -> GalaxyResult<Point> {
        self.system_pos
            .get(system.index())
            .copied()
            .ok_or(GalaxyError::SystemNotFound(system))
    }

    pub fn name(&self, system: SystemId) -> Option<&str> {
        self.system_name.get(system.index()).map(String::as_str)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the directed lane indices leaving `system`.
    #[inline]
    pub fn out_lanes(&self, system: SystemId) -> impl Iterator<Item = usize> + '_ {
        let start = self.system_out_start[system.index()] as usize;
        let end   = self.system_out_start[system.index() + 1] as usize;
        start..end
    }

    /// Systems directly connected to `system` by a lane.
    pub fn neighbors(&self, system: SystemId) -> impl Iterator<Item = SystemId> + '_ {
        self.out_lanes(system).map(move |l| self.lane_to[l])
    }

    /// `true` if a lane joins `a` and `b`.
    pub fn has_lane(&self, a: SystemId, b: SystemId) -> bool {
        self.contains(a) && self.neighbors(a).any(|n| n == b)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The system nearest to `pos`.  `None` only for an empty galaxy.
    pub fn nearest_system(&self, pos: Point) -> Option<SystemId> {
        self.spatial_idx.nearest_neighbor(&[pos.x, pos.y]).map(|e| e.id)
    }

    /// Up to `k` systems nearest to `pos`, sorted by ascending distance.
    pub fn k_nearest_systems(&self, pos: Point, k: usize) -> Vec<SystemId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── StarGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`StarGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fm_core::Point;
/// use fm_galaxy::StarGraphBuilder;
///
/// let mut b = StarGraphBuilder::new();
/// let sol   = b.add_system("Sol", Point::new(0.0, 0.0));
/// let vega  = b.add_system("Vega", Point::new(300.0, 400.0));
/// b.add_lane(sol, vega);
/// let galaxy = b.build();
/// assert_eq!(galaxy.system_count(), 2);
/// assert_eq!(galaxy.lane_count(), 2); // stored in both directions
/// assert_eq!(galaxy.lane_length[0], 500.0);
/// ```
pub struct StarGraphBuilder {
    names:     Vec<String>,
    positions: Vec<Point>,
    lanes:     Vec<(SystemId, SystemId)>,
}

impl StarGraphBuilder {
    pub fn new() -> Self {
        Self { names: Vec::new(), positions: Vec::new(), lanes: Vec::new() }
    }

    /// Pre-allocate for the expected number of systems and lanes.
    pub fn with_capacity(systems: usize, lanes: usize) -> Self {
        Self {
            names:     Vec::with_capacity(systems),
            positions: Vec::with_capacity(systems),
            lanes:     Vec::with_capacity(lanes),
        }
    }

    /// Add a system and return its `SystemId` (sequential from 0).
    pub fn add_system(&mut self, name: impl Into<String>, pos: Point) -> SystemId {
        let id = SystemId(self.positions.len() as u32);
        self.names.push(name.into());
        self.positions.push(pos);
        id
    }

    /// Add an undirected lane between `a` and `b`.
    ///
    /// Self-lanes and duplicates are dropped at build time.
    pub fn add_lane(&mut self, a: SystemId, b: SystemId) {
        self.lanes.push((a, b));
    }

    pub fn system_pos(&self, id: SystemId) -> Point {
        self.positions[id.index()]
    }

    pub fn system_count(&self) -> usize { self.positions.len() }

    /// Consume the builder and produce a [`StarGraph`].
    ///
    /// Time complexity: O(L log L) for the lane sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> StarGraph {
        let system_count = self.positions.len();

        // Expand undirected lanes into directed entries, dropping self-lanes.
        let mut directed: Vec<(SystemId, SystemId)> = self
            .lanes
            .iter()
            .filter(|(a, b)| a != b)
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        directed.sort_unstable();
        directed.dedup();

        let lane_from:   Vec<SystemId> = directed.iter().map(|l| l.0).collect();
        let lane_to:     Vec<SystemId> = directed.iter().map(|l| l.1).collect();
        let lane_length: Vec<f64>      = directed
            .iter()
            .map(|&(a, b)| self.positions[a.index()].distance(self.positions[b.index()]))
            .collect();

        let mut system_out_start = vec![0u32; system_count + 1];
        for (from, _) in &directed {
            system_out_start[from.index() + 1] += 1;
        }
        for i in 1..=system_count {
            system_out_start[i] += system_out_start[i - 1];
        }
        debug_assert_eq!(system_out_start[system_count] as usize, directed.len());

        let entries: Vec<SystemEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| SystemEntry { point: [p.x, p.y], id: SystemId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        StarGraph {
            system_pos: self.positions,
            system_name: self.names,
            system_out_start,
            lane_from,
            lane_to,
            lane_length,
            spatial_idx,
        }
    }
}

impl Default for StarGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
