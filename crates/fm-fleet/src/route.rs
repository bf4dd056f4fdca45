//! Route representation and the per-fleet route cache.
//!
//! # Tri-state routes
//!
//! A route is either [`TravelRoute::Empty`] (no route, or already arrived),
//! [`TravelRoute::Unknown`] (a route exists but the observer may not see any
//! of it), or an ordered list of systems.  `Unknown` is a distinct variant so
//! a redacted route can never be confused with "nowhere to go".
//!
//! # Cache lifecycle
//!
//! [`RouteCache`] never recomputes anything itself.  It is marked stale by
//! [`RouteCache::invalidate`] (destination change, start of turn) and filled
//! again by the movement layer's explicit `ensure_route` step.  Reading a
//! stale cache yields `Empty`.

use fm_core::SystemId;

// ── TravelRoute ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelRoute {
    #[default]
    Empty,
    Unknown,
    Systems(Vec<SystemId>),
}

impl TravelRoute {
    /// Wrap a system list, mapping an empty list to [`TravelRoute::Empty`].
    pub fn from_systems(systems: Vec<SystemId>) -> Self {
        if systems.is_empty() { Self::Empty } else { Self::Systems(systems) }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Unknown => false,
            Self::Systems(s) => s.is_empty(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The systems of a known route; empty for `Empty` and `Unknown`.
    pub fn systems(&self) -> &[SystemId] {
        match self {
            Self::Systems(s) => s,
            _ => &[],
        }
    }

    pub fn first(&self) -> Option<SystemId> {
        self.systems().first().copied()
    }

    pub fn last(&self) -> Option<SystemId> {
        self.systems().last().copied()
    }

    pub fn len(&self) -> usize {
        self.systems().len()
    }
}

// ── RouteCache ────────────────────────────────────────────────────────────────

/// A fleet's active route and the remaining distance along it.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCache {
    route:    TravelRoute,
    distance: f64,
    stale:    bool,
}

impl RouteCache {
    /// Store a freshly computed route.
    pub fn set(&mut self, route: TravelRoute, distance: f64) {
        self.route    = route;
        self.distance = distance.max(0.0);
        self.stale    = false;
    }

    /// Drop the route and mark the cache for recomputation.
    pub fn invalidate(&mut self) {
        self.route    = TravelRoute::Empty;
        self.distance = 0.0;
        self.stale    = true;
    }

    /// Drop the route; nothing to recompute (arrived or stopped).
    pub fn clear(&mut self) {
        self.route    = TravelRoute::Empty;
        self.distance = 0.0;
        self.stale    = false;
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    #[inline]
    pub fn route(&self) -> &TravelRoute {
        &self.route
    }

    /// Remaining travel distance to the destination.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn front(&self) -> Option<SystemId> {
        self.route.first()
    }

    /// Remove and return the first system of a known route.
    pub fn pop_front(&mut self) -> Option<SystemId> {
        match &mut self.route {
            TravelRoute::Systems(s) if !s.is_empty() => {
                let first = s.remove(0);
                if s.is_empty() {
                    self.route = TravelRoute::Empty;
                }
                Some(first)
            }
            _ => None,
        }
    }

    /// Reduce the remaining distance by `travelled`, never below zero.
    pub fn consume(&mut self, travelled: f64) {
        self.distance = (self.distance - travelled).max(0.0);
    }
}
