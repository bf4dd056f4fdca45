//! Read-only collaborators shared by every movement operation.

use fm_core::MovementRules;
use fm_galaxy::{Knowledge, Router, StarGraph};

/// Whether a fleet in transit may turn around before reaching its next
/// system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReversalPolicy {
    Forbidden,
    Allowed,
}

/// Policy used by the public routing entry points.
pub(crate) const REVERSAL_POLICY: ReversalPolicy = ReversalPolicy::Forbidden;

/// Everything movement needs besides the fleets themselves.
///
/// Knowledge is settled before the movement phase starts (supply ranges,
/// known lanes) and is not mutated while fleets move; exploration results are
/// returned as [`MovementEvent`](crate::MovementEvent)s and applied
/// afterwards.
#[derive(Copy, Clone)]
pub struct MovementContext<'a> {
    pub graph:     &'a StarGraph,
    pub knowledge: &'a Knowledge,
    pub router:    &'a dyn Router,
    pub rules:     &'a MovementRules,
}

impl<'a> MovementContext<'a> {
    pub fn new(
        graph:     &'a StarGraph,
        knowledge: &'a Knowledge,
        router:    &'a dyn Router,
        rules:     &'a MovementRules,
    ) -> Self {
        Self { graph, knowledge, router, rules }
    }
}
