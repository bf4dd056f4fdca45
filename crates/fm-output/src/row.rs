//! Plain data row types written by output backends.
//!
//! Optional ids are flattened to their `INVALID` sentinel (`u32::MAX` for
//! systems, `u16::MAX` for empires).

/// One fleet's state at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetSnapshotRow {
    pub turn:        u32,
    pub fleet_id:    u32,
    pub owner:       u16,
    pub x:           f64,
    pub y:           f64,
    /// System the fleet sits at, or `u32::MAX` in transit.
    pub system:      u32,
    pub next_system: u32,
    pub destination: u32,
    pub ships:       u32,
    pub speed:       f64,
    pub fuel:        f64,
    /// Remaining route length to the destination.
    pub remaining:   f64,
}

/// Aggregate counters for one processed turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSummaryRow {
    pub turn:       u32,
    pub moved:      u64,
    pub arrived:    u64,
    pub resupplied: u64,
    pub blocked:    u64,
    pub explored:   u64,
    pub distance:   f64,
}
