//! Arrival estimates and forecast waypoints.

use std::fmt;

use fm_core::{Point, SystemId};

/// Estimated turn of arrival.
///
/// `Turns(n)` counts turns from now: a fleet that arrives during the next
/// movement phase has ETA 1.  The other variants are terminal outcomes of a
/// forecast, not failures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eta {
    Turns(u32),
    /// No path could be determined.
    Unknown,
    /// Fuel runs out where no resupply is available.
    OutOfRange,
    /// The fleet cannot move at all.
    Never,
}

impl Eta {
    pub const UNKNOWN_CODE:      i32 = 1 << 30;
    pub const OUT_OF_RANGE_CODE: i32 = (1 << 30) - 1;
    pub const NEVER_CODE:        i32 = (1 << 30) - 2;

    /// Integer encoding used on the wire and in CSV output.
    pub fn code(self) -> i32 {
        match self {
            Eta::Turns(n) => i32::try_from(n).unwrap_or(i32::MAX).min(Self::NEVER_CODE - 1),
            Eta::Unknown => Self::UNKNOWN_CODE,
            Eta::OutOfRange => Self::OUT_OF_RANGE_CODE,
            Eta::Never => Self::NEVER_CODE,
        }
    }

    /// Inverse of [`code`](Self::code).  Negative codes decode as `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::UNKNOWN_CODE => Eta::Unknown,
            Self::OUT_OF_RANGE_CODE => Eta::OutOfRange,
            Self::NEVER_CODE => Eta::Never,
            n => u32::try_from(n).map_or(Eta::Unknown, Eta::Turns),
        }
    }

    pub fn turns(self) -> Option<u32> {
        match self {
            Eta::Turns(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Turns(n) => write!(f, "{n} turns"),
            Eta::Unknown => f.write_str("unknown"),
            Eta::OutOfRange => f.write_str("out of range"),
            Eta::Never => f.write_str("never"),
        }
    }
}

/// One waypoint of a forecast path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovePathNode {
    pub position: Point,
    /// The fleet ends a turn here.
    pub turn_end: bool,
    pub eta:      Eta,
    /// Set when the waypoint is at a system.
    pub system:   Option<SystemId>,
}

/// Reduce a forecast path to `(final ETA, ETA of the next system stop)`.
///
/// The next stop is the first waypoint after the starting one that sits at a
/// system; if there is none, the final ETA is used for both.
pub fn eta(path: &[MovePathNode]) -> (Eta, Eta) {
    match path {
        [] => (Eta::Unknown, Eta::Unknown),
        [only] => (only.eta, only.eta),
        [_, rest @ ..] => {
            let last = path[path.len() - 1].eta;
            let next = rest
                .iter()
                .find(|n| n.system.is_some())
                .map_or(last, |n| n.eta);
            (last, next)
        }
    }
}
