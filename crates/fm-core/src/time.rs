//! Turn-based time model.
//!
//! # Design
//!
//! Game time is a monotonically increasing `Turn` counter.  All authoritative
//! movement happens in whole-turn increments; there is no sub-turn clock.
//! Forecast ETAs are expressed as a number of turns *from now*, not as an
//! absolute `Turn`, so they stay valid if the caller caches them for display.

use std::fmt;

// ── Turn ──────────────────────────────────────────────────────────────────────

/// An absolute turn counter.  Turn 0 is the first processed turn.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u32);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// Return the turn `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u32) -> Turn {
        Turn(self.0 + n)
    }

    /// Turns elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Turn) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u32> for Turn {
    type Output = Turn;
    #[inline]
    fn add(self, rhs: u32) -> Turn {
        Turn(self.0 + rhs)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn {}", self.0)
    }
}

// ── TurnClock ─────────────────────────────────────────────────────────────────

/// Tracks the turn currently being processed.
///
/// Cheap to copy and holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnClock {
    /// The current turn, advanced by [`TurnClock::advance`] after each
    /// completed turn.
    pub current: Turn,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `turn` (e.g. when resuming a loaded game).
    pub fn starting_at(turn: Turn) -> Self {
        Self { current: turn }
    }

    /// Advance the clock by one turn.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current + 1;
    }
}

impl fmt::Display for TurnClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}
