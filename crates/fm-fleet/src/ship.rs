//! Ships and their fuel meter.

use fm_core::{EmpireId, FleetId, Point, ShipId, SystemId};

// ── Meter ─────────────────────────────────────────────────────────────────────

/// A current/max pair with `current` always clamped to `[0, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    current: f64,
    max:     f64,
}

impl Meter {
    /// A meter holding `current` out of `max`.  Negative `max` becomes 0.
    pub fn new(current: f64, max: f64) -> Self {
        let max = max.max(0.0);
        Self { current: current.clamp(0.0, max), max }
    }

    /// A meter filled to `max`.
    pub fn full(max: f64) -> Self {
        Self::new(max, max)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_current(&mut self, value: f64) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Add `delta` (possibly negative) to the current value, clamping.
    pub fn adjust(&mut self, delta: f64) {
        self.set_current(self.current + delta);
    }

    /// Refill to max.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Change the maximum, clamping the current value into the new range.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        self.current = self.current.min(self.max);
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// A single ship.
///
/// `position`, `system`, and `fleet` are kept in step with the owning fleet by
/// [`FleetStore`](crate::FleetStore); mutate them directly only for ships that
/// belong to no fleet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub id:           ShipId,
    pub owner:        Option<EmpireId>,
    pub name:         String,
    pub position:     Point,
    pub system:       Option<SystemId>,
    pub fleet:        Option<FleetId>,
    /// Distance the ship can cover in one turn.
    pub speed:        f64,
    pub fuel:         Meter,
    pub armed:        bool,
    pub can_colonize: bool,
}

impl Ship {
    /// An unarmed, immobile ship with an empty fuel tank.
    pub fn new(id: ShipId, owner: Option<EmpireId>, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            name:         name.into(),
            position:     Point::default(),
            system:       None,
            fleet:        None,
            speed:        0.0,
            fuel:         Meter::default(),
            armed:        false,
            can_colonize: false,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_fuel(mut self, current: f64, max: f64) -> Self {
        self.fuel = Meter::new(current, max);
        self
    }

    pub fn armed(mut self) -> Self {
        self.armed = true;
        self
    }

    pub fn colony_ship(mut self) -> Self {
        self.can_colonize = true;
        self
    }

    /// Place the ship at a system's position.
    pub fn at_system(mut self, system: SystemId, position: Point) -> Self {
        self.system   = Some(system);
        self.position = position;
        self
    }
}
