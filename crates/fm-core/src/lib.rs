//! `fm-core`: foundational types for the fleet movement engine.
//!
//! This crate is a dependency of every other `fm-*` crate.  It has no `fm-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `FleetId`, `ShipId`, `SystemId`, `EmpireId`               |
//! | [`geo`]         | `Point`: planar galaxy coordinates                       |
//! | [`time`]        | `Turn`, `TurnClock`                                       |
//! | [`config`]      | `MovementRules`, `SimConfig`                              |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MovementRules, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EmpireId, FleetId, ShipId, SystemId};
pub use time::{Turn, TurnClock};
