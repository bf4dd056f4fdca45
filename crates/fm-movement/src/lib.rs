//! `fm-movement`: fleet routing, forecasting, and per-turn movement.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`context`]    | `MovementContext`: graph, knowledge, router, rules              |
//! | [`route`]      | `compute_route`, `ensure_route`, `current_route`, `set_route`, `order_move` |
//! | [`path`]       | `move_path`: side-effect-free turn-by-turn forecast             |
//! | [`eta`]        | `Eta`, `MovePathNode`, `eta`                                     |
//! | [`executor`]   | `advance_one_turn`: authoritative movement for one fleet        |
//! | [`visibility`] | `trim_route`: redact a route to what an observer may see        |
//! | [`error`]      | `MovementError`, `MovementResult<T>`                             |
//!
//! # Forecast and execution agree
//!
//! [`move_path`] and [`advance_one_turn`] walk the same state machine with the
//! same constants from [`MovementRules`](fm_core::MovementRules): fuel is
//! deducted on every departure from a system, a fleet stuck at a system with
//! an empty tank waits a full turn to resupply, and budgets under `epsilon`
//! end the turn.  For an unchanged galaxy, the turn on which
//! `advance_one_turn` delivers a fleet is the final ETA `move_path` predicted.
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = MovementContext::new(&graph, &knowledge, &DijkstraRouter, &rules);
//! order_move(&mut store, fleet, destination, &ctx)?;
//! let path = move_path(&store, fleet, store.fleet(fleet)?.travel_route(), &ctx)?;
//! let (arrival, next_stop) = eta(&path);
//! let outcome = advance_one_turn(&mut store, fleet, &ctx)?;
//! ```

pub mod context;
pub mod error;
pub mod eta;
pub mod executor;
pub mod path;
pub mod route;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use context::{MovementContext, ReversalPolicy};
pub use error::{MovementError, MovementResult};
pub use eta::{Eta, MovePathNode, eta};
pub use executor::{MovementEvent, MovementOutcome, advance_one_turn};
pub use path::move_path;
pub use route::{compute_route, current_route, ensure_route, order_move, set_route};
pub use visibility::{trim, trim_route};
