//! `fm-galaxy`: star-lane graph, empire knowledge, and routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`network`]   | `StarGraph` (CSR + R-tree), `StarGraphBuilder`                 |
//! | [`knowledge`] | `Knowledge`: per-empire known lanes, visibility, supply range |
//! | [`router`]    | `Router` trait, `Path`, `DijkstraRouter`                       |
//! | [`generator`] | `generate_galaxy`: seeded procedural galaxies                 |
//! | [`error`]     | `GalaxyError`, `GalaxyResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod generator;
pub mod knowledge;
pub mod network;
pub mod router;


pub use error::{GalaxyError, GalaxyResult};
pub use generator::{GalaxyParams, generate_galaxy};
pub use knowledge::{EmpireKnowledge, Knowledge};
pub use network::{StarGraph, StarGraphBuilder};
pub use router::{DijkstraRouter, Path, Router};
