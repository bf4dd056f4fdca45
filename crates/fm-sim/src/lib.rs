//! `fm-sim`: turn processor for the fleet movement engine.
//!
//! # Turn pipeline
//!
//! ```text
//! for turn in clock..config.total_turns:
//!   ① Invalidate: every fleet's route cache is marked stale so lanes opened
//!                  or closed since last turn are picked up.
//!   ② Movement  : advance_one_turn for each fleet in ascending FleetId
//!                  order.  Unreachable destinations are logged and skipped.
//!   ③ Explore   : MovementEvent::Explored results are applied to Knowledge
//!                  after every fleet has moved.
//!   ④ Notify    : drained state-changed notifications go to the observer.
//!   ⑤ Snapshot  : every config.output_interval_turns turns.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`Sim::forecast_all`] runs on Rayon's thread pool.     |
//! | `serde`    | `Serialize`/`Deserialize` on `Forecast`, `TurnSummary`.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_core::SimConfig;
//! use fm_galaxy::{DijkstraRouter, GalaxyParams, generate_galaxy};
//! use fm_sim::{NoopObserver, SimBuilder};
//!
//! let graph = generate_galaxy(&GalaxyParams::default(), 42);
//! let mut sim = SimBuilder::new(SimConfig::default(), graph, DijkstraRouter)
//!     .build()?;
//! sim.order_move(fleet, destination)?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod forecast;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use forecast::Forecast;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TurnSummary};
