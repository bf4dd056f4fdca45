//! `fm-fleet`: ships, fleets, and the store that keeps them consistent.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                          |
//! |----------------|-------------------------------------------------------------------|
//! | [`ship`]       | `Ship`, `Meter` (clamped fuel meter)                              |
//! | [`route`]      | `TravelRoute` tri-state, `RouteCache`                             |
//! | [`fleet`]      | `Fleet`: position, owners, members, route bookkeeping            |
//! | [`aggregate`]  | `fleet_fuel`, `fleet_max_fuel`, `fleet_speed`                     |
//! | [`occupancy`]  | `Occupancy`: which fleets and ships sit at each system           |
//! | [`store`]      | `FleetStore`: membership mutation and state-changed notifications |
//! | [`visibility`] | `Visibility`, `fleet_visibility`                                  |
//!
//! # Ownership of ship state
//!
//! Ships are owned by the [`FleetStore`], never by a `Fleet`.  A fleet only
//! lists the ids of its members; every mutation that touches both a fleet and
//! its ships (movement, refuelling, membership changes) goes through a
//! `FleetStore` method so the two sides cannot drift apart.

pub mod aggregate;
pub mod fleet;
pub mod occupancy;
pub mod route;
pub mod ship;
pub mod store;
pub mod visibility;


pub use aggregate::{ShipMap, fleet_fuel, fleet_max_fuel, fleet_speed};
pub use fleet::Fleet;
pub use occupancy::{ObjectRef, Occupancy};
pub use route::{RouteCache, TravelRoute};
pub use ship::{Meter, Ship};
pub use store::FleetStore;
pub use visibility::{FOREIGN_FLEET_NAME, Visibility, fleet_visibility};
