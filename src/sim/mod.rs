//! Simulation core
//!
//! Pure and single-threaded:
//! - Unit timestep, one step per frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod session;
pub mod store;
pub mod tick;

pub use body::{Arena, Body, random_velocity};
pub use collision::{Contact, WallHits, contain, reflect_walls, resolve_collisions, resolve_pair};
pub use session::{INITIAL_BODIES, Session, SessionPhase, Snapshot, TickOutcome};
pub use store::{BodyStore, reset_position};
pub use tick::{StepReport, step};
