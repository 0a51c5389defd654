//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (broad-phase emission order for contacts)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod container;
pub mod grid;
pub mod population;
pub mod response;
pub mod state;
pub mod tick;

pub use ball::{Ball, Color};
pub use collision::{Contact, ball_ball_contact, ball_container_contact};
pub use container::Container;
pub use grid::SpatialGrid;
pub use population::{Lifecycle, Population};
pub use response::{reflect_velocity, resolve_ball_ball, resolve_ball_wall};
pub use state::{ContainerView, Simulation, Snapshot, StepStats};
pub use tick::tick;
