//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Injected seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use geometry::Rect;
pub use spawn::{SpawnOutcome, maybe_spawn, obstacle_too_close, spawn_coin, spawn_obstacle};
pub use state::{Coin, GamePhase, GameState, Obstacle, ObstacleVariant, PlayerCar, Scrolling};
pub use tick::{Interactions, TickInput, advance_and_cull, resolve_interactions, tick, update_player};
