//! Coin Racer - A top-down scrolling driving arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, game state)
//! - `game`: Frame-driver facing wrapper (commands, RNG ownership, render view)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo mode driver

pub mod autopilot;
pub mod game;
pub mod sim;
pub mod tuning;

pub use game::{FrameView, Game, TickOutcome};
pub use tuning::Tuning;

/// Default game configuration constants
pub mod consts {
    /// Visible area
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Drivable road, centered horizontally
    pub const ROAD_WIDTH: f32 = 400.0;

    /// Cars (player and traffic share a footprint)
    pub const CAR_WIDTH: f32 = 50.0;
    pub const CAR_HEIGHT: f32 = 80.0;
    /// Gap between the player's rear bumper and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Coins are square
    pub const COIN_SIZE: f32 = 30.0;
    pub const COIN_REWARD: u64 = 100;

    /// Player speed, units per tick
    pub const MAX_SPEED: f32 = 10.0;
    pub const ACCELERATION: f32 = 0.1;
    /// Braking is twice as strong as accelerating
    pub const BRAKE: f32 = 0.2;
    /// Lateral movement per tick per held direction
    pub const STEER_STEP: f32 = 5.0;

    /// Ticks between spawn attempts (attempt fires once the timer exceeds this)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    /// Distance the previous obstacle must cover before another may spawn
    pub const MIN_OBSTACLE_SPACING: f32 = 100.0;
    /// Probability that a spawn attempt produces a coin instead of traffic
    pub const COIN_SPAWN_CHANCE: f32 = 0.3;

    /// Lane stripe scroll
    pub const STRIPE_SPEED: f32 = 5.0;
    pub const STRIPE_PERIOD: f32 = 40.0;
}

/// Left edge of a road of `road_width` centered on a screen of `screen_width`
#[inline]
pub fn road_left(screen_width: f32, road_width: f32) -> f32 {
    (screen_width - road_width) / 2.0
}

/// Right edge of a road of `road_width` centered on a screen of `screen_width`
#[inline]
pub fn road_right(screen_width: f32, road_width: f32) -> f32 {
    road_left(screen_width, road_width) + road_width
}

/// Clamp the left edge `x` of an object `width` wide so it stays on the road
#[inline]
pub fn clamp_to_lane(x: f32, width: f32, screen_width: f32, road_width: f32) -> f32 {
    let left = road_left(screen_width, road_width);
    let right = road_right(screen_width, road_width);
    x.clamp(left, (right - width).max(left))
}
