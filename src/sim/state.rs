//! Game state and core simulation types
//!
//! Entities carry geometry by composition: each embeds a `Rect`.
//! Nothing here references drawable resources; obstacles carry only a
//! cosmetic `ObstacleVariant` that the renderer maps to a sprite.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended by a collision; only a reset leaves this phase
    GameOver,
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCar {
    pub rect: Rect,
    /// Scroll speed in units per tick, within [0, max_speed]
    pub speed: f32,
}

impl PlayerCar {
    /// Centered on the road, parked near the bottom edge
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                (tuning.screen_width - tuning.car_width) / 2.0,
                tuning.screen_height - tuning.car_height - tuning.player_bottom_margin,
                tuning.car_width,
                tuning.car_height,
            ),
            speed: 0.0,
        }
    }
}

/// Obstacle paint job (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleVariant {
    #[default]
    Blue,
    Green,
}

impl ObstacleVariant {
    pub const ALL: [ObstacleVariant; 2] = [ObstacleVariant::Blue, ObstacleVariant::Green];
}

/// Oncoming traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Player speed at spawn time; never updated afterwards
    pub speed: f32,
    pub variant: ObstacleVariant,
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Rect,
    /// Player speed at spawn time; never updated afterwards
    pub speed: f32,
    /// Cleared on pickup, and the coin is evicted in the same tick
    pub active: bool,
}

/// Anything that scrolls down the screen at its own stamped speed
pub trait Scrolling {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;
    fn speed(&self) -> f32;
}

impl Scrolling for Obstacle {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

impl Scrolling for Coin {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn rect_mut(&mut self) -> &mut Rect {
        &mut self.rect
    }

    fn speed(&self) -> f32 {
        self.speed
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Player car
    pub player: PlayerCar,
    /// Live obstacles (in spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Live coins (in spawn order)
    pub coins: Vec<Coin>,
    /// Lane stripe scroll offset, in [0, stripe_period]
    pub road_stripe_offset: f32,
    /// Score
    pub score: u64,
    /// Coins picked up this run
    pub coins_collected: u32,
    /// Ticks since the last spawn attempt
    pub spawn_timer: u32,
    /// Spawn y of the most recently spawned obstacle
    pub last_obstacle_spawn_y: f32,
    /// Id of the most recently spawned obstacle (None until the first spawn)
    pub last_obstacle_id: Option<u32>,
    /// Simulation ticks played this run
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Playing,
            player: PlayerCar::spawn(tuning),
            obstacles: Vec::new(),
            coins: Vec::new(),
            road_stripe_offset: 0.0,
            score: 0,
            coins_collected: 0,
            spawn_timer: 0,
            last_obstacle_spawn_y: -tuning.car_height,
            last_obstacle_id: None,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Reinitialize every field to its startup value
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
        log::info!("Game reset");
    }

    /// Shorthand for `phase == GameOver`
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Distance the most recently spawned obstacle has covered since spawning
    ///
    /// `None` if no obstacle was spawned yet or it already left the screen.
    pub fn last_obstacle_travel(&self) -> Option<f32> {
        let id = self.last_obstacle_id?;
        self.obstacles
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.rect.y() - self.last_obstacle_spawn_y)
    }
}
