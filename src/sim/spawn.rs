//! Spawning of traffic and coins
//!
//! Called once per Playing tick. New entities appear just above the visible
//! area at a random lateral position on the road and inherit the player's
//! current speed.

use rand::Rng;

use super::geometry::Rect;
use super::state::{Coin, GameState, Obstacle, ObstacleVariant};
use crate::tuning::Tuning;

/// What a spawn attempt produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Timer not elapsed or player stationary
    NotDue,
    Coin,
    Obstacle,
    /// Obstacle rolled but the previous one is still too close
    Suppressed,
}

/// Advance the spawn timer and spawn at most one object
pub fn maybe_spawn(state: &mut GameState, tuning: &Tuning, rng: &mut impl Rng) -> SpawnOutcome {
    state.spawn_timer += 1;
    if state.spawn_timer <= tuning.spawn_interval_ticks || state.player.speed <= 0.0 {
        return SpawnOutcome::NotDue;
    }
    state.spawn_timer = 0;

    if rng.random::<f32>() < tuning.coin_spawn_chance {
        spawn_coin(state, tuning, rng);
        return SpawnOutcome::Coin;
    }

    if obstacle_too_close(state, tuning) {
        log::debug!(
            "Obstacle spawn suppressed (last obstacle traveled {:?})",
            state.last_obstacle_travel()
        );
        return SpawnOutcome::Suppressed;
    }
    spawn_obstacle(state, tuning, rng);
    SpawnOutcome::Obstacle
}

/// True while the most recent obstacle has not cleared the minimum spacing
pub fn obstacle_too_close(state: &GameState, tuning: &Tuning) -> bool {
    state
        .last_obstacle_travel()
        .is_some_and(|traveled| traveled <= tuning.min_obstacle_spacing)
}

/// Uniform lateral position for something `width` wide on the road
fn random_lane_x(tuning: &Tuning, width: f32, rng: &mut impl Rng) -> f32 {
    let left = tuning.road_left();
    let span = (tuning.road_width - width).max(0.0);
    left + rng.random::<f32>() * span
}

/// Place a new obstacle just above the screen
pub fn spawn_obstacle(state: &mut GameState, tuning: &Tuning, rng: &mut impl Rng) {
    let x = random_lane_x(tuning, tuning.car_width, rng);
    let variant = ObstacleVariant::ALL[rng.random_range(0..ObstacleVariant::ALL.len())];
    let id = state.next_entity_id();
    let y = -tuning.car_height;

    state.obstacles.push(Obstacle {
        id,
        rect: Rect::new(x, y, tuning.car_width, tuning.car_height),
        speed: state.player.speed,
        variant,
    });
    state.last_obstacle_id = Some(id);
    state.last_obstacle_spawn_y = y;
    log::debug!(
        "Spawned {:?} obstacle #{} at x={:.1} speed={:.1}",
        variant,
        id,
        x,
        state.player.speed
    );
}

/// Place a new coin just above the screen
pub fn spawn_coin(state: &mut GameState, tuning: &Tuning, rng: &mut impl Rng) {
    let x = random_lane_x(tuning, tuning.coin_size, rng);
    let id = state.next_entity_id();

    state.coins.push(Coin {
        id,
        rect: Rect::new(x, -tuning.coin_size, tuning.coin_size, tuning.coin_size),
        speed: state.player.speed,
        active: true,
    });
    log::debug!("Spawned coin #{} at x={:.1}", id, x);
}
