//! Fixed-step simulation tick
//!
//! Per-tick order: player input and lane clamp, stripe scroll, spawning,
//! advance and cull, collision and pickup resolution, score accrual.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::spawn::maybe_spawn;
use super::state::{GamePhase, GameState, Scrolling};
use crate::tuning::Tuning;

/// Input for a single tick
///
/// Direction and pedal flags are level-triggered: held keys act every tick.
/// `reset` and `quit` are one-shot commands handled by `Game::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub decelerate: bool,
    /// Restart after a game over
    pub reset: bool,
    /// Leave the game
    pub quit: bool,
}

/// Apply steering and pedals, then clamp speed and lane position
///
/// Clamping runs every tick, with or without input.
pub fn update_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let player = &mut state.player;

    if input.left {
        player.rect.pos.x -= tuning.steer_step;
    }
    if input.right {
        player.rect.pos.x += tuning.steer_step;
    }
    if input.accelerate {
        player.speed += tuning.acceleration;
    }
    if input.decelerate {
        player.speed -= tuning.brake;
    }

    player.speed = player.speed.clamp(0.0, tuning.max_speed);
    player.rect.pos.x = tuning.clamp_to_lane(player.rect.pos.x, player.rect.width());
}

/// Move every entity down by its own stamped speed and drop the ones whose
/// top edge went past `screen_height`
pub fn advance_and_cull<T: Scrolling>(entities: &mut Vec<T>, screen_height: f32) {
    entities.retain_mut(|entity| {
        let speed = entity.speed();
        entity.rect_mut().pos.y += speed;
        entity.rect().y() <= screen_height
    });
}

/// Result of checking the player against obstacles and coins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interactions {
    pub crashed: bool,
    pub coins_picked: u32,
}

/// Crash into traffic ends the run; touching a coin collects it
pub fn resolve_interactions(state: &mut GameState, tuning: &Tuning) -> Interactions {
    let player = state.player.rect;
    let mut result = Interactions::default();

    if state.obstacles.iter().any(|o| collides(&player, &o.rect)) {
        state.phase = GamePhase::GameOver;
        result.crashed = true;
    }

    for coin in state.coins.iter_mut() {
        if coin.active && collides(&player, &coin.rect) {
            coin.active = false;
            state.score += tuning.coin_reward;
            state.coins_collected += 1;
            result.coins_picked += 1;
        }
    }
    state.coins.retain(|c| c.active);

    result
}

/// Advance the game state by one tick
///
/// Does nothing in `GameOver`: no movement, no spawn timer, no scoring.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, rng: &mut impl Rng) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    update_player(state, input, tuning);

    state.road_stripe_offset += tuning.stripe_speed;
    if state.road_stripe_offset > tuning.stripe_period {
        state.road_stripe_offset = 0.0;
    }

    maybe_spawn(state, tuning, rng);

    advance_and_cull(&mut state.obstacles, tuning.screen_height);
    advance_and_cull(&mut state.coins, tuning.screen_height);

    let interactions = resolve_interactions(state, tuning);
    if interactions.coins_picked > 0 {
        log::debug!(
            "Picked up {} coin(s), total {}",
            interactions.coins_picked,
            state.coins_collected
        );
    }

    state.score += state.player.speed.floor() as u64;

    if interactions.crashed {
        log::info!(
            "Game over after {} ticks: score {}, coins {}",
            state.time_ticks,
            state.score,
            state.coins_collected
        );
    }

    debug_assert!(state.player.rect.is_well_formed(), "player rect degenerate");
    debug_assert!((0.0..=tuning.max_speed).contains(&state.player.speed));
    debug_assert!(state.obstacles.iter().all(|o| o.rect.is_well_formed()));
    debug_assert!(state.coins.iter().all(|c| c.active && c.rect.is_well_formed()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Coin, Obstacle, ObstacleVariant};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle(state: &mut GameState, x: f32, y: f32, speed: f32) -> Obstacle {
        Obstacle {
            id: state.next_entity_id(),
            rect: Rect::new(x, y, 50.0, 80.0),
            speed,
            variant: ObstacleVariant::Blue,
        }
    }

    #[test]
    fn test_steering_and_pedals() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let start_x = state.player.rect.x();

        let input = TickInput {
            left: true,
            accelerate: true,
            ..Default::default()
        };
        update_player(&mut state, &input, &tuning);
        assert_eq!(state.player.rect.x(), start_x - 5.0);
        assert!((state.player.speed - 0.1).abs() < 1e-6);

        // Both directions cancel out
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        update_player(&mut state, &input, &tuning);
        assert_eq!(state.player.rect.x(), start_x - 5.0);

        // Braking is twice as strong and floors at zero
        let input = TickInput {
            decelerate: true,
            ..Default::default()
        };
        update_player(&mut state, &input, &tuning);
        assert_eq!(state.player.speed, 0.0);
    }

    #[test]
    fn test_speed_caps_at_max() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let input = TickInput {
            accelerate: true,
            ..Default::default()
        };
        for _ in 0..500 {
            update_player(&mut state, &input, &tuning);
        }
        assert_eq!(state.player.speed, tuning.max_speed);
    }

    #[test]
    fn test_displaced_player_self_corrects() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.player.rect.pos.x = 10.0;
        state.player.speed = 42.0;
        update_player(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.player.rect.x(), tuning.road_left());
        assert_eq!(state.player.speed, tuning.max_speed);

        state.player.rect.pos.x = 790.0;
        update_player(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.player.rect.x(), tuning.road_right() - tuning.car_width);
    }

    #[test]
    fn test_advance_uses_stamped_speed() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let o = obstacle(&mut state, 210.0, -80.0, 4.0);
        state.obstacles.push(o);
        state.player.speed = 10.0;

        for _ in 0..21 {
            advance_and_cull(&mut state.obstacles, tuning.screen_height);
        }
        assert_eq!(state.obstacles[0].rect.y(), 4.0);
    }

    #[test]
    fn test_cull_past_bottom_edge() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let o = obstacle(&mut state, 210.0, -80.0, 4.0);
        state.obstacles.push(o);

        // -80 + 170 * 4 = 600: top edge on the boundary, still alive
        for _ in 0..170 {
            advance_and_cull(&mut state.obstacles, tuning.screen_height);
        }
        assert_eq!(state.obstacles.len(), 1);

        advance_and_cull(&mut state.obstacles, tuning.screen_height);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_cull_adjacent_entities() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        // Two neighbours leaving on the same tick, one staying
        for (y, speed) in [(595.0, 10.0), (598.0, 10.0), (100.0, 10.0), (599.0, 10.0)] {
            let o = obstacle(&mut state, 210.0, y, speed);
            state.obstacles.push(o);
        }
        advance_and_cull(&mut state.obstacles, tuning.screen_height);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].rect.y(), 110.0);
    }

    #[test]
    fn test_coin_pickup() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let player = state.player.rect;
        // Overlaps the player's top-left corner by 1 unit on both axes
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            rect: Rect::new(player.x() - 29.0, player.y() - 29.0, 30.0, 30.0),
            speed: 0.0,
            active: true,
        });

        let result = resolve_interactions(&mut state, &tuning);
        assert_eq!(result.coins_picked, 1);
        assert!(!result.crashed);
        assert_eq!(state.score, 100);
        assert_eq!(state.coins_collected, 1);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_crash_ends_run() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let player = state.player.rect;
        let o = obstacle(&mut state, player.x() + 10.0, player.y() - 70.0, 0.0);
        state.obstacles.push(o);

        let result = resolve_interactions(&mut state, &tuning);
        assert!(result.crashed);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(7);
        state.player.speed = 5.0;
        let o = obstacle(&mut state, 300.0, 100.0, 5.0);
        state.obstacles.push(o);
        state.phase = GamePhase::GameOver;

        let frozen = state.clone();
        let input = TickInput {
            left: true,
            accelerate: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input, &tuning, &mut rng);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_score_accrues_with_speed() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(8);
        state.player.speed = 3.7;

        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_stationary_no_spawns() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(9);

        for _ in 0..59 {
            tick(&mut state, &TickInput::default(), &tuning, &mut rng);
        }
        assert!(state.obstacles.is_empty() && state.coins.is_empty());

        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
        assert!(state.obstacles.is_empty() && state.coins.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_stripe_wraps() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(10);

        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), &tuning, &mut rng);
        }
        assert_eq!(state.road_stripe_offset, 40.0);
        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
        assert_eq!(state.road_stripe_offset, 0.0);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, accelerate, decelerate)| TickInput {
                left,
                right,
                accelerate,
                decelerate,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(
            seed in 0u64..1000,
            inputs in proptest::collection::vec(input_strategy(), 1..400)
        ) {
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);

            for input in &inputs {
                tick(&mut state, input, &tuning, &mut rng);
                let x = state.player.rect.x();
                prop_assert!((0.0..=tuning.max_speed).contains(&state.player.speed));
                prop_assert!(x >= tuning.road_left());
                prop_assert!(x <= tuning.road_right() - tuning.car_width);
                prop_assert!(state.obstacles.iter().all(|o| o.rect.y() <= tuning.screen_height));
                prop_assert!(state.coins.iter().all(|c| c.rect.y() <= tuning.screen_height));
            }
        }

        #[test]
        fn game_over_is_sticky(
            seed in 0u64..1000,
            inputs in proptest::collection::vec(input_strategy(), 1..600)
        ) {
            let tuning = Tuning::default();
            let mut state = GameState::new(&tuning);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut frozen: Option<GameState> = None;

            for input in &inputs {
                tick(&mut state, input, &tuning, &mut rng);
                if let Some(snapshot) = &frozen {
                    prop_assert_eq!(&state, snapshot);
                } else if state.is_game_over() {
                    frozen = Some(state.clone());
                }
            }
        }
    }
}
