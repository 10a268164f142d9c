//! Demo mode driver
//!
//! Produces the same `TickInput` a human would, from the current state.
//! Dodges the nearest threatening car, otherwise lines up with the nearest
//! coin, and holds a cruising speed.

use crate::sim::{GameState, Rect, TickInput};
use crate::tuning::Tuning;

/// Autopilot behavior knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Speed to hold when the road ahead is clear
    pub cruise_speed: f32,
    /// Obstacles closer than this (vertical gap above the player) are threats
    pub lookahead: f32,
    /// Brake when a threat is closer than this
    pub panic_distance: f32,
    /// Horizontal alignment tolerance when chasing a coin
    pub deadzone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            cruise_speed: 6.0,
            lookahead: 260.0,
            panic_distance: 90.0,
            deadzone: 4.0,
        }
    }
}

impl Autopilot {
    /// Decide this tick's input
    pub fn steer(&self, state: &GameState, tuning: &Tuning) -> TickInput {
        let mut input = TickInput::default();
        if state.is_game_over() {
            return input;
        }

        let player = state.player.rect;
        let threat = nearest_threat(state, &player, self.lookahead, tuning.steer_step * 4.0);

        match threat {
            Some((obstacle, gap)) => {
                // Escape toward whichever side has more road left
                let room_left = obstacle.x() - tuning.road_left();
                let room_right = tuning.road_right() - obstacle.right();
                if room_left > room_right {
                    input.left = true;
                } else {
                    input.right = true;
                }
                if gap < self.panic_distance {
                    input.decelerate = true;
                }
            }
            None => {
                if let Some(target_x) = nearest_coin_x(state, &player) {
                    let dx = target_x - player.center().x;
                    input.left = dx < -self.deadzone;
                    input.right = dx > self.deadzone;
                }
            }
        }

        if !input.decelerate {
            if state.player.speed < self.cruise_speed {
                input.accelerate = true;
            } else if state.player.speed > self.cruise_speed + tuning.brake {
                input.decelerate = true;
            }
        }

        input
    }
}

/// Closest obstacle above the player whose column (widened by `margin`)
/// overlaps the player's, with its vertical gap
fn nearest_threat(state: &GameState, player: &Rect, lookahead: f32, margin: f32) -> Option<(Rect, f32)> {
    let widened = Rect {
        pos: player.pos - glam::Vec2::new(margin, 0.0),
        size: player.size + glam::Vec2::new(margin * 2.0, 0.0),
    };
    state
        .obstacles
        .iter()
        .filter(|o| o.rect.bottom() <= player.bottom() && widened.overlaps_horizontally(&o.rect))
        .map(|o| (o.rect, player.y() - o.rect.bottom()))
        .filter(|(_, gap)| *gap < lookahead)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Center x of the lowest coin still above the player
fn nearest_coin_x(state: &GameState, player: &Rect) -> Option<f32> {
    state
        .coins
        .iter()
        .filter(|c| c.active && c.rect.y() < player.bottom())
        .max_by(|a, b| {
            a.rect
                .y()
                .partial_cmp(&b.rect.y())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.rect.center().x)
}
