//! Game balance and layout tunables
//!
//! Loaded from JSON; any field left out falls back to the `consts` default.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Every knob the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub road_width: f32,
    pub car_width: f32,
    pub car_height: f32,
    pub player_bottom_margin: f32,
    pub coin_size: f32,

    // === Driving ===
    pub max_speed: f32,
    pub acceleration: f32,
    pub brake: f32,
    pub steer_step: f32,

    // === Spawning ===
    pub spawn_interval_ticks: u32,
    pub min_obstacle_spacing: f32,
    /// Chance in [0, 1] that a spawn attempt yields a coin
    pub coin_spawn_chance: f32,

    // === Scoring ===
    pub coin_reward: u64,

    // === Road animation ===
    pub stripe_speed: f32,
    pub stripe_period: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            road_width: ROAD_WIDTH,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            coin_size: COIN_SIZE,

            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            brake: BRAKE,
            steer_step: STEER_STEP,

            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            min_obstacle_spacing: MIN_OBSTACLE_SPACING,
            coin_spawn_chance: COIN_SPAWN_CHANCE,

            coin_reward: COIN_REWARD,

            stripe_speed: STRIPE_SPEED,
            stripe_period: STRIPE_PERIOD,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("malformed tuning JSON")?;
        if let Err(err) = tuning.validate() {
            log::warn!("Rejected tuning: {err:#}");
            return Err(err);
        }
        Ok(tuning)
    }

    /// Read a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("invalid tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize tuning")
    }

    /// Reject configurations the simulation cannot run on
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("road_width", self.road_width),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("coin_size", self.coin_size),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("brake", self.brake),
            ("stripe_period", self.stripe_period),
        ];
        for (name, value) in sizes {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be positive, got {value}"
            );
        }
        let non_negative = [
            ("steer_step", self.steer_step),
            ("min_obstacle_spacing", self.min_obstacle_spacing),
            ("stripe_speed", self.stripe_speed),
            ("player_bottom_margin", self.player_bottom_margin),
        ];
        for (name, value) in non_negative {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must not be negative, got {value}"
            );
        }
        ensure!(
            self.road_width <= self.screen_width,
            "road_width {} exceeds screen_width {}",
            self.road_width,
            self.screen_width
        );
        ensure!(
            self.car_width <= self.road_width,
            "car_width {} exceeds road_width {}",
            self.car_width,
            self.road_width
        );
        ensure!(
            self.coin_size <= self.road_width,
            "coin_size {} exceeds road_width {}",
            self.coin_size,
            self.road_width
        );
        ensure!(
            self.car_height + self.player_bottom_margin <= self.screen_height,
            "player does not fit on screen"
        );
        ensure!(
            (0.0..=1.0).contains(&self.coin_spawn_chance),
            "coin_spawn_chance must be within [0, 1], got {}",
            self.coin_spawn_chance
        );
        Ok(())
    }

    /// Left edge of the drivable road
    pub fn road_left(&self) -> f32 {
        crate::road_left(self.screen_width, self.road_width)
    }

    /// Right edge of the drivable road
    pub fn road_right(&self) -> f32 {
        crate::road_right(self.screen_width, self.road_width)
    }

    /// Clamp the left edge of something `width` wide onto the road
    pub fn clamp_to_lane(&self, x: f32, width: f32) -> f32 {
        crate::clamp_to_lane(x, width, self.screen_width, self.road_width)
    }
}
