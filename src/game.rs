//! Game instance driven by an external frame loop
//!
//! The driver calls `update` once per frame with the sampled input, then
//! reads `view` to draw. Rendering must happen between updates, never
//! during one.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, ObstacleVariant, Rect, TickInput, tick};
use crate::tuning::Tuning;

/// What the driver should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running
    Running,
    /// A reset was applied this frame
    Restarted,
    /// The player asked to leave
    Quit,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Handle one-shot commands, then run the simulation step
    ///
    /// `quit` wins over everything. `reset` only has an effect once the run
    /// is over.
    pub fn update(&mut self, input: &TickInput) -> TickOutcome {
        if input.quit {
            log::info!("Quit requested at score {}", self.state.score);
            return TickOutcome::Quit;
        }

        if self.state.phase == GamePhase::GameOver {
            if input.reset {
                self.state.reset(&self.tuning);
                return TickOutcome::Restarted;
            }
            return TickOutcome::Running;
        }

        tick(&mut self.state, input, &self.tuning, &mut self.rng);
        TickOutcome::Running
    }

    /// Start over with a new RNG seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.state.reset(&self.tuning);
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted scenarios and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only snapshot for the renderer
    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.state)
    }
}

/// Player as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub variant: ObstacleVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinView {
    pub rect: Rect,
    pub active: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub coins: Vec<CoinView>,
    pub road_stripe_offset: f32,
    pub score: u64,
    pub coins_collected: u32,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            player: PlayerView {
                rect: state.player.rect,
                speed: state.player.speed,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.rect,
                    variant: o.variant,
                })
                .collect(),
            coins: state
                .coins
                .iter()
                .map(|c| CoinView {
                    rect: c.rect,
                    active: c.active,
                })
                .collect(),
            road_stripe_offset: state.road_stripe_offset,
            score: state.score,
            coins_collected: state.coins_collected,
            game_over: state.phase == GamePhase::GameOver,
        }
    }

    /// Top-left HUD lines
    pub fn hud_text(&self) -> String {
        format!(
            "Speed: {:.1}\nScore: {}\nCoins: {}",
            self.player.speed, self.score, self.coins_collected
        )
    }

    /// Centered prompt shown after a crash
    pub fn game_over_text(&self) -> Option<&'static str> {
        self.game_over
            .then_some("GAME OVER\nPress R to restart\nPress ESC to exit")
    }
}
