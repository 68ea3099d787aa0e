//! Game state shared by every game
//!
//! The `Game` trait is the seam between a game's world and the driver.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::TickInput;
use crate::renderer::Renderer;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; nothing changes until reset
    GameOver,
}

/// What the display sink shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HudStatus {
    pub score: u64,
    pub lives: u32,
    pub game_over: bool,
}

/// Something noteworthy that happened during a tick (drives audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a projectile
    ShotFired,
    /// A target was destroyed and `points` were awarded
    TargetDestroyed { points: u64 },
    /// Ball bounced off a paddle
    PaddleHit,
    /// Ball bounced off a top or bottom wall
    WallBounce,
    /// The human player scored
    PlayerScored,
    /// The opponent scored
    OpponentScored,
    /// A fresh enemy wave appeared
    WaveSpawned,
    /// Player lost a life
    LifeLost,
    /// A tic-tac-toe mark was placed
    MarkPlaced,
    /// The run ended
    GameOver,
}

/// A game world driven one fixed tick at a time
pub trait Game {
    /// Short display name
    fn name(&self) -> &'static str;

    /// Advance one tick: apply input, move entities, resolve collisions, then
    /// apply destroy/spawn/score/lives/game-over mutations.
    ///
    /// Must leave the world untouched once the game is over.
    fn tick(&mut self, input: &TickInput);

    /// Draw the current world
    fn render(&self, renderer: &mut dyn Renderer);

    /// Score, lives and game-over flag
    fn hud(&self) -> HudStatus;

    /// Reinitialize to the starting configuration
    fn reset(&mut self);

    /// Take the events produced since the last call
    fn drain_events(&mut self) -> Vec<GameEvent>;

    fn phase(&self) -> GamePhase {
        if self.hud().game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Running
        }
    }
}

impl<G: Game + ?Sized> Game for Box<G> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn tick(&mut self, input: &TickInput) {
        (**self).tick(input)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        (**self).render(renderer)
    }

    fn hud(&self) -> HudStatus {
        (**self).hud()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        (**self).drain_events()
    }
}

/// Seeded RNG source; restarting from the seed replays the same run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
