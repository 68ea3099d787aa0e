//! Platform abstraction layer
//!
//! Host-side collaborators the driver talks to each tick:
//! - Display: score/lives/game-over text
//! - Audio: sound effects

use crate::sim::{GameEvent, HudStatus};

/// Receives the HUD once per tick
pub trait DisplaySink {
    fn publish(&mut self, status: HudStatus);
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Human player scores
    UserScore,
    /// Computer scores
    ComScore,
    /// Projectile fired
    Shoot,
    /// Target destroyed
    Explosion,
    /// Player lost a life
    LifeLost,
    /// New wave of enemies
    WaveSpawn,
    /// Mark placed on the board
    Place,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Sound for a game event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::ShotFired => SoundEffect::Shoot,
            GameEvent::TargetDestroyed { .. } => SoundEffect::Explosion,
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::WallBounce => SoundEffect::WallHit,
            GameEvent::PlayerScored => SoundEffect::UserScore,
            GameEvent::OpponentScored => SoundEffect::ComScore,
            GameEvent::WaveSpawned => SoundEffect::WaveSpawn,
            GameEvent::LifeLost => SoundEffect::LifeLost,
            GameEvent::MarkPlaced => SoundEffect::Place,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Plays sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Display that logs whenever the HUD changes
#[derive(Debug, Clone, Default)]
pub struct LogDisplay {
    last: Option<HudStatus>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<HudStatus> {
        self.last
    }
}

impl DisplaySink for LogDisplay {
    fn publish(&mut self, status: HudStatus) {
        if self.last == Some(status) {
            return;
        }
        if status.game_over {
            log::info!("Score: {}  Lives: {}  GAME OVER", status.score, status.lives);
        } else {
            log::info!("Score: {}  Lives: {}", status.score, status.lives);
        }
        self.last = Some(status);
    }
}

/// Audio sink that logs effects at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }
}

/// Audio sink that keeps every effect, for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordedAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordedAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}
