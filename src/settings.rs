//! Run settings
//!
//! Loaded from a JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SEED;
use crate::error::ConfigError;
use crate::tuning::{AsteroidsTuning, InvadersTuning, PongTuning, TicTacToeTuning};

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameKind {
    #[default]
    Asteroids,
    Pong,
    SpaceInvaders,
    TicTacToe,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Asteroids,
        GameKind::Pong,
        GameKind::SpaceInvaders,
        GameKind::TicTacToe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Asteroids => "asteroids",
            GameKind::Pong => "pong",
            GameKind::SpaceInvaders => "space-invaders",
            GameKind::TicTacToe => "tic-tac-toe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asteroids" => Some(GameKind::Asteroids),
            "pong" => Some(GameKind::Pong),
            "space-invaders" | "invaders" => Some(GameKind::SpaceInvaders),
            "tic-tac-toe" | "tictactoe" | "ttt" => Some(GameKind::TicTacToe),
            _ => None,
        }
    }
}

/// Settings for every game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,
    pub asteroids: AsteroidsTuning,
    pub pong: PongTuning,
    pub invaders: InvadersTuning,
    pub tictactoe: TicTacToeTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            asteroids: AsteroidsTuning::default(),
            pong: PongTuning::default(),
            invaders: InvadersTuning::default(),
            tictactoe: TicTacToeTuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check every playfield
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.asteroids.playfield()?;
        self.pong.playfield()?;
        self.invaders.playfield()?;
        self.tictactoe.playfield()?;
        Ok(())
    }

    /// Fixed tick rate for a game
    pub fn tick_hz(&self, kind: GameKind) -> u32 {
        let hz = match kind {
            GameKind::Asteroids => self.asteroids.tick_hz,
            GameKind::Pong => self.pong.tick_hz,
            GameKind::SpaceInvaders => self.invaders.tick_hz,
            GameKind::TicTacToe => self.tictactoe.tick_hz,
        };
        hz.max(1)
    }
}
