//! Data-driven game balance
//!
//! One block per game. Every field has a default matching the classic
//! browser versions, so a settings file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::SimError;
use crate::sim::Playfield;

/// Asteroids balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidsTuning {
    pub width: f32,
    pub height: f32,
    pub tick_hz: u32,
    pub asteroid_count: usize,
    pub starting_lives: u32,
    /// Points per asteroid destroyed
    pub asteroid_reward: u64,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    /// Each velocity component is drawn from `[-max, max)`
    pub asteroid_max_speed: f32,
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_thrust: f32,
    pub ship_max_speed: f32,
    /// Speed multiplier applied every tick
    pub ship_friction: f32,
    /// Radians per tick while turning
    pub ship_turn_rate: f32,
    /// Ticks of invulnerability after a respawn
    pub respawn_grace_ticks: u32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_lifetime_ticks: u32,
}

impl Default for AsteroidsTuning {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_hz: 60,
            asteroid_count: 5,
            starting_lives: 1,
            asteroid_reward: 10,
            asteroid_min_radius: 20.0,
            asteroid_max_radius: 50.0,
            asteroid_max_speed: 1.5,
            ship_width: 30.0,
            ship_height: 30.0,
            ship_thrust: 0.1,
            ship_max_speed: 5.0,
            ship_friction: 0.98,
            ship_turn_rate: 0.1,
            respawn_grace_ticks: 120,
            bullet_speed: 8.0,
            bullet_radius: 3.0,
            bullet_lifetime_ticks: 100,
        }
    }
}

impl AsteroidsTuning {
    pub fn playfield(&self) -> Result<Playfield, SimError> {
        Playfield::new(self.width, self.height)
    }
}

/// Pong balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongTuning {
    pub width: f32,
    pub height: f32,
    pub tick_hz: u32,
    pub ball_radius: f32,
    /// Initial velocity (x, y)
    pub ball_velocity: (f32, f32),
    /// Speed after every serve
    pub ball_serve_speed: f32,
    /// Speed added by every paddle hit
    pub ball_speedup: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Fraction of the gap to the ball the computer closes each tick
    pub ai_follow: f32,
    /// Largest bounce angle off a paddle edge (radians)
    pub max_bounce_angle: f32,
    /// Points that end the match (none = endless)
    pub points_to_win: Option<u32>,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_hz: 50,
            ball_radius: 10.0,
            ball_velocity: (5.0, 5.0),
            ball_serve_speed: 7.0,
            ball_speedup: 0.1,
            paddle_width: 10.0,
            paddle_height: 100.0,
            ai_follow: 0.1,
            max_bounce_angle: std::f32::consts::FRAC_PI_4,
            points_to_win: None,
        }
    }
}

impl PongTuning {
    pub fn playfield(&self) -> Result<Playfield, SimError> {
        Playfield::new(self.width, self.height)
    }
}

/// Space Invaders balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvadersTuning {
    pub width: f32,
    pub height: f32,
    pub tick_hz: u32,
    pub starting_lives: u32,
    pub alien_rows: usize,
    pub alien_columns: usize,
    pub alien_width: f32,
    pub alien_height: f32,
    /// Gap between neighbouring aliens
    pub alien_spacing: f32,
    /// Formation's top-left offset from the playfield corner
    pub formation_margin: f32,
    pub alien_start_speed: f32,
    /// Speed added every `speedup_every` points
    pub alien_speedup: f32,
    pub speedup_every: u64,
    /// How far the formation drops when it turns around
    pub alien_drop: f32,
    pub alien_reward: u64,
    pub cannon_width: f32,
    pub cannon_height: f32,
    /// Gap between the cannon and the bottom edge
    pub cannon_margin: f32,
    /// Pixels per key press
    pub cannon_step: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
}

impl Default for InvadersTuning {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_hz: 60,
            starting_lives: 3,
            alien_rows: 5,
            alien_columns: 10,
            alien_width: 40.0,
            alien_height: 30.0,
            alien_spacing: 10.0,
            formation_margin: 30.0,
            alien_start_speed: 1.0,
            alien_speedup: 0.5,
            speedup_every: 5,
            alien_drop: 10.0,
            alien_reward: 1,
            cannon_width: 50.0,
            cannon_height: 30.0,
            cannon_margin: 10.0,
            cannon_step: 10.0,
            bullet_width: 5.0,
            bullet_height: 15.0,
            bullet_speed: 5.0,
        }
    }
}

impl InvadersTuning {
    pub fn playfield(&self) -> Result<Playfield, SimError> {
        Playfield::new(self.width, self.height)
    }
}

/// Tic-Tac-Toe layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeTuning {
    pub width: f32,
    pub height: f32,
    pub tick_hz: u32,
}

impl Default for TicTacToeTuning {
    fn default() -> Self {
        Self {
            width: DEFAULT_HEIGHT,
            height: DEFAULT_HEIGHT,
            tick_hz: 30,
        }
    }
}

impl TicTacToeTuning {
    pub fn playfield(&self) -> Result<Playfield, SimError> {
        Playfield::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: PongTuning = serde_json::from_str(r#"{ "tick_hz": 60, "points_to_win": 11 }"#).unwrap();
        assert_eq!(tuning.tick_hz, 60);
        assert_eq!(tuning.points_to_win, Some(11));
        assert_eq!(tuning.ball_radius, 10.0);
        assert_eq!(tuning.paddle_height, 100.0);
    }

    #[test]
    fn test_bad_playfield_is_rejected() {
        let tuning = AsteroidsTuning {
            width: -800.0,
            ..Default::default()
        };
        assert!(tuning.playfield().is_err());
    }
}
