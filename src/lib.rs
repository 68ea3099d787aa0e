//! Arcade Loop - four arcade clones on one fixed-tick game loop
//!
//! Core modules:
//! - `sim`: Deterministic simulation core (entities, collisions, world, driver)
//! - `games`: Asteroids, Pong, Space Invaders and Tic-Tac-Toe
//! - `renderer`: Shape primitives handed to an external renderer
//! - `platform`: Display and audio sinks
//! - `settings` / `tuning`: Data-driven configuration

pub mod error;
pub mod games;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SimError};
pub use settings::{GameKind, Settings};

use glam::Vec2;

/// Loop configuration constants
pub mod consts {
    /// Maximum ticks run by a single `Driver::advance` call
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time the accumulator accepts (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Default run seed
    pub const DEFAULT_SEED: u64 = 0x5eed_cafe;
}

/// Unit vector pointing along `angle` (radians, canvas orientation: +y is down)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap a single coordinate onto `[0, max]`.
///
/// Leaving one edge puts the coordinate on the opposite edge.
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(-0.5, 800.0), 800.0);
        assert_eq!(wrap_coord(800.5, 800.0), 0.0);
        assert_eq!(wrap_coord(400.0, 800.0), 400.0);
        // Edges themselves stay put
        assert_eq!(wrap_coord(0.0, 800.0), 0.0);
        assert_eq!(wrap_coord(800.0, 800.0), 800.0);
    }

    #[test]
    fn test_heading() {
        let h = heading(0.0);
        assert!((h.x - 1.0).abs() < 1e-6);
        assert!(h.y.abs() < 1e-6);

        let h = heading(std::f32::consts::FRAC_PI_2);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y - 1.0).abs() < 1e-6);
    }
}
