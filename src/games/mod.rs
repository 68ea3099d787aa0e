//! The four games
//!
//! Each game owns its world and implements [`Game`]; [`build`] picks one by
//! [`GameKind`] for hosts that decide at runtime.

pub mod asteroids;
pub mod invaders;
pub mod pong;
pub mod tictactoe;

pub use asteroids::Asteroids;
pub use invaders::SpaceInvaders;
pub use pong::Pong;
pub use tictactoe::TicTacToe;

use crate::error::SimError;
use crate::settings::{GameKind, Settings};
use crate::sim::Game;

/// Build the world for `kind` from settings
pub fn build(kind: GameKind, settings: &Settings) -> Result<Box<dyn Game>, SimError> {
    let game: Box<dyn Game> = match kind {
        GameKind::Asteroids => Box::new(Asteroids::new(settings.asteroids.clone(), settings.seed)?),
        GameKind::Pong => Box::new(Pong::new(settings.pong.clone())?),
        GameKind::SpaceInvaders => Box::new(SpaceInvaders::new(settings.invaders.clone())?),
        GameKind::TicTacToe => Box::new(TicTacToe::new(&settings.tictactoe)?),
    };
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LogDisplay, RecordedAudio};
    use crate::renderer::CommandList;
    use crate::sim::{Driver, Frontend, RunState};

    #[test]
    fn test_build_every_kind() {
        let settings = Settings::default();
        for kind in GameKind::ALL {
            let game = build(kind, &settings).unwrap();
            assert!(!game.hud().game_over, "{} starts over", game.name());
        }
    }

    #[test]
    fn test_build_rejects_bad_tuning() {
        let mut settings = Settings::default();
        settings.pong.ball_radius = -10.0;
        assert!(build(GameKind::Pong, &settings).is_err());
        assert!(build(GameKind::Asteroids, &settings).is_ok());
    }

    #[test]
    fn test_boxed_game_runs_in_driver() {
        let settings = Settings::default();
        let game = build(GameKind::TicTacToe, &settings).unwrap();
        let mut driver = Driver::new(game, settings.tick_hz(GameKind::TicTacToe));

        let mut renderer = CommandList::new();
        let mut display = LogDisplay::new();
        let mut audio = RecordedAudio::default();
        let mut frontend = Frontend {
            renderer: &mut renderer,
            display: &mut display,
            audio: &mut audio,
        };

        // X takes the top row while O plays the middle row
        for (x, y) in [(100.0, 100.0), (100.0, 300.0), (300.0, 100.0), (300.0, 300.0), (500.0, 100.0)] {
            driver.click(glam::Vec2::new(x, y));
            driver.tick(&mut frontend);
        }

        assert_eq!(driver.run_state(), RunState::GameOver);
        assert_eq!(display.last().map(|h| h.game_over), Some(true));
        assert_eq!(audio.played.len(), 6);
    }

    #[test]
    fn test_same_seed_same_run() {
        let settings = Settings::default();
        let mut a = Asteroids::new(settings.asteroids.clone(), 99).unwrap();
        let mut b = Asteroids::new(settings.asteroids.clone(), 99).unwrap();
        let input = crate::sim::TickInput::holding(crate::sim::Keys::UP | crate::sim::Keys::LEFT);
        for _ in 0..120 {
            a.tick(&input);
            b.tick(&input);
        }
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.ship, b.ship);
    }
}
