//! Arcade loop entry point
//!
//! Runs one game headless at its fixed tick rate with a scripted player,
//! logging HUD changes and sound cues, until game over or a time limit.
//!
//! Usage: `arcade-loop [game] [settings.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant};

    use arcade_loop::games;
    use arcade_loop::platform::{LogAudio, LogDisplay};
    use arcade_loop::renderer::CommandList;
    use arcade_loop::sim::{Driver, Frontend, Game, Keys, RunState};
    use arcade_loop::{GameKind, Settings};
    use glam::Vec2;

    const DEFAULT_TIME_LIMIT_SECS: f32 = 30.0;
    const FRAME: Duration = Duration::from_millis(16);

    struct Args {
        kind: GameKind,
        settings: Settings,
        time_limit: Duration,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = std::env::args().skip(1);

        let kind = match args.next() {
            Some(name) => GameKind::from_str(&name).ok_or_else(|| {
                let known: Vec<_> = GameKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown game '{}' (expected one of: {})", name, known.join(", "))
            })?,
            None => GameKind::default(),
        };

        let settings = match args.next() {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };

        let secs = match args.next() {
            Some(s) => s
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| format!("invalid time limit '{}'", s))?,
            None => DEFAULT_TIME_LIMIT_SECS,
        };

        Ok(Args {
            kind,
            settings,
            time_limit: Duration::from_secs_f32(secs),
        })
    }

    /// Feed the driver a canned stream of input for the given frame
    fn autopilot<G: Game>(kind: GameKind, driver: &mut Driver<G>, frame: u64, field: Vec2) {
        match kind {
            GameKind::Asteroids => {
                if frame == 0 {
                    driver.key_down(Keys::LEFT);
                }
                match frame % 90 {
                    0 => driver.key_down(Keys::UP),
                    30 => driver.key_up(Keys::UP),
                    _ => {}
                }
                if frame % 12 == 0 {
                    driver.key_down(Keys::FIRE);
                    driver.key_up(Keys::FIRE);
                }
            }
            GameKind::Pong => {
                let y = field.y / 2.0 + (frame as f32 * 0.05).sin() * field.y * 0.4;
                driver.mouse_moved(Vec2::new(10.0, y));
            }
            GameKind::SpaceInvaders => {
                let key = if (frame / 40) % 2 == 0 { Keys::LEFT } else { Keys::RIGHT };
                if frame % 4 == 0 {
                    driver.key_down(key);
                    driver.key_up(key);
                }
                if frame % 10 == 0 {
                    driver.key_down(Keys::FIRE);
                    driver.key_up(Keys::FIRE);
                }
            }
            GameKind::TicTacToe => {
                const ORDER: [(f32, f32); 9] = [
                    (1.0, 1.0),
                    (0.0, 0.0),
                    (2.0, 0.0),
                    (0.0, 2.0),
                    (0.0, 1.0),
                    (2.0, 1.0),
                    (1.0, 0.0),
                    (1.0, 2.0),
                    (2.0, 2.0),
                ];
                if frame % 20 == 0 {
                    let step = (frame / 20) as usize % ORDER.len();
                    let (col, row) = ORDER[step];
                    let cell = field / 3.0;
                    driver.click(Vec2::new((col + 0.5) * cell.x, (row + 0.5) * cell.y));
                }
            }
        }
    }

    fn field_size(kind: GameKind, settings: &Settings) -> Vec2 {
        match kind {
            GameKind::Asteroids => Vec2::new(settings.asteroids.width, settings.asteroids.height),
            GameKind::Pong => Vec2::new(settings.pong.width, settings.pong.height),
            GameKind::SpaceInvaders => Vec2::new(settings.invaders.width, settings.invaders.height),
            GameKind::TicTacToe => Vec2::new(settings.tictactoe.width, settings.tictactoe.height),
        }
    }

    pub fn run() -> i32 {
        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("usage: arcade-loop [game] [settings.json] [seconds]");
                return 2;
            }
        };

        let game = match games::build(args.kind, &args.settings) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start {}: {}", args.kind.as_str(), e);
                return 1;
            }
        };

        let field = field_size(args.kind, &args.settings);
        let mut driver = Driver::new(game, args.settings.tick_hz(args.kind));
        let mut renderer = CommandList::new();
        let mut display = LogDisplay::new();
        let mut audio = LogAudio;

        let started = Instant::now();
        let mut last = started;
        let mut frame = 0u64;

        while driver.run_state() == RunState::Running {
            if started.elapsed() >= args.time_limit {
                log::info!("Time limit reached");
                driver.stop();
                break;
            }

            autopilot(args.kind, &mut driver, frame, field);

            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f32();
            last = now;

            let mut frontend = Frontend {
                renderer: &mut renderer,
                display: &mut display,
                audio: &mut audio,
            };
            driver.advance(elapsed, &mut frontend);

            frame += 1;
            std::thread::sleep(FRAME);
        }

        let hud = driver.hud();
        log::info!(
            "{} finished: score {}, lives {}, game over {}, {} ticks, {} frames drawn",
            driver.game().name(),
            hud.score,
            hud.lives,
            hud.game_over,
            driver.ticks(),
            renderer.frames
        );
        0
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arcade loop (native) starting...");
    std::process::exit(native::run());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Driver` directly through the library
}
