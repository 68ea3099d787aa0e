//! Fixed-tick game loop driver
//!
//! Owns one game world exclusively. Each tick runs, in order:
//! 1. buffered input handed to the game
//! 2-4. game update: movement, collisions, world mutations
//! 5. render
//! 6. HUD published to the display sink
//!
//! Game over stops further ticks until `reset`. `stop` pauses the schedule
//! without ending the game.

use super::input::{InputBuffer, Keys};
use super::state::{Game, GamePhase, HudStatus};
use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};
use crate::platform::{AudioSink, DisplaySink, SoundEffect};
use crate::renderer::Renderer;

use glam::Vec2;

/// Host collaborators used during a tick
pub struct Frontend<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub display: &'a mut dyn DisplaySink,
    pub audio: &'a mut dyn AudioSink,
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal until reset
    GameOver,
    /// Halted by the host; `start` resumes
    Stopped,
}

/// Runs a game at a fixed logical tick rate
pub struct Driver<G: Game> {
    game: G,
    input: InputBuffer,
    tick_hz: u32,
    accumulator: f32,
    run_state: RunState,
    ticks: u64,
}

impl<G: Game> Driver<G> {
    pub fn new(game: G, tick_hz: u32) -> Self {
        let run_state = match game.phase() {
            GamePhase::Running => RunState::Running,
            GamePhase::GameOver => RunState::GameOver,
        };
        log::info!("{} driver ready at {} Hz", game.name(), tick_hz.max(1));
        Self {
            game,
            input: InputBuffer::new(),
            tick_hz: tick_hz.max(1),
            accumulator: 0.0,
            run_state,
            ticks: 0,
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Direct world access, for hosts and tests that stage a scenario
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Ticks executed since the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn hud(&self) -> HudStatus {
        self.game.hud()
    }

    // --- input, consumed at the start of the next tick ---

    pub fn key_down(&mut self, key: Keys) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Keys) {
        self.input.key_up(key);
    }

    pub fn mouse_moved(&mut self, pos: Vec2) {
        self.input.mouse_moved(pos);
    }

    pub fn click(&mut self, pos: Vec2) {
        self.input.click(pos);
    }

    /// Run exactly one tick. Returns false if the driver is not running.
    pub fn tick(&mut self, frontend: &mut Frontend<'_>) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }

        let input = self.input.take();
        self.game.tick(&input);
        self.ticks += 1;

        for event in self.game.drain_events() {
            frontend.audio.play(SoundEffect::for_event(event));
        }

        self.game.render(frontend.renderer);

        let hud = self.game.hud();
        frontend.display.publish(hud);

        if hud.game_over {
            log::info!(
                "{} over after {} ticks, final score {}",
                self.game.name(),
                self.ticks,
                hud.score
            );
            self.run_state = RunState::GameOver;
            self.accumulator = 0.0;
        }
        true
    }

    /// Add elapsed wall time and run every whole tick that fits.
    ///
    /// Frame time is clamped to `MAX_FRAME_TIME` and at most `MAX_SUBSTEPS`
    /// ticks run per call. Backlog beyond `MAX_SUBSTEPS` ticks is dropped.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_secs: f32, frontend: &mut Frontend<'_>) -> u32 {
        if self.run_state != RunState::Running {
            return 0;
        }

        let dt = self.tick_dt();
        self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            if !self.tick(frontend) {
                break;
            }
            self.accumulator -= dt;
            substeps += 1;
        }
        self.accumulator = self.accumulator.min(MAX_SUBSTEPS as f32 * dt);
        substeps
    }

    /// Halt the schedule without ending the game
    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("{} stopped", self.game.name());
            self.run_state = RunState::Stopped;
            self.accumulator = 0.0;
        }
    }

    /// Resume after `stop`. Has no effect after game over.
    pub fn start(&mut self) {
        if self.run_state == RunState::Stopped {
            log::info!("{} resumed", self.game.name());
            self.run_state = RunState::Running;
        }
    }

    /// Reinitialize the world and restart the schedule
    pub fn reset(&mut self) {
        log::info!("{} reset", self.game.name());
        self.game.reset();
        // Events from the previous run are stale
        self.game.drain_events();
        self.input.clear();
        self.accumulator = 0.0;
        self.ticks = 0;
        self.run_state = RunState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LogDisplay, RecordedAudio};
    use crate::renderer::{Color, CommandList, DrawCommand};
    use crate::sim::{GameEvent, TickInput};

    /// Counts ticks; ends after `limit` fire presses
    #[derive(Default)]
    struct Counter {
        updates: u64,
        presses: u64,
        limit: u64,
        held_seen: Vec<Keys>,
        events: Vec<GameEvent>,
    }

    impl Game for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn tick(&mut self, input: &TickInput) {
            if self.hud().game_over {
                return;
            }
            self.updates += 1;
            self.held_seen.push(input.held);
            let presses = input.presses(Keys::FIRE) as u64;
            self.presses += presses;
            for _ in 0..presses {
                self.events.push(GameEvent::ShotFired);
            }
            if self.hud().game_over {
                self.events.push(GameEvent::GameOver);
            }
        }

        fn render(&self, renderer: &mut dyn Renderer) {
            renderer.draw(DrawCommand::Clear { color: Color::BLACK });
        }

        fn hud(&self) -> HudStatus {
            HudStatus {
                score: self.presses,
                lives: 0,
                game_over: self.limit > 0 && self.presses >= self.limit,
            }
        }

        fn reset(&mut self) {
            self.updates = 0;
            self.presses = 0;
            self.held_seen.clear();
        }

        fn drain_events(&mut self) -> Vec<GameEvent> {
            std::mem::take(&mut self.events)
        }
    }

    struct Host {
        renderer: CommandList,
        display: LogDisplay,
        audio: RecordedAudio,
    }

    impl Host {
        fn new() -> Self {
            Self {
                renderer: CommandList::new(),
                display: LogDisplay::new(),
                audio: RecordedAudio::default(),
            }
        }

        fn frontend(&mut self) -> Frontend<'_> {
            Frontend {
                renderer: &mut self.renderer,
                display: &mut self.display,
                audio: &mut self.audio,
            }
        }
    }

    #[test]
    fn test_tick_renders_and_publishes() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 60);

        driver.key_down(Keys::FIRE);
        assert!(driver.tick(&mut host.frontend()));

        assert_eq!(host.renderer.frames, 1);
        assert_eq!(host.display.last().map(|h| h.score), Some(1));
        assert_eq!(host.audio.played, vec![SoundEffect::Shoot]);
    }

    #[test]
    fn test_input_is_consumed_once() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 60);

        driver.key_down(Keys::FIRE);
        driver.key_down(Keys::FIRE);
        driver.tick(&mut host.frontend());
        driver.tick(&mut host.frontend());

        assert_eq!(driver.game().presses, 2);
        // Held state persists across ticks until released
        assert_eq!(driver.game().held_seen, vec![Keys::FIRE, Keys::FIRE]);
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 50);

        // 0.05 s at 50 Hz = 2.5 ticks
        assert_eq!(driver.advance(0.05, &mut host.frontend()), 2);
        // The leftover half tick carries over
        assert_eq!(driver.advance(0.015, &mut host.frontend()), 1);
        assert_eq!(driver.game().updates, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 1000);
        // A long stall is clamped to MAX_FRAME_TIME and MAX_SUBSTEPS
        assert_eq!(driver.advance(5.0, &mut host.frontend()), MAX_SUBSTEPS);
    }

    #[test]
    fn test_advance_drops_backlog_past_substep_cap() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 1000);
        driver.advance(5.0, &mut host.frontend());
        assert!(driver.accumulator <= MAX_SUBSTEPS as f32 * driver.tick_dt());

        // The leftover fits in one more capped call, then nothing is owed
        driver.advance(0.0, &mut host.frontend());
        assert_eq!(driver.advance(0.0, &mut host.frontend()), 0);
    }

    #[test]
    fn test_game_over_stops_ticks_until_reset() {
        let mut host = Host::new();
        let game = Counter {
            limit: 1,
            ..Default::default()
        };
        let mut driver = Driver::new(game, 60);

        driver.key_down(Keys::FIRE);
        driver.tick(&mut host.frontend());
        assert_eq!(driver.run_state(), RunState::GameOver);

        driver.key_down(Keys::FIRE);
        assert!(!driver.tick(&mut host.frontend()));
        assert_eq!(driver.advance(1.0, &mut host.frontend()), 0);
        assert_eq!(driver.game().updates, 1);

        driver.reset();
        assert!(driver.is_running());
        assert_eq!(driver.ticks(), 0);
        // Input buffered before the reset was dropped
        driver.tick(&mut host.frontend());
        assert_eq!(driver.game().presses, 0);
    }

    #[test]
    fn test_stop_and_start() {
        let mut host = Host::new();
        let mut driver = Driver::new(Counter::default(), 60);

        driver.stop();
        assert_eq!(driver.run_state(), RunState::Stopped);
        assert!(!driver.tick(&mut host.frontend()));

        driver.start();
        assert!(driver.tick(&mut host.frontend()));
        assert_eq!(driver.game().updates, 1);
    }
}
