//! Asteroids
//!
//! A ship in a wrap-around field shoots drifting asteroids. Every asteroid
//! destroyed is replaced by a fresh one somewhere random, so the field never
//! empties. Touching an asteroid costs a life.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, check_dimension};
use crate::heading;
use crate::renderer::shapes::ship_triangle;
use crate::renderer::{Color, DrawCommand, Renderer};
use crate::sim::{
    Entities, Entity, EntityId, Game, GameEvent, HudStatus, Keys, Playfield, RngState, Shape,
    TickInput, first_hits, overlaps,
};
use crate::tuning::AsteroidsTuning;

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, 0 = +x)
    pub angle: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub max_speed: f32,
    pub thrust: f32,
    pub friction: f32,
    pub turn_rate: f32,
    /// Ticks left during which asteroids pass through the ship
    pub grace_ticks: u32,
}

impl Ship {
    pub fn new(pos: Vec2, tuning: &AsteroidsTuning) -> Result<Self, SimError> {
        Ok(Self {
            pos,
            angle: 0.0,
            speed: 0.0,
            width: check_dimension("ship", "width", tuning.ship_width)?,
            height: check_dimension("ship", "height", tuning.ship_height)?,
            max_speed: tuning.ship_max_speed,
            thrust: tuning.ship_thrust,
            friction: tuning.ship_friction,
            turn_rate: tuning.ship_turn_rate,
            grace_ticks: 0,
        })
    }

    /// Collision radius
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.grace_ticks > 0
    }
}

impl Entity for Ship {
    fn update(&mut self, ticks: u32, input: &TickInput, field: &Playfield) {
        for _ in 0..ticks {
            if input.held.contains(Keys::UP) {
                self.speed = (self.speed + self.thrust).min(self.max_speed);
            }
            if input.held.contains(Keys::LEFT) {
                self.angle -= self.turn_rate;
            }
            if input.held.contains(Keys::RIGHT) {
                self.angle += self.turn_rate;
            }

            self.speed *= self.friction;
            self.pos = field.wrap(self.pos + heading(self.angle) * self.speed);
            self.grace_ticks = self.grace_ticks.saturating_sub(1);
        }
    }

    fn bounds(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius(),
        }
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub lifetime: u32,
    pub age: u32,
    /// Set once the bullet left the field or outlived its lifetime
    pub expired: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, tuning: &AsteroidsTuning) -> Result<Self, SimError> {
        Ok(Self {
            pos,
            angle,
            speed: tuning.bullet_speed,
            radius: check_dimension("bullet", "radius", tuning.bullet_radius)?,
            lifetime: tuning.bullet_lifetime_ticks,
            age: 0,
            expired: false,
        })
    }
}

impl Entity for Bullet {
    fn update(&mut self, ticks: u32, _input: &TickInput, field: &Playfield) {
        for _ in 0..ticks {
            if self.expired {
                return;
            }
            self.pos += heading(self.angle) * self.speed;
            self.age += 1;
            self.expired = !field.contains(self.pos) || self.age > self.lifetime;
        }
    }

    fn bounds(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius,
        }
    }

    fn is_alive(&self) -> bool {
        !self.expired
    }
}

/// A drifting rock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, SimError> {
        Ok(Self {
            pos,
            vel,
            radius: check_dimension("asteroid", "radius", radius)?,
        })
    }

    /// Random size and drift at a random spot
    pub fn random(rng: &mut Pcg32, field: &Playfield, tuning: &AsteroidsTuning) -> Result<Self, SimError> {
        let pos = Vec2::new(sample(rng, 0.0, field.width), sample(rng, 0.0, field.height));
        let radius = sample(rng, tuning.asteroid_min_radius, tuning.asteroid_max_radius);
        let max = tuning.asteroid_max_speed.abs();
        let vel = Vec2::new(sample(rng, -max, max), sample(rng, -max, max));
        Self::new(pos, vel, radius)
    }
}

impl Entity for Asteroid {
    fn update(&mut self, ticks: u32, _input: &TickInput, field: &Playfield) {
        for _ in 0..ticks {
            self.pos = field.wrap(self.pos + self.vel);
        }
    }

    fn bounds(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius,
        }
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` for an empty range
fn sample(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Complete Asteroids world
#[derive(Debug, Clone)]
pub struct Asteroids {
    tuning: AsteroidsTuning,
    field: Playfield,
    rng_state: RngState,
    rng: Pcg32,
    pub ship: Ship,
    pub bullets: Entities<Bullet>,
    pub asteroids: Entities<Asteroid>,
    score: u64,
    lives: u32,
    game_over: bool,
    time_ticks: u64,
    events: Vec<GameEvent>,
}

impl Asteroids {
    pub fn new(tuning: AsteroidsTuning, seed: u64) -> Result<Self, SimError> {
        let field = tuning.playfield()?;
        check_dimension("asteroid", "min radius", tuning.asteroid_min_radius)?;
        check_dimension("asteroid", "max radius", tuning.asteroid_max_radius)?;
        check_dimension("bullet", "radius", tuning.bullet_radius)?;

        let rng_state = RngState::new(seed);
        let mut game = Self {
            ship: Ship::new(field.center(), &tuning)?,
            rng: rng_state.to_rng(),
            rng_state,
            field,
            bullets: Entities::new(),
            asteroids: Entities::new(),
            score: 0,
            lives: tuning.starting_lives,
            game_over: false,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        game.populate()?;
        Ok(game)
    }

    fn populate(&mut self) -> Result<(), SimError> {
        for _ in 0..self.tuning.asteroid_count {
            let asteroid = Asteroid::random(&mut self.rng, &self.field, &self.tuning)?;
            self.asteroids.spawn(asteroid);
        }
        log::info!(
            "Asteroids: {} asteroids, {} lives (seed {})",
            self.asteroids.len(),
            self.lives,
            self.rng_state.seed
        );
        Ok(())
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn tuning(&self) -> &AsteroidsTuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Fire a bullet from the ship's nose direction. Nothing fires once the
    /// game is over.
    pub fn fire(&mut self) -> Option<EntityId> {
        if self.game_over {
            return None;
        }
        // Tuning was validated in `new`, so the bullet radius is sound
        let bullet = Bullet {
            pos: self.ship.pos,
            angle: self.ship.angle,
            speed: self.tuning.bullet_speed,
            radius: self.tuning.bullet_radius,
            lifetime: self.tuning.bullet_lifetime_ticks,
            age: 0,
            expired: false,
        };
        self.events.push(GameEvent::ShotFired);
        Some(self.bullets.spawn(bullet))
    }

    /// Step 1: one-shot input
    fn apply_input(&mut self, input: &TickInput) {
        for _ in 0..input.presses(Keys::FIRE) {
            self.fire();
        }
    }

    /// Step 2: movement, expired bullets dropped
    fn move_entities(&mut self, input: &TickInput) {
        self.ship.update(1, input, &self.field);
        self.bullets.update_all(1, input, &self.field);
        self.bullets.sweep();
        self.asteroids.update_all(1, input, &self.field);
    }

    /// Steps 3 and 4: detect every collision, then apply the results.
    ///
    /// A bullet destroys at most one asteroid and each asteroid absorbs at
    /// most one bullet. The ship is tested against asteroids that survived
    /// the bullets; replacements are spawned only after the scan.
    pub fn resolve_collisions(&mut self) {
        if self.game_over {
            return;
        }

        let hits = first_hits(&self.bullets, &self.asteroids);
        let ship_hit = !self.ship.is_invulnerable() && {
            let ship = self.ship.bounds();
            self.asteroids
                .iter()
                .filter(|(id, _)| !hits.iter().any(|(_, a)| a == id))
                .any(|(_, asteroid)| overlaps(&ship, &asteroid.bounds()))
        };

        for &(bullet, asteroid) in &hits {
            self.bullets.destroy(bullet);
            self.asteroids.destroy(asteroid);
            self.score += self.tuning.asteroid_reward;
            self.events.push(GameEvent::TargetDestroyed {
                points: self.tuning.asteroid_reward,
            });
        }
        self.bullets.sweep();
        self.asteroids.sweep();

        for _ in 0..hits.len() {
            match Asteroid::random(&mut self.rng, &self.field, &self.tuning) {
                Ok(asteroid) => {
                    self.asteroids.spawn(asteroid);
                }
                Err(e) => log::warn!("Asteroid respawn skipped: {}", e),
            }
        }

        if ship_hit {
            self.lose_life();
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost);
        if self.lives == 0 {
            log::info!("Asteroids: ship destroyed, game over (score {})", self.score);
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
        } else {
            log::info!("Asteroids: ship destroyed, {} lives left", self.lives);
            self.ship.pos = self.field.center();
            self.ship.speed = 0.0;
            self.ship.angle = 0.0;
            self.ship.grace_ticks = self.tuning.respawn_grace_ticks;
        }
    }
}

impl Game for Asteroids {
    fn name(&self) -> &'static str {
        "Asteroids"
    }

    fn tick(&mut self, input: &TickInput) {
        if self.game_over {
            return;
        }
        self.time_ticks += 1;
        self.apply_input(input);
        self.move_entities(input);
        self.resolve_collisions();
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(DrawCommand::Clear { color: Color::BLACK });

        // Blink while invulnerable
        if !self.ship.is_invulnerable() || (self.ship.grace_ticks / 8) % 2 == 0 {
            renderer.draw(ship_triangle(
                self.ship.pos,
                self.ship.angle,
                self.ship.width,
                self.ship.height,
                Color::WHITE,
            ));
        }
        for bullet in self.bullets.values() {
            renderer.draw(DrawCommand::Circle {
                center: bullet.pos,
                radius: bullet.radius,
                color: Color::RED,
            });
        }
        for asteroid in self.asteroids.values() {
            renderer.draw(DrawCommand::Circle {
                center: asteroid.pos,
                radius: asteroid.radius,
                color: Color::GRAY,
            });
        }
    }

    fn hud(&self) -> HudStatus {
        HudStatus {
            score: self.score,
            lives: self.lives,
            game_over: self.game_over,
        }
    }

    fn reset(&mut self) {
        // The RNG keeps running so every new round gets a fresh layout
        self.ship.pos = self.field.center();
        self.ship.angle = 0.0;
        self.ship.speed = 0.0;
        self.ship.grace_ticks = 0;
        self.bullets.clear();
        self.asteroids.clear();
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.game_over = false;
        self.time_ticks = 0;
        self.events.clear();
        if let Err(e) = self.populate() {
            log::warn!("Asteroids reset left the field empty: {}", e);
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn empty_field() -> Asteroids {
        let tuning = AsteroidsTuning {
            asteroid_count: 0,
            ..Default::default()
        };
        Asteroids::new(tuning, 7).unwrap()
    }

    fn rock(x: f32, y: f32, radius: f32) -> Asteroid {
        Asteroid::new(Vec2::new(x, y), Vec2::ZERO, radius).unwrap()
    }

    fn bullet_at(game: &Asteroids, x: f32, y: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), 0.0, game.tuning()).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = Asteroids::new(AsteroidsTuning::default(), 1).unwrap();
        assert_eq!(game.asteroids.len(), 5);
        assert!(game.bullets.is_empty());
        assert_eq!(game.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.hud(), HudStatus { score: 0, lives: 1, game_over: false });
        for asteroid in game.asteroids.values() {
            assert!(asteroid.radius >= 20.0 && asteroid.radius < 50.0);
            assert!(asteroid.vel.x.abs() <= 1.5 && asteroid.vel.y.abs() <= 1.5);
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        assert!(matches!(
            Asteroid::new(Vec2::ZERO, Vec2::ZERO, -20.0),
            Err(SimError::InvalidEntityConfig { entity: "asteroid", .. })
        ));
        let tuning = AsteroidsTuning {
            bullet_radius: -3.0,
            ..Default::default()
        };
        assert!(Asteroids::new(tuning, 1).is_err());
    }

    #[test]
    fn test_bullet_hit_scores_and_replaces() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(100.0, 100.0, 20.0));
        let bullet = bullet_at(&game, 115.0, 100.0);
        game.bullets.spawn(bullet);

        game.resolve_collisions();

        assert_eq!(game.score(), 10);
        assert!(game.bullets.is_empty());
        // The hit asteroid is gone and exactly one replacement exists
        assert_eq!(game.asteroids.len(), 1);
        assert_ne!(game.asteroids.values().next().map(|a| a.pos), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::TargetDestroyed { points: 10 }]
        );
    }

    #[test]
    fn test_bullet_destroys_only_one_asteroid() {
        let mut game = empty_field();
        // Two asteroids overlapping the same bullet
        game.asteroids.spawn(rock(100.0, 100.0, 20.0));
        game.asteroids.spawn(rock(130.0, 100.0, 20.0));
        let bullet = bullet_at(&game, 115.0, 100.0);
        game.bullets.spawn(bullet);

        game.resolve_collisions();

        assert_eq!(game.score(), 10);
        assert_eq!(game.asteroids.len(), 2);
        // The untouched asteroid is the second one
        assert!(game.asteroids.values().any(|a| a.pos == Vec2::new(130.0, 100.0)));
    }

    #[test]
    fn test_two_bullets_one_asteroid() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(100.0, 100.0, 20.0));
        let first = bullet_at(&game, 110.0, 100.0);
        let second = bullet_at(&game, 90.0, 100.0);
        let first_id = game.bullets.spawn(first);
        let second_id = game.bullets.spawn(second);

        game.resolve_collisions();

        assert_eq!(game.score(), 10);
        assert!(!game.bullets.contains(first_id));
        assert!(game.bullets.contains(second_id));
    }

    #[test]
    fn test_fire_spawns_bullet_from_ship() {
        let mut game = empty_field();
        let input = TickInput::with_events([crate::sim::InputEvent::KeyPressed(Keys::FIRE)]);
        game.tick(&input);

        assert_eq!(game.bullets.len(), 1);
        let bullet = game.bullets.values().next().unwrap();
        // Fired at angle 0 and moved one step
        assert_eq!(bullet.pos, Vec2::new(408.0, 300.0));
        assert_eq!(game.drain_events(), vec![GameEvent::ShotFired]);
    }

    #[test]
    fn test_bullet_expires() {
        let mut game = empty_field();
        game.fire();
        // 800 px field, ship at 400, 8 px per tick: off the right edge after 51 ticks
        for _ in 0..50 {
            game.tick(&TickInput::default());
        }
        assert_eq!(game.bullets.len(), 1);
        game.tick(&TickInput::default());
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn test_bullet_lifetime() {
        let tuning = AsteroidsTuning {
            asteroid_count: 0,
            bullet_speed: 0.0,
            ..Default::default()
        };
        let mut game = Asteroids::new(tuning, 1).unwrap();
        game.fire();
        for _ in 0..100 {
            game.tick(&TickInput::default());
        }
        assert_eq!(game.bullets.len(), 1);
        game.tick(&TickInput::default());
        assert!(game.bullets.is_empty());
    }

    #[test]
    fn test_ship_thrust_friction_and_wrap() {
        let mut game = empty_field();
        game.tick(&TickInput::holding(Keys::UP));
        assert!((game.ship.speed - 0.098).abs() < 1e-6);

        for _ in 0..200 {
            game.tick(&TickInput::holding(Keys::UP));
        }
        assert!(game.ship.speed <= game.ship.max_speed);
        assert!(game.field().contains(game.ship.pos));

        // Rotation
        let before = game.ship.angle;
        game.tick(&TickInput::holding(Keys::LEFT));
        assert!((game.ship.angle - (before - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_ship_hit_ends_game() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(410.0, 300.0, 20.0));
        game.tick(&TickInput::default());

        assert!(game.is_game_over());
        assert_eq!(game.lives(), 0);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::LifeLost));
        assert!(events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_extra_life_respawns_with_grace() {
        let tuning = AsteroidsTuning {
            asteroid_count: 0,
            starting_lives: 2,
            ..Default::default()
        };
        let mut game = Asteroids::new(tuning, 3).unwrap();
        game.ship.pos = Vec2::new(100.0, 100.0);
        game.asteroids.spawn(rock(100.0, 100.0, 20.0));
        game.tick(&TickInput::default());

        assert!(!game.is_game_over());
        assert_eq!(game.lives(), 1);
        assert_eq!(game.ship.pos, Vec2::new(400.0, 300.0));
        assert!(game.ship.is_invulnerable());

        // Sitting on an asteroid while invulnerable is harmless
        game.asteroids.spawn(rock(400.0, 300.0, 20.0));
        game.tick(&TickInput::default());
        assert_eq!(game.lives(), 1);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(400.0, 300.0, 20.0));
        game.tick(&TickInput::default());
        assert!(game.is_game_over());

        let ship = game.ship.clone();
        let asteroids = game.asteroids.clone();
        let ticks = game.time_ticks();
        let input = TickInput {
            held: Keys::UP | Keys::LEFT,
            events: vec![crate::sim::InputEvent::KeyPressed(Keys::FIRE)],
        };
        game.tick(&input);

        assert_eq!(game.ship, ship);
        assert_eq!(game.asteroids, asteroids);
        assert!(game.bullets.is_empty());
        assert_eq!(game.time_ticks(), ticks);
    }

    #[test]
    fn test_fire_and_collisions_ignored_after_game_over() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(400.0, 300.0, 20.0));
        game.tick(&TickInput::default());
        assert!(game.is_game_over());
        game.drain_events();

        let ship = game.ship.clone();
        let bullets = game.bullets.clone();
        let asteroids = game.asteroids.clone();
        let score = game.score();

        assert_eq!(game.fire(), None);
        game.resolve_collisions();

        assert_eq!(game.ship, ship);
        assert_eq!(game.bullets, bullets);
        assert_eq!(game.asteroids, asteroids);
        assert_eq!(game.score(), score);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_start() {
        let mut game = empty_field();
        game.asteroids.spawn(rock(400.0, 300.0, 20.0));
        game.tick(&TickInput::default());
        assert!(game.is_game_over());

        game.reset();
        assert_eq!(game.hud(), HudStatus { score: 0, lives: 1, game_over: false });
        assert_eq!(game.asteroids.len(), 0);
        assert_eq!(game.ship.pos, game.field().center());
    }

    #[test]
    fn test_render_draws_every_entity() {
        let mut game = Asteroids::new(AsteroidsTuning::default(), 9).unwrap();
        game.fire();
        let mut list = crate::renderer::CommandList::new();
        game.render(&mut list);
        assert_eq!(list.circles(Color::GRAY), 5);
        assert_eq!(list.circles(Color::RED), 1);
        assert!(matches!(list.commands[1], DrawCommand::Polygon { .. }));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (0u8..32, any::<bool>()).prop_map(|(bits, fire)| {
            let mut input = TickInput::holding(Keys::from_bits_truncate(bits));
            if fire {
                input.events.push(crate::sim::InputEvent::KeyPressed(Keys::FIRE));
            }
            input
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_positions_stay_in_bounds_and_score_grows(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..200),
        ) {
            let mut game = Asteroids::new(AsteroidsTuning::default(), seed).unwrap();
            let field = *game.field();
            let mut last_score = 0;

            for input in &inputs {
                let was_over = game.is_game_over();
                let before = (game.ship.clone(), game.asteroids.clone(), game.bullets.clone());
                game.tick(input);

                prop_assert!(field.contains(game.ship.pos));
                for asteroid in game.asteroids.values() {
                    prop_assert!(field.contains(asteroid.pos));
                }
                for bullet in game.bullets.values() {
                    prop_assert!(field.contains(bullet.pos));
                }
                prop_assert!(game.score() >= last_score);
                last_score = game.score();

                if was_over {
                    prop_assert_eq!(&game.ship, &before.0);
                    prop_assert_eq!(&game.asteroids, &before.1);
                    prop_assert_eq!(&game.bullets, &before.2);
                }
            }
        }
    }
}
