//! Space Invaders
//!
//! A formation of aliens marches side to side, dropping a row every time it
//! reaches an edge. The cannon at the bottom shoots lasers straight up. A
//! cleared formation is replaced by a fresh one; an alien reaching the cannon
//! costs a life and restarts the formation at the top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, check_dimension};
use crate::renderer::{Color, DrawCommand, Renderer};
use crate::sim::{
    Entities, Entity, Game, GameEvent, HudStatus, Keys, Playfield, Shape, TickInput, first_hits,
    overlaps,
};
use crate::tuning::InvadersTuning;

const EXPLOSION_RADIUS: f32 = 15.0;

/// The player's cannon, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels moved per key press
    pub step: f32,
}

impl Cannon {
    /// Shift one step left (`-1.0`) or right (`1.0`), staying on the field
    pub fn nudge(&mut self, direction: f32, field: &Playfield) {
        self.pos.x += direction * self.step;
        self.pos = field.clamp_rect(self.pos, self.size);
    }

    /// Where lasers leave the cannon
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

impl Entity for Cannon {
    /// Moves one step per LEFT/RIGHT press, however many ticks elapsed
    fn update(&mut self, _ticks: u32, input: &TickInput, field: &Playfield) {
        for _ in 0..input.presses(Keys::LEFT) {
            self.nudge(-1.0, field);
        }
        for _ in 0..input.presses(Keys::RIGHT) {
            self.nudge(1.0, field);
        }
    }

    fn bounds(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// A laser bolt travelling up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Laser {
    /// Top-center point, the only part that hits anything
    pub fn tip(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

impl Entity for Laser {
    fn update(&mut self, ticks: u32, _input: &TickInput, _field: &Playfield) {
        self.pos.y -= self.speed * ticks as f32;
    }

    fn bounds(&self) -> Shape {
        Shape::point(self.tip())
    }

    fn is_alive(&self) -> bool {
        self.pos.y >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set by the formation before every march
    pub vel: Vec2,
}

impl Entity for Alien {
    fn update(&mut self, ticks: u32, _input: &TickInput, _field: &Playfield) {
        self.pos += self.vel * ticks as f32;
    }

    fn bounds(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// Shared movement state of the alien formation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// `1.0` marching right, `-1.0` marching left
    pub direction: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Formation {
    /// Horizontal extents of every alien, as (left, right)
    pub fn extents(aliens: &Entities<Alien>) -> Option<(f32, f32)> {
        aliens.values().fold(None, |acc, alien| {
            let (left, right) = (alien.pos.x, alien.pos.x + alien.size.x);
            Some(match acc {
                None => (left, right),
                Some((l, r)) => (l.min(left), r.max(right)),
            })
        })
    }

    /// Work out this tick's motion and hand it to every alien.
    ///
    /// Touching the edge being marched toward flips the direction and drops
    /// the whole formation by `drop`. The horizontal step never carries an
    /// alien past either edge.
    pub fn steer(&mut self, aliens: &mut Entities<Alien>, field: &Playfield, drop: f32) {
        let Some((left, right)) = Self::extents(aliens) else {
            return;
        };

        let mut dy = 0.0;
        let at_edge = (self.direction < 0.0 && left <= 0.0)
            || (self.direction > 0.0 && right >= field.width);
        if at_edge {
            self.direction = -self.direction;
            dy = drop;
        }

        let dx = (self.speed * self.direction).max(-left).min(field.width - right);
        for alien in aliens.values_mut() {
            alien.vel = Vec2::new(dx, dy);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpaceInvaders {
    tuning: InvadersTuning,
    field: Playfield,
    pub cannon: Cannon,
    pub lasers: Entities<Laser>,
    pub aliens: Entities<Alien>,
    pub formation: Formation,
    /// Where aliens were destroyed during the last tick
    pub explosions: Vec<Vec2>,
    score: u64,
    lives: u32,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl SpaceInvaders {
    pub fn new(tuning: InvadersTuning) -> Result<Self, SimError> {
        let field = tuning.playfield()?;
        let cannon_size = Vec2::new(
            check_dimension("cannon", "width", tuning.cannon_width)?,
            check_dimension("cannon", "height", tuning.cannon_height)?,
        );
        check_dimension("laser", "width", tuning.bullet_width)?;
        check_dimension("laser", "height", tuning.bullet_height)?;
        check_dimension("alien", "width", tuning.alien_width)?;
        check_dimension("alien", "height", tuning.alien_height)?;
        check_dimension("alien", "spacing", tuning.alien_spacing)?;
        check_dimension("alien", "margin", tuning.formation_margin)?;

        let columns = tuning.alien_columns as f32;
        let formation_width = tuning.formation_margin + columns * tuning.alien_width
            + (columns - 1.0).max(0.0) * tuning.alien_spacing;
        if formation_width > field.width {
            return Err(SimError::invalid(
                "alien",
                format!("formation is {formation_width} wide, field only {}", field.width),
            ));
        }

        let cannon = Cannon {
            pos: Vec2::new(
                (field.width - cannon_size.x) / 2.0,
                field.height - cannon_size.y - tuning.cannon_margin,
            ),
            size: cannon_size,
            step: tuning.cannon_step,
        };

        let mut game = Self {
            cannon,
            lasers: Entities::new(),
            aliens: Entities::new(),
            formation: Formation {
                direction: 1.0,
                speed: tuning.alien_start_speed,
            },
            explosions: Vec::new(),
            score: 0,
            lives: tuning.starting_lives,
            game_over: false,
            events: Vec::new(),
            field,
            tuning,
        };
        game.spawn_formation();
        Ok(game)
    }

    pub fn field(&self) -> &Playfield {
        &self.field
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

    /// Fill the formation grid back in at its starting position
    pub fn spawn_formation(&mut self) {
        let t = &self.tuning;
        let size = Vec2::new(t.alien_width, t.alien_height);
        for row in 0..t.alien_rows {
            for col in 0..t.alien_columns {
                let pos = Vec2::new(
                    col as f32 * (t.alien_width + t.alien_spacing) + t.formation_margin,
                    row as f32 * (t.alien_height + t.alien_spacing) + t.formation_margin,
                );
                self.aliens.spawn(Alien {
                    pos,
                    size,
                    vel: Vec2::ZERO,
                });
            }
        }
        log::debug!("Space Invaders: formation of {} aliens", self.aliens.len());
    }

    /// Fire a laser from the cannon's muzzle, unless the game is over
    pub fn fire(&mut self) {
        if self.game_over {
            return;
        }
        let size = Vec2::new(self.tuning.bullet_width, self.tuning.bullet_height);
        let muzzle = self.cannon.muzzle();
        self.lasers.spawn(Laser {
            pos: Vec2::new(muzzle.x - size.x / 2.0, muzzle.y),
            size,
            speed: self.tuning.bullet_speed,
        });
        self.events.push(GameEvent::ShotFired);
    }

    /// Award points for one alien and speed the formation up at every
    /// multiple of `speedup_every`
    fn award(&mut self, points: u64) {
        let before = self.score;
        self.score += points;
        if let Some(every) = std::num::NonZeroU64::new(self.tuning.speedup_every) {
            let crossed = self.score / every.get() - before / every.get();
            self.formation.speed += crossed as f32 * self.tuning.alien_speedup;
        }
        self.events.push(GameEvent::TargetDestroyed { points });
    }

    /// True once any alien overlaps the cannon or has come down to its row
    fn formation_landed(&self) -> bool {
        let cannon = self.cannon.bounds();
        self.aliens.values().any(|alien| {
            alien.pos.y + alien.size.y >= self.cannon.pos.y || overlaps(&alien.bounds(), &cannon)
        })
    }

    /// Laser hits: each laser takes out at most one alien
    pub fn resolve_collisions(&mut self) {
        if self.game_over {
            return;
        }

        let hits = first_hits(&self.lasers, &self.aliens);
        for (laser, alien) in hits {
            if let Some(destroyed) = self.aliens.get(alien) {
                self.explosions.push(destroyed.pos + destroyed.size / 2.0);
            }
            self.lasers.destroy(laser);
            self.aliens.destroy(alien);
            self.award(self.tuning.alien_reward);
        }
        self.lasers.sweep();
        self.aliens.sweep();

        if self.aliens.is_empty() {
            log::info!("Space Invaders: formation cleared at score {}", self.score);
            self.spawn_formation();
            self.formation.direction = 1.0;
            self.events.push(GameEvent::WaveSpawned);
        }

        if self.formation_landed() {
            self.lose_life();
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost);
        if self.lives == 0 {
            log::info!("Space Invaders: invaded, game over (score {})", self.score);
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
            return;
        }

        log::info!("Space Invaders: invaders landed, {} lives left", self.lives);
        self.aliens.clear();
        self.lasers.clear();
        self.spawn_formation();
        self.formation.direction = 1.0;
    }
}

impl Game for SpaceInvaders {
    fn name(&self) -> &'static str {
        "Space Invaders"
    }

    fn tick(&mut self, input: &TickInput) {
        if self.game_over {
            return;
        }
        self.explosions.clear();

        self.cannon.update(1, input, &self.field);
        for _ in 0..input.presses(Keys::FIRE) {
            self.fire();
        }

        self.lasers.update_all(1, input, &self.field);
        self.lasers.sweep();

        self.formation.steer(&mut self.aliens, &self.field, self.tuning.alien_drop);
        self.aliens.update_all(1, input, &self.field);

        self.resolve_collisions();
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(DrawCommand::Clear { color: Color::BLACK });
        renderer.draw(DrawCommand::Rect {
            min: self.cannon.pos,
            size: self.cannon.size,
            color: Color::BLUE,
        });
        for laser in self.lasers.values() {
            renderer.draw(DrawCommand::Rect {
                min: laser.pos,
                size: laser.size,
                color: Color::RED,
            });
        }
        for alien in self.aliens.values() {
            renderer.draw(DrawCommand::Rect {
                min: alien.pos,
                size: alien.size,
                color: Color::GREEN,
            });
        }
        for &center in &self.explosions {
            renderer.draw(DrawCommand::Circle {
                center,
                radius: EXPLOSION_RADIUS,
                color: Color::ORANGE,
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
        self.cannon.pos = Vec2::new(
            (self.field.width - self.cannon.size.x) / 2.0,
            self.field.height - self.cannon.size.y - self.tuning.cannon_margin,
        );
        self.lasers.clear();
        self.aliens.clear();
        self.explosions.clear();
        self.formation = Formation {
            direction: 1.0,
            speed: self.tuning.alien_start_speed,
        };
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.game_over = false;
        self.events.clear();
        self.spawn_formation();
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
