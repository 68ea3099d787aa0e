//! Pong
//!
//! The player's paddle follows the mouse, the computer's paddle chases the
//! ball. Paddles clamp to the playfield; the ball bounces off the top and
//! bottom walls and is served again from the center after every point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, check_dimension};
use crate::renderer::shapes::dashed_net;
use crate::renderer::{Color, DrawCommand, Renderer};
use crate::sim::{Entity, Game, GameEvent, HudStatus, Playfield, Shape, TickInput, overlaps};
use crate::tuning::PongTuning;

const SCORE_TEXT_SIZE: f32 = 75.0;
const NET_WIDTH: f32 = 2.0;
const NET_DASH: f32 = 10.0;
const NET_SPACING: f32 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Magnitude used for the next paddle deflection
    pub speed: f32,
    pub radius: f32,
}

impl Entity for Ball {
    fn update(&mut self, ticks: u32, _input: &TickInput, _field: &Playfield) {
        self.pos += self.vel * ticks as f32;
    }

    fn bounds(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius,
        }
    }
}

/// A paddle, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

impl Entity for Paddle {
    /// Paddles are moved by the game; updating only enforces the bounds
    fn update(&mut self, _ticks: u32, _input: &TickInput, field: &Playfield) {
        self.pos = field.clamp_rect(self.pos, self.size);
    }

    fn bounds(&self) -> Shape {
        Shape::Rect {
            min: self.pos,
            size: self.size,
        }
    }
}

/// Which paddle a ball interacts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    User,
    Computer,
}

#[derive(Debug, Clone)]
pub struct Pong {
    tuning: PongTuning,
    field: Playfield,
    pub ball: Ball,
    pub user: Paddle,
    pub com: Paddle,
    user_score: u32,
    com_score: u32,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl Pong {
    pub fn new(tuning: PongTuning) -> Result<Self, SimError> {
        let field = tuning.playfield()?;
        let radius = check_dimension("ball", "radius", tuning.ball_radius)?;
        let size = Vec2::new(
            check_dimension("paddle", "width", tuning.paddle_width)?,
            check_dimension("paddle", "height", tuning.paddle_height)?,
        );
        if size.y == 0.0 {
            return Err(SimError::invalid("paddle", "height must be positive"));
        }

        let paddle_y = (field.height - size.y) / 2.0;
        let game = Self {
            ball: Ball {
                pos: field.center(),
                vel: Vec2::from(tuning.ball_velocity),
                speed: tuning.ball_serve_speed,
                radius,
            },
            user: Paddle {
                pos: Vec2::new(0.0, paddle_y),
                size,
            },
            com: Paddle {
                pos: Vec2::new(field.width - size.x, paddle_y),
                size,
            },
            user_score: 0,
            com_score: 0,
            game_over: false,
            events: Vec::new(),
            field,
            tuning,
        };
        log::info!("Pong: {}x{} field, first to {:?}", field.width, field.height, game.tuning.points_to_win);
        Ok(game)
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn user_score(&self) -> u32 {
        self.user_score
    }

    pub fn com_score(&self) -> u32 {
        self.com_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The paddle on the ball's half of the field
    pub fn facing_side(&self) -> Side {
        if self.ball.pos.x + self.ball.radius < self.field.width / 2.0 {
            Side::User
        } else {
            Side::Computer
        }
    }

    /// Center the ball, reverse its horizontal direction and reset its speed
    pub fn serve(&mut self) {
        self.ball.pos = self.field.center();
        self.ball.vel.x = -self.ball.vel.x;
        self.ball.speed = self.tuning.ball_serve_speed;
    }

    fn track_computer(&mut self) {
        let gap = self.ball.pos.y - self.com.center_y();
        self.com.pos.y += gap * self.tuning.ai_follow;
    }

    fn bounce_off_walls(&mut self) {
        let r = self.ball.radius;
        let (top, bottom) = (r, (self.field.height - r).max(r));
        if self.ball.pos.y < top {
            self.ball.pos.y = top;
            self.ball.vel.y = self.ball.vel.y.abs();
            self.events.push(GameEvent::WallBounce);
        } else if self.ball.pos.y > bottom {
            self.ball.pos.y = bottom;
            self.ball.vel.y = -self.ball.vel.y.abs();
            self.events.push(GameEvent::WallBounce);
        }
    }

    /// Deflect the ball off the paddle on its half, if they overlap.
    ///
    /// The bounce angle grows with the distance from the paddle's center, up
    /// to `max_bounce_angle` at either end.
    /// Returns whether the ball hit a paddle. A hit places the ball clear of
    /// the paddle face, so a fast ball that reached past it is still returned
    /// rather than scored.
    fn deflect_off_paddle(&mut self) -> bool {
        let side = self.facing_side();
        let paddle = match side {
            Side::User => &self.user,
            Side::Computer => &self.com,
        };
        if !overlaps(&self.ball.bounds(), &paddle.bounds()) {
            return false;
        }

        let half = paddle.size.y / 2.0;
        let collide_point = ((self.ball.pos.y - paddle.center_y()) / half).clamp(-1.0, 1.0);
        let angle = self.tuning.max_bounce_angle * collide_point;
        let (direction, face_x) = match side {
            Side::User => (1.0, paddle.pos.x + paddle.size.x + self.ball.radius),
            Side::Computer => (-1.0, paddle.pos.x - self.ball.radius),
        };
        self.ball.pos.x = face_x;
        self.ball.vel = Vec2::new(
            direction * self.ball.speed * angle.cos(),
            self.ball.speed * angle.sin(),
        );
        self.ball.speed += self.tuning.ball_speedup;
        self.events.push(GameEvent::PaddleHit);
        true
    }

    fn check_goal(&mut self) {
        let r = self.ball.radius;
        if self.ball.pos.x - r < 0.0 {
            self.com_score += 1;
            self.events.push(GameEvent::OpponentScored);
            log::debug!("Pong: computer scores ({}-{})", self.user_score, self.com_score);
            self.serve();
        } else if self.ball.pos.x + r > self.field.width {
            self.user_score += 1;
            self.events.push(GameEvent::PlayerScored);
            log::debug!("Pong: player scores ({}-{})", self.user_score, self.com_score);
            self.serve();
        } else {
            return;
        }

        let target = self.tuning.points_to_win.unwrap_or(u32::MAX);
        if self.user_score >= target || self.com_score >= target {
            log::info!("Pong: match over ({}-{})", self.user_score, self.com_score);
            self.game_over = true;
            self.events.push(GameEvent::GameOver);
        }
    }
}

impl Game for Pong {
    fn name(&self) -> &'static str {
        "Pong"
    }

    fn tick(&mut self, input: &TickInput) {
        if self.game_over {
            return;
        }

        if let Some(mouse) = input.last_mouse() {
            self.user.pos.y = mouse.y - self.user.size.y / 2.0;
        }

        self.ball.update(1, input, &self.field);
        self.track_computer();
        self.user.update(1, input, &self.field);
        self.com.update(1, input, &self.field);

        self.bounce_off_walls();
        if !self.deflect_off_paddle() {
            self.check_goal();
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(DrawCommand::Clear { color: Color::BLACK });

        let score_y = self.field.height / 5.0;
        for (score, x) in [
            (self.user_score, self.field.width / 4.0),
            (self.com_score, 3.0 * self.field.width / 4.0),
        ] {
            renderer.draw(DrawCommand::Text {
                pos: Vec2::new(x, score_y),
                text: score.to_string(),
                size: SCORE_TEXT_SIZE,
                color: Color::WHITE,
            });
        }

        let net_x = (self.field.width - NET_WIDTH) / 2.0;
        let net = dashed_net(
            net_x,
            self.field.height,
            Vec2::new(NET_WIDTH, NET_DASH),
            NET_SPACING,
            Color::WHITE,
        );
        for dash in net {
            renderer.draw(dash);
        }

        for (paddle, color) in [(&self.user, Color::BLUE), (&self.com, Color::RED)] {
            renderer.draw(DrawCommand::Rect {
                min: paddle.pos,
                size: paddle.size,
                color,
            });
        }
        renderer.draw(DrawCommand::Circle {
            center: self.ball.pos,
            radius: self.ball.radius,
            color: Color::ORANGE,
        });
    }

    fn hud(&self) -> HudStatus {
        let lives = self
            .tuning
            .points_to_win
            .map_or(0, |target| target.saturating_sub(self.com_score));
        HudStatus {
            score: u64::from(self.user_score),
            lives,
            game_over: self.game_over,
        }
    }

    fn reset(&mut self) {
        let paddle_y = (self.field.height - self.user.size.y) / 2.0;
        self.ball.pos = self.field.center();
        self.ball.vel = Vec2::from(self.tuning.ball_velocity);
        self.ball.speed = self.tuning.ball_serve_speed;
        self.user.pos.y = paddle_y;
        self.com.pos.y = paddle_y;
        self.user_score = 0;
        self.com_score = 0;
        self.game_over = false;
        self.events.clear();
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
