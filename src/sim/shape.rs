//! Collision geometry and the playfield
//!
//! Every entity collides as one of two shapes:
//! - Circle: center + radius (ship, bullet, asteroid, ball)
//! - Rect: axis-aligned box given by its top-left corner + size
//!   (paddle, alien, cannon, laser)
//!
//! Coordinates follow the canvas convention: origin top-left, +y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, check_dimension};
use crate::wrap_coord;

/// Collision geometry of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { min: Vec2, size: Vec2 },
}

impl Shape {
    /// Circle with a validated radius
    pub fn circle(center: Vec2, radius: f32) -> Result<Self, SimError> {
        check_dimension("circle", "radius", radius)?;
        Ok(Shape::Circle { center, radius })
    }

    /// Rectangle with a validated size
    pub fn rect(min: Vec2, size: Vec2) -> Result<Self, SimError> {
        check_dimension("rect", "width", size.x)?;
        check_dimension("rect", "height", size.y)?;
        Ok(Shape::Rect { min, size })
    }

    /// A point, i.e. a zero-radius circle
    pub fn point(at: Vec2) -> Self {
        Shape::Circle {
            center: at,
            radius: 0.0,
        }
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        match *self {
            Shape::Circle { center, .. } => center,
            Shape::Rect { min, size } => min + size * 0.5,
        }
    }

    /// Axis-aligned extents as (min, max)
    pub fn extents(&self) -> (Vec2, Vec2) {
        match *self {
            Shape::Circle { center, radius } => {
                (center - Vec2::splat(radius), center + Vec2::splat(radius))
            }
            Shape::Rect { min, size } => (min, min + size),
        }
    }
}

/// The rectangular play area, `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        check_dimension("playfield", "width", width)?;
        check_dimension("playfield", "height", height)?;
        if width == 0.0 || height == 0.0 {
            return Err(SimError::invalid(
                "playfield",
                format!("empty playfield ({width}x{height})"),
            ));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point lies inside the playfield (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite edge
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(wrap_coord(point.x, self.width), wrap_coord(point.y, self.height))
    }

    /// Clamp a rectangle's top-left corner so the whole rectangle stays inside
    pub fn clamp_rect(&self, min: Vec2, size: Vec2) -> Vec2 {
        let max = (self.size() - size).max(Vec2::ZERO);
        min.clamp(Vec2::ZERO, max)
    }

    /// Check if a rectangle lies fully inside (edges included)
    pub fn contains_rect(&self, min: Vec2, size: Vec2) -> bool {
        self.contains(min) && self.contains(min + size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_negative_dimensions() {
        assert!(Shape::circle(Vec2::ZERO, -1.0).is_err());
        assert!(Shape::rect(Vec2::ZERO, Vec2::new(10.0, -5.0)).is_err());
        assert!(Shape::rect(Vec2::ZERO, Vec2::new(f32::NAN, 5.0)).is_err());
        assert!(Shape::circle(Vec2::ZERO, 0.0).is_ok());
    }

    #[test]
    fn test_playfield_rejects_empty() {
        assert!(Playfield::new(0.0, 600.0).is_err());
        assert!(Playfield::new(800.0, -600.0).is_err());
        assert!(Playfield::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_wrap() {
        let field = Playfield::new(800.0, 600.0).unwrap();
        assert_eq!(field.wrap(Vec2::new(-1.0, 300.0)), Vec2::new(800.0, 300.0));
        assert_eq!(field.wrap(Vec2::new(801.0, 601.0)), Vec2::new(0.0, 0.0));
        assert_eq!(field.wrap(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_clamp_rect() {
        let field = Playfield::new(800.0, 600.0).unwrap();
        let size = Vec2::new(10.0, 100.0);
        assert_eq!(field.clamp_rect(Vec2::new(0.0, -20.0), size), Vec2::new(0.0, 0.0));
        assert_eq!(field.clamp_rect(Vec2::new(795.0, 550.0), size), Vec2::new(790.0, 500.0));
        assert!(field.contains_rect(field.clamp_rect(Vec2::new(-5.0, 900.0), size), size));
    }

    #[test]
    fn test_extents() {
        let c = Shape::circle(Vec2::new(10.0, 10.0), 3.0).unwrap();
        assert_eq!(c.extents(), (Vec2::new(7.0, 7.0), Vec2::new(13.0, 13.0)));
        let r = Shape::rect(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0)).unwrap();
        assert_eq!(r.center(), Vec2::new(3.0, 5.0));
    }
}
