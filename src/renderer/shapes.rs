//! Shape generation for composite 2D primitives

use glam::Vec2;

use super::{Color, DrawCommand};

/// Rotate a point around the origin
#[inline]
fn rotate(p: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(p)
}

/// Isosceles triangle pointing along `angle`, centered on `center`.
///
/// Tip sits `height / 2` ahead of center, base `height / 2` behind, with the
/// base `width` wide.
pub fn ship_triangle(center: Vec2, angle: f32, width: f32, height: f32, color: Color) -> DrawCommand {
    // Local frame: tip along -y, then turned so that angle 0 points along +x
    let local = [
        Vec2::new(0.0, -height / 2.0),
        Vec2::new(-width / 2.0, height / 2.0),
        Vec2::new(width / 2.0, height / 2.0),
    ];
    let turn = angle + std::f32::consts::FRAC_PI_2;
    DrawCommand::Polygon {
        points: local.iter().map(|&p| center + rotate(p, turn)).collect(),
        color,
    }
}

/// Dashed vertical center line
pub fn dashed_net(x: f32, height: f32, dash: Vec2, spacing: f32, color: Color) -> Vec<DrawCommand> {
    let mut dashes = Vec::new();
    let mut y = 0.0;
    while y <= height {
        dashes.push(DrawCommand::Rect {
            min: Vec2::new(x, y),
            size: dash,
            color,
        });
        y += spacing;
    }
    dashes
}

/// Two vertical and two horizontal lines splitting the field into 3x3 cells
pub fn grid_lines(size: Vec2, width: f32, color: Color) -> Vec<DrawCommand> {
    let mut lines = Vec::with_capacity(4);
    for i in 1..3 {
        let x = size.x / 3.0 * i as f32;
        let y = size.y / 3.0 * i as f32;
        lines.push(DrawCommand::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, size.y),
            width,
            color,
        });
        lines.push(DrawCommand::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(size.x, y),
            width,
            color,
        });
    }
    lines
}
