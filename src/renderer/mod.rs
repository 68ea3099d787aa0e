//! Rendering interface
//!
//! The simulation never draws pixels itself. Games describe each frame as a
//! list of flat 2D primitives and hand them to a `Renderer` supplied by the
//! host (canvas, GPU, terminal, or a recorder in tests).

pub mod shapes;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 0.5, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const ORANGE: Color = Color::rgb(1.0, 0.65, 0.0);

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color([r, g, b, 1.0])
    }
}

/// A single draw primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill the whole playfield
    Clear { color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Rect { min: Vec2, size: Vec2, color: Color },
    /// Filled closed polygon
    Polygon { points: Vec<Vec2>, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    /// Text centered on `pos`
    Text { pos: Vec2, text: String, size: f32, color: Color },
}

/// Consumes draw primitives
pub trait Renderer {
    fn draw(&mut self, command: DrawCommand);
}

/// Renderer that records every command of the latest frame
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
    /// Frames seen (each `Clear` starts a new frame)
    pub frames: u64,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded circles of a given color
    pub fn circles(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { color: col, .. } if *col == color))
            .count()
    }

    /// Count recorded rectangles of a given color
    pub fn rects(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { color: col, .. } if *col == color))
            .count()
    }
}

impl Renderer for CommandList {
    fn draw(&mut self, command: DrawCommand) {
        if matches!(command, DrawCommand::Clear { .. }) {
            self.commands.clear();
            self.frames += 1;
        }
        self.commands.push(command);
    }
}
