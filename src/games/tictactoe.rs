//! Tic-Tac-Toe
//!
//! Two players share the mouse and alternate placing marks, X first. There
//! is nothing moving, so a tick only handles the clicks that arrived since
//! the previous one.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::renderer::shapes::grid_lines;
use crate::renderer::{Color, DrawCommand, Renderer};
use crate::sim::{Game, GameEvent, HudStatus, Playfield, TickInput};
use crate::tuning::TicTacToeTuning;

const GRID_LINE_WIDTH: f32 = 5.0;
const MARK_SIZE: f32 = 80.0;
const BANNER_SIZE: f32 = 48.0;

/// Every row, column and diagonal, as (row, col) cells
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn color(self) -> Color {
        match self {
            Mark::X => Color::RED,
            Mark::O => Color::BLUE,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

/// 3x3 grid indexed by (row, col)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Put `mark` in an empty cell. Returns false if the cell is taken or
    /// off the board.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if cell.is_none() => {
                *cell = Some(mark);
                true
            }
            _ => false,
        }
    }

    /// Mark owning a full row, column or diagonal
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(r, col)| self.cells[r][col]);
            match a {
                Some(mark) if b == a && c == a => Some(mark),
                _ => None,
            }
        })
    }

    pub fn check_win(&self) -> bool {
        self.winner().is_some()
    }

    pub fn is_board_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Occupied cells as (row, col, mark)
    pub fn marks(&self) -> impl Iterator<Item = (usize, usize, Mark)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|mark| (row, col, mark)))
        })
    }
}

#[derive(Debug, Clone)]
pub struct TicTacToe {
    field: Playfield,
    pub board: Board,
    current: Mark,
    outcome: Option<Outcome>,
    events: Vec<GameEvent>,
}

impl TicTacToe {
    pub fn new(tuning: &TicTacToeTuning) -> Result<Self, SimError> {
        Ok(Self {
            field: tuning.playfield()?,
            board: Board::new(),
            current: Mark::X,
            outcome: None,
            events: Vec::new(),
        })
    }

    /// Whose turn it is (or who moved last, once the game is decided)
    pub fn current(&self) -> Mark {
        self.current
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn cell_size(&self) -> Vec2 {
        self.field.size() / 3.0
    }

    /// Board cell under a playfield position, as (row, col)
    pub fn cell_at(&self, pos: Vec2) -> Option<(usize, usize)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.field.width || pos.y >= self.field.height {
            return None;
        }
        let cell = (pos / self.cell_size()).floor();
        Some(((cell.y as usize).min(2), (cell.x as usize).min(2)))
    }

    fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        let size = self.cell_size();
        Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * size
    }

    /// Place the current player's mark under `pos`.
    ///
    /// Ignored once the game is decided or when the cell is taken or off the
    /// board. Returns whether a mark was placed.
    pub fn click(&mut self, pos: Vec2) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let Some((row, col)) = self.cell_at(pos) else {
            return false;
        };
        if !self.board.place(row, col, self.current) {
            return false;
        }
        self.events.push(GameEvent::MarkPlaced);

        if self.board.check_win() {
            log::info!("Tic-Tac-Toe: {} wins", self.current);
            self.finish(Outcome::Win(self.current));
        } else if self.board.is_board_full() {
            log::info!("Tic-Tac-Toe: draw");
            self.finish(Outcome::Draw);
        } else {
            self.current = self.current.other();
        }
        true
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.events.push(GameEvent::GameOver);
    }
}

impl Game for TicTacToe {
    fn name(&self) -> &'static str {
        "Tic-Tac-Toe"
    }

    fn tick(&mut self, input: &TickInput) {
        for pos in input.clicks() {
            self.click(pos);
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(DrawCommand::Clear { color: Color::BLACK });
        for line in grid_lines(self.field.size(), GRID_LINE_WIDTH, Color::WHITE) {
            renderer.draw(line);
        }
        for (row, col, mark) in self.board.marks() {
            renderer.draw(DrawCommand::Text {
                pos: self.cell_center(row, col),
                text: mark.to_string(),
                size: MARK_SIZE,
                color: mark.color(),
            });
        }

        let banner = match self.outcome {
            Some(Outcome::Win(mark)) => format!("{mark} wins!"),
            Some(Outcome::Draw) => "It's a draw!".to_string(),
            None => return,
        };
        renderer.draw(DrawCommand::Text {
            pos: self.field.center(),
            text: banner,
            size: BANNER_SIZE,
            color: Color::WHITE,
        });
    }

    fn hud(&self) -> HudStatus {
        HudStatus {
            score: 0,
            lives: 0,
            game_over: self.outcome.is_some(),
        }
    }

    fn reset(&mut self) {
        self.board = Board::new();
        self.current = Mark::X;
        self.outcome = None;
        self.events.clear();
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
