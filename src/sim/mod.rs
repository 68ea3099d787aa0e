//! Deterministic simulation core
//!
//! Shared by every game. This module must stay pure and deterministic:
//! - Fixed ticks only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering backend or platform dependencies

pub mod collision;
pub mod driver;
pub mod entity;
pub mod input;
pub mod shape;
pub mod state;

pub use collision::{circle_circle, circle_rect, first_hits, overlaps, rect_rect};
pub use driver::{Driver, Frontend, RunState};
pub use entity::{Entities, Entity, EntityId};
pub use input::{InputBuffer, InputEvent, Keys, TickInput};
pub use shape::{Playfield, Shape};
pub use state::{Game, GameEvent, GamePhase, HudStatus, RngState};
