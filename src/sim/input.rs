//! Player input
//!
//! Input arrives asynchronously from the host (key and mouse callbacks) into
//! an `InputBuffer`. The driver drains the buffer once at the start of each
//! tick, so nothing mutates the world mid-tick.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of keys currently held down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const FIRE = 1 << 4;
    }
}

/// Discrete one-shot input events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key went down (fires once per press, auto-repeat included)
    KeyPressed(Keys),
    /// Pointer moved to a playfield position
    MouseMoved(Vec2),
    /// Pointer clicked at a playfield position
    Click(Vec2),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held at the start of the tick
    pub held: Keys,
    /// Events received since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
}

impl TickInput {
    /// Input with only held keys
    pub fn holding(held: Keys) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    /// Input with only one-shot events
    pub fn with_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            held: Keys::empty(),
            events: events.into_iter().collect(),
        }
    }

    /// Number of presses of `key` this tick
    pub fn presses(&self, key: Keys) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, InputEvent::KeyPressed(k) if k.contains(key)))
            .count()
    }

    /// Latest pointer position reported this tick
    pub fn last_mouse(&self) -> Option<Vec2> {
        self.events.iter().rev().find_map(|e| match e {
            InputEvent::MouseMoved(pos) => Some(*pos),
            _ => None,
        })
    }

    /// Click positions in arrival order
    pub fn clicks(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::Click(pos) => Some(*pos),
            _ => None,
        })
    }
}

/// Collects host input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    held: Keys,
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Keys) {
        self.held.insert(key);
        self.events.push(InputEvent::KeyPressed(key));
    }

    pub fn key_up(&mut self, key: Keys) {
        self.held.remove(key);
    }

    pub fn mouse_moved(&mut self, pos: Vec2) {
        self.events.push(InputEvent::MouseMoved(pos));
    }

    pub fn click(&mut self, pos: Vec2) {
        self.events.push(InputEvent::Click(pos));
    }

    /// Snapshot held keys and drain queued events for the next tick
    pub fn take(&mut self) -> TickInput {
        TickInput {
            held: self.held,
            events: std::mem::take(&mut self.events),
        }
    }

    /// Drop everything, including held keys
    pub fn clear(&mut self) {
        self.held = Keys::empty();
        self.events.clear();
    }

    pub fn held(&self) -> Keys {
        self.held
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_events_but_keeps_held() {
        let mut buffer = InputBuffer::new();
        buffer.key_down(Keys::UP);
        buffer.key_down(Keys::FIRE);
        buffer.key_up(Keys::FIRE);

        let input = buffer.take();
        assert_eq!(input.held, Keys::UP);
        assert_eq!(input.presses(Keys::FIRE), 1);
        assert_eq!(input.presses(Keys::UP), 1);

        // Next tick: still holding UP, no new presses
        let input = buffer.take();
        assert_eq!(input.held, Keys::UP);
        assert!(input.events.is_empty());
    }

    #[test]
    fn test_last_mouse_wins() {
        let input = TickInput::with_events([
            InputEvent::MouseMoved(Vec2::new(1.0, 2.0)),
            InputEvent::Click(Vec2::new(5.0, 5.0)),
            InputEvent::MouseMoved(Vec2::new(3.0, 4.0)),
        ]);
        assert_eq!(input.last_mouse(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(input.clicks().collect::<Vec<_>>(), vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = InputBuffer::new();
        buffer.key_down(Keys::LEFT);
        buffer.click(Vec2::ZERO);
        buffer.clear();
        assert_eq!(buffer.held(), Keys::empty());
        assert_eq!(buffer.pending(), 0);
    }
}
