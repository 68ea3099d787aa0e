//! Entities and the collections that hold them
//!
//! Removal is mark-and-filter: `destroy` only flags an entity, and `sweep`
//! rebuilds the collection without flagged or expired entities once a scan
//! has finished. Nothing is spliced out while a collection is being walked.

use serde::{Deserialize, Serialize};

use super::input::TickInput;
use super::shape::{Playfield, Shape};

/// Behavior shared by every moving thing in a game
pub trait Entity {
    /// Advance by `ticks` fixed steps. Only mutates `self`.
    fn update(&mut self, ticks: u32, input: &TickInput, field: &Playfield);

    /// Current collision geometry
    fn bounds(&self) -> Shape;

    /// False once the entity expired on its own (off-screen, lifetime over)
    fn is_alive(&self) -> bool {
        true
    }
}

/// Identifier of an entity within its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Slot<T> {
    id: EntityId,
    dead: bool,
    entity: T,
}

/// Ordered collection of live entities (spawn order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entities<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for Entities<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Entities<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its id
    pub fn spawn(&mut self, entity: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            dead: false,
            entity,
        });
        id
    }

    /// Mark an entity dead. Returns false if it was unknown or already dead.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        match self.slots.iter_mut().find(|s| s.id == id && !s.dead) {
            Some(slot) => {
                slot.dead = true;
                true
            }
            None => false,
        }
    }

    /// Whether `id` refers to an entity not yet marked dead
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.iter().any(|s| s.id == id && !s.dead)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots
            .iter()
            .find(|s| s.id == id && !s.dead)
            .map(|s| &s.entity)
    }

    /// Entities not marked dead, in spawn order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.slots
            .iter()
            .filter(|s| !s.dead)
            .map(|s| (s.id, &s.entity))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .filter(|s| !s.dead)
            .map(|s| (s.id, &mut s.entity))
    }

    /// Entities not marked dead, without ids
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, e)| e)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.iter_mut().map(|(_, e)| e)
    }

    /// Number of entities not marked dead
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| !s.dead).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entity. Ids keep counting up.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T: Entity> Entities<T> {
    /// Update every entity not marked dead
    pub fn update_all(&mut self, ticks: u32, input: &TickInput, field: &Playfield) {
        for entity in self.values_mut() {
            entity.update(ticks, input, field);
        }
    }

    /// Rebuild the collection without dead or expired entities.
    ///
    /// Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| !s.dead && s.entity.is_alive());
        before - self.slots.len()
    }
}
