//! Entity registry
//!
//! Entities live in a slot arena. Killing an entity empties its slot but
//! leaves every other slot where it is, so indices held by an in-progress
//! scan stay valid. Dead slots are squeezed out by [`Registry::compact`],
//! which the tick calls once the pairwise scan has finished.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    slots: Vec<Option<Entity>>,
    live: usize,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            next_id: 1,
        }
    }

    /// Adopt an entity, assigning it a fresh id.
    /// New entities land after every existing slot.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = id.0 + 1;
        entity.id = id;
        self.slots.push(Some(entity));
        self.live += 1;
        id
    }

    /// Remove an entity by id. Returns false if it was already gone.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.slot_of(id) {
            Some(slot) => self.kill_slot(slot),
            None => false,
        }
    }

    /// Empty a slot without shifting its neighbours
    pub fn kill_slot(&mut self, slot: usize) -> bool {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(entity) => {
                log::debug!("killed {:?} {}", entity.kind, entity.id);
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    /// Drop dead slots, preserving the order of the survivors
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    /// Remove everything (level change). Ids keep counting up.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Number of live entities
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots including dead ones awaiting compaction
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live entity at a slot
    #[inline]
    pub fn slot(&self, slot: usize) -> Option<&Entity> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    #[inline]
    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|e| e.id == id))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slot_of(id).and_then(|slot| self.slot(slot))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slot_of(id)?;
        self.slot_mut(slot)
    }

    /// Live entities in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().flatten()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.iter().filter(|e| e.kind == kind).count()
    }

    /// The first player-controlled entity, if any
    pub fn player(&self) -> Option<&Entity> {
        self.iter().find(|e| e.player_controlled())
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.iter_mut().find(|e| e.player_controlled())
    }

    /// Live entities sorted by ascending z. The sort is stable, so ties keep
    /// registry order.
    pub fn z_sorted(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.iter().collect();
        sorted.sort_by_key(|e| e.z());
        sorted
    }
}
