//! Entity arena with stable identifiers
//!
//! The ball and the creature live here, referenced by plain `u32` ids. The
//! renderer observes positions by id; the core never hands out references
//! whose lifetime some scene graph controls.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable entity identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Creature,
}

/// A simulation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec3,
    /// Uniform scale; the creature tweens to zero while being captured
    pub scale: f32,
}

/// Id-keyed entity storage (sorted by id for deterministic iteration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn an entity at the given position with unit scale
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            pos,
            scale: 1.0,
        });
        id
    }

    /// Remove an entity; returns whether it existed
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ids_unique_and_stable() {
        let mut arena = Arena::new();
        let a = arena.spawn(EntityKind::Ball, Vec3::ZERO);
        let b = arena.spawn(EntityKind::Creature, Vec3::ONE);
        assert_ne!(a, b);
        assert_eq!(arena.get(a).unwrap().kind, EntityKind::Ball);
        assert_eq!(arena.get(b).unwrap().pos, Vec3::ONE);
    }

    #[test]
    fn test_despawn_then_get() {
        let mut arena = Arena::new();
        let a = arena.spawn(EntityKind::Ball, Vec3::ZERO);
        assert!(arena.despawn(a));
        assert!(!arena.despawn(a));
        assert!(arena.get(a).is_none());

        // Ids are never reused
        let b = arena.spawn(EntityKind::Ball, Vec3::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_mut_updates_position() {
        let mut arena = Arena::new();
        let a = arena.spawn(EntityKind::Ball, Vec3::ZERO);
        arena.get_mut(a).unwrap().pos = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(arena.get(a).unwrap().pos, Vec3::new(1.0, 2.0, 3.0));
    }
}
