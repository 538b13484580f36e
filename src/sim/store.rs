//! Ordered entity collections
//!
//! Entities are kept in creation order so collision resolution is
//! deterministic. Deactivated entities stay in place until [`EntityStore::compact`].

use super::state::EntityId;

/// Shared behaviour of obstacles and bullets
pub trait Entity {
    fn id(&self) -> EntityId;
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

/// Creation-ordered collection with deferred removal
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly created entity
    pub fn push(&mut self, entity: T) {
        debug_assert!(
            self.items.last().is_none_or(|last| last.id() < entity.id()),
            "entities must be appended in creation order"
        );
        self.items.push(entity);
    }

    /// All entities still held, active or not, in creation order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Active entities in creation order
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_active())
    }

    /// Mutable access to active entities in creation order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|e| e.is_active())
    }

    /// Look up an entity by identity
    pub fn get(&self, id: EntityId) -> Option<&T> {
        // IDs are ascending, so binary search is valid
        self.items
            .binary_search_by_key(&id, |e| e.id())
            .ok()
            .map(|i| &self.items[i])
    }

    /// Deactivate an entity. Returns false if it was unknown or already inactive.
    pub fn deactivate(&mut self, id: EntityId) -> bool {
        match self.items.binary_search_by_key(&id, |e| e.id()) {
            Ok(i) if self.items[i].is_active() => {
                self.items[i].deactivate();
                true
            }
            _ => false,
        }
    }

    /// Drop every inactive entity, preserving order
    pub fn compact(&mut self) {
        self.items.retain(|e| e.is_active());
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of active entities
    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }
}
