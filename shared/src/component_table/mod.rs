//! Transactional storage for one component type.
//!
//! A transaction is everything that happened since the last `commit` or
//! `rollback`. The table remembers which ids were added during the
//! transaction and lazily copies the pre-transaction value of every id that
//! is updated or deleted, the first time it is touched. `rollback` uses both
//! to restore the table exactly; `commit` forgets them.

mod error;

pub use error::ComponentTableError;

use std::collections::{btree_map, BTreeMap, BTreeSet};

use crate::EntityId;

pub struct ComponentTable<T: Clone> {
    name: &'static str,
    // ordered by id so every peer iterates in the same order
    contents: BTreeMap<EntityId, T>,
    uncommitted_adds: BTreeSet<EntityId>,
    snapshot: BTreeMap<EntityId, T>,
}

impl<T: Clone> ComponentTable<T> {
    /// `name` is only used in error messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            contents: BTreeMap::new(),
            uncommitted_adds: BTreeSet::new(),
            snapshot: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn has(&self, id: &EntityId) -> bool {
        self.contents.contains_key(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.contents.get(id)
    }

    /// Like [`get`](Self::get), for components the caller's entity must carry.
    pub fn require(&self, id: &EntityId) -> Result<&T, ComponentTableError> {
        self.contents.get(id).ok_or(ComponentTableError::NotFound {
            table: self.name,
            entity: *id,
        })
    }

    /// Iterates in ascending id order. Collect the ids first (see
    /// [`ids`](Self::ids)) if the pass needs to mutate the table.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.contents.iter(),
        }
    }

    /// Ascending copy of every id in the table.
    pub fn ids(&self) -> Vec<EntityId> {
        self.contents.keys().copied().collect()
    }

    /// Adds a component for an id the table does not contain yet.
    pub fn add(&mut self, id: EntityId, value: T) -> Result<(), ComponentTableError> {
        if self.contents.contains_key(&id) {
            return Err(ComponentTableError::AlreadyExists {
                table: self.name,
                entity: id,
            });
        }

        self.contents.insert(id, value);
        self.uncommitted_adds.insert(id);
        Ok(())
    }

    /// Applies `mutate` to the component in place, copying the
    /// pre-transaction value first if this is the first touch.
    pub fn update<F: FnOnce(&mut T)>(
        &mut self,
        id: &EntityId,
        mutate: F,
    ) -> Result<(), ComponentTableError> {
        if !self.contents.contains_key(id) {
            return Err(ComponentTableError::NotFound {
                table: self.name,
                entity: *id,
            });
        }

        self.take_snapshot(id);

        if let Some(value) = self.contents.get_mut(id) {
            mutate(value);
        }
        Ok(())
    }

    /// Adds the component if absent, otherwise replaces the whole value.
    pub fn upsert(&mut self, id: EntityId, value: T) -> Result<(), ComponentTableError> {
        if self.contents.contains_key(&id) {
            self.update(&id, move |current| *current = value)
        } else {
            self.add(id, value)
        }
    }

    /// Removes the component. Returns false if the table held none.
    pub fn delete(&mut self, id: &EntityId) -> bool {
        if !self.contents.contains_key(id) {
            return false;
        }

        self.take_snapshot(id);
        self.contents.remove(id).is_some()
    }

    /// Restores the table to its contents at the start of the transaction.
    pub fn rollback(&mut self) {
        // Drop additions first: an id deleted and re-added during the
        // transaction is in both sets, and must end up with its old value.
        for id in std::mem::take(&mut self.uncommitted_adds) {
            self.contents.remove(&id);
        }

        for (id, value) in std::mem::take(&mut self.snapshot) {
            self.contents.insert(id, value);
        }
    }

    /// Makes the current contents the new baseline.
    pub fn commit(&mut self) {
        self.snapshot.clear();
        self.uncommitted_adds.clear();
    }

    /// Whether anything changed since the last commit or rollback.
    pub fn is_dirty(&self) -> bool {
        !self.snapshot.is_empty() || !self.uncommitted_adds.is_empty()
    }

    fn take_snapshot(&mut self, id: &EntityId) {
        if self.snapshot.contains_key(id) {
            return;
        }

        // A rollback deletes uncommitted additions outright, so their values
        // never need restoring.
        if self.uncommitted_adds.contains(id) {
            return;
        }

        if let Some(value) = self.contents.get(id) {
            self.snapshot.insert(*id, value.clone());
        }
    }
}

pub struct Iter<'a, T> {
    inner: btree_map::Iter<'a, EntityId, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (EntityId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, value)| (*id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: Clone> IntoIterator for &'a ComponentTable<T> {
    type Item = (EntityId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Two tables are equal when they hold the same values; transaction
// bookkeeping is not compared.
impl<T: Clone + PartialEq> PartialEq for ComponentTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for ComponentTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.contents.iter()).finish()
    }
}
