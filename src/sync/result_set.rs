//! Ordered, duplicate-free result collection.

use std::collections::HashSet;
use std::hash::Hash;

/// Items that carry a unique identifier
pub trait Keyed {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> &Self::Key;
}

/// Display-ordered results with O(1) membership checks.
///
/// No key appears twice; insertion order is display order. The key index is
/// kept alongside the items so appends do not rebuild a set per page.
#[derive(Debug, Clone)]
pub struct ResultSet<T: Keyed> {
    items: Vec<T>,
    keys: HashSet<T::Key>,
}

impl<T: Keyed> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
        }
    }
}

impl<T: Keyed> ResultSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all items. If the page repeats a key, the first occurrence wins.
    pub fn replace(&mut self, items: Vec<T>) {
        self.clear();
        self.append_unique(items);
    }

    /// Append the items whose keys are not present yet, keeping their arrival
    /// order. Returns how many were appended.
    pub fn append_unique(&mut self, items: Vec<T>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.keys.insert(item.key().clone()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Insert at the front. An item with the same key is replaced and moved.
    pub fn prepend(&mut self, item: T) {
        let key = item.key().clone();
        if self.keys.contains(&key) {
            self.items.retain(|existing| existing.key() != &key);
        } else {
            self.keys.insert(key);
        }
        self.items.insert(0, item);
    }

    /// Mutate the item with `key` in place. Returns false if it is absent.
    pub fn patch(&mut self, key: &T::Key, f: impl FnOnce(&mut T)) -> bool {
        if !self.keys.contains(key) {
            return false;
        }
        match self.items.iter_mut().find(|item| item.key() == key) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        if !self.keys.remove(key) {
            return None;
        }
        let index = self.items.iter().position(|item| item.key() == key)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.keys.contains(key)
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        if !self.keys.contains(key) {
            return None;
        }
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}
