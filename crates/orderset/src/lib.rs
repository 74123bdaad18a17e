use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

pub trait Keyed: Clone {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}

/// Items in the order they were first inserted, at most one per key.
///
/// Positions are stable: once an item lands at index `i` it stays there until
/// the set is cleared, so callers can use indices as display positions.
#[derive(Debug, Clone)]
pub struct OrderedSet<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Appends `item` unless an item with the same key is already present.
    pub fn insert(&mut self, item: T) -> bool {
        let key = item.key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.items.len());
        self.items.push(item);
        true
    }

    /// Inserts every item in order and returns the range of positions that
    /// were actually added. Duplicates are skipped.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) -> Range<usize> {
        let start = self.items.len();
        for item in items {
            self.insert(item);
        }
        start..self.items.len()
    }

    /// Replaces the item sharing `item`'s key in place, or appends it.
    pub fn upsert(&mut self, item: T) -> usize {
        match self.index.get(&item.key()) {
            Some(&pos) => {
                self.items[pos] = item;
                pos
            }
            None => {
                let pos = self.items.len();
                self.index.insert(item.key(), pos);
                self.items.push(item);
                pos
            }
        }
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    pub fn get_by_key(&self, key: &T::Key) -> Option<&T> {
        self.position(key).map(|pos| &self.items[pos])
    }

    pub fn position(&self, key: &T::Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn items(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

impl<'a, T: Keyed> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
