//! A dictionary of unique keys on top of [`OrderedList`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::AddAssign;

use log::debug;

use crate::error::{Error, Result};
use crate::list::{Iter, IterMut, OrderedList};

/// A key-value dictionary with unique keys, iterated in ascending key order.
///
/// Inserting an existing key keeps the stored value.
///
/// ```
/// use avl_ring::{dictionary, Dictionary, Error};
/// let mut lhs = Dictionary::new();
/// lhs.insert("a", 1);
/// lhs.insert("b", 2);
/// let mut rhs = Dictionary::new();
/// rhs.insert("b", 40);
/// let joined = dictionary::join(&lhs, &rhs);
/// assert_eq!(joined.get(&"b"), Ok(&42));
/// assert_eq!(joined.get(&"z"), Err(Error::KeyNotFound));
/// ```
pub struct Dictionary<K, V> {
    list: OrderedList<K, V>,
}

impl<K, V> Dictionary<K, V> {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            list: OrderedList::new(),
        }
    }

    /// Returns true if the dictionary contains no entries.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the number of entries in the dictionary.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Gets an iterator over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Gets a mutable iterator over the entries in ascending key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.list.iter_mut()
    }
}

impl<K: Ord, V> Dictionary<K, V> {
    /// Inserts a key-value pair unless the key is already present.
    /// Returns whether the pair was inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.list.find(&key) {
            debug!("dictionary keeps the existing value for a duplicate key");
            return false;
        }
        self.list.insert(key, value);
        true
    }

    /// Returns true if the dictionary contains the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.list.find(key)
    }

    /// Returns the value stored for the key.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.list.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the value stored for the key, mutably.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.list.get_mut(key).ok_or(Error::KeyNotFound)
    }
}

/// Merges two dictionaries. Keys present in both get the sum of their values.
pub fn join<K, V>(lhs: &Dictionary<K, V>, rhs: &Dictionary<K, V>) -> Dictionary<K, V>
where
    K: Ord + Clone,
    V: AddAssign + Default + Clone,
{
    let mut totals: BTreeMap<K, V> = BTreeMap::new();
    for (key, value) in lhs.iter().chain(rhs.iter()) {
        *totals.entry(key.clone()).or_default() += value.clone();
    }

    let mut joined = Dictionary::new();
    for (key, value) in totals {
        joined.insert(key, value);
    }
    joined
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for Dictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Dictionary<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<'a, K, V> IntoIterator for &'a Dictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
