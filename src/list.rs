//! A singly-linked list of key-value pairs kept in ascending key order.

use std::fmt;
use std::iter::FromIterator;

/// A singly-linked association list sorted by key.
///
/// The list itself accepts equal keys; a new entry goes after the entries
/// it compares equal to. [`Dictionary`](crate::Dictionary) adds the
/// uniqueness check on top.
pub struct OrderedList<K, V> {
    head: Option<Box<Node<K, V>>>,
    len: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

/// An iterator over the entries of a list in ascending key order.
pub struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

/// A mutable iterator over the entries of a list in ascending key order.
pub struct IterMut<'a, K, V> {
    next: Option<&'a mut Node<K, V>>,
}

impl<K, V> OrderedList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns true if the list contains no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of entries in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Gets an iterator over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Gets a mutable iterator over the entries in ascending key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }
}

impl<K: Ord, V> OrderedList<K, V> {
    /// Inserts an entry at its sorted position.
    pub fn insert(&mut self, key: K, value: V) {
        let mut link = &mut self.head;
        while matches!(link, Some(node) if node.key <= key) {
            link = &mut link.as_mut().unwrap().next;
        }
        let next = link.take();
        *link = Some(Box::new(Node { key, value, next }));
        self.len += 1;
    }

    /// Returns true if an entry with the key exists.
    pub fn find(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value of the first entry with the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.iter()
            .take_while(|(k, _)| *k <= key)
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Returns the value of the first entry with the key, mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.iter_mut()
            .take_while(|(k, _)| *k <= key)
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }
}

impl<K, V> Drop for OrderedList<K, V> {
    fn drop(&mut self) {
        // Iterative, long chains must not recurse
        self.clear();
    }
}

impl<K, V> Default for OrderedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for OrderedList<K, V> {
    fn clone(&self) -> Self {
        let mut list = Self::new();
        let mut link = &mut list.head;
        for (key, value) in self.iter() {
            let node = link.insert(Box::new(Node {
                key: key.clone(),
                value: value.clone(),
                next: None,
            }));
            link = &mut node.next;
        }
        list.len = self.len;
        list
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedList<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = Self::new();
        for (key, value) in iter {
            list.insert(key, value);
        }
        list
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, value) in self {
            writeln!(f, "Key[{key}] = {value}")?;
        }
        Ok(())
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedList<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            (&node.key, &mut node.value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedList;

    #[test]
    fn test_insert_keeps_keys_sorted() {
        let mut list = OrderedList::new();
        for key in [5, 1, 4, 2, 3] {
            list.insert(key, key * 10);
        }
        let entries: Vec<(i32, i32)> = list.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_equal_keys_go_after_existing() {
        let mut list = OrderedList::new();
        list.insert(1, "first");
        list.insert(2, "two");
        list.insert(1, "second");
        let values: Vec<&str> = list.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["first", "second", "two"]);
        assert_eq!(list.get(&1), Some(&"first"));
    }

    #[test]
    fn test_find_and_get_mut() {
        let mut list: OrderedList<&str, i32> = vec![("b", 2), ("a", 1)].into_iter().collect();
        assert!(list.find(&"a"));
        assert!(!list.find(&"c"));
        if let Some(value) = list.get_mut(&"b") {
            *value += 40;
        }
        assert_eq!(list.get(&"b"), Some(&42));
        assert!(list.get_mut(&"c").is_none());
    }

    #[test]
    fn test_clone_and_clear() {
        let mut list: OrderedList<i32, String> =
            (0..100).rev().map(|k| (k, k.to_string())).collect();
        let copy = list.clone();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(copy.len(), 100);
        assert!(copy.iter().map(|(k, _)| *k).eq(0..100));
        assert_eq!(copy.get(&7).map(String::as_str), Some("7"));
    }

    #[test]
    fn test_display() {
        let list: OrderedList<&str, i32> = vec![("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(list.to_string(), "Key[x] = 1\nKey[y] = 2\n");
    }
}
