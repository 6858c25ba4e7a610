//! A circular doubly-linked ring of key-info pairs with a designated head.
//!
//! There is no sentinel node: the last node links back to the head and a
//! single node links to itself. Traversal "from the head until the head comes
//! around again" visits every node exactly once; [`Ring::iter`] and
//! [`Ring::for_each_from_head`] are built that way.

use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use log::trace;

/// A circular doubly-linked list of key-info pairs.
///
/// ```
/// use avl_ring::Ring;
/// let mut ring = Ring::new();
/// ring.push_back('a', 5);
/// ring.push_back('b', 1);
/// ring.push_back('c', 3);
/// assert!(ring.sort_by_info());
/// let keys: Vec<char> = ring.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, vec!['b', 'c', 'a']);
/// ```
pub struct Ring<K, I> {
    head: Link<K, I>,
    len: usize,
}

struct Node<K, I> {
    key: K,
    info: I,
    next: NodePtr<K, I>,
    prev: NodePtr<K, I>,
}

type NodePtr<K, I> = NonNull<Node<K, I>>;
type Link<K, I> = Option<NodePtr<K, I>>;

/// An iterator over the entries of a ring, starting at the head and
/// stopping before the head comes around again.
pub struct Iter<'a, K, I> {
    next: Link<K, I>,
    remaining: usize,
    marker: PhantomData<&'a Node<K, I>>,
}

/// A read-only position in a ring.
///
/// Moving never falls off the ring: from the last node `move_next` goes to
/// the head. A cursor of an empty ring points nowhere and stays there.
pub struct Cursor<'a, K, I> {
    current: Link<K, I>,
    marker: PhantomData<&'a Node<K, I>>,
}

/// A position in a ring that can insert and erase nodes.
pub struct CursorMut<'a, K, I> {
    ring: &'a mut Ring<K, I>,
    current: Link<K, I>,
}

impl<K, I> Ring<K, I> {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns true if the ring contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of nodes in the ring.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        if let Some(mut node_ptr) = self.head.take() {
            for _ in 0..self.len {
                unsafe {
                    let next_ptr = node_ptr.as_ref().next;
                    Node::destroy(node_ptr);
                    node_ptr = next_ptr;
                }
            }
        }
        self.len = 0;
    }

    /// Returns the entry at the head.
    pub fn head(&self) -> Option<(&K, &I)> {
        self.head.map(|head_ptr| unsafe { Node::entry(head_ptr) })
    }

    /// Returns the entry just before the head, i.e. the last one visited from the head.
    pub fn back(&self) -> Option<(&K, &I)> {
        self.head
            .map(|head_ptr| unsafe { Node::entry(head_ptr.as_ref().prev) })
    }

    /// Gets an iterator visiting every entry once, starting at the head.
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter {
            next: self.head,
            remaining: self.len,
            marker: PhantomData,
        }
    }

    /// Calls `visit` on every entry, starting at the head and stopping once
    /// the head is reached again.
    pub fn for_each_from_head<F: FnMut(&K, &I)>(&self, mut visit: F) {
        let Some(head_ptr) = self.head else {
            return;
        };
        let mut node_ptr = head_ptr;
        loop {
            let node = unsafe { node_ptr.as_ref() };
            visit(&node.key, &node.info);
            node_ptr = node.next;
            if node_ptr == head_ptr {
                break;
            }
        }
    }

    /// Returns a cursor at the head.
    pub fn begin(&self) -> Cursor<'_, K, I> {
        Cursor {
            current: self.head,
            marker: PhantomData,
        }
    }

    /// Returns a cursor at the node *before* the head.
    ///
    /// This is not "one past the last node". A loop advancing from
    /// [`begin`](Ring::begin) until it equals `end()` never visits the node
    /// `end()` points to, and on a single-node ring `begin() == end()` from the
    /// start, so the loop body never runs. Use [`iter`](Ring::iter) or
    /// [`for_each_from_head`](Ring::for_each_from_head) to see every node.
    pub fn end(&self) -> Cursor<'_, K, I> {
        Cursor {
            current: self.head.map(|head_ptr| unsafe { head_ptr.as_ref().prev }),
            marker: PhantomData,
        }
    }

    /// Returns a mutable cursor at the head.
    pub fn cursor_head_mut(&mut self) -> CursorMut<'_, K, I> {
        let current = self.head;
        CursorMut {
            ring: self,
            current,
        }
    }

    /// Inserts a node before the head and makes it the new head.
    /// Returns a cursor at the new node.
    pub fn push_front(&mut self, key: K, info: I) -> CursorMut<'_, K, I> {
        let node_ptr = self.link_before_head(key, info);
        self.head = Some(node_ptr);
        CursorMut {
            ring: self,
            current: Some(node_ptr),
        }
    }

    /// Inserts a node before the head, making it the last node.
    /// Returns a cursor at the new node.
    pub fn push_back(&mut self, key: K, info: I) -> CursorMut<'_, K, I> {
        let node_ptr = self.link_before_head(key, info);
        CursorMut {
            ring: self,
            current: Some(node_ptr),
        }
    }

    /// Removes the head; the node after it becomes the new head.
    pub fn pop_front(&mut self) -> Option<(K, I)> {
        let head_ptr = self.head?;
        Some(self.unlink(head_ptr))
    }

    /// Removes the node before the head. The head stays where it is
    /// unless it was the only node.
    pub fn pop_back(&mut self) -> Option<(K, I)> {
        let back_ptr = unsafe { self.head?.as_ref().prev };
        Some(self.unlink(back_ptr))
    }

    /// Sorts the ring by info in ascending order, starting at the head.
    ///
    /// Every node is compared with every node after it and the two swap their
    /// key and info when out of order, so nodes stay in place and this takes
    /// O(n²) comparisons. Returns false for an empty ring.
    pub fn sort_by_info(&mut self) -> bool
    where
        I: PartialOrd,
    {
        let Some(head_ptr) = self.head else {
            return false;
        };
        trace!("sorting ring of {} nodes by info", self.len);
        unsafe {
            let mut outer_ptr = head_ptr;
            loop {
                let mut inner_ptr = outer_ptr.as_ref().next;
                while inner_ptr != head_ptr {
                    if outer_ptr.as_ref().info > inner_ptr.as_ref().info {
                        Node::swap_entries(outer_ptr, inner_ptr);
                    }
                    inner_ptr = inner_ptr.as_ref().next;
                }
                outer_ptr = outer_ptr.as_ref().next;
                if outer_ptr == head_ptr {
                    break;
                }
            }
        }
        true
    }

    /// Asserts that the ring is closed in both directions and holds `len` nodes.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let Some(head_ptr) = self.head else {
            assert_eq!(self.len, 0);
            return;
        };
        unsafe {
            let mut forward = 0;
            let mut node_ptr = head_ptr;
            loop {
                let next_ptr = node_ptr.as_ref().next;
                assert!(next_ptr.as_ref().prev == node_ptr);
                forward += 1;
                assert!(forward <= self.len);
                node_ptr = next_ptr;
                if node_ptr == head_ptr {
                    break;
                }
            }
            assert_eq!(forward, self.len);

            let mut backward = 0;
            loop {
                node_ptr = node_ptr.as_ref().prev;
                backward += 1;
                assert!(backward <= self.len);
                if node_ptr == head_ptr {
                    break;
                }
            }
            assert_eq!(backward, self.len);
        }
    }

    fn link_before_head(&mut self, key: K, info: I) -> NodePtr<K, I> {
        let node_ptr = Node::create(key, info);
        match self.head {
            None => self.head = Some(node_ptr),
            Some(head_ptr) => unsafe { Node::splice_before(head_ptr, node_ptr) },
        }
        self.len += 1;
        node_ptr
    }

    fn link_before(&mut self, position: NodePtr<K, I>, key: K, info: I) -> NodePtr<K, I> {
        let node_ptr = Node::create(key, info);
        unsafe { Node::splice_before(position, node_ptr) };
        // Keeps `position` where it was relative to a traversal from the head
        if self.head == Some(position) {
            self.head = Some(node_ptr);
        }
        self.len += 1;
        node_ptr
    }

    fn unlink(&mut self, node_ptr: NodePtr<K, I>) -> (K, I) {
        unsafe {
            let mut next_ptr = node_ptr.as_ref().next;
            let mut prev_ptr = node_ptr.as_ref().prev;
            if next_ptr == node_ptr {
                self.head = None;
            } else {
                prev_ptr.as_mut().next = next_ptr;
                next_ptr.as_mut().prev = prev_ptr;
                if self.head == Some(node_ptr) {
                    self.head = Some(next_ptr);
                }
            }
            self.len -= 1;
            Node::destroy(node_ptr)
        }
    }
}

/// Concatenates all rings, each read from its head, into a new ring sorted by info.
///
/// Duplicate keys are kept.
pub fn merge<K: Clone, I: Clone + PartialOrd>(rings: &[Ring<K, I>]) -> Ring<K, I> {
    let mut merged = Ring::new();
    for ring in rings {
        for (key, info) in ring {
            merged.push_back(key.clone(), info.clone());
        }
    }
    merged.sort_by_info();
    merged
}

impl<K, I> Drop for Ring<K, I> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, I> Default for Ring<K, I> {
    /// Creates an empty ring.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, I: Clone> Clone for Ring<K, I> {
    fn clone(&self) -> Self {
        self.iter()
            .map(|(key, info)| (key.clone(), info.clone()))
            .collect()
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().map(|(key, info)| (key.clone(), info.clone())));
    }
}

impl<K: PartialEq, I: PartialEq> PartialEq for Ring<K, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, I: Eq> Eq for Ring<K, I> {}

impl<K, I> FromIterator<(K, I)> for Ring<K, I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut ring = Self::new();
        ring.extend(iter);
        ring
    }
}

impl<K, I> Extend<(K, I)> for Ring<K, I> {
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, info) in iter {
            self.push_back(key, info);
        }
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for Ring<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, I: fmt::Display> fmt::Display for Ring<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty ring");
        }
        for (key, info) in self {
            writeln!(f, "Key[{key}] => {info}")?;
        }
        Ok(())
    }
}

impl<'a, K, I> IntoIterator for &'a Ring<K, I> {
    type Item = (&'a K, &'a I);
    type IntoIter = Iter<'a, K, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, I> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_ptr = self.next?;
        self.remaining -= 1;
        unsafe {
            self.next = Some(node_ptr.as_ref().next);
            Some(Node::entry(node_ptr))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, I> ExactSizeIterator for Iter<'_, K, I> {}

impl<K, I> Clone for Iter<'_, K, I> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<'a, K, I> Cursor<'a, K, I> {
    /// Returns the key at the cursor.
    pub fn key(&self) -> Option<&'a K> {
        self.current
            .map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).key })
    }

    /// Returns the info at the cursor.
    pub fn info(&self) -> Option<&'a I> {
        self.current
            .map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).info })
    }

    /// Moves to the next node.
    pub fn move_next(&mut self) {
        if let Some(node_ptr) = self.current {
            self.current = Some(unsafe { node_ptr.as_ref().next });
        }
    }

    /// Moves to the previous node.
    pub fn move_prev(&mut self) {
        if let Some(node_ptr) = self.current {
            self.current = Some(unsafe { node_ptr.as_ref().prev });
        }
    }
}

// Pointer identity, no bounds on K or I
impl<K, I> Clone for Cursor<'_, K, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, I> Copy for Cursor<'_, K, I> {}

impl<K, I> PartialEq for Cursor<'_, K, I> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<K, I> Eq for Cursor<'_, K, I> {}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for Cursor<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cursor")
            .field(&self.key())
            .field(&self.info())
            .finish()
    }
}

impl<'a, K, I> CursorMut<'a, K, I> {
    /// Returns the key at the cursor.
    pub fn key(&self) -> Option<&K> {
        self.current
            .map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).key })
    }

    /// Returns the info at the cursor.
    pub fn info(&self) -> Option<&I> {
        self.current
            .map(|node_ptr| unsafe { &(*node_ptr.as_ptr()).info })
    }

    /// Returns a mutable reference to the info at the cursor.
    pub fn info_mut(&mut self) -> Option<&mut I> {
        self.current
            .map(|node_ptr| unsafe { &mut (*node_ptr.as_ptr()).info })
    }

    /// Returns true if the cursor is at the head of the ring.
    pub fn is_head(&self) -> bool {
        self.current.is_some() && self.current == self.ring.head
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, I> {
        Cursor {
            current: self.current,
            marker: PhantomData,
        }
    }

    /// Moves to the next node.
    pub fn move_next(&mut self) {
        if let Some(node_ptr) = self.current {
            self.current = Some(unsafe { node_ptr.as_ref().next });
        }
    }

    /// Moves to the previous node.
    pub fn move_prev(&mut self) {
        if let Some(node_ptr) = self.current {
            self.current = Some(unsafe { node_ptr.as_ref().prev });
        }
    }

    /// Inserts a node just before the cursor and moves the cursor onto it.
    ///
    /// If the cursor was at the head, the new node becomes the head. In an
    /// empty ring the new node becomes the only node.
    pub fn insert_before(&mut self, key: K, info: I) {
        let node_ptr = match self.current {
            None => self.ring.link_before_head(key, info),
            Some(position) => self.ring.link_before(position, key, info),
        };
        self.current = Some(node_ptr);
    }

    /// Removes the node at the cursor and moves the cursor to the head.
    ///
    /// Erasing the head makes the following node the head. Returns `None`
    /// if the ring is empty.
    pub fn erase(&mut self) -> Option<(K, I)> {
        let node_ptr = self.current?;
        let entry = self.ring.unlink(node_ptr);
        self.current = self.ring.head;
        Some(entry)
    }
}

impl<K, I> Node<K, I> {
    /// Allocates a node linked to itself.
    fn create(key: K, info: I) -> NodePtr<K, I> {
        let boxed = Box::new(Node {
            key,
            info,
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        });
        let mut node_ptr = unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) };
        unsafe {
            node_ptr.as_mut().next = node_ptr;
            node_ptr.as_mut().prev = node_ptr;
        }
        node_ptr
    }

    unsafe fn destroy(node_ptr: NodePtr<K, I>) -> (K, I) {
        let Node { key, info, .. } = *Box::from_raw(node_ptr.as_ptr());
        (key, info)
    }

    unsafe fn entry<'a>(node_ptr: NodePtr<K, I>) -> (&'a K, &'a I) {
        let node = &*node_ptr.as_ptr();
        (&node.key, &node.info)
    }

    unsafe fn splice_before(mut position: NodePtr<K, I>, mut node_ptr: NodePtr<K, I>) {
        let mut prev_ptr = position.as_ref().prev;
        node_ptr.as_mut().next = position;
        node_ptr.as_mut().prev = prev_ptr;
        prev_ptr.as_mut().next = node_ptr;
        position.as_mut().prev = node_ptr;
    }

    unsafe fn swap_entries(lhs_ptr: NodePtr<K, I>, rhs_ptr: NodePtr<K, I>) {
        debug_assert!(lhs_ptr != rhs_ptr);
        let lhs = &mut *lhs_ptr.as_ptr();
        let rhs = &mut *rhs_ptr.as_ptr();
        mem::swap(&mut lhs.key, &mut rhs.key);
        mem::swap(&mut lhs.info, &mut rhs.info);
    }
}

#[cfg(test)]
mod tests {
    use super::Ring;

    #[test]
    fn test_single_node_links_to_itself() {
        let mut ring = Ring::new();
        ring.push_back(1, "one");
        let self_linked = ring.head.map(|head_ptr| unsafe {
            (head_ptr.as_ref().next == head_ptr, head_ptr.as_ref().prev == head_ptr)
        });
        assert_eq!(self_linked, Some((true, true)));
        ring.check_consistency();
    }

    #[test]
    fn test_begin_end_skips_last_node() {
        let ring: Ring<char, i32> = vec![('a', 1), ('b', 2), ('c', 3)].into_iter().collect();
        let mut seen = Vec::new();
        let mut cursor = ring.begin();
        while cursor != ring.end() {
            seen.extend(cursor.key().copied());
            cursor.move_next();
        }
        assert_eq!(seen, vec!['a', 'b']);

        let single: Ring<char, i32> = vec![('x', 0)].into_iter().collect();
        assert!(single.begin() == single.end());

        let mut full = Vec::new();
        ring.for_each_from_head(|key, _| full.push(*key));
        assert_eq!(full, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_cursor_wraps_around() {
        let ring: Ring<i32, ()> = (0..3).map(|k| (k, ())).collect();
        let mut cursor = ring.begin();
        cursor.move_prev();
        assert_eq!(cursor.key(), Some(&2));
        assert!(cursor == ring.end());
        cursor.move_next();
        assert_eq!(cursor.key(), Some(&0));

        let empty = Ring::<i32, ()>::new();
        let mut cursor = empty.begin();
        cursor.move_next();
        assert!(cursor.key().is_none());
        assert!(empty.begin() == empty.end());
    }

    #[test]
    fn test_display() {
        let mut ring = Ring::new();
        assert_eq!(ring.to_string(), "Empty ring\n");
        ring.push_back("x", 1);
        ring.push_back("y", 2);
        assert_eq!(ring.to_string(), "Key[x] => 1\nKey[y] => 2\n");
    }
}
