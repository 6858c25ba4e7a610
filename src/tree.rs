//! An AVL tree mapping unique keys to an info payload.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::{debug, trace};

/// Columns added per tree level by [`AvlTree::display`].
const DISPLAY_INDENT: usize = 10;

/// A self-balancing binary search tree keyed by `K`, storing an `I` info per key.
///
/// Keys are unique. Heights of the two subtrees of every node differ by at most one.
///
/// ```
/// use avl_ring::AvlTree;
/// let mut tree = AvlTree::new();
/// assert!(tree.insert("b", 2));
/// assert!(tree.insert("a", 1));
/// assert!(!tree.insert("a", 42));
/// assert_eq!(tree.get(&"a"), Some(&1));
/// *tree.get_or_insert_default("c") += 3;
/// assert_eq!(tree.top_k(1), vec![("c", 3)]);
/// ```
pub struct AvlTree<K, I> {
    root: Link<K, I>,
    num_nodes: usize,
}

struct Node<K, I> {
    key: K,
    info: I,
    left: Link<K, I>,
    right: Link<K, I>,
    parent: Link<K, I>,
    height: isize,
}

type NodePtr<K, I> = NonNull<Node<K, I>>;
type Link<K, I> = Option<NodePtr<K, I>>;
type LinkPtr<K, I> = NonNull<Link<K, I>>;

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

/// An iterator over the entries of a tree in ascending key order.
pub struct Iter<'a, K, I> {
    next: Link<K, I>,
    remaining: usize,
    marker: PhantomData<&'a Node<K, I>>,
}

/// Renders a tree sideways: right subtree on top, one key per line,
/// each level indented further than its parent.
///
/// This `struct` is created by the [`display`] method on [`AvlTree`].
///
/// [`display`]: struct.AvlTree.html#method.display
pub struct Sideways<'a, K, I> {
    tree: &'a AvlTree<K, I>,
}

impl<K, I> AvlTree<K, I> {
    /// Creates an empty tree.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> isize {
        Self::height_of(self.root)
    }

    /// Clears the tree, deallocating all nodes.
    pub fn clear(&mut self) {
        self.postorder(|node_ptr| unsafe {
            Node::destroy(node_ptr);
        });
        self.root = None;
        self.num_nodes = 0;
    }

    /// Gets an iterator over the entries of the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter {
            next: self.root.map(|root_ptr| unsafe { Node::leftmost(root_ptr) }),
            remaining: self.num_nodes,
            marker: PhantomData,
        }
    }

    /// Visits every entry in post-order (left subtree, right subtree, node).
    pub fn for_each_postorder<F: FnMut(&K, &I)>(&self, mut visit: F) {
        self.postorder(|node_ptr| {
            let node = unsafe { node_ptr.as_ref() };
            visit(&node.key, &node.info);
        });
    }

    /// Returns a value rendering the tree sideways, indented by level.
    pub fn display(&self) -> Sideways<'_, K, I> {
        Sideways { tree: self }
    }

    fn height_of(link: Link<K, I>) -> isize {
        match link {
            None => -1,
            Some(node_ptr) => unsafe { node_ptr.as_ref().height },
        }
    }

    // -1 for a missing node
    fn balance_factor(link: Link<K, I>) -> isize {
        match link {
            None => -1,
            Some(node_ptr) => unsafe {
                Self::height_of(node_ptr.as_ref().left) - Self::height_of(node_ptr.as_ref().right)
            },
        }
    }

    fn adjust_height(mut node_ptr: NodePtr<K, I>) {
        unsafe {
            let height = 1 + cmp::max(
                Self::height_of(node_ptr.as_ref().left),
                Self::height_of(node_ptr.as_ref().right),
            );
            node_ptr.as_mut().height = height;
        }
    }

    fn preorder<F: FnMut(NodePtr<K, I>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<K, I>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<K, I>),
        In: FnMut(NodePtr<K, I>),
        Post: FnMut(NodePtr<K, I>),
    {
        let Some(mut node_ptr) = self.root else {
            return;
        };
        let mut dir = Direction::FromParent;
        loop {
            match dir {
                Direction::FromParent => {
                    preorder(node_ptr);
                    match unsafe { node_ptr.as_ref().left } {
                        Some(left_ptr) => node_ptr = left_ptr,
                        None => dir = Direction::FromLeft,
                    }
                }
                Direction::FromLeft => {
                    inorder(node_ptr);
                    match unsafe { node_ptr.as_ref().right } {
                        Some(right_ptr) => {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        }
                        None => dir = Direction::FromRight,
                    }
                }
                Direction::FromRight => {
                    // The postorder callback may free the node, read everything first.
                    let parent = unsafe { node_ptr.as_ref().parent };
                    match parent {
                        Some(parent_ptr) => {
                            dir = if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                Direction::FromLeft
                            } else {
                                Direction::FromRight
                            };
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        }
                        None => {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<K: Ord, I> AvlTree<K, I> {
    /// Returns true if the tree contains the key.
    pub fn search(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the info stored for the key.
    pub fn get(&self, key: &K) -> Option<&I> {
        self.find(key)
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.info)
    }

    /// Returns a mutable reference to the info stored for the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut I> {
        self.find(key)
            .map(|node_ptr| &mut unsafe { &mut *node_ptr.as_ptr() }.info)
    }

    /// Inserts a key-info pair into the tree.
    ///
    /// Returns false and leaves the tree untouched if the key is already present.
    pub fn insert(&mut self, key: K, info: I) -> bool {
        match self.find_insert_pos(&key) {
            Ok((parent, link_ptr)) => {
                self.graft(parent, link_ptr, key, info);
                true
            }
            Err(_) => {
                debug!("rejected insert: key already present ({} entries)", self.num_nodes);
                false
            }
        }
    }

    /// Returns a mutable reference to the info stored for the key,
    /// inserting a default info first if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut I
    where
        I: Default,
    {
        let node_ptr = match self.find_insert_pos(&key) {
            Ok((parent, link_ptr)) => self.graft(parent, link_ptr, key, I::default()),
            Err(node_ptr) => node_ptr,
        };
        &mut unsafe { &mut *node_ptr.as_ptr() }.info
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the tree.
    /// Returns the stored key-info pair if the key was previously in the tree.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, I)> {
        let node_ptr = self.find(key)?;
        Some(self.take_node(node_ptr))
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_ptr) = self.root {
                assert!(root_ptr.as_ref().parent.is_none());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let node = node_ptr.as_ref();

                if let Some(left_ptr) = node.left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().key < node.key);
                }
                if let Some(right_ptr) = node.right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().key > node.key);
                }

                // Check cached height and AVL condition
                let left_height = Self::height_of(node.left);
                let right_height = Self::height_of(node.right);
                assert_eq!(node.height, 1 + cmp::max(left_height, right_height));
                assert!((left_height - right_height).abs() <= 1);

                num_nodes += 1;
            });
            assert_eq!(num_nodes, self.num_nodes);
        }

        // In-order traversal must be strictly ascending
        let mut keys = self.iter().map(|(key, _)| key);
        if let Some(mut prev) = keys.next() {
            for key in keys {
                assert!(prev < key);
                prev = key;
            }
        }
    }

    fn find(&self, key: &K) -> Link<K, I> {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    /// Finds the empty link where the key belongs, or the node already holding it.
    fn find_insert_pos(
        &mut self,
        key: &K,
    ) -> Result<(Link<K, I>, LinkPtr<K, I>), NodePtr<K, I>> {
        let mut parent: Link<K, I> = None;
        let mut link_ptr: LinkPtr<K, I> = LinkPtr::from(&mut self.root);
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                link_ptr = match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => return Err(node_ptr),
                    Ordering::Less => LinkPtr::from(&mut node_ptr.as_mut().left),
                    Ordering::Greater => LinkPtr::from(&mut node_ptr.as_mut().right),
                };
                parent = Some(node_ptr);
            }
        }
        Ok((parent, link_ptr))
    }

    fn graft(
        &mut self,
        parent: Link<K, I>,
        mut link_ptr: LinkPtr<K, I>,
        key: K,
        info: I,
    ) -> NodePtr<K, I> {
        let node_ptr = Node::create(parent, key, info);
        unsafe {
            *link_ptr.as_mut() = Some(node_ptr);
        }
        self.num_nodes += 1;
        self.rebalance(parent, Some(node_ptr));
        node_ptr
    }

    fn take_node(&mut self, node_ptr: NodePtr<K, I>) -> (K, I) {
        debug_assert!(self.num_nodes >= 1);
        self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        unsafe { Node::destroy(node_ptr) }
    }

    fn unlink_node(&mut self, node_ptr: NodePtr<K, I>) {
        unsafe {
            let parent = node_ptr.as_ref().parent;
            let left = node_ptr.as_ref().left;

            let Some(right_ptr) = node_ptr.as_ref().right else {
                // Stem or leaf: the left child (if any) takes its place
                if let Some(mut left_ptr) = left {
                    left_ptr.as_mut().parent = parent;
                }
                self.replace_child(parent, node_ptr, left);
                self.rebalance(parent, None);
                return;
            };

            // In-order successor is the leftmost node of the right subtree
            let mut successor_ptr = Node::leftmost(right_ptr);
            let successor_parent = successor_ptr.as_ref().parent;
            let successor_right = successor_ptr.as_ref().right;
            if let Some(mut successor_right_ptr) = successor_right {
                successor_right_ptr.as_mut().parent = successor_parent;
            }
            self.replace_child(successor_parent, successor_ptr, successor_right);

            // Successor takes over the links of the removed node
            successor_ptr.as_mut().left = left;
            if let Some(mut left_ptr) = left {
                left_ptr.as_mut().parent = Some(successor_ptr);
            }
            let right = node_ptr.as_ref().right;
            successor_ptr.as_mut().right = right;
            if let Some(mut right_ptr) = right {
                right_ptr.as_mut().parent = Some(successor_ptr);
            }
            successor_ptr.as_mut().parent = parent;
            self.replace_child(parent, node_ptr, Some(successor_ptr));

            // The successor's old parent is the lowest node whose height may have changed
            let rebalance_from = if successor_parent == Some(node_ptr) {
                successor_ptr
            } else {
                successor_parent.unwrap_or(successor_ptr)
            };
            self.rebalance(Some(rebalance_from), None);
        }
    }

    /// Points the link of `parent` (or the root link) that refers to `old` at `new`.
    fn replace_child(&mut self, parent: Link<K, I>, old: NodePtr<K, I>, new: Link<K, I>) {
        match parent {
            None => self.root = new,
            Some(mut parent_ptr) => unsafe {
                if parent_ptr.as_ref().left == Some(old) {
                    parent_ptr.as_mut().left = new;
                } else {
                    parent_ptr.as_mut().right = new;
                }
            },
        }
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<K, I>) -> NodePtr<K, I> {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().right else {
                return node_ptr;
            };
            trace!("left rotation");

            node_ptr.as_mut().right = pivot_ptr.as_ref().left;
            if let Some(mut inner_ptr) = pivot_ptr.as_ref().left {
                inner_ptr.as_mut().parent = Some(node_ptr);
            }

            let parent = node_ptr.as_ref().parent;
            pivot_ptr.as_mut().parent = parent;
            self.replace_child(parent, node_ptr, Some(pivot_ptr));

            pivot_ptr.as_mut().left = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::adjust_height(node_ptr);
            Self::adjust_height(pivot_ptr);
            pivot_ptr
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<K, I>) -> NodePtr<K, I> {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().left else {
                return node_ptr;
            };
            trace!("right rotation");

            node_ptr.as_mut().left = pivot_ptr.as_ref().right;
            if let Some(mut inner_ptr) = pivot_ptr.as_ref().right {
                inner_ptr.as_mut().parent = Some(node_ptr);
            }

            let parent = node_ptr.as_ref().parent;
            pivot_ptr.as_mut().parent = parent;
            self.replace_child(parent, node_ptr, Some(pivot_ptr));

            pivot_ptr.as_mut().right = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::adjust_height(node_ptr);
            Self::adjust_height(pivot_ptr);
            pivot_ptr
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    ///
    /// After an insert (`inserted` is the new node) a single rotation restores
    /// the height the subtree had before, so the walk stops there.
    /// After a removal every ancestor is checked.
    fn rebalance(&mut self, start_from: Link<K, I>, inserted: Link<K, I>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            let rotated = self.rebalance_node(node_ptr, inserted);
            if rotated && inserted.is_some() {
                break;
            }
            current = parent;
        }
    }

    /// Adjusts the height of the node and restores the AVL condition if it is violated.
    ///
    /// The rotation case is chosen from where the inserted key went when
    /// `inserted` is set, otherwise from the balance of the heavier child.
    /// Returns whether a rotation was necessary.
    fn rebalance_node(&mut self, node_ptr: NodePtr<K, I>, inserted: Link<K, I>) -> bool {
        Self::adjust_height(node_ptr);
        let balance = Self::balance_factor(Some(node_ptr));
        debug_assert!(balance.abs() <= 2);
        unsafe {
            if balance > 1 {
                let Some(left_ptr) = node_ptr.as_ref().left else {
                    return false;
                };
                let left_right = match inserted {
                    Some(new_ptr) => new_ptr.as_ref().key > left_ptr.as_ref().key,
                    None => Self::balance_factor(Some(left_ptr)) < 0,
                };
                if left_right {
                    self.rotate_left(left_ptr);
                }
                self.rotate_right(node_ptr);
                true
            } else if balance < -1 {
                let Some(right_ptr) = node_ptr.as_ref().right else {
                    return false;
                };
                let right_left = match inserted {
                    Some(new_ptr) => new_ptr.as_ref().key < right_ptr.as_ref().key,
                    None => Self::balance_factor(Some(right_ptr)) > 0,
                };
                if right_left {
                    self.rotate_right(right_ptr);
                }
                self.rotate_left(node_ptr);
                true
            } else {
                false
            }
        }
    }
}

impl<K: Ord, I: PartialOrd> AvlTree<K, I> {
    /// Returns the entry with the greatest info, scanning the whole tree.
    ///
    /// On ties the entry met first in pre-order wins.
    /// Returns `None` for an empty tree.
    pub fn max_info(&self) -> Option<(&K, &I)> {
        let node = unsafe { &*self.max_info_node()?.as_ptr() };
        Some((&node.key, &node.info))
    }

    /// Returns the `count` entries with the greatest info, greatest first.
    ///
    /// Works on a copy of the tree and extracts the maximum `count` times,
    /// which is O(count * n). Fine for a handful of entries; this is not a
    /// heap based selection. Returns `min(count, len)` entries.
    pub fn top_k(&self, count: usize) -> Vec<(K, I)>
    where
        K: Clone,
        I: Clone,
    {
        let mut scratch = self.clone();
        let mut selected = Vec::with_capacity(cmp::min(count, self.num_nodes));
        while selected.len() < count {
            match scratch.max_info_node() {
                Some(node_ptr) => selected.push(scratch.take_node(node_ptr)),
                None => break,
            }
        }
        selected
    }

    fn max_info_node(&self) -> Link<K, I> {
        let mut max: Link<K, I> = None;
        self.preorder(|node_ptr| {
            let greater = match max {
                None => true,
                Some(max_ptr) => unsafe { node_ptr.as_ref().info > max_ptr.as_ref().info },
            };
            if greater {
                max = Some(node_ptr);
            }
        });
        max
    }
}

impl<K, I> Drop for AvlTree<K, I> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, I> Default for AvlTree<K, I> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, I: Clone> Clone for AvlTree<K, I> {
    /// Copies the tree node by node, keeping its exact shape.
    fn clone(&self) -> Self {
        Self {
            root: self
                .root
                .map(|root_ptr| unsafe { Node::clone_subtree(root_ptr, None) }),
            num_nodes: self.num_nodes,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = source
            .root
            .map(|root_ptr| unsafe { Node::clone_subtree(root_ptr, None) });
        self.num_nodes = source.num_nodes;
    }
}

impl<K: Ord, I> FromIterator<(K, I)> for AvlTree<K, I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, I> Extend<(K, I)> for AvlTree<K, I> {
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, info) in iter {
            self.insert(key, info);
        }
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for AvlTree<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, I> IntoIterator for &'a AvlTree<K, I> {
    type Item = (&'a K, &'a I);
    type IntoIter = Iter<'a, K, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, I> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        let node_ptr = self.next?;
        self.remaining -= 1;
        unsafe {
            self.next = Node::successor(node_ptr);
            let node = &*node_ptr.as_ptr();
            Some((&node.key, &node.info))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, I> ExactSizeIterator for Iter<'_, K, I> {}

// Auto derived clone would require K: Clone and I: Clone
impl<K, I> Clone for Iter<'_, K, I> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<K: fmt::Display, I> fmt::Display for Sideways<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_sideways(f, self.tree.root, 0)
    }
}

fn fmt_sideways<K: fmt::Display, I>(
    f: &mut fmt::Formatter,
    link: Link<K, I>,
    depth: usize,
) -> fmt::Result {
    let Some(node_ptr) = link else {
        return Ok(());
    };
    let node = unsafe { node_ptr.as_ref() };
    fmt_sideways(f, node.right, depth + 1)?;
    writeln!(f, "{:indent$}{}", "", node.key, indent = depth * DISPLAY_INDENT)?;
    fmt_sideways(f, node.left, depth + 1)
}

impl<K, I> Node<K, I> {
    fn create(parent: Link<K, I>, key: K, info: I) -> NodePtr<K, I> {
        let boxed = Box::new(Node {
            key,
            info,
            parent,
            left: None,
            right: None,
            height: 0,
        });
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    unsafe fn destroy(node_ptr: NodePtr<K, I>) -> (K, I) {
        let Node { key, info, .. } = *Box::from_raw(node_ptr.as_ptr());
        (key, info)
    }

    unsafe fn leftmost(mut node_ptr: NodePtr<K, I>) -> NodePtr<K, I> {
        while let Some(left_ptr) = node_ptr.as_ref().left {
            node_ptr = left_ptr;
        }
        node_ptr
    }

    unsafe fn successor(node_ptr: NodePtr<K, I>) -> Link<K, I> {
        if let Some(right_ptr) = node_ptr.as_ref().right {
            return Some(Self::leftmost(right_ptr));
        }
        // Climb until we arrive from a left subtree
        let mut child_ptr = node_ptr;
        let mut parent = node_ptr.as_ref().parent;
        while let Some(parent_ptr) = parent {
            if parent_ptr.as_ref().left == Some(child_ptr) {
                break;
            }
            child_ptr = parent_ptr;
            parent = parent_ptr.as_ref().parent;
        }
        parent
    }
}

impl<K: Clone, I: Clone> Node<K, I> {
    unsafe fn clone_subtree(source_ptr: NodePtr<K, I>, parent: Link<K, I>) -> NodePtr<K, I> {
        let source = source_ptr.as_ref();
        let mut node_ptr = Node::create(parent, source.key.clone(), source.info.clone());
        node_ptr.as_mut().height = source.height;
        node_ptr.as_mut().left = source
            .left
            .map(|left_ptr| Self::clone_subtree(left_ptr, Some(node_ptr)));
        node_ptr.as_mut().right = source
            .right
            .map(|right_ptr| Self::clone_subtree(right_ptr, Some(node_ptr)));
        node_ptr
    }
}

#[cfg(test)]
mod tests {
    use super::AvlTree;

    #[test]
    fn test_height_convention() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.height(), -1);
        assert_eq!(AvlTree::<i32, ()>::balance_factor(None), -1);

        tree.insert(1, ());
        assert_eq!(tree.height(), 0);
        assert_eq!(AvlTree::balance_factor(tree.root), 0);

        tree.insert(0, ());
        assert_eq!(tree.height(), 1);
        assert_eq!(AvlTree::balance_factor(tree.root), 1);
    }

    #[test]
    fn test_rotation_pivots_at_root() {
        //   1 ->    2
        //    \     / \
        //     2   1   3
        //      \
        //       3
        let mut tree = AvlTree::new();
        tree.insert(1, ());
        tree.insert(2, ());
        tree.insert(3, ());
        let root = tree.root.map(|root_ptr| unsafe { root_ptr.as_ref().key });
        assert_eq!(root, Some(2));
        tree.check_consistency();
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        //     4          5
        //    / \        / \
        //   2   6  ->  2   6
        //  /   / \    /     \
        // 1   5   7  1       7
        let mut tree: AvlTree<i32, ()> = [4, 2, 6, 1, 5, 7].iter().map(|&k| (k, ())).collect();
        assert!(tree.remove(&4));
        let root = tree.root.map(|root_ptr| unsafe { root_ptr.as_ref().key });
        assert_eq!(root, Some(5));
        tree.check_consistency();
        let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 5, 6, 7]);
    }

    #[test]
    fn test_max_info_prefers_first_in_preorder() {
        //     2
        //    / \
        //   1   3
        let mut tree = AvlTree::new();
        tree.insert(2, 7);
        tree.insert(1, 7);
        tree.insert(3, 7);
        assert_eq!(tree.max_info(), Some((&2, &7)));

        tree.insert(4, 9);
        assert_eq!(tree.max_info(), Some((&4, &9)));
    }

    #[test]
    fn test_display_sideways() {
        let tree: AvlTree<i32, ()> = [2, 1, 3].iter().map(|&k| (k, ())).collect();
        let rendered = tree.display().to_string();
        let expected = format!("{:10}3\n2\n{:10}1\n", "", "");
        assert_eq!(rendered, expected);
    }
}
