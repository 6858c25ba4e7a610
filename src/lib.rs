//! Generic containers built from hand-linked nodes:
//!
//! - [`AvlTree`]: a self-balancing binary search tree with an info payload per key,
//!   max-info lookup and top-k selection.
//! - [`Ring`]: a circular doubly-linked list with a designated head, positional
//!   insert and erase through cursors, and an in-place sort by info.
//! - [`OrderedList`]: a singly-linked association list kept in key order.
//! - [`Dictionary`]: unique keys on top of [`OrderedList`], with [`dictionary::join`].
//!
//! None of the containers synchronizes access; share them across threads
//! only behind your own lock.
//!
//! Rejected inserts of duplicate keys are reported through the return value and
//! logged at debug level with the [`log`] facade.

pub mod dictionary;
mod error;
pub mod list;
pub mod ring;
pub mod tree;
mod words;

pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use list::OrderedList;
pub use ring::{merge, Cursor, CursorMut, Ring};
pub use tree::{AvlTree, Sideways};
pub use words::count_words;
