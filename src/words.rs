//! Word frequency counting on top of [`AvlTree`].

use std::io::{self, BufRead};

use log::debug;

use crate::tree::AvlTree;

/// Counts the whitespace separated words read from `reader`.
///
/// ```
/// use avl_ring::count_words;
/// let tree = count_words("a b\na c".as_bytes()).unwrap();
/// assert_eq!(tree.get(&"a".to_string()), Some(&2));
/// assert_eq!(tree.top_k(1), vec![("a".to_string(), 2)]);
/// ```
pub fn count_words<R: BufRead>(reader: R) -> io::Result<AvlTree<String, usize>> {
    let mut tree = AvlTree::new();
    for line in reader.lines() {
        for word in line?.split_whitespace() {
            *tree.get_or_insert_default(word.to_owned()) += 1;
        }
    }
    debug!("counted {} distinct words", tree.len());
    Ok(tree)
}
