//! Ordered set of collected clues.
//!
//! A plain (unbalanced) binary search tree keyed by clue text. Insertion
//! order decides the shape; in-order traversal always yields the clues
//! alphabetically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// What to do when a clue that is already stored is inserted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Keep a single copy of each clue.
    #[default]
    Reject,
    /// Store every insertion; equal keys go to the right subtree.
    AllowDuplicates,
}

#[derive(Debug)]
struct ClueNode {
    clue: String,
    left: Option<Box<ClueNode>>,
    right: Option<Box<ClueNode>>,
}

impl ClueNode {
    fn new(clue: &str) -> Box<Self> {
        Box::new(Self {
            clue: clue.to_string(),
            left: None,
            right: None,
        })
    }
}

/// The clues discovered so far, in alphabetical order.
#[derive(Debug, Default)]
pub struct ClueSet {
    root: Option<Box<ClueNode>>,
    len: usize,
    policy: DuplicatePolicy,
}

impl ClueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            root: None,
            len: 0,
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Insert a clue. Returns `true` if a node was added.
    pub fn insert(&mut self, clue: &str) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.cmp(node.clue.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => match self.policy {
                    DuplicatePolicy::Reject => {
                        debug!(clue, "clue already collected");
                        return false;
                    }
                    DuplicatePolicy::AllowDuplicates => &mut node.right,
                },
            };
        }
        *slot = Some(ClueNode::new(clue));
        self.len += 1;
        debug!(clue, total = self.len, "clue collected");
        true
    }

    pub fn contains(&self, clue: &str) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match clue.cmp(node.clue.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Clues in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Count the clues whose actor, as resolved by `lookup`, equals `actor`.
    ///
    /// Visits every node; clues without an actor never match.
    pub fn count_matching<F, R>(&self, lookup: F, actor: &str) -> usize
    where
        F: Fn(&str) -> Option<R>,
        R: AsRef<str>,
    {
        self.iter()
            .filter(|&clue| lookup(clue).is_some_and(|a| a.as_ref() == actor))
            .count()
    }

    /// Height of the tree; 0 when empty.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&ClueNode, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.left.as_deref().map(|n| (n, level + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, level + 1)));
        }
        deepest
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

// Sorted insertions degrade the tree into a list, so unlink it iteratively.
impl Drop for ClueSet {
    fn drop(&mut self) {
        let mut stack: Vec<Box<ClueNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a ClueSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`ClueSet`].
pub struct Iter<'a> {
    stack: Vec<&'a ClueNode>,
}

impl<'a> Iter<'a> {
    fn push_left(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(node.clue.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_is_alphabetical() {
        let mut set = ClueSet::new();
        set.insert("Pegada de lama");
        set.insert("Faca suja");
        set.insert("Luva rasgada");

        let clues: Vec<_> = set.iter().collect();
        assert_eq!(clues, vec!["Faca suja", "Luva rasgada", "Pegada de lama"]);
    }

    #[test]
    fn test_ordering_holds_for_any_insertion_order() {
        let words = ["delta", "alpha", "echo", "charlie", "bravo", "alpha", "foxtrot", "Zulu"];
        let mut set = ClueSet::new();
        for w in words {
            set.insert(w);
        }
        let clues: Vec<_> = set.iter().collect();
        assert!(clues.windows(2).all(|w| w[0] <= w[1]));
        // Byte order: uppercase sorts first.
        assert_eq!(clues.first(), Some(&"Zulu"));
        assert_eq!(clues.len(), 7);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let mut once = ClueSet::new();
        once.insert("Faca suja");
        once.insert("Luva rasgada");

        let mut twice = ClueSet::new();
        assert!(twice.insert("Faca suja"));
        assert!(twice.insert("Luva rasgada"));
        assert!(!twice.insert("Faca suja"));

        assert_eq!(once.iter().collect::<Vec<_>>(), twice.iter().collect::<Vec<_>>());
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn test_allow_duplicates_keeps_copies_adjacent() {
        let mut set = ClueSet::with_policy(DuplicatePolicy::AllowDuplicates);
        set.insert("b");
        set.insert("a");
        set.insert("b");
        set.insert("c");
        set.insert("b");

        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "b", "b", "c"]);
    }

    #[test]
    fn test_empty_set() {
        let set = ClueSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.depth(), 0);
        assert_eq!(set.count_matching(|_| Some("anyone"), "anyone"), 0);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let mut set = ClueSet::new();
        for clue in ["m", "c", "x", "a"] {
            set.insert(clue);
        }
        let first: Vec<_> = set.iter().collect();
        let second: Vec<_> = (&set).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_contains_and_depth() {
        let mut set = ClueSet::new();
        // Sorted input degenerates into a list.
        for clue in ["a", "b", "c", "d"] {
            set.insert(clue);
        }
        assert_eq!(set.depth(), 4);
        assert!(set.contains("c"));
        assert!(!set.contains("e"));
    }

    #[test]
    fn test_count_matching() {
        let mut set = ClueSet::new();
        for clue in ["mud", "soil", "knife", "note"] {
            set.insert(clue);
        }
        let lookup = |clue: &str| match clue {
            "mud" | "soil" => Some("Gardener"),
            "knife" => Some("Cook"),
            _ => None,
        };
        assert_eq!(set.count_matching(lookup, "Gardener"), 2);
        assert_eq!(set.count_matching(lookup, "Cook"), 1);
        assert_eq!(set.count_matching(lookup, "Butler"), 0);
    }

    #[test]
    fn test_long_chain_on_small_stack() {
        // Sorted input builds a 10k-deep list; depth, counting and drop must not recurse.
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024)
            .spawn(|| {
                let mut set = ClueSet::new();
                for i in 0..10_000 {
                    set.insert(&format!("clue {i:05}"));
                }
                assert_eq!(set.depth(), 10_000);
                assert_eq!(set.count_matching(|_| Some("Someone"), "Someone"), 10_000);
                drop(set);
            })
            .unwrap();
        handle.join().unwrap();
    }
}
