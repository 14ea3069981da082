//! Clue → actor lookup table.
//!
//! A fixed number of buckets, each holding a singly linked chain of entries.
//! New entries go to the head of their chain, so the most recent insertion
//! for a clue is the one found first.

use tracing::debug;

/// Bucket count used by the built-in scenarios.
pub const DEFAULT_BUCKETS: usize = 10;

#[derive(Debug)]
struct IndexEntry {
    clue: String,
    actor: String,
    next: Option<Box<IndexEntry>>,
}

/// Hash-bucketed map from clue text to the actor it implicates.
#[derive(Debug)]
pub struct ClueIndex {
    buckets: Vec<Option<Box<IndexEntry>>>,
    len: usize,
}

impl Default for ClueIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ClueIndex {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Create an index with `buckets` chains. Zero is treated as one.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(1);
        Self {
            buckets: (0..buckets).map(|_| None).collect(),
            len: 0,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket for `clue`: the sum of its character codes modulo the bucket count.
    pub fn hash(&self, clue: &str) -> usize {
        bucket_for(clue, self.buckets.len())
    }

    /// Prepend an entry to the clue's chain. Existing entries are kept.
    pub fn insert(&mut self, clue: &str, actor: &str) {
        let bucket = self.hash(clue);
        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(IndexEntry {
            clue: clue.to_string(),
            actor: actor.to_string(),
            next: head,
        }));
        self.len += 1;
        debug!(clue, actor, bucket, "clue linked to actor");
    }

    /// The actor of the first entry in the chain whose clue equals `clue`.
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let mut entry = self.buckets[self.hash(clue)].as_deref();
        while let Some(e) = entry {
            if e.clue == clue {
                return Some(&e.actor);
            }
            entry = e.next.as_deref();
        }
        None
    }

    /// Number of entries chained in `bucket`; zero for out-of-range buckets.
    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut entry = self.buckets.get(bucket).and_then(|b| b.as_deref());
        let mut len = 0;
        while let Some(e) = entry {
            len += 1;
            entry = e.next.as_deref();
        }
        len
    }

    /// Total entries across all buckets, shadowed ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for ClueIndex {
    // Unlink chains iteratively so long chains cannot overflow the stack.
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut entry = bucket.take();
            while let Some(mut e) = entry {
                entry = e.next.take();
            }
        }
    }
}

fn bucket_for(clue: &str, buckets: usize) -> usize {
    let sum = clue
        .chars()
        .fold(0usize, |acc, c| acc.wrapping_add(c as usize));
    sum % buckets
}
