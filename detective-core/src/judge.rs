//! Judging an accusation against the collected evidence.

use crate::clues::ClueSet;
use crate::index::ClueIndex;
use std::fmt;
use tracing::info;

/// Corroborating clues needed for a conviction.
pub const VERDICT_THRESHOLD: usize = 2;

/// The outcome of accusing one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccusationResult {
    pub accused: String,
    /// Clues whose actor is the accused.
    pub count: usize,
    /// The corroborating clues, alphabetically.
    pub evidence: Vec<String>,
    pub convicted: bool,
}

impl fmt::Display for AccusationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.convicted { "guilty" } else { "not proven" };
        write!(f, "{}: {} ({} clues)", self.accused, verdict, self.count)
    }
}

/// Count the clues pointing at `accused` and decide the verdict.
///
/// Matching is exact and case-sensitive. Clues with no actor in the index
/// never count.
pub fn judge(accused: &str, clues: &ClueSet, index: &ClueIndex) -> AccusationResult {
    let count = clues.count_matching(|clue| index.lookup(clue), accused);
    let evidence: Vec<String> = clues
        .iter()
        .filter(|clue| index.lookup(clue) == Some(accused))
        .map(str::to_string)
        .collect();
    debug_assert_eq!(count, evidence.len());

    let convicted = count >= VERDICT_THRESHOLD;
    info!(accused, count, convicted, "accusation judged");
    AccusationResult {
        accused: accused.to_string(),
        count,
        evidence,
        convicted,
    }
}
