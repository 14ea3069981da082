//! Show how the mansion's clues spread over the index buckets

use detective_core::{ClueIndex, ClueSet, Scenario};

fn main() {
    let scenario = Scenario::mansion();

    println!("=== Bucket layout for '{}' ===\n", scenario.name);

    let mut index = ClueIndex::with_buckets(scenario.buckets);
    let mut clues = ClueSet::new();
    for rule in scenario.rules.iter() {
        println!("{:<20} -> bucket {}", rule.clue, index.hash(&rule.clue));
        index.insert(&rule.clue, &rule.actor);
        clues.insert(&rule.clue);
    }

    println!();
    for bucket in 0..index.bucket_count() {
        println!("bucket {bucket}: {}", "#".repeat(index.chain_len(bucket)));
    }

    println!("\nClue tree depth: {} for {} clues", clues.depth(), clues.len());
    for suspect in &scenario.roster {
        let count = clues.count_matching(|clue| index.lookup(clue), suspect);
        println!("{suspect}: {count} clue(s)");
    }
}
