//! Inspecting edit scripts.

use crate::{Diff, Edit, Operation};

/// The first text: every run except insertions.
pub fn source_text(diffs: &[Diff]) -> String {
    diffs
        .iter()
        .filter(|d| d.op != Operation::Insert)
        .map(|d| d.text.as_str())
        .collect()
}

/// The second text: every run except deletions.
pub fn target_text(diffs: &[Diff]) -> String {
    diffs
        .iter()
        .filter(|d| d.op != Operation::Delete)
        .map(|d| d.text.as_str())
        .collect()
}

/// The first sequence of a generic edit script.
pub fn source_items<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits
        .iter()
        .filter(|e| e.op != Operation::Insert)
        .flat_map(|e| e.items.iter().cloned())
        .collect()
}

/// The second sequence of a generic edit script.
pub fn target_items<T: Clone>(edits: &[Edit<T>]) -> Vec<T> {
    edits
        .iter()
        .filter(|e| e.op != Operation::Delete)
        .flat_map(|e| e.items.iter().cloned())
        .collect()
}

/// Levenshtein distance in code points.
///
/// A deletion and insertion between the same pair of equalities count as
/// substitutions, so only the larger of the two is added.
pub fn levenshtein(diffs: &[Diff]) -> usize {
    let mut distance = 0;
    let mut inserted = 0;
    let mut deleted = 0;
    for diff in diffs {
        match diff.op {
            Operation::Insert => inserted += diff.text.chars().count(),
            Operation::Delete => deleted += diff.text.chars().count(),
            Operation::Equal => {
                distance += inserted.max(deleted);
                inserted = 0;
                deleted = 0;
            }
        }
    }
    distance + inserted.max(deleted)
}
