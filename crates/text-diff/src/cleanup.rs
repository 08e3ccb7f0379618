//! Edit-script normalization.
//!
//! Merges adjacent runs of the same kind, factors common affixes out of
//! delete/insert pairs, and slides single edits across neighbouring
//! equalities when that removes an equality.

use crate::algorithm::{common_prefix, common_suffix};
use crate::{Edit, Operation};

/// Normalize an edit script.
///
/// The result has no two adjacent runs of the same kind, no empty runs, and
/// within every stretch between equalities at most one delete followed by at
/// most one insert. Applying it twice gives the same result as once.
pub fn cleanup_merge<T: PartialEq + Clone>(mut edits: Vec<Edit<T>>) -> Vec<Edit<T>> {
    loop {
        let (shifted, changed) = shift_single_edits(merge_runs(edits));
        if !changed {
            return shifted;
        }
        edits = shifted;
    }
}

/// Collapse every stretch of deletes and inserts between equalities into at
/// most one delete and one insert, moving shared affixes into the
/// surrounding equalities.
fn merge_runs<T: PartialEq + Clone>(edits: Vec<Edit<T>>) -> Vec<Edit<T>> {
    let mut out: Vec<Edit<T>> = Vec::with_capacity(edits.len());
    let mut deleted: Vec<T> = Vec::new();
    let mut inserted: Vec<T> = Vec::new();

    for edit in edits {
        match edit.op {
            Operation::Delete => deleted.extend(edit.items),
            Operation::Insert => inserted.extend(edit.items),
            // An empty equality does not separate the edits around it.
            Operation::Equal if edit.items.is_empty() => {}
            Operation::Equal => {
                let mut equal = flush(&mut out, &mut deleted, &mut inserted);
                equal.extend(edit.items);
                push_equal(&mut out, equal);
            }
        }
    }
    let trailing = flush(&mut out, &mut deleted, &mut inserted);
    push_equal(&mut out, trailing);

    out
}

/// Emit the pending delete/insert pair. Returns the common suffix that was
/// factored out; it belongs at the front of the next equality.
fn flush<T: PartialEq + Clone>(
    out: &mut Vec<Edit<T>>,
    deleted: &mut Vec<T>,
    inserted: &mut Vec<T>,
) -> Vec<T> {
    let mut suffix = Vec::new();

    if !deleted.is_empty() && !inserted.is_empty() {
        let prefix = common_prefix(inserted.as_slice(), deleted.as_slice());
        if prefix != 0 {
            push_equal(out, inserted[..prefix].to_vec());
            inserted.drain(..prefix);
            deleted.drain(..prefix);
        }
        let common = common_suffix(inserted.as_slice(), deleted.as_slice());
        if common != 0 {
            suffix = inserted.split_off(inserted.len() - common);
            deleted.truncate(deleted.len() - common);
        }
    }

    if !deleted.is_empty() {
        out.push(Edit::delete(std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        out.push(Edit::insert(std::mem::take(inserted)));
    }

    suffix
}

/// Append equal items, merging with a preceding equality.
fn push_equal<T>(out: &mut Vec<Edit<T>>, items: Vec<T>) {
    if items.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.op == Operation::Equal => last.items.extend(items),
        _ => out.push(Edit::equal(items)),
    }
}

/// Slide single edits surrounded by equalities sideways where that
/// swallows one of the equalities, e.g. `A<ins>BA</ins>C` becomes
/// `<ins>AB</ins>AC`. Returns whether anything moved.
fn shift_single_edits<T: PartialEq + Clone>(mut edits: Vec<Edit<T>>) -> (Vec<Edit<T>>, bool) {
    let mut changed = false;
    let mut i = 1;

    while i + 1 < edits.len() {
        if edits[i - 1].op == Operation::Equal
            && edits[i + 1].op == Operation::Equal
            && edits[i].op != Operation::Equal
        {
            let prev_len = edits[i - 1].items.len();
            let next_len = edits[i + 1].items.len();

            if edits[i].items.ends_with(&edits[i - 1].items) {
                // Shift the edit over the previous equality.
                let prev = edits.remove(i - 1).items;
                i -= 1;
                let cut = edits[i].items.len() - prev_len;
                let mut moved = prev.clone();
                moved.extend_from_slice(&edits[i].items[..cut]);
                edits[i].items = moved;
                let mut next = prev;
                next.append(&mut edits[i + 1].items);
                edits[i + 1].items = next;
                changed = true;
            } else if edits[i].items.starts_with(&edits[i + 1].items) {
                // Shift the edit over the next equality.
                let next = edits.remove(i + 1).items;
                edits[i - 1].items.extend_from_slice(&next);
                edits[i].items.drain(..next_len);
                edits[i].items.extend(next);
                changed = true;
            }
        }
        i += 1;
    }

    (edits, changed)
}
