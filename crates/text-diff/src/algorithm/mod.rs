//! Diff driver: affix trimming, containment, half-match, bisection.
//!
//! The problem is split into sub-rectangles of the edit graph and processed
//! from an explicit work-list, so pathological inputs cannot exhaust the
//! stack. Sub-results are emitted in left, middle, right order.

pub mod bisect;
pub mod half_match;

use std::ops::Range;

use log::{debug, trace};

use crate::{cleanup, Deadline, Edit, Operation};

/// Compute a normalized edit script transforming `a` into `b`.
///
/// Works over any element type with equality: code points for text,
/// [`LineId`](crate::LineId)s in line mode. Once `deadline` passes, the
/// remaining unresolved regions are reported as whole delete/insert pairs.
pub fn diff<T: PartialEq + Clone>(a: &[T], b: &[T], deadline: &Deadline) -> Vec<Edit<T>> {
    cleanup::cleanup_merge(diff_raw(a, b, deadline))
}

/// A pending unit of work. Ranges index the top-level `a` and `b`.
#[derive(Debug)]
enum Task {
    /// Diff `a[.0]` against `b[.1]`.
    Diff(Range<usize>, Range<usize>),
    /// Output a run: Delete and Equal read from `a`, Insert reads from `b`.
    Emit(Operation, Range<usize>),
}

/// Run the work-list without the final normalization pass.
fn diff_raw<T: PartialEq + Clone>(a: &[T], b: &[T], deadline: &Deadline) -> Vec<Edit<T>> {
    let mut edits: Vec<Edit<T>> = Vec::new();
    let mut tasks = vec![Task::Diff(0..a.len(), 0..b.len())];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Emit(op, range) => {
                let source = if op == Operation::Insert { b } else { a };
                push_run(&mut edits, op, &source[range]);
            }
            Task::Diff(ra, rb) => {
                trace!("diff task a={:?} b={:?}", ra, rb);
                let (prefix, suffix) = common_affixes(&a[ra.clone()], &b[rb.clone()]);
                push_run(&mut edits, Operation::Equal, &a[ra.start..ra.start + prefix]);

                let mid_a = ra.start + prefix..ra.end - suffix;
                let mid_b = rb.start + prefix..rb.end - suffix;
                tasks.push(Task::Emit(Operation::Equal, ra.end - suffix..ra.end));
                tasks.extend(compute(a, b, mid_a, mid_b, deadline).into_iter().rev());
            }
        }
    }

    edits
}

/// Split one trimmed region into immediate runs or smaller regions.
///
/// Assumes `a[ra]` and `b[rb]` share no common prefix or suffix.
fn compute<T: PartialEq>(
    a: &[T],
    b: &[T],
    ra: Range<usize>,
    rb: Range<usize>,
    deadline: &Deadline,
) -> Vec<Task> {
    let sa = &a[ra.clone()];
    let sb = &b[rb.clone()];

    if sa.is_empty() {
        return vec![Task::Emit(Operation::Insert, rb)];
    }
    if sb.is_empty() {
        return vec![Task::Emit(Operation::Delete, ra)];
    }

    let a_longer = sa.len() > sb.len();
    let (long, short) = if a_longer { (sa, sb) } else { (sb, sa) };

    // Shorter sequence inside the longer one.
    if let Some(i) = find(long, short, 0) {
        return if a_longer {
            let start = ra.start + i;
            let end = start + short.len();
            vec![
                Task::Emit(Operation::Delete, ra.start..start),
                Task::Emit(Operation::Equal, start..end),
                Task::Emit(Operation::Delete, end..ra.end),
            ]
        } else {
            vec![
                Task::Emit(Operation::Insert, rb.start..rb.start + i),
                Task::Emit(Operation::Equal, ra),
                Task::Emit(Operation::Insert, rb.start + i + short.len()..rb.end),
            ]
        };
    }

    // No containment, so a single element cannot be an equality.
    if short.len() == 1 {
        return vec![
            Task::Emit(Operation::Delete, ra),
            Task::Emit(Operation::Insert, rb),
        ];
    }

    if let Some(hm) = half_match::half_match(sa, sb) {
        debug!(
            "half-match splits {}x{} at a={:?} b={:?}",
            sa.len(),
            sb.len(),
            hm.a,
            hm.b
        );
        return vec![
            Task::Diff(ra.start..ra.start + hm.a.start, rb.start..rb.start + hm.b.start),
            Task::Emit(Operation::Equal, ra.start + hm.a.start..ra.start + hm.a.end),
            Task::Diff(ra.start + hm.a.end..ra.end, rb.start + hm.b.end..rb.end),
        ];
    }

    match bisect::bisect(sa, sb, deadline) {
        Some((x, y)) => vec![
            Task::Diff(ra.start..ra.start + x, rb.start..rb.start + y),
            Task::Diff(ra.start + x..ra.end, rb.start + y..rb.end),
        ],
        None => vec![
            Task::Emit(Operation::Delete, ra),
            Task::Emit(Operation::Insert, rb),
        ],
    }
}

/// Append a run, extending the previous run when it has the same kind.
fn push_run<T: Clone>(edits: &mut Vec<Edit<T>>, op: Operation, items: &[T]) {
    if items.is_empty() {
        return;
    }
    match edits.last_mut() {
        Some(last) if last.op == op => last.items.extend_from_slice(items),
        _ => edits.push(Edit::new(op, items.to_vec())),
    }
}

/// Length of the common prefix of two sequences.
pub fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the common suffix of two sequences.
pub fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Common prefix and suffix lengths that never overlap.
///
/// The suffix is measured on what remains after the prefix, so
/// `prefix + suffix <= min(a.len(), b.len())`.
pub fn common_affixes<T: PartialEq>(a: &[T], b: &[T]) -> (usize, usize) {
    let prefix = common_prefix(a, b);
    let suffix = common_suffix(&a[prefix..], &b[prefix..]);
    (prefix, suffix)
}

/// First index at or after `from` where `needle` occurs in `haystack`.
pub(crate) fn find<T: PartialEq>(haystack: &[T], needle: &[T], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
