//! Text differencing engine: character-level and line-level edit scripts.
//!
//! Provides the Myers bisection algorithm with prefix/suffix trimming,
//! containment and half-match speedups, an edit-script normalizer, and a
//! line-hashing fast path that diffs whole lines as single symbols before
//! expanding them back into text.

pub mod algorithm;
pub mod batch;
pub mod cleanup;
pub mod deadline;
pub mod lines;
pub mod script;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use algorithm::diff;
pub use batch::{diff_batch, diff_lines_batch};
pub use cleanup::cleanup_merge;
pub use deadline::Deadline;
pub use lines::{diff_lines, rehydrate, tokenize_lines, try_rehydrate, LineId, LineTable};
pub use script::{levenshtein, source_items, source_text, target_items, target_text};

pub type Result<T> = std::result::Result<T, DiffError>;

/// Options controlling [`diff_main`], [`diff_lines`] and batch diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Time budget for one top-level diff (None = unbounded, default 1s).
    pub timeout: Option<Duration>,
    /// Diff large texts line-by-line first, then refine changed blocks.
    pub check_lines: bool,
    /// Both texts must be longer than this (in code points) for line mode.
    pub line_mode_threshold: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(1)),
            check_lines: true,
            line_mode_threshold: 100,
        }
    }
}

impl DiffOptions {
    /// Reject option combinations the engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.line_mode_threshold == 0 {
            return Err(DiffError::InvalidOptions(
                "line_mode_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Deadline for a diff starting now.
    pub fn deadline(&self) -> Deadline {
        match self.timeout {
            Some(budget) => Deadline::after(budget),
            None => Deadline::never(),
        }
    }
}

/// Kind of an edit-script entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Present only in the first sequence.
    Delete,
    /// Present only in the second sequence.
    Insert,
    /// Present in both.
    Equal,
}

impl Operation {
    /// Marker used by `Display` for edit scripts (`-`, `+`, `=`).
    pub fn as_char(&self) -> char {
        match self {
            Self::Delete => '-',
            Self::Insert => '+',
            Self::Equal => '=',
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Delete => "delete",
            Self::Insert => "insert",
            Self::Equal => "equal",
        })
    }
}

/// One run of an edit script over an arbitrary element type.
///
/// The engine works on `Edit<char>` for text and `Edit<LineId>` in line mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edit<T> {
    /// Kind of run.
    pub op: Operation,
    /// Elements covered by the run, in sequence order.
    pub items: Vec<T>,
}

impl<T> Edit<T> {
    pub fn new(op: Operation, items: Vec<T>) -> Self {
        Self { op, items }
    }

    pub fn delete(items: Vec<T>) -> Self {
        Self::new(Operation::Delete, items)
    }

    pub fn insert(items: Vec<T>) -> Self {
        Self::new(Operation::Insert, items)
    }

    pub fn equal(items: Vec<T>) -> Self {
        Self::new(Operation::Equal, items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One run of a text edit script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diff {
    /// Kind of run.
    pub op: Operation,
    /// Text covered by the run.
    pub text: String,
}

impl Diff {
    pub fn new(op: Operation, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }
}

impl From<Edit<char>> for Diff {
    fn from(edit: Edit<char>) -> Self {
        Self {
            op: edit.op,
            text: edit.items.into_iter().collect(),
        }
    }
}

impl From<&Diff> for Edit<char> {
    fn from(diff: &Diff) -> Self {
        Edit::new(diff.op, diff.text.chars().collect())
    }
}

impl std::fmt::Display for Diff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", self.op.as_char(), self.text)
    }
}

/// Error types for diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("edit script references unknown line id {0}")]
    UnknownLine(LineId),

    #[error("invalid diff options: {0}")]
    InvalidOptions(String),
}

/// Character-level diff of two texts, compared code point by code point.
pub fn diff_chars(a: &str, b: &str, deadline: &Deadline) -> Vec<Diff> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    algorithm::diff(&a, &b, deadline)
        .into_iter()
        .map(Diff::from)
        .collect()
}

/// Diff two texts using `options`.
///
/// Identical inputs short-circuit. Large inputs go through line mode when
/// `check_lines` is set: lines are diffed as symbols and every replaced block
/// is then refined character by character under the same deadline.
///
/// `options` is used as given; call [`DiffOptions::validate`] first when it
/// comes from outside. A zero `line_mode_threshold` sends every non-empty
/// pair through line mode.
pub fn diff_main(a: &str, b: &str, options: &DiffOptions) -> Vec<Diff> {
    let deadline = options.deadline();
    if a == b {
        return if a.is_empty() {
            Vec::new()
        } else {
            vec![Diff::equal(a)]
        };
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if options.check_lines
        && a_chars.len() > options.line_mode_threshold
        && b_chars.len() > options.line_mode_threshold
    {
        return lines::diff_line_mode(a, b, &deadline);
    }

    algorithm::diff(&a_chars, &b_chars, &deadline)
        .into_iter()
        .map(Diff::from)
        .collect()
}
