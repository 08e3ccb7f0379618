//! Line hashing: diff whole lines as single symbols.
//!
//! Every distinct line is interned in a [`LineTable`] and replaced by a
//! [`LineId`]. The id sequences are diffed with the ordinary engine and the
//! result is expanded back into text.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::{algorithm, cleanup, Deadline, Diff, DiffError, DiffOptions, Edit, Operation};

/// Identifier of an interned line.
///
/// Ids start at 1; 0 is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

impl LineId {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interning table mapping line text (including its newline) to ids.
///
/// A table can be kept across many [`LineTable::encode`] calls so related
/// texts share storage. It is not synchronized; callers sharing one between
/// threads must wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct LineTable {
    lines: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, LineId>,
}

impl LineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct lines interned so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the line with id `id`, or `None` if this table never issued it.
    pub fn get(&self, id: LineId) -> Option<&str> {
        let index = id.0.checked_sub(1)?;
        self.lines.get(index).map(|line| &**line)
    }

    /// Id of `line` if it has been interned.
    pub fn lookup(&self, line: &str) -> Option<LineId> {
        self.ids.get(line).copied()
    }

    /// Split `text` into lines and intern each one.
    pub fn encode(&mut self, text: &str) -> Vec<LineId> {
        split_lines(text)
            .into_iter()
            .map(|line| self.intern(line))
            .collect()
    }

    fn intern(&mut self, line: &str) -> LineId {
        if let Some(&id) = self.ids.get(line) {
            return id;
        }
        let line: Arc<str> = Arc::from(line);
        self.lines.push(Arc::clone(&line));
        let id = LineId(self.lines.len());
        self.ids.insert(line, id);
        id
    }

    /// Concatenate the lines behind `ids`.
    pub fn text(&self, ids: &[LineId]) -> crate::Result<String> {
        let mut text = String::new();
        for &id in ids {
            text.push_str(self.get(id).ok_or(DiffError::UnknownLine(id))?);
        }
        Ok(text)
    }
}

/// Split text into lines, keeping line endings.
///
/// Text after the last newline forms a final line of its own.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Intern the lines of both texts in a fresh table.
///
/// Identical lines in either text get the same id.
pub fn tokenize_lines(a: &str, b: &str) -> (Vec<LineId>, Vec<LineId>, LineTable) {
    let mut table = LineTable::new();
    let ids_a = table.encode(a);
    let ids_b = table.encode(b);
    (ids_a, ids_b, table)
}

/// Expand a line-id edit script back into text.
///
/// # Panics
///
/// Panics if the script references an id `table` never issued; the script
/// and table must come from the same tokenization.
pub fn rehydrate(edits: &[Edit<LineId>], table: &LineTable) -> Vec<Diff> {
    try_rehydrate(edits, table).unwrap_or_else(|err| panic!("rehydrate: {}", err))
}

/// Like [`rehydrate`], reporting unknown ids as [`DiffError::UnknownLine`].
pub fn try_rehydrate(edits: &[Edit<LineId>], table: &LineTable) -> crate::Result<Vec<Diff>> {
    edits
        .iter()
        .map(|edit| -> crate::Result<Diff> {
            Ok(Diff::new(edit.op, table.text(&edit.items)?))
        })
        .collect()
}

/// Line-granularity diff: tokenize, diff the ids, rehydrate.
///
/// Only `options.timeout` is consulted and `options` is not validated; the
/// batch entry points do that.
pub fn diff_lines(a: &str, b: &str, options: &DiffOptions) -> Vec<Diff> {
    let deadline = options.deadline();
    let (ids_a, ids_b, table) = tokenize_lines(a, b);
    let edits = algorithm::diff(&ids_a, &ids_b, &deadline);
    rehydrate(&edits, &table)
}

/// Diff by lines first, then refine each replaced block by characters.
pub(crate) fn diff_line_mode(a: &str, b: &str, deadline: &Deadline) -> Vec<Diff> {
    let (ids_a, ids_b, table) = tokenize_lines(a, b);
    debug!(
        "line mode: {} and {} lines, {} distinct",
        ids_a.len(),
        ids_b.len(),
        table.len()
    );
    let line_edits = algorithm::diff(&ids_a, &ids_b, deadline);

    let mut out: Vec<Edit<char>> = Vec::new();
    let mut deleted = String::new();
    let mut inserted = String::new();
    for diff in rehydrate(&line_edits, &table) {
        match diff.op {
            Operation::Delete => deleted.push_str(&diff.text),
            Operation::Insert => inserted.push_str(&diff.text),
            Operation::Equal => {
                refine(&mut out, &mut deleted, &mut inserted, deadline);
                out.push(Edit::from(&diff));
            }
        }
    }
    refine(&mut out, &mut deleted, &mut inserted, deadline);

    cleanup::cleanup_merge(out)
        .into_iter()
        .map(Diff::from)
        .collect()
}

/// Re-diff a pending replaced block character by character.
fn refine(
    out: &mut Vec<Edit<char>>,
    deleted: &mut String,
    inserted: &mut String,
    deadline: &Deadline,
) {
    let a: Vec<char> = deleted.chars().collect();
    let b: Vec<char> = inserted.chars().collect();
    if !a.is_empty() && !b.is_empty() {
        out.extend(algorithm::diff(&a, &b, deadline));
    } else if !a.is_empty() {
        out.push(Edit::delete(a));
    } else if !b.is_empty() {
        out.push(Edit::insert(b));
    }
    deleted.clear();
    inserted.clear();
}
