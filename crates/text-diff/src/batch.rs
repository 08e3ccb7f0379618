//! Diffing many independent text pairs in parallel.
//!
//! Each pair is diffed on the rayon pool with its own deadline and its own
//! [`LineTable`](crate::LineTable); nothing is shared between pairs.

use rayon::prelude::*;

use crate::{diff_main, lines, Diff, DiffOptions, Result};

/// Line-level diff of every `(old, new)` pair. Results keep input order.
pub fn diff_lines_batch<A, B>(pairs: &[(A, B)], options: &DiffOptions) -> Result<Vec<Vec<Diff>>>
where
    A: AsRef<str> + Sync,
    B: AsRef<str> + Sync,
{
    options.validate()?;
    Ok(pairs
        .par_iter()
        .map(|(a, b)| lines::diff_lines(a.as_ref(), b.as_ref(), options))
        .collect())
}

/// [`diff_main`] over every `(old, new)` pair. Results keep input order.
pub fn diff_batch<A, B>(pairs: &[(A, B)], options: &DiffOptions) -> Result<Vec<Vec<Diff>>>
where
    A: AsRef<str> + Sync,
    B: AsRef<str> + Sync,
{
    options.validate()?;
    Ok(pairs
        .par_iter()
        .map(|(a, b)| diff_main(a.as_ref(), b.as_ref(), options))
        .collect())
}
