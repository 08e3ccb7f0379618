//! Half-match detection.
//!
//! If the shorter sequence shares a block with the longer one that is at
//! least half the longer one's length, the problem can be split around that
//! block without running bisection. The result is not guaranteed minimal.

use std::ops::Range;

use super::{common_prefix, common_suffix, find};

/// A common block found in both sequences.
///
/// `a[self.a]` and `b[self.b]` hold the same elements; everything before and
/// after them is diffed independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfMatch {
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl HalfMatch {
    /// Length of the shared block.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Look for a common block at least half as long as the longer sequence.
///
/// Only tried when the longer sequence has at least 4 elements and the
/// shorter one is at least half its length.
pub fn half_match<T: PartialEq>(a: &[T], b: &[T]) -> Option<HalfMatch> {
    let a_longer = a.len() > b.len();
    let (long, short) = if a_longer { (a, b) } else { (b, a) };

    if long.len() < 4 || short.len() * 2 < long.len() {
        return None;
    }

    // Seeds at the second and third quarter of the longer sequence.
    let first = half_match_at(long, short, (long.len() + 3) / 4);
    let second = half_match_at(long, short, (long.len() + 1) / 2);

    let (long_mid, short_mid) = match (first, second) {
        (None, None) => return None,
        (Some(hm), None) | (None, Some(hm)) => hm,
        (Some(first), Some(second)) => {
            if first.0.len() > second.0.len() {
                first
            } else {
                second
            }
        }
    };

    Some(if a_longer {
        HalfMatch {
            a: long_mid,
            b: short_mid,
        }
    } else {
        HalfMatch {
            a: short_mid,
            b: long_mid,
        }
    })
}

/// Grow every occurrence in `short` of the quarter-length seed at `long[i..]`
/// as far as it extends in both directions; keep the longest.
fn half_match_at<T: PartialEq>(
    long: &[T],
    short: &[T],
    i: usize,
) -> Option<(Range<usize>, Range<usize>)> {
    let seed = &long[i..i + long.len() / 4];
    let mut best: Option<(Range<usize>, Range<usize>)> = None;
    let mut best_len = 0;

    let mut next = find(short, seed, 0);
    while let Some(j) = next {
        let prefix = common_prefix(&long[i..], &short[j..]);
        let suffix = common_suffix(&long[..i], &short[..j]);
        if best_len < prefix + suffix {
            best_len = prefix + suffix;
            best = Some((i - suffix..i + prefix, j - suffix..j + prefix));
        }
        next = find(short, seed, j + 1);
    }

    if best_len * 2 < long.len() {
        return None;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(a: &str, b: &str) -> Option<(String, String, String, String, String)> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        half_match(&a, &b).map(|m| {
            let s = |v: &[char]| v.iter().collect::<String>();
            (
                s(&a[..m.a.start]),
                s(&a[m.a.end..]),
                s(&b[..m.b.start]),
                s(&b[m.b.end..]),
                s(&a[m.a.clone()]),
            )
        })
    }

    fn parts(p: [&str; 5]) -> Option<(String, String, String, String, String)> {
        Some((
            p[0].into(),
            p[1].into(),
            p[2].into(),
            p[3].into(),
            p[4].into(),
        ))
    }

    #[test]
    fn no_match() {
        assert_eq!(hm("1234567890", "abcdef"), None);
        assert_eq!(hm("12345", "23"), None);
    }

    #[test]
    fn single_match() {
        assert_eq!(
            hm("1234567890", "a345678z"),
            parts(["12", "90", "a", "z", "345678"])
        );
        assert_eq!(
            hm("a345678z", "1234567890"),
            parts(["a", "z", "12", "90", "345678"])
        );
        assert_eq!(
            hm("abc56789z", "1234567890"),
            parts(["abc", "z", "1234", "0", "56789"])
        );
        assert_eq!(
            hm("a23456xyz", "1234567890"),
            parts(["a", "xyz", "1", "7890", "23456"])
        );
    }

    #[test]
    fn multiple_matches() {
        assert_eq!(
            hm("121231234123451234123121", "a1234123451234z"),
            parts(["12123", "123121", "a", "z", "1234123451234"])
        );
        assert_eq!(
            hm("x-=-=-=-=-=-=-=-=-=-=-=-=", "xx-=-=-=-=-=-=-="),
            parts(["", "-=-=-=-=-=", "x", "", "x-=-=-=-=-=-=-="])
        );
        assert_eq!(
            hm("-=-=-=-=-=-=-=-=-=-=-=-=y", "-=-=-=-=-=-=-=yy"),
            parts(["-=-=-=-=-=", "", "", "y", "-=-=-=-=-=-=-=y"])
        );
    }

    #[test]
    fn non_optimal_split() {
        // The optimal diff would be -q+x=H-i+e=lloHe+Hu=llo-Hew+y
        assert_eq!(
            hm("qHilloHelloHew", "xHelloHeHulloy"),
            parts(["qHillo", "w", "x", "Hulloy", "HelloHe"])
        );
    }

    #[test]
    fn match_ranges_hold_equal_elements() {
        let a = b"1234567890";
        let b = b"a345678z";
        let m = half_match(a, b).unwrap();
        assert_eq!(&a[m.a.clone()], &b[m.b.clone()]);
        assert_eq!(m.len(), 6);
        assert!(!m.is_empty());
    }
}
