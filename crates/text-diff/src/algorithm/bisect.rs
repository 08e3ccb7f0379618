//! Myers middle-snake bisection.
//!
//! Implements the linear-space refinement from Eugene Myers'
//! "An O(ND) Difference Algorithm and Its Variations" (1986): forward and
//! reverse searches advance one edit at a time until their furthest-reaching
//! paths overlap. The overlap lies on a shortest edit script, so the caller
//! can split the problem there.

use log::debug;

use crate::Deadline;

/// Find the middle snake of `a` and `b`.
///
/// Returns the split point `(x, y)`: diffing `a[..x]`/`b[..y]` and
/// `a[x..]`/`b[y..]` separately yields a shortest edit script. Returns `None`
/// when the deadline fires or the sequences have nothing in common, in which
/// case the caller reports a whole delete/insert pair.
///
/// The deadline is checked every 16 edit distances.
pub fn bisect<T: PartialEq>(a: &[T], b: &[T], deadline: &Deadline) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let v_offset = max_d;
    let v_len = 2 * max_d;
    if max_d < 2 {
        // At most one element on each side.
        return (n == 1 && m == 1 && a[0] == b[0]).then_some((1, 1));
    }

    // Furthest x reached on each diagonal; -1 marks unvisited.
    let mut v1 = vec![-1isize; v_len as usize];
    let mut v2 = vec![-1isize; v_len as usize];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the forward path collides with the reverse path.
    let front = delta % 2 != 0;

    // Trim the k range once a path runs off the edge of the grid.
    let mut k1_start = 0;
    let mut k1_end = 0;
    let mut k2_start = 0;
    let mut k2_end = 0;

    for d in 0..max_d {
        if d % 16 == 0 && deadline.is_expired() {
            debug!("bisect deadline expired at d={} for {}x{}", d, n, m);
            return None;
        }

        // Forward path.
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;

            if x1 > n {
                // Off the right edge.
                k1_end += 2;
            } else if y1 > m {
                // Off the bottom edge.
                k1_start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if k2_offset >= 0 && k2_offset < v_len && v2[k2_offset as usize] != -1 {
                    // Mirror x2 onto the forward coordinate system.
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        // Reverse path.
        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;

            if x2 > n {
                // Off the left edge.
                k2_end += 2;
            } else if y2 > m {
                // Off the top edge.
                k2_start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if k1_offset >= 0 && k1_offset < v_len && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = v_offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    // Every element differs: the edit distance is n + m.
    None
}
