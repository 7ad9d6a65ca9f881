//! Linear-space Myers difference algorithm.
//!
//! Finds a shortest edit script between two sequences by bisecting on the
//! "middle snake" and recursing on both halves, so memory stays O(N + M)
//! while time is O((N + M) * D) for edit distance D.
//!
//! The output is a pair of change markers, one flag per element on each
//! side. Unmarked elements form the longest common subsequence and line up
//! pairwise in order.

/// Per-element change flags for both sides of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Changes {
    /// `old[i]` is `true` when element `i` of the old sequence was removed.
    pub old: Vec<bool>,
    /// `new[j]` is `true` when element `j` of the new sequence was inserted.
    pub new: Vec<bool>,
}

#[cfg(test)]
impl Changes {
    pub fn removed(&self) -> usize {
        self.old.iter().filter(|&&c| c).count()
    }

    pub fn inserted(&self) -> usize {
        self.new.iter().filter(|&&c| c).count()
    }
}

/// Compute a minimal set of removals and insertions turning `old` into `new`.
pub(crate) fn diff_sequences<T: Eq>(old: &[T], new: &[T]) -> Changes {
    let mut changes = Changes {
        old: vec![false; old.len()],
        new: vec![false; new.len()],
    };
    compare(old, new, 0, 0, &mut changes);
    changes
}

/// Mark the differences between `a` and `b`, whose first elements sit at
/// `a_off` / `b_off` in the full sequences.
fn compare<T: Eq>(a: &[T], b: &[T], a_off: usize, b_off: usize, changes: &mut Changes) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let (a_off, b_off) = (a_off + prefix, b_off + prefix);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() {
        mark(&mut changes.new, b_off, b.len());
        return;
    }
    if b.is_empty() {
        mark(&mut changes.old, a_off, a.len());
        return;
    }

    match middle_snake(a, b) {
        Some((x, y)) => {
            compare(&a[..x], &b[..y], a_off, b_off, changes);
            compare(&a[x..], &b[y..], a_off + x, b_off + y, changes);
        }
        None => {
            mark(&mut changes.old, a_off, a.len());
            mark(&mut changes.new, b_off, b.len());
        }
    }
}

fn mark(flags: &mut [bool], start: usize, len: usize) {
    flags[start..start + len].iter_mut().for_each(|f| *f = true);
}

/// Find a split point on some shortest edit path from `(0, 0)` to
/// `(a.len(), b.len())`.
///
/// Runs the forward and reverse greedy searches in lock-step until their
/// furthest-reaching paths overlap. Returns `None` when the sequences share
/// nothing, in which case the whole of `a` is removed and the whole of `b`
/// inserted.
///
/// Callers must have trimmed any common prefix and suffix and guarantee both
/// slices are non-empty.
fn middle_snake<T: Eq>(a: &[T], b: &[T]) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d + 1;
    let width = (2 * offset + 1) as usize;

    // Furthest x reached on each diagonal; -1 means not yet reached.
    let mut forward = vec![-1isize; width];
    let mut reverse = vec![-1isize; width];
    forward[(offset + 1) as usize] = 0;
    reverse[(offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the paths can only meet while extending the forward
    // path; with an even delta, while extending the reverse path.
    let check_forward = delta % 2 != 0;

    // Diagonals that ran off the edge of the grid are pruned from later
    // rounds.
    let (mut fwd_start, mut fwd_end) = (0isize, 0isize);
    let (mut rev_start, mut rev_end) = (0isize, 0isize);

    for d in 0..max_d {
        let mut k = -d + fwd_start;
        while k <= d - fwd_end {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && forward[idx - 1] < forward[idx + 1]) {
                forward[idx + 1]
            } else {
                forward[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            forward[idx] = x;

            if x > n {
                fwd_end += 2;
            } else if y > m {
                fwd_start += 2;
            } else if check_forward {
                let rev_idx = offset + delta - k;
                if rev_idx >= 0 && (rev_idx as usize) < width && reverse[rev_idx as usize] != -1 {
                    let rev_x = n - reverse[rev_idx as usize];
                    if x >= rev_x {
                        return split(x, y, n, m);
                    }
                }
            }
            k += 2;
        }

        let mut k = -d + rev_start;
        while k <= d - rev_end {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && reverse[idx - 1] < reverse[idx + 1]) {
                reverse[idx + 1]
            } else {
                reverse[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[(n - x - 1) as usize] == b[(m - y - 1) as usize] {
                x += 1;
                y += 1;
            }
            reverse[idx] = x;

            if x > n {
                rev_end += 2;
            } else if y > m {
                rev_start += 2;
            } else if !check_forward {
                let fwd_idx = offset + delta - k;
                if fwd_idx >= 0 && (fwd_idx as usize) < width && forward[fwd_idx as usize] != -1 {
                    let fwd_x = forward[fwd_idx as usize];
                    let fwd_y = offset + fwd_x - fwd_idx;
                    if fwd_x >= n - x {
                        return split(fwd_x, fwd_y, n, m);
                    }
                }
            }
            k += 2;
        }
    }

    None
}

/// Accept a split point only if it divides the problem into two strictly
/// smaller ones.
fn split(x: isize, y: isize, n: isize, m: isize) -> Option<(usize, usize)> {
    let at_start = x == 0 && y == 0;
    let at_end = x == n && y == m;
    if at_start || at_end || x < 0 || y < 0 || x > n || y > m {
        None
    } else {
        Some((x as usize, y as usize))
    }
}
