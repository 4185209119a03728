use crate::model::{EditOp, Entry};

/// Align two entry sequences into an order-preserving edit script.
///
/// Classic dynamic-programming LCS over fingerprint equality: cell `(i, j)`
/// holds the length of the longest common-by-hash subsequence of
/// `seq_a[0..i)` and `seq_b[0..j)`. Backtracking from `(n, m)` prefers an
/// `Unchanged` step when hashes match, otherwise `Added` when
/// `table[i][j-1] >= table[i-1][j]`, else `Removed`. O(n*m) time and space,
/// which is acceptable for per-file statement counts.
pub fn align(seq_a: Vec<Entry>, seq_b: Vec<Entry>) -> Vec<EditOp> {
    let n = seq_a.len();
    let m = seq_b.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if seq_a[i - 1].fingerprint == seq_b[j - 1].fingerprint {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut a_slots: Vec<Option<Entry>> = seq_a.into_iter().map(Some).collect();
    let mut b_slots: Vec<Option<Entry>> = seq_b.into_iter().map(Some).collect();

    let mut ops = Vec::with_capacity(n.max(m));
    let mut i = n;
    let mut j = m;

    while i > 0 || j > 0 {
        let hashes_match = i > 0
            && j > 0
            && match (a_slots[i - 1].as_ref(), b_slots[j - 1].as_ref()) {
                (Some(a), Some(b)) => a.fingerprint == b.fingerprint,
                _ => false,
            };

        if hashes_match {
            // Unchanged carries the sequence-A entry; B's twin is dropped.
            if let Some(entry) = a_slots[i - 1].take() {
                ops.push(EditOp::Unchanged(entry));
            }
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            if let Some(entry) = b_slots[j - 1].take() {
                ops.push(EditOp::Added(entry));
            }
            j -= 1;
        } else {
            if let Some(entry) = a_slots[i - 1].take() {
                ops.push(EditOp::Removed(entry));
            }
            i -= 1;
        }
    }

    ops.reverse();
    ops
}
