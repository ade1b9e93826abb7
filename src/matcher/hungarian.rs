//! Exact minimum-cost rectangular assignment.
//!
//! Shortest-augmenting-path implementation with dual potentials. Rows
//! are inserted one at a time; each insertion grows the matching by
//! exactly one augmenting path of minimum reduced cost, so the final
//! matching is optimal over the whole matrix, not a greedy per-row
//! choice.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Jonker & Volgenant (1987), "A Shortest Augmenting Path Algorithm
//!   for Dense and Sparse Linear Assignment Problems"

/// Solves the minimum-cost one-to-one assignment over a rectangular
/// cost matrix with `rows <= cols`.
///
/// Returns, for each row in order, the column assigned to it. Columns
/// left unmatched cost nothing; ties among equally optimal assignments
/// resolve by column input order.
pub fn solve(costs: &[Vec<i64>]) -> Vec<usize> {
    let rows = costs.len();
    if rows == 0 {
        return Vec::new();
    }
    let cols = costs[0].len();
    debug_assert!(
        rows <= cols,
        "assignment matrix needs at least as many columns as rows"
    );
    debug_assert!(costs.iter().all(|row| row.len() == cols));

    // Never enters arithmetic: every real entry replaces it before the
    // first delta is computed.
    let unreached = i64::MAX / 4;

    // 1-indexed internally; index 0 is the virtual free column/row.
    // `row_of[j]` is the row currently matched to column j (0 = free).
    let mut u = vec![0i64; rows + 1];
    let mut v = vec![0i64; cols + 1];
    let mut row_of = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for i in 1..=rows {
        row_of[0] = i;
        let mut j0 = 0;
        let mut minv = vec![unreached; cols + 1];
        let mut used = vec![false; cols + 1];

        // Dijkstra over reduced costs until a free column is reached.
        loop {
            used[j0] = true;
            let i0 = row_of[j0];
            let mut delta = unreached;
            let mut j1 = 0;

            for j in 1..=cols {
                if used[j] {
                    continue;
                }
                let reduced = costs[i0 - 1][j - 1] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=cols {
                if used[j] {
                    u[row_of[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if row_of[j0] == 0 {
                break;
            }
        }

        // Flip the matching along the augmenting path.
        while j0 != 0 {
            let j1 = way[j0];
            row_of[j0] = row_of[j1];
            j0 = j1;
        }
    }

    let mut assignment = vec![0usize; rows];
    for j in 1..=cols {
        if row_of[j] != 0 {
            assignment[row_of[j] - 1] = j - 1;
        }
    }
    assignment
}

/// Total cost of an assignment under the given matrix.
pub fn assignment_cost(costs: &[Vec<i64>], assignment: &[usize]) -> i64 {
    assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| costs[row][col])
        .sum()
}
