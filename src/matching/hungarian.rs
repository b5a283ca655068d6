//! Minimum-Cost Assignment (Kuhn–Munkres)
//!
//! Exact O(n³) Hungarian algorithm in the potentials-and-augmenting-paths
//! formulation. Operates on a square cost matrix and returns, for each row,
//! the column it is assigned to. Deterministic: ties resolve to the lowest
//! column index reachable first.

/// Solve the assignment problem for a square cost matrix.
///
/// `cost[i][j]` is the cost of assigning row `i` to column `j`. Every row
/// receives exactly one distinct column; the total cost is minimal.
pub fn solve(cost: &[Vec<f64>]) -> Vec<usize> {
    let n = cost.len();
    if n == 0 {
        return Vec::new();
    }
    debug_assert!(cost.iter().all(|row| row.len() == n), "matrix must be square");

    // 1-indexed internals; column 0 is the virtual source.
    let mut row_potential = vec![0.0f64; n + 1];
    let mut col_potential = vec![0.0f64; n + 1];
    let mut assigned_row = vec![0usize; n + 1]; // column → row
    let mut predecessor = vec![0usize; n + 1];

    for row in 1..=n {
        assigned_row[0] = row;
        let mut current_col = 0usize;
        let mut min_reduced = vec![f64::INFINITY; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[current_col] = true;
            let active_row = assigned_row[current_col];
            let mut delta = f64::INFINITY;
            let mut next_col = 0usize;

            for col in 1..=n {
                if visited[col] {
                    continue;
                }
                let reduced = cost[active_row - 1][col - 1]
                    - row_potential[active_row]
                    - col_potential[col];
                if reduced < min_reduced[col] {
                    min_reduced[col] = reduced;
                    predecessor[col] = current_col;
                }
                if min_reduced[col] < delta {
                    delta = min_reduced[col];
                    next_col = col;
                }
            }

            for col in 0..=n {
                if visited[col] {
                    row_potential[assigned_row[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_reduced[col] -= delta;
                }
            }

            current_col = next_col;
            if assigned_row[current_col] == 0 {
                break;
            }
        }

        // Augment along the alternating path back to the source.
        while current_col != 0 {
            let prev_col = predecessor[current_col];
            assigned_row[current_col] = assigned_row[prev_col];
            current_col = prev_col;
        }
    }

    let mut assignment = vec![0usize; n];
    for col in 1..=n {
        assignment[assigned_row[col] - 1] = col - 1;
    }
    assignment
}
