use crate::track::Centroid;
use nalgebra as na;
use ndarray::prelude::*;

/// Euclidean distance between two pixel positions
#[inline]
pub fn distance(a: &Centroid, b: &Centroid) -> f64 {
    let a = na::Point2::new(a.x as f64, a.y as f64);
    let b = na::Point2::new(b.x as f64, b.y as f64);

    na::distance(&a, &b)
}

/// Pairwise distances, one row per `rows` entry and one column per `cols` entry.
pub fn distance_matrix(rows: &[Centroid], cols: &[Centroid]) -> Array2<f64> {
    Array2::from_shape_fn((rows.len(), cols.len()), |(r, c)| {
        distance(&rows[r], &cols[c])
    })
}

/// Index and value of the first minimum of a row. `None` for an empty row.
pub fn argmin(row: ArrayView1<'_, f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &value) in row.iter().enumerate() {
        match best {
            Some((_, min)) if value >= min => {}
            _ => best = Some((idx, value)),
        }
    }

    best
}

/// Greedy row-ordered assignment over a cost matrix.
///
/// Every row gets its own best column (first minimum on ties). Rows are then
/// visited by that best value, ascending, with ties kept in row order. A row
/// takes its best column unless an earlier row already took it, in which case
/// the row stays unassigned: there is no fallback to the next best column and
/// no backtracking, so the result is not an optimal matching.
///
/// Returns `(row, column, cost)` in visiting order.
pub fn greedy_assignment(cost: &Array2<f64>) -> Vec<(usize, usize, f64)> {
    if cost.ncols() == 0 {
        return Vec::new();
    }

    let mut best: Vec<(usize, usize, f64)> = cost
        .outer_iter()
        .enumerate()
        .filter_map(|(r, row)| argmin(row).map(|(c, v)| (r, c, v)))
        .collect();

    // `sort_by` is stable, equal minimums keep their row order
    best.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut used = vec![false; cost.ncols()];
    let mut assignments = Vec::with_capacity(best.len().min(cost.ncols()));

    for (r, c, v) in best {
        if used[c] {
            log::debug!("row {} skipped: column {} already taken", r, c);
            continue;
        }

        used[c] = true;
        assignments.push((r, c, v));
    }

    assignments
}
