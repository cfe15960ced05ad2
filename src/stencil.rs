//! Row kernels of the 5-point Jacobi sweep, shared by every strategy.
//!
//! Each kernel works on one grid row and touches only the interior columns
//! `1..cols-1`; column 0 and the last column are never written.

use crate::grid::interior;

/// Writes the neighbour average of `row` into the interior of `out`.
///
/// The summation order is fixed (right, left, up, down) so that every
/// strategy produces bit-identical values.
#[inline]
pub fn relax_row(up: &[f64], row: &[f64], down: &[f64], out: &mut [f64]) {
    for i in interior(row.len()) {
        out[i] = 0.25 * (row[i + 1] + row[i - 1] + up[i] + down[i]);
    }
}

/// Largest `|next - current|` over the interior columns of one row.
#[inline]
pub fn max_change(next: &[f64], current: &[f64]) -> f64 {
    let mut err = 0.0;
    for i in interior(current.len()) {
        err = fold_max(err, (next[i] - current[i]).abs());
    }
    err
}

#[inline]
pub fn copy_interior(dst: &mut [f64], src: &[f64]) {
    let cols = interior(src.len());
    dst[cols.clone()].copy_from_slice(&src[cols]);
}

/// Max combine used by every reduction; keeps `acc` unless `value` is larger.
#[inline]
pub fn fold_max(acc: f64, value: f64) -> f64 {
    if acc < value {
        value
    } else {
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn relax_row_averages_four_neighbours() {
        let up = [0.0, 0.0, 0.0, 0.0];
        let row = [1.0, 0.0, 0.0, 0.0];
        let down = [0.0, 0.0, 0.0, 0.0];
        let mut out = [1.0, 9.0, 9.0, 9.0];

        relax_row(&up, &row, &down, &mut out);

        assert_relative_eq!(out[1], 0.25);
        assert_eq!(out[2], 0.0);
        // edges untouched
        assert_eq!(out[0], 1.0);
        assert_eq!(out[3], 9.0);
    }

    #[test]
    fn max_change_ignores_edges() {
        let current = [0.0, 0.5, 0.5, 0.0];
        let next = [10.0, 0.25, 0.75, -10.0];
        assert_relative_eq!(max_change(&next, &current), 0.25);
    }

    #[test]
    fn copy_interior_keeps_edge_columns() {
        let src = [7.0, 1.0, 2.0, 7.0];
        let mut dst = [0.0; 4];
        copy_interior(&mut dst, &src);
        assert_eq!(dst, [0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn short_rows_have_no_interior() {
        let mut out = [3.0, 4.0];
        relax_row(&[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0], &mut out);
        assert_eq!(out, [3.0, 4.0]);
        assert_eq!(max_change(&[5.0, 5.0], &[0.0, 0.0]), 0.0);
    }
}
