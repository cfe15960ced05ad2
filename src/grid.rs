pub const N: usize = 4096; // rows
pub const M: usize = 4096; // columns
pub const BOUNDARY_VALUE: f64 = 1.0; // fixed value of column 0

/// Row-major grid of `rows x cols` doubles.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Zero grid with the left edge held at `BOUNDARY_VALUE`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Grid::zeros(rows, cols);
        if cols > 0 {
            for row in grid.data.chunks_mut(cols) {
                row[0] = BOUNDARY_VALUE;
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, j: usize, i: usize) -> f64 {
        self.data[j * self.cols + i]
    }

    pub fn row(&self, j: usize) -> &[f64] {
        &self.data[j * self.cols..(j + 1) * self.cols]
    }

    pub fn row_mut(&mut self, j: usize) -> &mut [f64] {
        &mut self.data[j * self.cols..(j + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// Interior index range along an axis of length `n`.
///
/// Never inverted, so it can be used to slice a grid even when `n < 3`.
pub fn interior(n: usize) -> std::ops::Range<usize> {
    1..n.saturating_sub(1).max(1)
}

pub fn is_interior(j: usize, n: usize) -> bool {
    j >= 1 && j + 1 < n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_holds_left_boundary() {
        let grid = Grid::new(5, 3);
        for j in 0..5 {
            assert_eq!(grid.get(j, 0), BOUNDARY_VALUE);
            assert_eq!(grid.get(j, 1), 0.0);
            assert_eq!(grid.get(j, 2), 0.0);
        }
    }

    #[test]
    fn interior_range_is_never_inverted() {
        assert_eq!(interior(4), 1..3);
        assert_eq!(interior(2), 1..1);
        assert_eq!(interior(1), 1..1);
        assert!(!is_interior(0, 4));
        assert!(is_interior(2, 4));
        assert!(!is_interior(3, 4));
    }
}
