//! Helpers for dense row-major matrices
//!
//! The dense containers themselves are `ndarray`'s owned arrays
//! (`Array1<f64>`, `Array2<f64>`): row-major contiguous storage, O(1)
//! indexed access, deep copies via `Clone`. This module adds the two
//! whole-row operations the factorizer needs that are not single `ndarray`
//! methods.

use ndarray::Array2;

/// Swap two full rows of a matrix in place.
pub fn swap_rows(m: &mut Array2<f64>, i: usize, j: usize) {
    if i == j {
        return;
    }
    for col in 0..m.ncols() {
        m.swap((i, col), (j, col));
    }
}

/// Largest absolute value in row `i`.
///
/// Returns 0.0 for an all-zero row; the factorizer treats that as a
/// structurally singular input.
pub fn max_abs_in_row(m: &Array2<f64>, i: usize) -> f64 {
    m.row(i).iter().fold(0.0_f64, |big, v| big.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_swap_rows() {
        let mut m = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        swap_rows(&mut m, 0, 2);
        assert_eq!(m, array![[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]]);

        // Self-swap is a no-op
        swap_rows(&mut m, 1, 1);
        assert_eq!(m.row(1).to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_max_abs_in_row() {
        let m = array![[1.0, -7.0, 3.0], [0.0, 0.0, 0.0]];
        assert_relative_eq!(max_abs_in_row(&m, 0), 7.0);
        assert_relative_eq!(max_abs_in_row(&m, 1), 0.0);
    }
}
