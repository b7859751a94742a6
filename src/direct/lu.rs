//! LU decomposition solver
//!
//! Factors a square matrix once into `P·A = L·U` (Crout's method with
//! scaled partial pivoting), then reuses the stored factors for repeated
//! solves, determinant, inverse, and iterative refinement.

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::dense::{max_abs_in_row, swap_rows};

/// Substituted for an exactly-zero pivot so elimination can continue on
/// numerically singular (but not structurally singular) matrices.
const TINY: f64 = 1.0e-40;

/// Errors that can occur during LU factorization and solves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LuError {
    /// A row of the input has no nonzero entry, so no pivot scale exists.
    #[error("matrix is singular: row {row} has no nonzero entry")]
    SingularMatrix { row: usize },
    /// Right-hand-side size does not match the factorization dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    /// Factorization input is not a square matrix.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
}

/// LU factorization of a square matrix with scaled partial pivoting
///
/// Construction does all the O(n³) work; every other operation reads the
/// stored factors. `solve`, `det`, `inverse`, and `improve` have no
/// side effects on the factorization, so a `LuFactorization` can be shared
/// across threads for concurrent read-only use.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Matrix dimension (n x n)
    n: usize,
    /// Packed factors: U on and above the diagonal, L's multipliers below
    /// (L's unit diagonal is implicit)
    lu: Array2<f64>,
    /// Pivot record: at elimination step k, row `index[k]` was swapped into
    /// position k. A swap sequence, not a permutation mapping; solves
    /// replay it in order.
    index: Vec<usize>,
    /// +1.0 or -1.0: parity of the row swaps, for the determinant sign
    parity: f64,
    /// Copy of the unfactored input, kept for iterative refinement
    a: Array2<f64>,
}

impl LuFactorization {
    /// Factor `a`, consuming O(n³) time and leaving `a` untouched.
    ///
    /// Fails with [`LuError::SingularMatrix`] if any row of `a` is entirely
    /// zero. An exactly-zero pivot that appears *during* elimination is not
    /// an error: it is replaced by a tiny constant and elimination
    /// continues, so rank-deficient inputs without a zero row factor
    /// "successfully" with an extremely small determinant.
    ///
    /// ```
    /// # use dense_lu::LuFactorization;
    /// # use ndarray::array;
    /// let a = array![[2.0, 1.0], [1.0, 3.0]];
    /// let lu = LuFactorization::new(&a)?;
    /// assert!((lu.det() - 5.0).abs() < 1e-12);
    /// # Ok::<(), dense_lu::LuError>(())
    /// ```
    pub fn new(a: &Array2<f64>) -> Result<Self, LuError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(LuError::NotSquare {
                rows: n,
                cols: a.ncols(),
            });
        }

        let mut lu = a.clone();
        let mut index = vec![0_usize; n];
        let mut parity = 1.0;

        // Implicit scaling: each row's pivot candidates are weighed
        // relative to that row's largest entry.
        let mut scale = vec![0.0_f64; n];
        for (i, s) in scale.iter_mut().enumerate() {
            let big = max_abs_in_row(&lu, i);
            if big == 0.0 {
                return Err(LuError::SingularMatrix { row: i });
            }
            *s = 1.0 / big;
        }

        for k in 0..n {
            // Select the pivot row: largest scaled magnitude in column k.
            // Strict `>` keeps the lowest row index on ties.
            let mut big = 0.0;
            let mut imax = k;
            for i in k..n {
                let temp = scale[i] * lu[[i, k]].abs();
                if temp > big {
                    big = temp;
                    imax = i;
                }
            }

            if imax != k {
                swap_rows(&mut lu, imax, k);
                parity = -parity;
                scale[imax] = scale[k];
            }
            index[k] = imax;

            if lu[[k, k]] == 0.0 {
                lu[[k, k]] = TINY;
            }

            // Eliminate below the pivot; multipliers stay in place as L.
            let piv = lu[[k, k]];
            for i in (k + 1)..n {
                let mult = lu[[i, k]] / piv;
                lu[[i, k]] = mult;
                for j in (k + 1)..n {
                    let ukj = lu[[k, j]];
                    lu[[i, j]] -= mult * ukj;
                }
            }
        }

        Ok(Self {
            n,
            lu,
            index,
            parity,
            a: a.clone(),
        })
    }

    /// Solve `Ax = b` for a single right-hand side using the stored factors.
    ///
    /// O(n²). The factorization is not modified and remains reusable, even
    /// after a dimension-mismatch failure.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, LuError> {
        let n = self.n;
        if b.len() != n {
            return Err(LuError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        let mut x = b.clone();

        // Forward substitution: Ly = Pb. The permutation is undone by
        // replaying the recorded swaps; `ii` skips the leading zeros of b
        // (it marks the first nonzero entry seen, 1-based).
        let mut ii = 0_usize;
        for i in 0..n {
            let ip = self.index[i];
            let mut sum = x[ip];
            x[ip] = x[i];
            if ii != 0 {
                for j in (ii - 1)..i {
                    sum -= self.lu[[i, j]] * x[j];
                }
            } else if sum != 0.0 {
                ii = i + 1;
            }
            x[i] = sum;
        }

        // Back substitution: Ux = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum / self.lu[[i, i]];
        }

        Ok(x)
    }

    /// Solve `AX = B` for a multi-column right-hand side.
    ///
    /// Each column is solved independently through [`solve`](Self::solve);
    /// there is no numerical coupling between columns. The result has the
    /// same column count as `b`.
    pub fn solve_matrix(&self, b: &Array2<f64>) -> Result<Array2<f64>, LuError> {
        let n = self.n;
        if b.nrows() != n {
            return Err(LuError::DimensionMismatch {
                expected: n,
                got: b.nrows(),
            });
        }

        let m = b.ncols();
        let mut x = Array2::zeros((n, m));
        for j in 0..m {
            let col = b.column(j).to_owned();
            let xj = self.solve(&col)?;
            x.column_mut(j).assign(&xj);
        }
        Ok(x)
    }

    /// Compute the inverse by solving `AX = I` column by column.
    ///
    /// A numerically near-singular matrix produces a poor-quality inverse
    /// without an error; check [`det`](Self::det) first if that matters.
    pub fn inverse(&self) -> Result<Array2<f64>, LuError> {
        self.solve_matrix(&Array2::eye(self.n))
    }

    /// Determinant of the original matrix: swap parity times the product
    /// of U's diagonal. O(n).
    pub fn det(&self) -> f64 {
        self.lu.diag().iter().fold(self.parity, |d, &v| d * v)
    }

    /// One step of iterative refinement on an approximate solution `x`.
    ///
    /// Recomputes the residual `r = A·x − b` against the stored original
    /// matrix, solves the factorization for the correction, and subtracts
    /// it from `x` in place.
    pub fn improve(&self, b: &Array1<f64>, x: &mut Array1<f64>) -> Result<(), LuError> {
        let n = self.n;
        if b.len() != n || x.len() != n {
            return Err(LuError::DimensionMismatch {
                expected: n,
                got: if b.len() != n { b.len() } else { x.len() },
            });
        }

        let r = self.a.dot(x) - b;
        let correction = self.solve(&r)?;
        *x -= &correction;
        Ok(())
    }

    /// Matrix dimension n.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// The packed factors: U on and above the diagonal, L's strictly-lower
    /// multipliers below.
    pub fn packed(&self) -> &Array2<f64> {
        &self.lu
    }

    /// The raw pivot record (a swap sequence, applied in order).
    pub fn pivots(&self) -> &[usize] {
        &self.index
    }

    /// Row-swap parity, +1.0 or -1.0.
    pub fn parity(&self) -> f64 {
        self.parity
    }

    /// Unpack the lower triangular factor `L` (unit diagonal made explicit).
    pub fn l(&self) -> Array2<f64> {
        let n = self.n;
        let mut l = Array2::zeros((n, n));
        for i in 0..n {
            l[[i, i]] = 1.0;
            for j in 0..i {
                l[[i, j]] = self.lu[[i, j]];
            }
        }
        l
    }

    /// Unpack the upper triangular factor `U`.
    pub fn u(&self) -> Array2<f64> {
        let n = self.n;
        let mut u = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                u[[i, j]] = self.lu[[i, j]];
            }
        }
        u
    }

    /// Reconstruct the permutation matrix `P` such that `P·A = L·U`.
    ///
    /// The stored pivot record is a swap sequence; replaying it against the
    /// identity row order yields the full permutation.
    pub fn p(&self) -> Array2<f64> {
        let n = self.n;
        let mut order: Vec<usize> = (0..n).collect();
        for k in 0..n {
            order.swap(k, self.index[k]);
        }
        let mut p = Array2::zeros((n, n));
        for (i, &src) in order.iter().enumerate() {
            p[[i, src]] = 1.0;
        }
        p
    }
}

/// Solve `Ax = b` in one call: factorize, then solve.
///
/// Convenience wrapper for callers who only need a single solve; reuse a
/// [`LuFactorization`] directly when solving against the same matrix more
/// than once.
pub fn lu_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, LuError> {
    LuFactorization::new(a)?.solve(b)
}
