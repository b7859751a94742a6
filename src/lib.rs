//! Dense linear solvers built on LU decomposition
//!
//! This crate solves dense systems `Ax = b` with a reusable factorization:
//! factor once (O(n³)), then solve any number of right-hand sides (O(n²)
//! each) and read off determinant and inverse from the same factors.
//!
//! # Features
//!
//! - **LU decomposition**: Crout's method with scaled partial pivoting
//! - **Solve**: single vectors or multi-column right-hand sides
//! - **Derived queries**: determinant, inverse, one-step iterative refinement
//! - **Dense storage**: row-major `ndarray` arrays, `f64` throughout
//!
//! # Example
//!
//! ```
//! use dense_lu::LuFactorization;
//! use ndarray::array;
//!
//! let a = array![[2.0, 1.0], [1.0, 3.0]];
//! let b = array![3.0, 5.0];
//!
//! let lu = LuFactorization::new(&a)?;
//! let x = lu.solve(&b)?;
//! assert!((x[0] - 0.8).abs() < 1e-12);
//! assert!((x[1] - 1.4).abs() < 1e-12);
//! assert!((lu.det() - 5.0).abs() < 1e-12);
//! # Ok::<(), dense_lu::LuError>(())
//! ```

pub mod dense;
pub mod direct;

// Re-export main types
pub use direct::{lu_solve, LuError, LuFactorization};
