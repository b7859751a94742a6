//! Direct solvers for dense linear systems
//!
//! This module provides the direct (non-iterative) solver:
//! - [`LuFactorization`]: LU decomposition with scaled partial pivoting

mod lu;

pub use lu::{lu_solve, LuError, LuFactorization};
