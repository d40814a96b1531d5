//! Dense linear-algebra façade consumed by the step computer.
//!
//! This module owns nothing the core cares about mathematically: it is a
//! thin adapter over [`faer`]'s dense decompositions, mirroring the shape of
//! the teacher crate's `linalg::solver::Solver` trait (there built around
//! `faer`'s *sparse* Cholesky/LU) but over `faer::Mat` instead, since the
//! reduced Newton system here is always small and dense.
//!
//! `solve_symmetric` tries a Cholesky factorization first (the fast path
//! whenever the reduced Hessian happens to be positive definite, which is
//! common once the iterates near the solution) and falls back to `faer`'s
//! Bunch-Kaufman-style `lblt` decomposition — the dense analogue of an
//! "LDLT-style" indefinite factorization — when Cholesky fails. A solution
//! containing a non-finite entry is reported as [`NumericalError::SolveNonFinite`];
//! an `lblt` factorization that still cannot produce a finite solution is
//! reported as [`NumericalError::FactorizationIndefinite`].

use faer::{Col, Mat, Side};

use crate::E;
use crate::error::NumericalError;

/// Solves `mat * x = rhs` for a symmetric (possibly indefinite) dense matrix.
///
/// The two failure modes of §4.2 are distinguished by whether a factorization
/// was actually produced: a non-finite solution after `lblt`'s fallback
/// factorization (used precisely because Cholesky rejected the matrix as not
/// positive definite) is `FactorizationIndefinite`; a non-finite solution
/// from the Cholesky fast path — a factorization `lblt` was never even asked
/// for — is `SolveNonFinite`.
pub(crate) fn solve_symmetric(mat: &Mat<E>, rhs: &Col<E>) -> Result<Col<E>, NumericalError> {
    let n = rhs.nrows();
    debug_assert_eq!(mat.nrows(), n);
    debug_assert_eq!(mat.ncols(), n);

    let rhs_mat = Mat::<E>::from_fn(n, 1, |i, _| rhs[i]);

    let (x, used_indefinite_fallback) = match mat.cholesky(Side::Lower) {
        Ok(llt) => (llt.solve(&rhs_mat), false),
        Err(_) => {
            let lblt = mat.lblt(Side::Lower);
            (lblt.solve(&rhs_mat), true)
        }
    };

    let sol = Col::<E>::from_fn(n, |i| x[(i, 0)]);
    if sol.iter().all(|v| v.is_finite()) {
        Ok(sol)
    } else if used_indefinite_fallback {
        Err(NumericalError::FactorizationIndefinite)
    } else {
        Err(NumericalError::SolveNonFinite)
    }
}

/// Dense Jacobian-weighted quadratic form `J^T diag(s) J`, the Schur
/// complement term `J^T S J` of §4.5.
pub(crate) fn jt_diag_j(j: &Mat<E>, s: &Col<E>) -> Mat<E> {
    let m = j.nrows();
    let n = j.ncols();
    debug_assert_eq!(s.nrows(), m);

    let scaled_j = Mat::<E>::from_fn(m, n, |i, k| j[(i, k)] * s[i]);
    j.transpose() * &scaled_j
}

/// `J^T v` for a dense Jacobian `J` (m x n) and dual-space vector `v` (length m).
pub(crate) fn jt_vec(j: &Mat<E>, v: &Col<E>) -> Col<E> {
    j.transpose() * v
}
