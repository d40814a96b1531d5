//! Step computation (§4.5): residuals, centering schedule, diagonal scaling,
//! reduced-gradient/Hessian assembly, and the two linear solves that produce
//! the primal/dual search direction. Grounded in the teacher's
//! `nlp/ipm/augmented_system.rs` (`AugmentedSystem::solve`, the Schur
//! complement assembly), generalized from the sparse equality-constrained
//! augmented system to the dense inequality-only reduced system this spec
//! requires.

use faer::{Col, Mat};

use crate::E;
use crate::centering::{self, Centering};
use crate::config::SolverConfig;
use crate::error::NumericalError;
use crate::linalg::facade::{jt_diag_j, jt_vec, solve_symmetric};
use crate::linalg::vector_ops::cwise_inverse;

/// Primal/dual search direction for one iteration.
pub(crate) struct Step {
    pub p_x: Col<E>,
    pub p_z: Col<E>,
    pub centering: Centering,
    pub r_x_norm: E,
    pub r_c_norm: E,
}

/// Evaluates residuals, the centering schedule, and the reduced Newton
/// system, then solves for `(p_x, p_z)`.
///
/// `b` is the current Hessian source: `grad^2 f(x)` in NEWTON mode, the
/// running BFGS approximation in BFGS mode, or the identity in STEEPEST mode
/// (see [`crate::solver::DescentMode`], which picks `b` once per iteration).
#[allow(clippy::too_many_arguments)]
pub(crate) fn compute_step(
    g: &Col<E>,
    c: &Col<E>,
    z: &Col<E>,
    jac: &Mat<E>,
    w: &Mat<E>,
    b: &Mat<E>,
    config: &SolverConfig,
) -> Result<Step, NumericalError> {
    let n = g.nrows();
    let m = c.nrows();
    let eps = config.eps();

    // Step 1: residuals.
    let jt_z = jt_vec(jac, z);
    let r_x = Col::<E>::from_fn(n, |i| g[i] + jt_z[i]);
    let r_c = Col::<E>::from_fn(m, |i| c[i] * z[i]);

    let r_x_norm = r_x.norm_l2();
    let r_c_norm = r_c.norm_l2();

    // Step 2: centering schedule.
    let cent = centering::compute(&r_x, &r_c, c, z, config);
    let mu = cent.mu;

    // Step 3: diagonal scaling, c_eps = c - eps, S = diag(z / c_eps).
    let c_eps = Col::<E>::from_fn(m, |i| c[i] - eps);
    let s_diag = Col::<E>::from_fn(m, |i| z[i] / c_eps[i]);

    // Step 4: reduced gradient g_b = g - mu * J^T (1 / c_eps).
    let c_eps_inv = cwise_inverse(c_eps.as_ref());
    let jt_c_eps_inv = jt_vec(jac, &c_eps_inv);
    let g_b = Col::<E>::from_fn(n, |i| g[i] - mu * jt_c_eps_inv[i]);

    // Step 5: reduced Hessian H_r = B + W - J^T S J. Solve H_r p_x = -g_b.
    let jt_s_j = jt_diag_j(jac, &s_diag);
    let h_r = Mat::<E>::from_fn(n, n, |i, j| b[(i, j)] + w[(i, j)] - jt_s_j[(i, j)]);
    let neg_g_b = Col::<E>::from_fn(n, |i| -g_b[i]);
    let p_x = solve_symmetric(&h_r, &neg_g_b)?;

    // Step 6: dual direction p_z = -( z + mu (1/c_eps) + S J p_x ).
    let j_p_x = jac * &p_x;
    let p_z = Col::<E>::from_fn(m, |i| -(z[i] + mu * c_eps_inv[i] + s_diag[i] * j_p_x[i]));

    Ok(Step {
        p_x,
        p_z,
        centering: cent,
        r_x_norm,
        r_c_norm,
    })
}
