//! The log-barrier merit function of §4.4, evaluated by the line search.
//!
//! ```text
//! psi(x, z; mu)  = f(x) - c(x)^T z - mu * sum_i log(c_i(x)^2 * z_i + eps)
//! Dpsi           = p_x^T [ g - J^T z - 2 mu J^T (1 / (c - eps)) ]
//!                  - p_z^T [ c + mu (1 / (z + eps)) ]
//! ```
//!
//! The `c^2` term is unusual and asymmetric with respect to the sign of `c`
//! (§9, open question): it is kept verbatim. The interior-feasibility filter
//! applied by the line search (`c <= 0` componentwise) is what actually
//! enforces feasibility; `psi` itself cannot tell a feasible point from its
//! mirror image across `c = 0`.

use faer::{Col, Mat};

use crate::E;
use crate::linalg::facade::jt_vec;

/// `psi(x, z; mu)` from `f`, `c`, and `z` directly (the caller has already
/// evaluated `f(x)` and `c(x)`).
pub(crate) fn psi(f: E, c: &Col<E>, z: &Col<E>, mu: E, eps: E) -> E {
    let barrier: E = c
        .iter()
        .zip(z.iter())
        .map(|(&ci, &zi)| (ci * ci * zi + eps).ln())
        .sum();

    let coupling: E = c.iter().zip(z.iter()).map(|(&ci, &zi)| ci * zi).sum();

    f - coupling - mu * barrier
}

/// Directional derivative of `psi` along `(p_x, p_z)`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn dpsi(
    g: &Col<E>,
    jac: &Mat<E>,
    c: &Col<E>,
    z: &Col<E>,
    mu: E,
    eps: E,
    p_x: &Col<E>,
    p_z: &Col<E>,
) -> E {
    let c_eps_inv = Col::<E>::from_fn(c.nrows(), |i| 1.0 / (c[i] - eps));
    let z_eps_inv = Col::<E>::from_fn(z.nrows(), |i| 1.0 / (z[i] + eps));

    let jt_z = jt_vec(jac, z);
    let jt_c_eps_inv = jt_vec(jac, &c_eps_inv);

    let grad_term: E = (0..g.nrows())
        .map(|i| p_x[i] * (g[i] - jt_z[i] - 2.0 * mu * jt_c_eps_inv[i]))
        .sum();

    let dual_term: E = (0..c.nrows())
        .map(|i| p_z[i] * (c[i] + mu * z_eps_inv[i]))
        .sum();

    grad_term - dual_term
}
