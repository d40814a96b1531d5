//! Centering schedule: barrier parameter `mu`, centering parameter `sigma`,
//! and forcing sequence `eta`, from the concatenated KKT residual. Factored
//! out of step computation as its own small component, mirroring the
//! teacher's `mu_update.rs` (`MuUpdate` trait, invoked once per iteration by
//! the driver before the step is assembled).

use faer::Col;

use crate::E;
use crate::config::SolverConfig;

/// Residuals and centering quantities for one iteration (§4.5, steps 1-2).
pub(crate) struct Centering {
    pub eta: E,
    pub sigma: E,
    pub duality_gap: E,
    pub mu: E,
    /// `nu = n + m`, the denominator of the convergence test `||r0|| / nu` of
    /// §4.7 TEST and §8 ("Boundary behaviors").
    pub nu: E,
}

/// Computes the centering schedule from the dual-feasibility residual
/// `r_x = g + J^T z`, the complementarity residual `r_c = c .* z`, and the
/// duality gap `-c^T z`.
pub(crate) fn compute(r_x: &Col<E>, r_c: &Col<E>, c: &Col<E>, z: &Col<E>, config: &SolverConfig) -> Centering {
    let n = r_x.nrows();
    let m = r_c.nrows();
    let nu = (n + m) as E;

    let r0_norm = concatenated_norm(r_x, r_c);

    let eta = config.eta_max().min(r0_norm / nu);
    let sigma = config.sigma_max().min((r0_norm / nu).sqrt());

    let duality_gap: E = -c.iter().zip(z.iter()).map(|(&ci, &zi)| ci * zi).sum::<E>();

    let mu = config.mu_min().max(sigma * duality_gap / (m as E));

    Centering {
        eta,
        sigma,
        duality_gap,
        mu,
        nu,
    }
}

/// `||(r_x, r_c)||_2`, the norm of the concatenated residual used both here
/// and as the convergence test in §4.7.
pub(crate) fn concatenated_norm(r_x: &Col<E>, r_c: &Col<E>) -> E {
    let sum_sq: E = r_x.iter().map(|v| v * v).sum::<E>() + r_c.iter().map(|v| v * v).sum::<E>();
    sum_sq.sqrt()
}
