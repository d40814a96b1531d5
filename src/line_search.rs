//! Fraction-to-boundary rule and backtracking line search (§4.6), grounded
//! in the teacher's `nlp/ipm/line_search.rs` (`PDFeasibileLineSearch`),
//! generalized from a two-sided box-constraint cap to the single-sided dual
//! cap `z > 0` this spec's inequality-only formulation needs.

use faer::{Col, Mat};

use crate::E;
use crate::config::SolverConfig;
use crate::error::{EvaluationError, LineSearchFailure};
use crate::merit::{dpsi, psi};
use crate::step::Step;

/// Result of an accepted line search: the new iterate and bookkeeping for
/// telemetry.
pub(crate) struct LineSearchResult {
    pub x_new: Col<E>,
    pub z_new: Col<E>,
    pub alpha: E,
    pub steps: usize,
}

/// A problem's objective/constraint evaluation at a trial point, used by the
/// line search to test acceptance. Kept generic over the caller's
/// evaluation closures so this module does not depend on [`crate::problem::NlpProblem`]
/// directly (the driver owns the problem reference).
pub(crate) trait TrialEvaluator {
    fn objective(&self, x: &Col<E>) -> Result<E, EvaluationError>;
    fn constraints(&self, x: &Col<E>) -> Result<Col<E>, EvaluationError>;
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run(
    evaluator: &impl TrialEvaluator,
    x: &Col<E>,
    z: &Col<E>,
    g: &Col<E>,
    c: &Col<E>,
    jac: &Mat<E>,
    f: E,
    step: &Step,
    config: &SolverConfig,
) -> Result<LineSearchResult, LineSearchFailure> {
    let mu = step.centering.mu;
    let eta = step.centering.eta;
    let eps = config.eps();

    let psi_current = psi(f, c, z, mu, eps);
    let d_psi = dpsi(g, jac, c, z, mu, eps, &step.p_x, &step.p_z);

    // Fraction-to-boundary: cap alpha so z + alpha * p_z stays positive.
    let mut alpha = config.alpha_max();
    for i in 0..z.nrows() {
        if step.p_z[i] < 0.0 {
            alpha = alpha.min(config.alpha_max() * z[i] / (-step.p_z[i]));
        }
    }

    let mut steps = 0usize;
    loop {
        let x_trial = Col::<E>::from_fn(x.nrows(), |i| x[i] + alpha * step.p_x[i]);
        let z_trial = Col::<E>::from_fn(z.nrows(), |i| z[i] + alpha * step.p_z[i]);

        let trial_ok = evaluator
            .objective(&x_trial)
            .ok()
            .zip(evaluator.constraints(&x_trial).ok())
            .map(|(f_trial, c_trial)| {
                let feasible = c_trial.iter().all(|&ci| ci <= 0.0);
                let psi_trial = psi(f_trial, &c_trial, &z_trial, mu, eps);
                let sufficient_decrease =
                    psi_trial < psi_current + config.tau() * eta * alpha * d_psi;
                feasible && sufficient_decrease
            })
            .unwrap_or(false);

        if trial_ok {
            return Ok(LineSearchResult {
                x_new: x_trial,
                z_new: z_trial,
                alpha,
                steps,
            });
        }

        alpha *= config.beta();
        steps += 1;
        if alpha < config.alpha_min() {
            return Err(LineSearchFailure {
                alpha,
                alpha_min: config.alpha_min(),
            });
        }
    }
}
