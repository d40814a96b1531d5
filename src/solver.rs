//! The iteration driver (§4.7): wires problem evaluation, the centering
//! schedule, step computation, BFGS bookkeeping, and the line search into the
//! INIT -> EVAL -> TEST -> STEP -> LINE SEARCH loop. Grounded in the
//! teacher's `nlp/ipm/mod.rs` (the `InteriorPointMethod` state machine that
//! calls its `AugmentedSystem`, `LineSearch`, and `MuUpdate` collaborators
//! once per iteration and checks convergence against the concatenated KKT
//! residual).

use faer::{Col, Mat};

use crate::E;
use crate::bfgs::BfgsUpdater;
use crate::callback::{NullSink, TelemetryRow, TelemetrySink};
use crate::config::SolverConfig;
use crate::error::{ConfigurationError, SolverError};
use crate::line_search::{self, TrialEvaluator};
use crate::problem::NlpProblem;
use crate::step::{self, Step};

/// Selects which Hessian source populates the `B` term of the reduced system
/// `H_r = B + W - J^T S J` (§4.5, §9 design note: "a tagged variant with a
/// small internal switch at the one site that populates B").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentMode {
    /// `B = grad^2 f(x)`, evaluated fresh each iteration via the problem's
    /// `hessian` callback.
    Newton,
    /// `B` is the running quasi-Newton approximation maintained by
    /// [`BfgsUpdater`], updated after every accepted step.
    Bfgs,
    /// `B = I`: the reduced system solves on `W` and the constraint curvature
    /// alone, with no primal curvature information.
    Steepest,
}

/// Why the solve loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// `||(r_x, r_c)|| / nu < tolerance` was reached, `nu = n + m`.
    Converged,
    /// `max_iterations` was reached without convergence.
    MaxIterationsReached,
}

/// The terminal state of a solve: always returned on `Ok`, even when
/// iterations were exhausted — running out of iterations is a reported
/// outcome, not an error (see [`crate::error::SolverError`]).
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub x: Col<E>,
    pub z: Col<E>,
    pub status: SolveStatus,
    pub iterations: usize,
    /// `||(r_x, r_c)|| / nu`, the scaled residual the convergence test of
    /// §4.7/§8 compares against `tolerance` (`nu = n + m`).
    pub residual_norm: E,
}

/// Drives the primal-dual interior-point iteration for a fixed problem,
/// descent mode, and configuration.
pub struct Solver<'p, P: NlpProblem> {
    problem: &'p P,
    mode: DescentMode,
    config: SolverConfig,
}

struct ProblemEvaluator<'p, P: NlpProblem> {
    problem: &'p P,
}

impl<'p, P: NlpProblem> TrialEvaluator for ProblemEvaluator<'p, P> {
    fn objective(&self, x: &Col<E>) -> Result<E, crate::error::EvaluationError> {
        self.problem.objective(x)
    }

    fn constraints(&self, x: &Col<E>) -> Result<Col<E>, crate::error::EvaluationError> {
        self.problem.constraints(x)
    }
}

impl<'p, P: NlpProblem> Solver<'p, P> {
    /// Builds a solver for `problem` under `mode`. Rejects NEWTON mode
    /// up front if the problem does not provide a Hessian callback.
    pub fn new(problem: &'p P, mode: DescentMode, config: SolverConfig) -> Result<Self, ConfigurationError> {
        if mode == DescentMode::Newton && !problem.has_hessian() {
            return Err(ConfigurationError::MissingHessian);
        }
        Ok(Self {
            problem,
            mode,
            config,
        })
    }

    /// Runs the iteration to convergence or `max_iterations`, with no
    /// telemetry output.
    pub fn solve(&self, x_guess: Col<E>) -> Result<SolveOutcome, SolverError> {
        self.solve_with_sink(x_guess, &mut NullSink)
    }

    /// Runs the iteration, reporting one [`TelemetryRow`] per iteration to
    /// `sink` when `config.verbose()` is set.
    pub fn solve_with_sink(
        &self,
        x_guess: Col<E>,
        sink: &mut dyn TelemetrySink,
    ) -> Result<SolveOutcome, SolverError> {
        let n = self.problem.n_vars();
        let m = self.problem.n_constraints();

        if x_guess.nrows() != n {
            return Err(ConfigurationError::PrimalSizeMismatch {
                expected: n,
                got: x_guess.nrows(),
            }
            .into());
        }

        let mut x = x_guess;
        let mut z = Col::<E>::from_fn(m, |_| 1.0);

        let mut bfgs = BfgsUpdater::new(n);
        let evaluator = ProblemEvaluator {
            problem: self.problem,
        };

        if self.config.verbose() {
            sink.header();
        }

        let mut f = self.problem.objective(&x)?;
        let mut g = self.problem.gradient(&x)?;
        let mut c = self.problem.constraints(&x)?;
        let mut jac = self.problem.jacobian(&x)?;

        let mut last_residual_norm = E::INFINITY;
        let mut iterations = 0usize;

        // alpha/ls from the previous iteration's line search; both 0 before
        // the first one is run (§6).
        let mut prev_alpha: E = 0.0;
        let mut prev_steps: usize = 0;

        for iteration in 0..self.config.max_iterations() {
            let one_based_iteration = iteration + 1;
            iterations = one_based_iteration;

            let w = self.problem.lagrangian_hessian(&x, &z)?;
            let b = self.hessian_term(&x, &bfgs)?;

            let step: Step = step::compute_step(&g, &c, &z, &jac, &w, &b, &self.config)?;
            let residual_norm =
                (step.r_x_norm * step.r_x_norm + step.r_c_norm * step.r_c_norm).sqrt() / step.centering.nu;
            last_residual_norm = residual_norm;

            // TEST: emit the row unconditionally, before the convergence
            // decision, so every executed iteration produces exactly one row.
            if self.config.verbose() {
                sink.row(TelemetryRow {
                    iteration: one_based_iteration,
                    objective: f,
                    log10_mu: step.centering.mu.log10(),
                    sigma: step.centering.sigma,
                    dual_residual_norm: step.r_x_norm,
                    complementarity_residual_norm: step.r_c_norm,
                    alpha: prev_alpha,
                    line_search_steps: prev_steps,
                });
            }

            if residual_norm < self.config.tolerance() {
                return Ok(SolveOutcome {
                    x,
                    z,
                    status: SolveStatus::Converged,
                    iterations,
                    residual_norm,
                });
            }

            let result = line_search::run(&evaluator, &x, &z, &g, &c, &jac, f, &step, &self.config)?;

            if self.mode == DescentMode::Bfgs {
                let s = Col::<E>::from_fn(n, |i| result.x_new[i] - x[i]);
                let g_new = self.problem.gradient(&result.x_new)?;
                let y = Col::<E>::from_fn(n, |i| g_new[i] - g[i]);
                // Per §4.7 failure semantics, a rejected curvature condition
                // is fatal during this iteration, not silently skipped.
                bfgs.update(&s, &y)?;
            }

            prev_alpha = result.alpha;
            prev_steps = result.steps;

            x = result.x_new;
            z = result.z_new;

            f = self.problem.objective(&x)?;
            g = self.problem.gradient(&x)?;
            c = self.problem.constraints(&x)?;
            jac = self.problem.jacobian(&x)?;
        }

        Ok(SolveOutcome {
            x,
            z,
            status: SolveStatus::MaxIterationsReached,
            iterations,
            residual_norm: last_residual_norm,
        })
    }

    fn hessian_term(&self, x: &Col<E>, bfgs: &BfgsUpdater) -> Result<Mat<E>, SolverError> {
        match self.mode {
            DescentMode::Newton => Ok(self.problem.hessian(x)?),
            DescentMode::Bfgs => Ok(bfgs.matrix().clone()),
            DescentMode::Steepest => Ok(Mat::<E>::identity(self.problem.n_vars(), self.problem.n_vars())),
        }
    }
}
