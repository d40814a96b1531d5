//! Error taxonomy for the interior-point solver.
//!
//! Every failure the solver can report falls into one of the variants of
//! [`SolverError`]. `NotConverged` is deliberately absent from this enum: per
//! the solver contract, hitting `max_iterations` without convergence is a
//! reported outcome, not a failure — see [`crate::solver::SolveOutcome`].

use derive_more::{Display, Error};

/// An invalid (non-positive, or otherwise out-of-range) configuration value
/// was supplied to a [`crate::config::SolverConfig`] setter, or a callback
/// required by the selected [`crate::solver::DescentMode`] was not provided.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[display("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[display("hessian callback is required in NEWTON mode but was not provided")]
    MissingHessian,
    #[display("x_guess has length {got}, expected {expected}")]
    PrimalSizeMismatch { expected: usize, got: usize },
}

/// A problem callback produced a non-finite value or explicitly refused to
/// evaluate at the current iterate.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[display("objective evaluation failed: {reason}")]
    Objective { reason: &'static str },
    #[display("gradient evaluation failed: {reason}")]
    Gradient { reason: &'static str },
    #[display("hessian evaluation failed: {reason}")]
    Hessian { reason: &'static str },
    #[display("constraint evaluation failed: {reason}")]
    Constraints { reason: &'static str },
    #[display("jacobian evaluation failed: {reason}")]
    Jacobian { reason: &'static str },
    #[display("lagrangian hessian evaluation failed: {reason}")]
    LagrangianHessian { reason: &'static str },
}

/// A linear-algebra or BFGS precondition was violated.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum NumericalError {
    #[display("reduced Newton system is indefinite and could not be factorized")]
    FactorizationIndefinite,
    #[display("linear solve produced a non-finite result")]
    SolveNonFinite,
    #[display("BFGS update precondition y^T s > 0 violated (y^T s = {ys})")]
    BfgsPrecondition { ys: f64 },
}

/// Backtracking line search reached `alpha < alpha_min` without finding an
/// acceptable trial point.
#[derive(Debug, Display, Error, Clone, PartialEq)]
#[display("line search step size too small (alpha = {alpha} < alpha_min = {alpha_min})")]
pub struct LineSearchFailure {
    pub alpha: f64,
    pub alpha_min: f64,
}

/// Top-level error returned from [`crate::solver::Solver::solve`].
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum SolverError {
    #[display("{_0}")]
    Configuration(ConfigurationError),
    #[display("{_0}")]
    Evaluation(EvaluationError),
    #[display("{_0}")]
    Numerical(NumericalError),
    #[display("{_0}")]
    LineSearch(LineSearchFailure),
}

impl From<ConfigurationError> for SolverError {
    fn from(e: ConfigurationError) -> Self {
        SolverError::Configuration(e)
    }
}

impl From<EvaluationError> for SolverError {
    fn from(e: EvaluationError) -> Self {
        SolverError::Evaluation(e)
    }
}

impl From<NumericalError> for SolverError {
    fn from(e: NumericalError) -> Self {
        SolverError::Numerical(e)
    }
}

impl From<LineSearchFailure> for SolverError {
    fn from(e: LineSearchFailure) -> Self {
        SolverError::LineSearch(e)
    }
}
