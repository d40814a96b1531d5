//! The capability set the core consumes, in the two provisioning forms the
//! distilled spec calls for: a trait object and a bundle of six callables.
//!
//! Grounded in the teacher's [`NonlinearProgram`]-style struct-of-callbacks
//! (`nlp/mod.rs`), generalized into a trait so both forms share one call
//! site in the driver, per the distilled spec's design note in §9
//! ("Re-architect as a trait/interface with a single call-site abstraction").

use faer::{Col, Mat};

use crate::E;
use crate::error::EvaluationError;

/// Convex NLP problem: `minimize f(x) subject to c(x) <= 0`.
///
/// `hessian` is only called in [`crate::solver::DescentMode::Newton`]; a
/// `CallbackProblem` built without it is rejected at [`crate::solver::Solver::new`]
/// time with [`crate::error::ConfigurationError::MissingHessian`] if NEWTON mode is
/// requested.
pub trait NlpProblem {
    /// Number of decision variables, `n`.
    fn n_vars(&self) -> usize;
    /// Number of inequality constraints, `m`.
    fn n_constraints(&self) -> usize;

    /// `f(x)`.
    fn objective(&self, x: &Col<E>) -> Result<E, EvaluationError>;
    /// `grad f(x) in R^n`.
    fn gradient(&self, x: &Col<E>) -> Result<Col<E>, EvaluationError>;
    /// `grad^2 f(x) in R^(n x n)`. Only required in NEWTON mode.
    fn hessian(&self, x: &Col<E>) -> Result<Mat<E>, EvaluationError> {
        let _ = x;
        Err(EvaluationError::Hessian {
            reason: "hessian callback not provided",
        })
    }
    /// Whether `hessian` is actually implemented.
    fn has_hessian(&self) -> bool {
        false
    }
    /// `c(x) in R^m`.
    fn constraints(&self, x: &Col<E>) -> Result<Col<E>, EvaluationError>;
    /// `J = dc/dx in R^(m x n)`.
    fn jacobian(&self, x: &Col<E>) -> Result<Mat<E>, EvaluationError>;
    /// `W = sum_i z_i grad^2 c_i(x) in R^(n x n)`, the constraint part of the
    /// Lagrangian Hessian.
    fn lagrangian_hessian(&self, x: &Col<E>, z: &Col<E>) -> Result<Mat<E>, EvaluationError>;
}

type ObjectiveFn = Box<dyn Fn(&Col<E>) -> Result<E, EvaluationError>>;
type GradientFn = Box<dyn Fn(&Col<E>) -> Result<Col<E>, EvaluationError>>;
type HessianFn = Box<dyn Fn(&Col<E>) -> Result<Mat<E>, EvaluationError>>;
type ConstraintsFn = Box<dyn Fn(&Col<E>) -> Result<Col<E>, EvaluationError>>;
type JacobianFn = Box<dyn Fn(&Col<E>) -> Result<Mat<E>, EvaluationError>>;
type LagrangianHessianFn = Box<dyn Fn(&Col<E>, &Col<E>) -> Result<Mat<E>, EvaluationError>>;

/// A problem assembled from six plain closures, the bundle form of §4.1.
pub struct CallbackProblem {
    n_vars: usize,
    n_constraints: usize,
    objective: ObjectiveFn,
    gradient: GradientFn,
    hessian: Option<HessianFn>,
    constraints: ConstraintsFn,
    jacobian: JacobianFn,
    lagrangian_hessian: LagrangianHessianFn,
}

impl CallbackProblem {
    /// Builds a problem without a Hessian callback (valid for BFGS/STEEPEST only).
    pub fn new(
        n_vars: usize,
        n_constraints: usize,
        objective: impl Fn(&Col<E>) -> Result<E, EvaluationError> + 'static,
        gradient: impl Fn(&Col<E>) -> Result<Col<E>, EvaluationError> + 'static,
        constraints: impl Fn(&Col<E>) -> Result<Col<E>, EvaluationError> + 'static,
        jacobian: impl Fn(&Col<E>) -> Result<Mat<E>, EvaluationError> + 'static,
        lagrangian_hessian: impl Fn(&Col<E>, &Col<E>) -> Result<Mat<E>, EvaluationError> + 'static,
    ) -> Self {
        Self {
            n_vars,
            n_constraints,
            objective: Box::new(objective),
            gradient: Box::new(gradient),
            hessian: None,
            constraints: Box::new(constraints),
            jacobian: Box::new(jacobian),
            lagrangian_hessian: Box::new(lagrangian_hessian),
        }
    }

    /// Attaches a Hessian callback, required for NEWTON mode.
    pub fn with_hessian(
        mut self,
        hessian: impl Fn(&Col<E>) -> Result<Mat<E>, EvaluationError> + 'static,
    ) -> Self {
        self.hessian = Some(Box::new(hessian));
        self
    }
}

impl NlpProblem for CallbackProblem {
    fn n_vars(&self) -> usize {
        self.n_vars
    }

    fn n_constraints(&self) -> usize {
        self.n_constraints
    }

    fn objective(&self, x: &Col<E>) -> Result<E, EvaluationError> {
        (self.objective)(x)
    }

    fn gradient(&self, x: &Col<E>) -> Result<Col<E>, EvaluationError> {
        (self.gradient)(x)
    }

    fn hessian(&self, x: &Col<E>) -> Result<Mat<E>, EvaluationError> {
        match &self.hessian {
            Some(h) => h(x),
            None => Err(EvaluationError::Hessian {
                reason: "hessian callback not provided",
            }),
        }
    }

    fn has_hessian(&self) -> bool {
        self.hessian.is_some()
    }

    fn constraints(&self, x: &Col<E>) -> Result<Col<E>, EvaluationError> {
        (self.constraints)(x)
    }

    fn jacobian(&self, x: &Col<E>) -> Result<Mat<E>, EvaluationError> {
        (self.jacobian)(x)
    }

    fn lagrangian_hessian(&self, x: &Col<E>, z: &Col<E>) -> Result<Mat<E>, EvaluationError> {
        (self.lagrangian_hessian)(x, z)
    }
}
