//! Primal-dual interior-point solver for convex nonlinear programs with
//! inequality constraints only: `minimize f(x) subject to c(x) <= 0`.
//!
//! The entry points are [`problem::NlpProblem`] (implement it directly, or
//! assemble a [`problem::CallbackProblem`] from six closures) and
//! [`solver::Solver`], which drives the iteration under one of three
//! [`solver::DescentMode`]s. See [`config::SolverConfig`] for the tunable
//! constants and [`callback::TelemetrySink`] for per-iteration reporting.

pub type E = f64;

pub mod bfgs;
pub mod callback;
pub mod centering;
pub mod config;
pub mod error;
pub mod line_search;
pub mod linalg;
pub mod merit;
pub mod problem;
pub mod solver;
pub mod step;

#[cfg(test)]
mod tests;

pub use config::SolverConfig;
pub use error::SolverError;
pub use problem::{CallbackProblem, NlpProblem};
pub use solver::{DescentMode, SolveOutcome, SolveStatus, Solver};
