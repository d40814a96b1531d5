//! End-to-end scenarios exercising the full iteration driver, mirroring the
//! teacher's `src/tests/` convention of keeping cross-module scenarios out of
//! their owning modules' unit test blocks.

use faer::{Col, Mat};
use rstest::rstest;

use crate::callback::RecordingSink;
use crate::config::SolverConfig;
use crate::error::{ConfigurationError, SolverError};
use crate::problem::CallbackProblem;
use crate::solver::{DescentMode, SolveStatus, Solver};
use crate::E;

/// Scenario 1 of the end-to-end specification: a 4-variable QP with three
/// quadratic inequality constraints `c_i(x) = 0.5 x^T P_i x + r_i^T x - b_i`.
///
/// `H = diag(2,2,4,2)`, `q = (-5,-5,-21,7)` give the objective
/// `f(x) = 0.5 x^T H x + q^T x`; `P_0 = diag(4,2,2,0)`, `P_1 = diag(2,2,2,2)`,
/// `P_2 = diag(2,4,2,4)`, `r_0 = (2,-1,0,-1)`, `r_1 = (1,-1,1,-1)`,
/// `r_2 = (-1,0,0,-1)`, `b = (5,8,10)`. From `x_guess = 0` (strictly feasible:
/// `c(0) = (-5,-8,-10)`), the documented solution is `x = (0, 1, 2, -1)`.
fn four_variable_quadratic_constrained_qp() -> CallbackProblem {
    const H: [E; 4] = [2.0, 2.0, 4.0, 2.0];
    const Q: [E; 4] = [-5.0, -5.0, -21.0, 7.0];
    const P: [[E; 4]; 3] = [[4.0, 2.0, 2.0, 0.0], [2.0, 2.0, 2.0, 2.0], [2.0, 4.0, 2.0, 4.0]];
    const R: [[E; 4]; 3] = [[2.0, -1.0, 0.0, -1.0], [1.0, -1.0, 1.0, -1.0], [-1.0, 0.0, 0.0, -1.0]];
    const B: [E; 3] = [5.0, 8.0, 10.0];

    CallbackProblem::new(
        4,
        3,
        |x: &Col<E>| Ok((0..4).map(|i| 0.5 * H[i] * x[i] * x[i] + Q[i] * x[i]).sum()),
        |x: &Col<E>| Ok(Col::from_fn(4, |i| H[i] * x[i] + Q[i])),
        |x: &Col<E>| {
            Ok(Col::from_fn(3, |i| {
                (0..4).map(|k| 0.5 * P[i][k] * x[k] * x[k] + R[i][k] * x[k]).sum::<E>() - B[i]
            }))
        },
        |x: &Col<E>| Ok(Mat::from_fn(3, 4, |i, j| P[i][j] * x[j] + R[i][j])),
        |_x: &Col<E>, z: &Col<E>| {
            Ok(Mat::from_fn(4, 4, |i, j| {
                if i == j { (0..3).map(|k| z[k] * P[k][i]).sum() } else { 0.0 }
            }))
        },
    )
    .with_hessian(|_x: &Col<E>| Ok(Mat::from_fn(4, 4, |i, j| if i == j { H[i] } else { 0.0 })))
}

#[rstest]
#[case(DescentMode::Newton)]
#[case(DescentMode::Bfgs)]
fn four_variable_quadratic_constrained_qp_matches_documented_solution(#[case] mode: DescentMode) {
    let problem = four_variable_quadratic_constrained_qp();
    let solver = Solver::new(&problem, mode, SolverConfig::new()).unwrap();
    let x_guess = Col::<E>::zeros(4);

    let outcome = solver.solve(x_guess).unwrap();
    assert_eq!(outcome.status, SolveStatus::Converged);
    let expected = [0.0, 1.0, 2.0, -1.0];
    for i in 0..4 {
        assert!(
            (outcome.x[i] - expected[i]).abs() < 1e-4,
            "x[{i}] = {}, expected {}",
            outcome.x[i],
            expected[i]
        );
    }
}

/// Scenario 2 of the end-to-end specification: a linear-constraint QP
/// (`Q = 2I`, `c = (-2,-5)`, objective `f(x) = 0.5 x^T Q x + c^T x`) with five
/// linear inequalities `A x - b <= 0`. `A` rows are `(1,2), (-1,2), (-1,-2),
/// (1,0), (0,1)`, `b = (6,2,2,3,2)`. From `x_guess = (0.5, 0.5)`, the
/// documented solution is `x = (1.4, 1.7)`, solved under STEEPEST (no
/// curvature beyond the identity).
#[test]
fn linear_constraint_qp_matches_documented_solution_under_steepest() {
    const A: [[E; 2]; 5] = [[1.0, 2.0], [-1.0, 2.0], [-1.0, -2.0], [1.0, 0.0], [0.0, 1.0]];
    const B: [E; 5] = [6.0, 2.0, 2.0, 3.0, 2.0];

    let problem = CallbackProblem::new(
        2,
        5,
        |x: &Col<E>| Ok(x[0] * x[0] + x[1] * x[1] - 2.0 * x[0] - 5.0 * x[1]),
        |x: &Col<E>| Ok(Col::from_fn(2, |i| 2.0 * x[i] - [2.0, 5.0][i])),
        |x: &Col<E>| Ok(Col::from_fn(5, |i| A[i][0] * x[0] + A[i][1] * x[1] - B[i])),
        |_x: &Col<E>| Ok(Mat::from_fn(5, 2, |i, j| A[i][j])),
        |_x: &Col<E>, _z: &Col<E>| Ok(Mat::<E>::zeros(2, 2)),
    );

    let solver = Solver::new(&problem, DescentMode::Steepest, SolverConfig::new()).unwrap();
    let x_guess = Col::<E>::from_fn(2, |_| 0.5);

    let outcome = solver.solve(x_guess).unwrap();
    assert_eq!(outcome.status, SolveStatus::Converged);
    assert!((outcome.x[0] - 1.4).abs() < 1e-4, "x[0] = {}", outcome.x[0]);
    assert!((outcome.x[1] - 1.7).abs() < 1e-4, "x[1] = {}", outcome.x[1]);
}

/// The identity problem: `minimize 0.5 x^2` subject to `-1 <= 0`, a
/// constraint that never binds. A trivial sanity check that the whole
/// pipeline round-trips for the smallest possible instance.
#[test]
fn trivial_single_variable_problem_converges() {
    let problem = CallbackProblem::new(
        1,
        1,
        |x: &Col<E>| Ok(0.5 * x[0] * x[0]),
        |x: &Col<E>| Ok(Col::from_fn(1, |i| x[i])),
        |_x: &Col<E>| Ok(Col::from_fn(1, |_| -1.0)),
        |_x: &Col<E>| Ok(Mat::<E>::zeros(1, 1)),
        |_x: &Col<E>, _z: &Col<E>| Ok(Mat::<E>::zeros(1, 1)),
    )
    .with_hessian(|_x: &Col<E>| Ok(Mat::<E>::from_fn(1, 1, |_, _| 1.0)));

    let solver = Solver::new(&problem, DescentMode::Newton, SolverConfig::new()).unwrap();
    let outcome = solver.solve(Col::<E>::from_fn(1, |_| 2.0)).unwrap();
    assert_eq!(outcome.status, SolveStatus::Converged);
    assert!(outcome.x[0].abs() < 1e-3);
}

/// Rejecting an invalid configuration must surface as [`ConfigurationError`],
/// before any iteration is attempted.
#[test]
fn invalid_configuration_is_rejected_before_solving() {
    let tolerance_err = SolverConfig::new().with_tolerance(0.0).unwrap_err();
    assert_eq!(
        tolerance_err,
        ConfigurationError::NotPositive {
            field: "tolerance",
            value: 0.0
        }
    );

    let iterations_err = SolverConfig::new().with_max_iterations(0).unwrap_err();
    assert!(matches!(iterations_err, ConfigurationError::NotPositive { .. }));
}

/// An ascent direction (deliberately mis-signed relative to the gradient)
/// can never satisfy the backtracking line search's sufficient-decrease
/// test, so the search must exhaust `alpha_min` and report
/// [`crate::error::LineSearchFailure`], which `?` converts into
/// [`SolverError::LineSearch`] at the driver's one call site.
#[test]
fn line_search_exhaustion_is_reported_as_a_failure() {
    use crate::centering::Centering;
    use crate::error::EvaluationError;
    use crate::line_search::{self, TrialEvaluator};
    use crate::step::Step;

    struct QuadraticEvaluator;
    impl TrialEvaluator for QuadraticEvaluator {
        fn objective(&self, x: &Col<E>) -> Result<E, EvaluationError> {
            Ok(0.5 * x[0] * x[0])
        }
        fn constraints(&self, _x: &Col<E>) -> Result<Col<E>, EvaluationError> {
            Ok(Col::from_fn(1, |_| -1.0))
        }
    }

    let evaluator = QuadraticEvaluator;
    let x = Col::<E>::from_fn(1, |_| 1.0);
    let z = Col::<E>::from_fn(1, |_| 1.0);
    let g = Col::<E>::from_fn(1, |_| 1.0);
    let c = Col::<E>::from_fn(1, |_| -1.0);
    let jac = Mat::<E>::zeros(1, 1);
    let config = SolverConfig::new().with_alpha_min(1e-2).unwrap();

    // p_x = +10 climbs f = 0.5 x^2 at x = 1 instead of descending it.
    let step = Step {
        p_x: Col::<E>::from_fn(1, |_| 10.0),
        p_z: Col::<E>::from_fn(1, |_| 0.0),
        centering: Centering {
            eta: 0.1,
            sigma: 0.1,
            duality_gap: 1.0,
            mu: 1e-3,
            nu: 2.0,
        },
        r_x_norm: 0.0,
        r_c_norm: 0.0,
    };

    let err: SolverError = line_search::run(&evaluator, &x, &z, &g, &c, &jac, 0.5, &step, &config)
        .unwrap_err()
        .into();
    assert!(matches!(err, SolverError::LineSearch(_)));
}

/// BFGS must refuse an update when the secant curvature condition
/// `y^T s > 0` fails, surfaced via [`crate::error::NumericalError::BfgsPrecondition`].
#[test]
fn bfgs_precondition_failure_is_reported() {
    use crate::bfgs::BfgsUpdater;
    use crate::error::NumericalError;

    let mut updater = BfgsUpdater::new(1);
    let s = Col::<E>::from_fn(1, |_| 1.0);
    let y = Col::<E>::from_fn(1, |_| -1.0);
    let err = updater.update(&s, &y).unwrap_err();
    assert!(matches!(err, NumericalError::BfgsPrecondition { .. }));
}

#[test]
fn verbose_solve_reports_telemetry_rows() {
    let problem = CallbackProblem::new(
        1,
        1,
        |x: &Col<E>| Ok(0.5 * x[0] * x[0]),
        |x: &Col<E>| Ok(Col::from_fn(1, |i| x[i])),
        |_x: &Col<E>| Ok(Col::from_fn(1, |_| -1.0)),
        |_x: &Col<E>| Ok(Mat::<E>::zeros(1, 1)),
        |_x: &Col<E>, _z: &Col<E>| Ok(Mat::<E>::zeros(1, 1)),
    )
    .with_hessian(|_x: &Col<E>| Ok(Mat::<E>::from_fn(1, 1, |_, _| 1.0)));

    let config = SolverConfig::new().with_verbose(true);
    let solver = Solver::new(&problem, DescentMode::Newton, config).unwrap();

    let mut sink = RecordingSink::default();
    let outcome = solver
        .solve_with_sink(Col::<E>::from_fn(1, |_| 2.0), &mut sink)
        .unwrap();

    assert_eq!(outcome.status, SolveStatus::Converged);
    assert_eq!(sink.header_calls, 1);
    // Exactly one row per executed iteration (§8), 1-based `i`, and the
    // first row's alpha/ls report "no line search has run yet" (§6).
    assert_eq!(sink.rows.len(), outcome.iterations);
    assert_eq!(sink.rows[0].iteration, 1);
    assert_eq!(sink.rows[0].alpha, 0.0);
    assert_eq!(sink.rows[0].line_search_steps, 0);
}
