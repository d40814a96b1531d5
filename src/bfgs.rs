//! BFGS Hessian approximation updater (§4.3), grounded in the teacher's
//! step-size/strategy components (`nlp/gd/stepsize.rs`'s `StepSize` trait
//! family) which follow the same shape: a small strategy struct holding
//! configuration, with a `compute`/`update` entry point called once per
//! iteration by the driver.
//!
//! ```text
//! B+ = B - (Bs)(Bs)^T / (s^T B s)  +  y y^T / (y^T s)
//! ```
//!
//! Precondition: `y^T s > 0`. `B` starts at the identity and is skipped on
//! the very first update call (no prior gradient yet) — the driver, not this
//! module, is responsible for not calling `update` before the second
//! iteration; see [`crate::solver`].

use faer::{Col, Mat};

use crate::E;
use crate::error::NumericalError;

/// Owns the running BFGS approximation `B`, mutated in place.
pub(crate) struct BfgsUpdater {
    b: Mat<E>,
}

impl BfgsUpdater {
    /// `B := I`, sized for an `n`-variable problem.
    pub(crate) fn new(n: usize) -> Self {
        Self {
            b: Mat::<E>::identity(n, n),
        }
    }

    pub(crate) fn matrix(&self) -> &Mat<E> {
        &self.b
    }

    /// Applies the rank-two update given step `s = alpha * p_x` and gradient
    /// difference `y = g_new - g_old`. Leaves `B` untouched on failure.
    pub(crate) fn update(&mut self, s: &Col<E>, y: &Col<E>) -> Result<(), NumericalError> {
        let ys: E = s.iter().zip(y.iter()).map(|(&si, &yi)| si * yi).sum();
        if ys <= 0.0 {
            return Err(NumericalError::BfgsPrecondition { ys });
        }

        let bs = &self.b * s;
        let sbs: E = s.iter().zip(bs.iter()).map(|(&si, &bsi)| si * bsi).sum();

        let n = self.b.nrows();
        let updated = Mat::<E>::from_fn(n, n, |i, j| {
            self.b[(i, j)] - (bs[i] * bs[j]) / sbs + (y[i] * y[j]) / ys
        });
        self.b = updated;
        Ok(())
    }
}
