//! Iteration telemetry, modeled as an injected sink abstraction per §9's
//! design note. Grounded in the teacher's `Callback` trait (a per-iteration
//! hook invoked with the solver state) and `ConvergenceOutput` (its stdout
//! formatter) — generalized here into the exact column layout §6 specifies
//! and split from a "do something with the state" hook into a narrower
//! "emit a formatted row" sink, since that is the only ambient behavior the
//! distilled spec actually asks for.

/// One row of iteration telemetry, columns per §6:
/// `i, f(x), log10(mu), sigma, ||r_x||, ||r_c||, alpha, ls`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRow {
    pub iteration: usize,
    pub objective: f64,
    pub log10_mu: f64,
    pub sigma: f64,
    pub dual_residual_norm: f64,
    pub complementarity_residual_norm: f64,
    pub alpha: f64,
    pub line_search_steps: usize,
}

/// A sink for iteration telemetry. The default sink writes to stdout; tests
/// inject an in-memory sink that records rows for assertions.
pub trait TelemetrySink {
    /// Called once before the first iteration, if `verbose` is set.
    fn header(&mut self) {}

    /// Called once per executed iteration, if `verbose` is set.
    fn row(&mut self, row: TelemetryRow);
}

/// Writes one formatted line per iteration to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TelemetrySink for StdoutSink {
    fn header(&mut self) {
        println!(
            "{:>5} {:>14} {:>10} {:>10} {:>12} {:>12} {:>10} {:>4}",
            "i", "f(x)", "log10(mu)", "sigma", "||r_x||", "||r_c||", "alpha", "ls"
        );
    }

    fn row(&mut self, row: TelemetryRow) {
        println!(
            "{:>5} {:>14.6e} {:>10.4} {:>10.4} {:>12.4e} {:>12.4e} {:>10.4} {:>4}",
            row.iteration,
            row.objective,
            row.log10_mu,
            row.sigma,
            row.dual_residual_norm,
            row.complementarity_residual_norm,
            row.alpha,
            row.line_search_steps,
        );
    }
}

/// Does nothing. Used internally when `verbose` is false so the driver
/// never has a `None` sink to branch on.
#[derive(Debug, Default)]
pub(crate) struct NullSink;

impl TelemetrySink for NullSink {
    fn row(&mut self, _row: TelemetryRow) {}
}

/// Records every header/row call in memory, for test assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub header_calls: usize,
    pub rows: Vec<TelemetryRow>,
}

impl TelemetrySink for RecordingSink {
    fn header(&mut self) {
        self.header_calls += 1;
    }

    fn row(&mut self, row: TelemetryRow) {
        self.rows.push(row);
    }
}
