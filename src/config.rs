//! Configuration surface: validated setters for tolerances, caps, and the
//! algorithm constants of §3, grounded in the teacher's options-registry
//! pattern (`SolverOptions`, built via local proc-macros in `macros/`) but
//! written as a plain struct — this crate has one algorithm family and eight
//! fixed constants, not a shared registry spanning LP/QP/NLP/stochastic
//! solvers, so the registry machinery buys nothing here (see DESIGN.md).

use crate::error::ConfigurationError;

/// Validated solver configuration. Every field has a sensible default
/// (`SolverConfig::default()`); setters reject non-positive values with
/// [`ConfigurationError`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    tolerance: f64,
    max_iterations: usize,
    verbose: bool,

    eps: f64,
    sigma_max: f64,
    eta_max: f64,
    mu_min: f64,
    alpha_max: f64,
    alpha_min: f64,
    beta: f64,
    tau: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 200,
            verbose: false,

            eps: 1e-8,
            sigma_max: 0.5,
            eta_max: 0.25,
            mu_min: 1e-9,
            alpha_max: 0.995,
            alpha_min: 1e-6,
            beta: 0.75,
            tau: 0.01,
        }
    }
}

macro_rules! validated_setter {
    ($setter:ident, $field:ident, $name:literal) => {
        /// Sets
        #[doc = $name]
        /// Rejects non-positive values.
        pub fn $setter(mut self, value: f64) -> Result<Self, ConfigurationError> {
            if value > 0.0 {
                self.$field = value;
                Ok(self)
            } else {
                Err(ConfigurationError::NotPositive {
                    field: $name,
                    value,
                })
            }
        }
    };
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    validated_setter!(with_tolerance, tolerance, "tolerance");
    validated_setter!(with_eps, eps, "eps");
    validated_setter!(with_sigma_max, sigma_max, "sigma_max");
    validated_setter!(with_eta_max, eta_max, "eta_max");
    validated_setter!(with_mu_min, mu_min, "mu_min");
    validated_setter!(with_alpha_max, alpha_max, "alpha_max");
    validated_setter!(with_alpha_min, alpha_min, "alpha_min");
    validated_setter!(with_beta, beta, "beta");
    validated_setter!(with_tau, tau, "tau");

    /// Sets the iteration cap. Rejects zero.
    pub fn with_max_iterations(mut self, value: usize) -> Result<Self, ConfigurationError> {
        if value > 0 {
            self.max_iterations = value;
            Ok(self)
        } else {
            Err(ConfigurationError::NotPositive {
                field: "max_iterations",
                value: value as f64,
            })
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn sigma_max(&self) -> f64 {
        self.sigma_max
    }

    pub fn eta_max(&self) -> f64 {
        self.eta_max
    }

    pub fn mu_min(&self) -> f64 {
        self.mu_min
    }

    pub fn alpha_max(&self) -> f64 {
        self.alpha_max
    }

    pub fn alpha_min(&self) -> f64 {
        self.alpha_min
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }
}
