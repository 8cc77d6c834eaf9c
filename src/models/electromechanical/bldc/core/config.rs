use twine_solvers::equation::bisection;
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Power},
    power::watt,
};

use crate::support::newton;

use super::Windage;

/// Solver and model configuration for motor sizing.
#[derive(Debug, Clone, Copy)]
pub struct BldcConfig {
    /// Starting guess for the no-load current.
    pub initial_no_load_current: ElectricCurrent,

    /// Maximum iteration count for the energy balance solve.
    pub max_iters: usize,

    /// Absolute tolerance on the energy balance residual.
    pub residual_tol: Power,

    /// Fraction of each Newton step tried first, in `(0, 1]`.
    pub damping: f64,

    /// Maximum number of step halvings per Newton iteration.
    pub max_step_halvings: usize,

    /// Relative perturbation for the finite-difference Jacobian.
    pub fd_rel_step: f64,

    /// Maximum inner iterations of the linear step solve.
    pub linear_max_iters: usize,

    /// Relative residual tolerance of the linear step solve.
    pub linear_rel_tol: f64,

    /// Absolute tolerance on the no-load current for the bracketed solve.
    pub current_tol: ElectricCurrent,

    /// Windage loss model used for sizing.
    pub windage: Windage,
}

impl Default for BldcConfig {
    fn default() -> Self {
        Self {
            initial_no_load_current: ElectricCurrent::new::<ampere>(40.0),
            max_iters: 1000,
            residual_tol: Power::new::<watt>(1e-4),
            damping: 1.0,
            max_step_halvings: 30,
            fd_rel_step: 1e-6,
            linear_max_iters: 100,
            linear_rel_tol: 1e-12,
            current_tol: ElectricCurrent::new::<ampere>(1e-12),
            windage: Windage::Neglected,
        }
    }
}

impl BldcConfig {
    /// Converts this configuration into a Newton solver configuration.
    pub(super) fn newton(&self) -> newton::Config {
        newton::Config {
            max_iters: self.max_iters,
            residual_tol: self.residual_tol.get::<watt>(),
            damping: self.damping,
            max_step_halvings: self.max_step_halvings,
            fd_rel_step: self.fd_rel_step,
            linear: newton::LinearConfig {
                max_iters: self.linear_max_iters,
                rel_tol: self.linear_rel_tol,
            },
        }
    }

    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.current_tol.get::<ampere>(),
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol.get::<watt>(),
        }
    }
}
