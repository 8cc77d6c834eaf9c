/// Configuration for the damped Newton-Raphson solver.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Maximum number of Newton steps.
    pub max_iters: usize,

    /// Absolute tolerance on the largest residual magnitude.
    pub residual_tol: f64,

    /// Fraction of the full Newton step tried first, in `(0, 1]`.
    pub damping: f64,

    /// Maximum number of times a rejected step is halved before giving up.
    ///
    /// A step is rejected if the model fails at the trial point or the
    /// residual norm does not decrease.
    pub max_step_halvings: usize,

    /// Relative perturbation used for the central-difference Jacobian.
    ///
    /// The absolute perturbation is `fd_rel_step * max(|x|, 1)`.
    pub fd_rel_step: f64,

    /// Settings for the linear solve of each Newton step.
    pub linear: LinearConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            residual_tol: 1e-4,
            damping: 1.0,
            max_step_halvings: 30,
            fd_rel_step: 1e-6,
            linear: LinearConfig::default(),
        }
    }
}

/// Configuration for the iterative linear solve of a Newton step.
#[derive(Debug, Clone, Copy)]
pub struct LinearConfig {
    /// Maximum number of inner GMRES iterations across all restarts.
    pub max_iters: usize,

    /// Convergence tolerance on `‖b − A·x‖ / ‖b‖`.
    pub rel_tol: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            rel_tol: 1e-12,
        }
    }
}
