use thiserror::Error;

/// Errors that can occur during a Newton solve.
///
/// Reaching the iteration cap is not an error at this level; it is reported
/// through [`Status::MaxIters`](super::Status::MaxIters) so callers can decide
/// how to surface it.
#[derive(Debug, Error)]
pub enum Error<ModelError, ProblemError> {
    /// The model failed to evaluate.
    #[error("model evaluation failed")]
    Model(#[source] ModelError),

    /// The problem failed to map inputs or compute residuals.
    #[error("problem evaluation failed")]
    Problem(#[source] ProblemError),

    /// The linear solve for the Newton step failed.
    #[error(transparent)]
    LinearSolve(#[from] LinearSolveError),

    /// The residual evaluated to NaN or infinity.
    #[error("non-finite residual at x={x:?}")]
    NonFiniteResidual {
        /// Unknowns at which the residual was evaluated.
        x: Vec<f64>,
    },
}

/// The iterative linear solve did not reduce the residual far enough.
///
/// This usually indicates a singular or ill-conditioned Jacobian rather than
/// a physically infeasible problem.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("linear step solve failed after {iters} iterations: relative residual={residual}")]
pub struct LinearSolveError {
    /// Inner iterations performed.
    pub iters: usize,

    /// Relative residual `‖b − A·x‖ / ‖b‖` when the solve stopped.
    pub residual: f64,
}
