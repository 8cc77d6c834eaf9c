use std::convert::Infallible;

use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{ElectricCurrent, Power};

use crate::support::{
    constraint::ConstraintError,
    newton::{self, LinearSolveError},
};

/// An invalid or non-physical input combination.
///
/// Domain errors are raised while evaluating a model and are never recovered
/// from locally.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// A design parameter is outside its allowed range.
    #[error("design parameter `{name}` is out of range")]
    InvalidParameter {
        /// Name of the offending [`DesignParameters`](super::DesignParameters) field.
        name: &'static str,

        /// Which bound was violated.
        #[source]
        source: ConstraintError,
    },

    /// The no-load current is at or above the maximum current.
    ///
    /// The voltage constant is then zero, negative, or infinite.
    #[error("max current {max_current:?} must exceed the no-load current {no_load_current:?}")]
    NoLoadCurrentTooHigh {
        max_current: ElectricCurrent,
        no_load_current: ElectricCurrent,
    },

    /// A derived quantity came out non-finite or non-positive.
    #[error("non-physical {quantity}: {value}")]
    NonPhysical {
        /// Name of the derived quantity.
        quantity: &'static str,

        /// Offending value in SI units.
        value: f64,
    },

    /// The windage skin-friction iteration did not settle.
    #[error("windage skin friction did not converge in {iters} iterations")]
    WindageNotConverged { iters: usize },
}

/// Errors that can occur while sizing a motor.
#[derive(Debug, Error)]
pub enum SizingError {
    /// A model evaluation rejected its inputs.
    #[error("domain error")]
    Domain(#[from] DomainError),

    /// The energy balance was not met within the iteration limit.
    #[error(
        "energy balance did not converge after {iters} iterations: \
         no_load_current={no_load_current:?} residual={residual:?}"
    )]
    NonConvergence {
        /// Last no-load current guess.
        no_load_current: ElectricCurrent,

        /// Energy balance residual at the last guess.
        residual: Power,

        /// Iterations performed.
        iters: usize,
    },

    /// The linear solve for a Newton step failed.
    #[error("newton step failed")]
    LinearSolve(#[from] LinearSolveError),

    /// The bracketed solver could not run.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),
}

impl From<newton::Error<DomainError, Infallible>> for SizingError {
    fn from(err: newton::Error<DomainError, Infallible>) -> Self {
        match err {
            newton::Error::Model(err) => Self::Domain(err),
            newton::Error::Problem(never) => match never {},
            newton::Error::LinearSolve(err) => Self::LinearSolve(err),
            newton::Error::NonFiniteResidual { x } => Self::Domain(DomainError::NonPhysical {
                quantity: "no-load current with non-finite residual",
                value: x[0],
            }),
        }
    }
}
