//! Damped Newton-Raphson solver for [`twine_core`] equation problems.
//!
//! The solver drives a [`Model`] through an [`EquationProblem<N>`] that maps
//! the unknowns `x` to model input and turns model output into residuals.
//! Each step builds a central-difference Jacobian, solves for the Newton
//! direction with restarted GMRES, and applies a damped step that is halved
//! while the trial point fails or does not reduce the residual norm.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use twine_bldc::support::newton::{self, Status};
//! use twine_core::{EquationProblem, Model};
//!
//! struct Square;
//!
//! impl Model for Square {
//!     type Input = f64;
//!     type Output = f64;
//!     type Error = Infallible;
//!
//!     fn call(&self, x: &f64) -> Result<f64, Infallible> {
//!         Ok(x * x)
//!     }
//! }
//!
//! struct Target(f64);
//!
//! impl EquationProblem<1> for Target {
//!     type Input = f64;
//!     type Output = f64;
//!     type Error = Infallible;
//!
//!     fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
//!         Ok(x[0])
//!     }
//!
//!     fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Infallible> {
//!         Ok([output - self.0])
//!     }
//! }
//!
//! let solution = newton::solve(&Square, &Target(2.0), [1.0], &newton::Config::default()).unwrap();
//! assert_eq!(solution.status, Status::Converged);
//! assert!((solution.x[0] - 2.0_f64.sqrt()).abs() < 1e-4);
//! ```

mod config;
mod error;
mod gmres;

pub use config::{Config, LinearConfig};
pub use error::{Error, LinearSolveError};

use log::trace;
use twine_core::{EquationProblem, Model};

/// Termination status of a Newton solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The largest residual magnitude is within tolerance.
    Converged,

    /// The iteration cap was reached without meeting the tolerance.
    MaxIters,
}

/// Model input and output at a single point.
#[derive(Debug, Clone)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

/// Final state of a Newton solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// How the solve ended.
    pub status: Status,

    /// Unknowns at the final point.
    pub x: [f64; N],

    /// Residuals at the final point.
    pub residuals: [f64; N],

    /// Number of Newton steps taken.
    pub iters: usize,

    /// Model input and output at the final point.
    pub snapshot: Snapshot<I, O>,
}

/// Solves `problem` for the unknowns that drive its residuals to zero.
///
/// The model is evaluated at `x0` before any step is attempted, so an
/// infeasible initial guess fails immediately with [`Error::Model`].
///
/// Reaching `config.max_iters` is reported as [`Status::MaxIters`], not as an error.
///
/// # Errors
///
/// Returns an [`Error`] if the model or problem fails at the initial point,
/// if every halving of a step fails, if a residual is non-finite, or if the
/// linear step solve fails.
pub fn solve<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let mut point = Point::evaluate(model, problem, x0)?;
    let mut iters = 0;

    loop {
        let norm = max_norm(&point.residuals);

        if norm <= config.residual_tol {
            return Ok(point.into_solution(Status::Converged, iters));
        }
        if iters >= config.max_iters {
            return Ok(point.into_solution(Status::MaxIters, iters));
        }

        let jacobian = jacobian(model, problem, &point.x, config.fd_rel_step)?;
        let rhs = point.residuals.map(|r| -r);
        let step = gmres::solve(&jacobian, &rhs, &config.linear)?;

        point = damped_step(model, problem, point, &step, config)?;
        iters += 1;

        trace!(
            "newton iter {iters}: x={:?} residual={:e}",
            point.x,
            max_norm(&point.residuals)
        );
    }
}

/// An evaluated point: unknowns, model input and output, and residuals.
struct Point<I, O, const N: usize> {
    x: [f64; N],
    input: I,
    output: O,
    residuals: [f64; N],
}

impl<I, O, const N: usize> Point<I, O, N> {
    fn evaluate<M, P>(
        model: &M,
        problem: &P,
        x: [f64; N],
    ) -> Result<Self, Error<M::Error, P::Error>>
    where
        M: Model<Input = I, Output = O>,
        P: EquationProblem<N, Input = I, Output = O>,
    {
        let input = problem.input(&x).map_err(Error::Problem)?;
        let output = model.call(&input).map_err(Error::Model)?;
        let residuals = problem.residuals(&input, &output).map_err(Error::Problem)?;

        if residuals.iter().any(|r| !r.is_finite()) {
            return Err(Error::NonFiniteResidual { x: x.to_vec() });
        }

        Ok(Self {
            x,
            input,
            output,
            residuals,
        })
    }

    fn into_solution(self, status: Status, iters: usize) -> Solution<I, O, N> {
        Solution {
            status,
            x: self.x,
            residuals: self.residuals,
            iters,
            snapshot: Snapshot {
                input: self.input,
                output: self.output,
            },
        }
    }
}

/// Central-difference Jacobian `J[i][k] = ∂r_i / ∂x_k`.
fn jacobian<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: &[f64; N],
    rel_step: f64,
) -> Result<[[f64; N]; N], Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let mut jacobian = [[0.0; N]; N];

    for k in 0..N {
        let h = rel_step * x[k].abs().max(1.0);

        let mut forward = *x;
        forward[k] += h;
        let mut backward = *x;
        backward[k] -= h;

        let r_forward = Point::evaluate(model, problem, forward)?.residuals;
        let r_backward = Point::evaluate(model, problem, backward)?.residuals;

        for (row, (rf, rb)) in jacobian.iter_mut().zip(r_forward.iter().zip(&r_backward)) {
            row[k] = (rf - rb) / (2.0 * h);
        }
    }

    Ok(jacobian)
}

/// Applies a damped Newton step, halving it until the residual norm decreases.
///
/// After `config.max_step_halvings` rejections the last trial is accepted if
/// it evaluated, otherwise its error is returned.
fn damped_step<M, P, const N: usize>(
    model: &M,
    problem: &P,
    point: Point<M::Input, M::Output, N>,
    step: &[f64; N],
    config: &Config,
) -> Result<Point<M::Input, M::Output, N>, Error<M::Error, P::Error>>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let norm = max_norm(&point.residuals);
    let mut lambda = config.damping;
    let mut halvings = 0;

    loop {
        let x: [f64; N] = std::array::from_fn(|i| point.x[i] + lambda * step[i]);
        let last_try = halvings >= config.max_step_halvings;

        match Point::evaluate(model, problem, x) {
            Ok(trial) if last_try || max_norm(&trial.residuals) < norm => return Ok(trial),
            Err(err) if last_try => return Err(err),
            Ok(_) | Err(_) => {
                trace!("newton step rejected at lambda={lambda:e}, halving");
            }
        }

        lambda *= 0.5;
        halvings += 1;
    }
}

fn max_norm<const N: usize>(v: &[f64; N]) -> f64 {
    v.iter().fold(0.0, |acc, vi| acc.max(vi.abs()))
}
