//! Coupled sizing and electrical solve for a brushless DC motor.
//!
//! Sizing gives the geometry, torque limits, and losses. The electrical
//! model gives terminal quantities, but needs the no-load current, which is
//! only correct once the energy balance closes. The solvers here iterate on
//! the no-load current until electrical input power matches shaft power
//! plus losses.

mod config;
mod electrical;
mod energy_balance;
mod error;
mod parameters;
mod results;
mod sizing;

#[cfg(test)]
mod test_support;

pub use config::BldcConfig;
pub use electrical::{ElectricalState, evaluate as evaluate_electrical};
pub use energy_balance::residual;
pub use error::{DomainError, SizingError};
pub use parameters::DesignParameters;
pub use results::MotorResults;
pub use sizing::{SizingState, Windage, size};

use log::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    electric_current::ampere, electrical_resistance::ohm, f64::Power, mass::kilogram, power::watt,
};

use crate::support::newton;

use energy_balance::{EnergyBalanceProblem, NoLoadCurrentModel};

/// Solves for the motor's consistent operating point with damped Newton-Raphson.
///
/// Sizing is evaluated once; each iteration evaluates the electrical model
/// at the current no-load current guess, starting from
/// `config.initial_no_load_current`.
///
/// # Errors
///
/// - [`SizingError::Domain`] if a parameter is out of range or the initial
///   guess is not below the max current. This is raised before any step.
/// - [`SizingError::NonConvergence`] if the residual is still above
///   tolerance after `config.max_iters` iterations.
/// - [`SizingError::LinearSolve`] if a Newton step cannot be solved.
pub fn solve(params: &DesignParameters, config: &BldcConfig) -> Result<MotorResults, SizingError> {
    let sizing = size(params, params.speed, config.windage)?;
    log_sizing(&sizing);

    let model = NoLoadCurrentModel::new(params, &sizing);
    let x0 = [config.initial_no_load_current.get::<ampere>()];

    let solution = newton::solve(&model, &EnergyBalanceProblem, x0, &config.newton())?;

    let residual = Power::new::<watt>(solution.residuals[0]);

    if solution.status != newton::Status::Converged {
        return Err(SizingError::NonConvergence {
            no_load_current: solution.snapshot.input,
            residual,
            iters: solution.iters,
        });
    }

    debug!(
        "energy balance converged in {} iterations: no-load current {:.6} A, residual {:e} W",
        solution.iters,
        solution.x[0],
        solution.residuals[0],
    );

    Ok(MotorResults {
        sizing,
        electrical: solution.snapshot.output,
        residual,
        iters: solution.iters,
    })
}

/// Solves for the motor's consistent operating point by bisection.
///
/// The no-load current is bracketed between zero and the max current.
/// Trial currents the electrical model rejects lie at or above the max
/// current, so bisection treats them as having a positive residual.
///
/// # Errors
///
/// - [`SizingError::Domain`] if a parameter is out of range.
/// - [`SizingError::Bisection`] if the bracket does not contain a root.
/// - [`SizingError::NonConvergence`] if the iteration limit is reached.
pub fn solve_bracketed(
    params: &DesignParameters,
    config: &BldcConfig,
) -> Result<MotorResults, SizingError> {
    let sizing = size(params, params.speed, config.windage)?;
    log_sizing(&sizing);

    let model = NoLoadCurrentModel::new(params, &sizing);

    let solution = bisection::solve(
        &model,
        &EnergyBalanceProblem,
        [0.0, params.max_current.get::<ampere>()],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(SizingError::NonConvergence {
            no_load_current: solution.snapshot.output.no_load_current,
            residual: Power::new::<watt>(solution.residual),
            iters: solution.iters,
        });
    }

    let electrical = solution.snapshot.output;
    debug!(
        "energy balance bracketed in {} iterations: no-load current {:.6} A",
        solution.iters,
        electrical.no_load_current.get::<ampere>(),
    );

    Ok(MotorResults {
        sizing,
        residual: residual(&electrical),
        electrical,
        iters: solution.iters,
    })
}

fn log_sizing(sizing: &SizingState) {
    debug!(
        "sized motor: mass {:.4} kg, winding resistance {:.6} ohm, iron loss {:.3} W",
        sizing.mass.get::<kilogram>(),
        sizing.winding_resistance.get::<ohm>(),
        sizing.iron_loss.get::<watt>(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use approx::assert_relative_eq;
    use uom::si::{
        electric_potential::volt,
        f64::{ElectricCurrent, Ratio},
        ratio::ratio,
    };

    use super::test_support::{large_motor, small_motor};

    #[test]
    fn large_motor_reference_case() {
        let results = solve(&large_motor(), &BldcConfig::default()).unwrap();
        let e = &results.electrical;

        assert_relative_eq!(
            e.no_load_current.get::<ampere>(),
            3.53497914176,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            e.current.get::<ampere>(),
            226.767489571,
            max_relative = 1e-6
        );
        assert_relative_eq!(e.voltage.get::<volt>(), 387.053305981, max_relative = 1e-6);
        assert!(results.residual.get::<watt>().abs() <= 1e-4);
        assert!(results.iters < 10);
    }

    #[test]
    fn small_motor_reference_case() {
        let results = solve(&small_motor(), &BldcConfig::default()).unwrap();
        let e = &results.electrical;

        assert_relative_eq!(
            e.no_load_current.get::<ampere>(),
            2.83587716914,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            e.current.get::<ampere>(),
            25.2153759296,
            max_relative = 1e-5
        );
        assert_relative_eq!(e.voltage.get::<volt>(), 7.71904539448, max_relative = 1e-5);
        assert_relative_eq!(
            e.power_input.get::<watt>(),
            194.63856993,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            results.sizing.mass.get::<kilogram>(),
            1.22089240568,
            max_relative = 1e-6
        );
    }

    #[test]
    fn converged_point_conserves_energy() {
        for params in [large_motor(), small_motor()] {
            let results = solve(&params, &BldcConfig::default()).unwrap();
            let s = &results.sizing;
            let e = &results.electrical;

            let electrical_power = e.current.get::<ampere>() * e.voltage.get::<volt>();
            let consumed =
                (s.mech_power + s.windage_loss + s.iron_loss + e.copper_loss).get::<watt>();

            assert!((electrical_power - consumed).abs() <= 1e-4);
            assert_relative_eq!(
                residual(e).get::<watt>(),
                results.residual.get::<watt>(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let params = large_motor();
        let config = BldcConfig::default();

        let first = solve(&params, &config).unwrap();
        let second = solve(&params, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parallel_solves_match_sequential() {
        let params = [large_motor(), small_motor(), large_motor()];
        let config = &BldcConfig::default();

        let sequential: Vec<_> = params.iter().map(|p| solve(p, config).unwrap()).collect();

        let parallel: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = params
                .iter()
                .map(|p| scope.spawn(move || solve(p, config).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn max_current_below_initial_guess_is_a_domain_error() {
        let params = DesignParameters {
            max_current: ElectricCurrent::new::<ampere>(1.0),
            ..large_motor()
        };

        let err = solve(&params, &BldcConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SizingError::Domain(DomainError::NoLoadCurrentTooHigh { .. })
        ));
    }

    #[test]
    fn initial_guess_just_below_max_current_converges() {
        let max_current = ElectricCurrent::new::<ampere>(40.5);
        let params = DesignParameters {
            max_current,
            ..large_motor()
        };

        let results = solve(&params, &BldcConfig::default()).unwrap();
        let e = &results.electrical;

        assert!(results.iters > 0);
        assert!(e.no_load_current < max_current);
        assert!(results.residual.get::<watt>().abs() <= 1e-4);
    }

    #[test]
    fn invalid_parameters_fail_before_solving() {
        let params = DesignParameters {
            core_radius_ratio: Ratio::new::<ratio>(1.0),
            ..large_motor()
        };

        let err = solve(&params, &BldcConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SizingError::Domain(DomainError::InvalidParameter {
                name: "core_radius_ratio",
                ..
            })
        ));
    }

    #[test]
    fn iteration_cap_is_non_convergence() {
        let config = BldcConfig {
            max_iters: 1,
            ..BldcConfig::default()
        };

        match solve(&large_motor(), &config) {
            Err(SizingError::NonConvergence {
                no_load_current,
                residual,
                iters,
            }) => {
                assert_eq!(iters, 1);
                assert!(residual.get::<watt>().abs() > 1e-4);
                assert!(no_load_current.get::<ampere>() < 40.0);
            }
            other => panic!("expected non-convergence, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_jacobian_is_a_linear_solve_error() {
        // A zero perturbation makes every Jacobian entry 0/0.
        let config = BldcConfig {
            fd_rel_step: 0.0,
            ..BldcConfig::default()
        };

        let err = solve(&large_motor(), &config).unwrap_err();
        assert!(matches!(err, SizingError::LinearSolve(_)));
    }

    #[test]
    fn bracketed_solve_agrees_with_newton() {
        let config = BldcConfig::default();

        for params in [large_motor(), small_motor()] {
            let newton = solve(&params, &config).unwrap();
            let bracketed = solve_bracketed(&params, &config).unwrap();

            assert_relative_eq!(
                bracketed.electrical.no_load_current.get::<ampere>(),
                newton.electrical.no_load_current.get::<ampere>(),
                max_relative = 1e-5
            );
            assert!(bracketed.residual.get::<watt>().abs() <= 1e-4);
            assert_eq!(bracketed.sizing, newton.sizing);
        }
    }

    #[test]
    fn windage_raises_the_no_load_current() {
        let params = large_motor();
        let neglected = solve(&params, &BldcConfig::default()).unwrap();
        let aerodynamic = solve(
            &params,
            &BldcConfig {
                windage: Windage::Aerodynamic,
                ..BldcConfig::default()
            },
        )
        .unwrap();

        assert!(
            aerodynamic.electrical.no_load_current > neglected.electrical.no_load_current
        );
        assert!(aerodynamic.electrical.power_input > neglected.electrical.power_input);
    }

    #[test]
    fn efficiency_is_below_one() {
        let results = solve(&large_motor(), &BldcConfig::default()).unwrap();
        let efficiency = results.efficiency().get::<ratio>();

        assert_relative_eq!(efficiency, 83_600.0 / 87_771.106527311, max_relative = 1e-6);
        assert!(efficiency < 1.0);
    }
}
