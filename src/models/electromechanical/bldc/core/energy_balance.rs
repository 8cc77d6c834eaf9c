//! Energy balance that closes the coupled sizing and electrical models.
//!
//! The no-load current is consistent only when the electrical input power
//! `current × voltage` equals the shaft power plus all losses.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Power},
    power::watt,
};

use super::{
    DesignParameters, DomainError, SizingState,
    electrical::{self, ElectricalState},
};

/// Electrical input power minus the power the motor consumes.
///
/// Zero at a physically consistent operating point.
#[must_use]
pub fn residual(state: &ElectricalState) -> Power {
    let electrical_power: Power = state.current * state.voltage;
    electrical_power - state.power_input
}

/// Model adapter exposing the no-load current as the sole input.
///
/// Sizing does not depend on the no-load current, so it is evaluated once
/// up front and reused for every call.
pub(super) struct NoLoadCurrentModel<'a> {
    params: &'a DesignParameters,
    sizing: &'a SizingState,
}

impl<'a> NoLoadCurrentModel<'a> {
    pub(super) fn new(params: &'a DesignParameters, sizing: &'a SizingState) -> Self {
        Self { params, sizing }
    }
}

impl Model for NoLoadCurrentModel<'_> {
    type Input = ElectricCurrent;
    type Output = ElectricalState;
    type Error = DomainError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        electrical::evaluate(self.params, self.sizing, *input)
    }
}

/// Equation problem whose residual is the energy balance, in watts.
pub(super) struct EnergyBalanceProblem;

impl EquationProblem<1> for EnergyBalanceProblem {
    type Input = ElectricCurrent;
    type Output = ElectricalState;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ElectricCurrent::new::<ampere>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([residual(output).get::<watt>()])
    }
}
