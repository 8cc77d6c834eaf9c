//! Results of a converged motor sizing solve.

use uom::si::f64::{Power, Ratio};

use super::{ElectricalState, SizingState};

/// Sized motor and its consistent electrical operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorResults {
    /// Geometry, mass, torque limits, and losses.
    pub sizing: SizingState,

    /// Terminal quantities at the converged no-load current.
    pub electrical: ElectricalState,

    /// Energy balance residual at the solution.
    pub residual: Power,

    /// Iterations the solver took.
    pub iters: usize,
}

impl MotorResults {
    /// Shaft power over electrical input power.
    #[must_use]
    pub fn efficiency(&self) -> Ratio {
        self.sizing.mech_power / self.electrical.power_input
    }
}
