//! Brushless DC motor sizing.
//!
//! [`BldcMotor`] is the [`twine_core::Model`] adapter: it takes
//! [`DesignParameters`] and returns the sized motor at a consistent
//! electrical operating point. The computation lives in the internal
//! `core` module, whose types and solve functions are re-exported here.
//!
//! # Example
//!
//! ```
//! use twine_bldc::models::electromechanical::bldc::{BldcMotor, DesignParameters};
//! use twine_core::Model;
//! use uom::si::{
//!     angular_velocity::revolution_per_minute,
//!     electric_current::ampere,
//!     electric_potential::volt,
//!     f64::{AngularVelocity, ElectricCurrent, Power, Ratio},
//!     power::kilowatt,
//!     ratio::ratio,
//! };
//!
//! let params = DesignParameters {
//!     max_speed: AngularVelocity::new::<revolution_per_minute>(2500.0),
//!     design_power: Power::new::<kilowatt>(110.0),
//!     max_current: ElectricCurrent::new::<ampere>(450.0),
//!     n_phases: 3.0,
//!     speed: AngularVelocity::new::<revolution_per_minute>(1900.0),
//!     kappa: Ratio::new::<ratio>(0.5),
//!     pole_pairs: 6.0,
//!     length_to_diameter: Ratio::new::<ratio>(0.83),
//!     core_radius_ratio: Ratio::new::<ratio>(0.7),
//! };
//!
//! let results = BldcMotor::default().call(&params).unwrap();
//! assert!((results.electrical.voltage.get::<volt>() - 387.05).abs() < 0.01);
//! ```

pub(crate) mod core;

pub use self::core::{
    BldcConfig, DesignParameters, DomainError, ElectricalState, MotorResults, SizingError,
    SizingState, Windage, evaluate_electrical, residual, size, solve, solve_bracketed,
};

use twine_core::Model;

/// How the energy balance is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Damped Newton-Raphson from the configured initial no-load current.
    #[default]
    Newton,

    /// Bisection between zero and the max current.
    Bracketed,
}

/// Sizes a brushless DC motor from its design parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BldcMotor {
    pub config: BldcConfig,
    pub strategy: Strategy,
}

impl BldcMotor {
    /// Creates a motor model that solves with Newton-Raphson.
    #[must_use]
    pub fn new(config: BldcConfig) -> Self {
        Self {
            config,
            strategy: Strategy::Newton,
        }
    }

    /// Creates a motor model that solves by bisection.
    #[must_use]
    pub fn bracketed(config: BldcConfig) -> Self {
        Self {
            config,
            strategy: Strategy::Bracketed,
        }
    }
}

impl Model for BldcMotor {
    type Input = DesignParameters;
    type Output = MotorResults;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        match self.strategy {
            Strategy::Newton => solve(input, &self.config),
            Strategy::Bracketed => solve_bracketed(input, &self.config),
        }
    }
}
