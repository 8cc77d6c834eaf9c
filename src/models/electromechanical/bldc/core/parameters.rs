use uom::si::{
    angular_velocity::revolution_per_minute,
    electric_current::ampere,
    f64::{AngularVelocity, ElectricCurrent, Power, Ratio},
    power::watt,
    ratio::ratio,
};

use crate::support::constraint::{
    Constrained, ConstraintError, StrictlyPositive, UnitIntervalLowerOpen, UnitIntervalUpperOpen,
};

use super::DomainError;

/// Design targets for sizing a brushless DC motor.
///
/// The record is immutable for the duration of a solve.
/// Ranges are checked when a model is evaluated, not on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParameters {
    /// Maximum shaft speed (RPM), strictly positive.
    pub max_speed: AngularVelocity,

    /// Design shaft power (W), strictly positive.
    pub design_power: Power,

    /// Maximum phase current (A), strictly positive.
    pub max_current: ElectricCurrent,

    /// Number of electrical phases, strictly positive.
    pub n_phases: f64,

    /// Operating shaft speed (RPM), strictly positive.
    pub speed: AngularVelocity,

    /// Base speed over max speed, in `(0, 1]`.
    pub kappa: Ratio,

    /// Number of rotor pole pairs, strictly positive.
    pub pole_pairs: f64,

    /// Stack length over rotor diameter, strictly positive.
    pub length_to_diameter: Ratio,

    /// Inner over outer iron core radius, in `[0, 1)`.
    ///
    /// Zero is a solid core.
    pub core_radius_ratio: Ratio,
}

/// Validated design parameters as plain numbers in the units of the empirical fits.
#[derive(Debug, Clone, Copy)]
pub(super) struct Scalars {
    pub(super) max_rpm: f64,
    pub(super) design_power: f64,
    pub(super) max_current: f64,
    pub(super) n_phases: f64,
    pub(super) kappa: f64,
    pub(super) pole_pairs: f64,
    pub(super) length_to_diameter: f64,
    pub(super) core_radius_ratio: f64,
}

impl DesignParameters {
    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidParameter`] naming the first field out of range.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.scalars().map(|_| ())
    }

    pub(super) fn scalars(&self) -> Result<Scalars, DomainError> {
        positive("speed", self.speed)?;

        Ok(Scalars {
            max_rpm: positive("max_speed", self.max_speed)?.get::<revolution_per_minute>(),
            design_power: positive("design_power", self.design_power)?.get::<watt>(),
            max_current: positive("max_current", self.max_current)?.get::<ampere>(),
            n_phases: positive("n_phases", self.n_phases)?,
            kappa: checked::<_, UnitIntervalLowerOpen>("kappa", self.kappa)?.get::<ratio>(),
            pole_pairs: positive("pole_pairs", self.pole_pairs)?,
            length_to_diameter: positive("length_to_diameter", self.length_to_diameter)?
                .get::<ratio>(),
            core_radius_ratio: checked::<_, UnitIntervalUpperOpen>(
                "core_radius_ratio",
                self.core_radius_ratio,
            )?
            .get::<ratio>(),
        })
    }
}

pub(super) fn positive<T>(name: &'static str, value: T) -> Result<T, DomainError>
where
    T: PartialOrd + num_traits::Zero,
{
    checked::<T, StrictlyPositive>(name, value)
}

fn checked<T, C>(name: &'static str, value: T) -> Result<T, DomainError>
where
    C: crate::support::constraint::Constraint<T>,
{
    Constrained::<T, C>::new(value)
        .map(Constrained::into_inner)
        .map_err(|source: ConstraintError| DomainError::InvalidParameter { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::electromechanical::bldc::core::test_support::large_motor;

    #[test]
    fn reference_parameters_are_valid() {
        let scalars = large_motor().scalars().unwrap();
        assert_relative_eq!(scalars.max_rpm, 2500.0, max_relative = 1e-12);
        assert_relative_eq!(scalars.design_power, 110_000.0);
        assert_relative_eq!(scalars.core_radius_ratio, 0.7);
    }

    #[test]
    fn names_the_offending_field() {
        let params = DesignParameters {
            design_power: Power::new::<watt>(-1.0),
            ..large_motor()
        };
        assert_eq!(
            params.validate(),
            Err(DomainError::InvalidParameter {
                name: "design_power",
                source: ConstraintError::Negative,
            })
        );
    }

    #[test]
    fn rejects_zero_max_speed() {
        let params = DesignParameters {
            max_speed: AngularVelocity::new::<revolution_per_minute>(0.0),
            ..large_motor()
        };
        assert!(matches!(
            params.validate(),
            Err(DomainError::InvalidParameter {
                name: "max_speed",
                source: ConstraintError::Zero,
            })
        ));
    }

    #[test]
    fn kappa_of_one_is_allowed() {
        let params = DesignParameters {
            kappa: Ratio::new::<ratio>(1.0),
            ..large_motor()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn core_radius_ratio_bounds() {
        let solid = DesignParameters {
            core_radius_ratio: Ratio::new::<ratio>(0.0),
            ..large_motor()
        };
        assert!(solid.validate().is_ok());

        for hollow in [1.0, 1.5] {
            let params = DesignParameters {
                core_radius_ratio: Ratio::new::<ratio>(hollow),
                ..large_motor()
            };
            assert!(matches!(
                params.validate(),
                Err(DomainError::InvalidParameter {
                    name: "core_radius_ratio",
                    source: ConstraintError::AboveMaximum,
                })
            ));
        }
    }
}
