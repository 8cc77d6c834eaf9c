use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Works with plain numbers and with `uom` quantities, which implement
/// [`Zero`].
///
/// # Examples
///
/// ```
/// use twine_bldc::support::constraint::StrictlyPositive;
/// use uom::si::{electric_current::ampere, f64::ElectricCurrent};
///
/// assert!(StrictlyPositive::new(ElectricCurrent::new::<ampere>(450.0)).is_ok());
/// assert!(StrictlyPositive::new(ElectricCurrent::new::<ampere>(0.0)).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        angular_velocity::revolution_per_minute,
        f64::{AngularVelocity, Power},
        power::watt,
    };

    #[test]
    fn floats() {
        assert!(Constrained::<f64, StrictlyPositive>::new(3.0).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-6.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn speeds_and_powers() {
        let rpm = AngularVelocity::new::<revolution_per_minute>(2500.0);
        assert!(StrictlyPositive::new(rpm).is_ok());

        let rpm = AngularVelocity::new::<revolution_per_minute>(-1.0);
        assert!(StrictlyPositive::new(rpm).is_err());

        let power = Power::new::<watt>(0.0);
        assert!(StrictlyPositive::new(power).is_err());
    }
}
