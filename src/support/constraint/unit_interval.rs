use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used with the unit interval constraints.
///
/// Implementations should ensure that `zero() ≤ one()` under the type's
/// `PartialOrd` so the interval is well-formed.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Compares a value against both unit bounds, or `None` if either comparison is undefined.
fn bounds<T: UnitBounds>(value: &T) -> Option<(Ordering, Ordering)> {
    Some((
        value.partial_cmp(&T::zero())?,
        value.partial_cmp(&T::one())?,
    ))
}

/// Marker type enforcing that a value lies in `0 < x ≤ 1`.
///
/// Used for the base-to-max speed ratio, where a base speed of zero would
/// imply infinite torque.
///
/// ```
/// use twine_bldc::support::constraint::UnitIntervalLowerOpen;
/// use uom::si::{f64::Ratio, ratio::ratio};
///
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<ratio>(0.5)).is_ok());
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<ratio>(1.0)).is_ok());
/// assert!(UnitIntervalLowerOpen::new(Ratio::new::<ratio>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Constructs `Constrained<T, UnitIntervalLowerOpen>` if 0 < value ≤ 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalLowerOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match bounds(value) {
            None => Err(ConstraintError::NotANumber),
            Some((Ordering::Less | Ordering::Equal, _)) => Err(ConstraintError::BelowMinimum),
            Some((_, Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            Some(_) => Ok(()),
        }
    }
}

/// Marker type enforcing that a value lies in `0 ≤ x < 1`.
///
/// Used for the inner-to-outer core radius ratio: zero is a solid core,
/// one would leave no iron at all.
///
/// ```
/// use twine_bldc::support::constraint::UnitIntervalUpperOpen;
///
/// assert!(UnitIntervalUpperOpen::new(0.0).is_ok());
/// assert!(UnitIntervalUpperOpen::new(0.7).is_ok());
/// assert!(UnitIntervalUpperOpen::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalUpperOpen;

impl UnitIntervalUpperOpen {
    /// Constructs `Constrained<T, UnitIntervalUpperOpen>` if 0 ≤ value < 1.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalUpperOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalUpperOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalUpperOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match bounds(value) {
            None => Err(ConstraintError::NotANumber),
            Some((Ordering::Less, _)) => Err(ConstraintError::BelowMinimum),
            Some((_, Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_open_rejects_zero_but_accepts_one() {
        assert!(matches!(
            UnitIntervalLowerOpen::new(0.0),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(UnitIntervalLowerOpen::new(1.0).is_ok());
        assert!(matches!(
            UnitIntervalLowerOpen::new(1.000_000_1),
            Err(ConstraintError::AboveMaximum)
        ));
    }

    #[test]
    fn upper_open_accepts_zero_but_rejects_one() {
        assert!(UnitIntervalUpperOpen::new(Ratio::new::<ratio>(0.0)).is_ok());
        assert!(matches!(
            UnitIntervalUpperOpen::new(Ratio::new::<ratio>(1.0)),
            Err(ConstraintError::AboveMaximum)
        ));
        assert!(matches!(
            UnitIntervalUpperOpen::new(Ratio::new::<ratio>(-0.1)),
            Err(ConstraintError::BelowMinimum)
        ));
    }

    #[test]
    fn nan_is_not_a_number() {
        assert!(matches!(
            UnitIntervalLowerOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
        assert!(matches!(
            UnitIntervalUpperOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }
}
