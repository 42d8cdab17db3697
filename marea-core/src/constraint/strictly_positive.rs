use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs `Constrained<T, StrictlyPositive>` if `value > 0`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::Zero`] if equal to zero.
    /// - [`ConstraintError::Negative`] if less than zero.
    /// - [`ConstraintError::NotANumber`] if the comparison is undefined.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
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

    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn accepts_positive() {
        assert_eq!(StrictlyPositive::new(0.03).unwrap().into_inner(), 0.03);
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(1.0)).is_ok());
    }

    #[test]
    fn rejects_zero_negative_and_nan() {
        let errors: Vec<_> = [0.0, -0.5, f64::NAN]
            .into_iter()
            .map(|v| StrictlyPositive::new(v).unwrap_err())
            .collect();

        assert_eq!(
            errors,
            [
                ConstraintError::Zero,
                ConstraintError::Negative,
                ConstraintError::NotANumber,
            ]
        );
    }
}
