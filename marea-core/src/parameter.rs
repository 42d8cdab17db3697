use thiserror::Error;

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// A named input parameter that violates its numeric constraint.
///
/// Carries the field name so callers can point at the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid parameter `{field}`: {source}")]
pub struct InvalidParameter {
    pub field: &'static str,
    #[source]
    pub source: ConstraintError,
}

impl InvalidParameter {
    /// Creates an error for `field` caused by `source`.
    #[must_use]
    pub fn new(field: &'static str, source: ConstraintError) -> Self {
        Self { field, source }
    }
}

/// Checks `value` against the constraint `C`, naming `field` on failure.
///
/// The constraint is usually inferred from the destination type:
///
/// ```
/// use marea_core::{
///     InvalidParameter, constrain,
///     constraint::{Constrained, ConstraintError, NonNegative},
/// };
///
/// struct Spill {
///     duration_min: Constrained<f64, NonNegative>,
/// }
///
/// let ok = Spill { duration_min: constrain("duration_min", 60.0).unwrap() };
/// assert_eq!(ok.duration_min.into_inner(), 60.0);
///
/// let err = constrain::<f64, NonNegative>("duration_min", -1.0).unwrap_err();
/// assert_eq!(err, InvalidParameter::new("duration_min", ConstraintError::Negative));
/// ```
///
/// # Errors
///
/// Returns [`InvalidParameter`] if the value does not satisfy `C`.
pub fn constrain<T, C: Constraint<T>>(
    field: &'static str,
    value: T,
) -> Result<Constrained<T, C>, InvalidParameter> {
    Constrained::new(value).map_err(|source| InvalidParameter { field, source })
}

/// Rejects `NaN` and infinite values, naming `field` on failure.
///
/// Quantities are checked through their base-unit value, e.g. `volume.value`.
///
/// # Errors
///
/// - [`ConstraintError::NotANumber`] for `NaN`.
/// - [`ConstraintError::AboveMaximum`] or [`ConstraintError::BelowMinimum`]
///   for positive or negative infinity.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, InvalidParameter> {
    if value.is_nan() {
        Err(InvalidParameter::new(field, ConstraintError::NotANumber))
    } else if value == f64::INFINITY {
        Err(InvalidParameter::new(field, ConstraintError::AboveMaximum))
    } else if value == f64::NEG_INFINITY {
        Err(InvalidParameter::new(field, ConstraintError::BelowMinimum))
    } else {
        Ok(value)
    }
}
