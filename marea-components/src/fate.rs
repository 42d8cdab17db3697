//! Sub-models for the weathering processes acting on a slick.
//!
//! Each process is selected and parameterised independently through
//! [`FateModels`]. Where more than one empirical form exists (for example a
//! wave-driven or a fixed-fraction dispersion loss) the choice is an explicit
//! enum variant rather than a separate engine.
//!
//! All sub-models serialize with `serde`; quantities use SI base units.

mod biodegradation;
mod dispersion;
mod dissolution;
mod emulsification;
mod evaporation;

use marea_core::{InvalidParameter, constrain, constraint::Constraint, ensure_finite};
use serde::{Deserialize, Serialize};

pub use biodegradation::Biodegradation;
pub use dispersion::Dispersion;
pub use dissolution::Dissolution;
pub use emulsification::Emulsification;
pub use evaporation::Evaporation;

/// The sub-model chosen for every weathering process.
///
/// The default selection is the wind-driven evaporation power law, wave-driven
/// dispersion, mass-transfer dissolution, 30 % water uptake and
/// temperature-corrected biodegradation.
///
/// # Example
///
/// ```
/// use marea_components::fate::{Dispersion, FateModels};
///
/// let legacy = FateModels {
///     dispersion: Dispersion::FixedFraction { fraction: 0.012 },
///     ..FateModels::default()
/// };
/// assert!(legacy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FateModels {
    pub evaporation: Evaporation,
    pub dispersion: Dispersion,
    pub dissolution: Dissolution,
    pub emulsification: Emulsification,
    pub biodegradation: Biodegradation,
}

impl FateModels {
    /// Checks every sub-model parameter.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        self.evaporation.validate()?;
        self.dispersion.validate()?;
        self.dissolution.validate()?;
        self.emulsification.validate()?;
        self.biodegradation.validate()
    }
}

/// Validates a model parameter, discarding the wrapper.
fn check<T, C: Constraint<T>>(field: &'static str, value: T) -> Result<(), InvalidParameter> {
    constrain::<T, C>(field, value).map(|_| ())
}

/// Checks that a model parameter is a finite number.
fn check_finite(field: &'static str, value: f64) -> Result<(), InvalidParameter> {
    ensure_finite(field, value).map(|_| ())
}
