//! Hydrocarbon properties consumed by the fate models.
//!
//! Profiles are never hard-coded in the engine; they come from a [`Catalog`]
//! built from tabular reference data.

mod catalog;

use std::fmt;

use marea_core::{
    InvalidParameter, constrain,
    constraint::{Constrained, StrictlyPositive},
    ensure_finite,
};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Mass, MassDensity, Volume},
    mass_density::kilogram_per_cubic_meter,
};

pub use catalog::{Catalog, CatalogError};

/// Density of water at 60 °F, the reference for API gravity.
const WATER_DENSITY_60F: f64 = 999.016; // kg/m³

/// Broad family a hydrocarbon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrocarbonKind {
    Crude,
    Refined,
    Residual,
    Other,
}

impl fmt::Display for HydrocarbonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Crude => "crude oil",
            Self::Refined => "refined product",
            Self::Residual => "residual fuel",
            Self::Other => "other",
        })
    }
}

/// One row of reference data, as stored in a catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrocarbonRecord {
    pub name: String,
    pub api_gravity: f64,
    /// First-order rate constant at the reference temperature, in day⁻¹.
    pub biodegradation_rate: f64,
    #[serde(rename = "type")]
    pub kind: HydrocarbonKind,
    pub reference: String,
}

/// A validated hydrocarbon profile.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrocarbonProfile {
    name: String,
    api_gravity: f64,
    base_biodegradation_rate: Constrained<f64, StrictlyPositive>,
    kind: HydrocarbonKind,
    reference: String,
}

impl HydrocarbonProfile {
    /// Validates a catalog record.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if the biodegradation rate is not finite
    /// and strictly positive, or if the API gravity is not finite or does not exceed
    /// -131.5 (which would give a non-positive specific gravity).
    pub fn new(record: HydrocarbonRecord) -> Result<Self, InvalidParameter> {
        let HydrocarbonRecord {
            name,
            api_gravity,
            biodegradation_rate,
            kind,
            reference,
        } = record;

        ensure_finite("api_gravity", api_gravity)?;
        constrain::<f64, StrictlyPositive>("api_gravity", api_gravity + 131.5)?;
        ensure_finite("biodegradation_rate", biodegradation_rate)?;

        Ok(Self {
            name,
            api_gravity,
            base_biodegradation_rate: constrain("biodegradation_rate", biodegradation_rate)?,
            kind,
            reference,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn api_gravity(&self) -> f64 {
        self.api_gravity
    }

    /// Biodegradation rate constant at the reference temperature, in day⁻¹.
    #[must_use]
    pub fn base_biodegradation_rate(&self) -> f64 {
        self.base_biodegradation_rate.into_inner()
    }

    #[must_use]
    pub fn kind(&self) -> HydrocarbonKind {
        self.kind
    }

    /// Citation for the reference values.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Specific gravity at 60 °F, `141.5 / (API + 131.5)`.
    #[must_use]
    pub fn specific_gravity(&self) -> f64 {
        141.5 / (self.api_gravity + 131.5)
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(self.specific_gravity() * WATER_DENSITY_60F)
    }

    /// Mass of the given volume of this hydrocarbon.
    #[must_use]
    pub fn mass_of(&self, volume: Volume) -> Mass {
        volume * self.density()
    }
}

impl From<&HydrocarbonProfile> for HydrocarbonRecord {
    fn from(profile: &HydrocarbonProfile) -> Self {
        Self {
            name: profile.name.clone(),
            api_gravity: profile.api_gravity,
            biodegradation_rate: profile.base_biodegradation_rate(),
            kind: profile.kind,
            reference: profile.reference.clone(),
        }
    }
}
