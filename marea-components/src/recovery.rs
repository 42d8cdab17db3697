//! Response methods applied to the spill and the volume they account for.
//!
//! Each method is an explicit optional field of [`RecoveryConfiguration`]:
//! a method that is not deployed is `None`, never a zero placeholder, and a
//! deployed method carries validated parameters.

use std::fmt;

use marea_core::{
    InvalidParameter, constrain,
    constraint::{Constrained, NonNegative, StrictlyPositive, UnitInterval},
    ensure_finite,
};
use uom::{
    ConstZero,
    si::f64::{Mass, SpecificVolume, Volume},
};

/// A response method that can be deployed on a spill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryMethod {
    Containment,
    Skimmers,
    Absorbents,
    Dispersants,
}

impl fmt::Display for RecoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Containment => "containment booms",
            Self::Skimmers => "skimmers",
            Self::Absorbents => "absorbents",
            Self::Dispersants => "dispersants",
        })
    }
}

/// Mechanical recovery by skimmers, measured as the volume recovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skimmers {
    recovered: Constrained<Volume, NonNegative>,
}

impl Skimmers {
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if the recovered volume is negative or
    /// not finite.
    pub fn new(recovered: Volume) -> Result<Self, InvalidParameter> {
        ensure_finite("skimmer_recovered_volume", recovered.value)?;

        Ok(Self {
            recovered: constrain("skimmer_recovered_volume", recovered)?,
        })
    }

    #[must_use]
    pub fn recovered(&self) -> Volume {
        self.recovered.into_inner()
    }
}

/// Sorbent material recovered from the slick.
///
/// The retained volume is `dry_mass · max_capacity · saturation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorbents {
    dry_mass: Constrained<Mass, NonNegative>,
    max_capacity: Constrained<SpecificVolume, StrictlyPositive>,
    saturation: Constrained<f64, UnitInterval>,
}

impl Absorbents {
    /// Creates an absorbent deployment.
    ///
    /// - `dry_mass`: mass of sorbent before use.
    /// - `max_capacity`: volume of oil held per unit dry mass at full saturation.
    /// - `saturation`: effective share of that capacity actually used.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if the mass is negative, the capacity is
    /// not strictly positive, either is not finite, or the saturation lies
    /// outside `[0, 1]`.
    pub fn new(
        dry_mass: Mass,
        max_capacity: SpecificVolume,
        saturation: f64,
    ) -> Result<Self, InvalidParameter> {
        ensure_finite("absorbent_dry_mass", dry_mass.value)?;
        ensure_finite("absorbent_max_capacity", max_capacity.value)?;

        Ok(Self {
            dry_mass: constrain("absorbent_dry_mass", dry_mass)?,
            max_capacity: constrain("absorbent_max_capacity", max_capacity)?,
            saturation: constrain("absorbent_saturation", saturation)?,
        })
    }

    #[must_use]
    pub fn dry_mass(&self) -> Mass {
        self.dry_mass.into_inner()
    }

    #[must_use]
    pub fn max_capacity(&self) -> SpecificVolume {
        self.max_capacity.into_inner()
    }

    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.saturation.into_inner()
    }

    /// Volume of oil retained by the sorbent.
    #[must_use]
    pub fn recovered(&self) -> Volume {
        self.dry_mass() * self.max_capacity() * self.saturation()
    }
}

/// Chemical dispersant application.
///
/// Dispersants push more oil into the water column, raising both dispersion
/// and dissolution by the factor `1 + dissolution_increase`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispersants {
    dissolution_increase: Constrained<f64, UnitInterval>,
}

impl Dispersants {
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if the increase lies outside `[0, 1]`.
    pub fn new(dissolution_increase: f64) -> Result<Self, InvalidParameter> {
        Ok(Self {
            dissolution_increase: constrain(
                "dispersant_dissolution_increase",
                dissolution_increase,
            )?,
        })
    }

    #[must_use]
    pub fn dissolution_increase(&self) -> f64 {
        self.dissolution_increase.into_inner()
    }

    /// Multiplier applied to the dispersion and dissolution losses.
    #[must_use]
    pub fn factor(&self) -> f64 {
        1.0 + self.dissolution_increase()
    }
}

/// The response methods deployed on a spill.
///
/// Containment has no volumetric effect of its own; it is tracked so the
/// deployed methods can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecoveryConfiguration {
    pub containment: bool,
    pub skimmers: Option<Skimmers>,
    pub absorbents: Option<Absorbents>,
    pub dispersants: Option<Dispersants>,
}

impl RecoveryConfiguration {
    /// A response with no methods deployed.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_containment(self) -> Self {
        Self {
            containment: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_skimmers(self, skimmers: Skimmers) -> Self {
        Self {
            skimmers: Some(skimmers),
            ..self
        }
    }

    #[must_use]
    pub fn with_absorbents(self, absorbents: Absorbents) -> Self {
        Self {
            absorbents: Some(absorbents),
            ..self
        }
    }

    #[must_use]
    pub fn with_dispersants(self, dispersants: Dispersants) -> Self {
        Self {
            dispersants: Some(dispersants),
            ..self
        }
    }

    /// Deployed methods, in a fixed order.
    #[must_use]
    pub fn methods(&self) -> Vec<RecoveryMethod> {
        [
            (self.containment, RecoveryMethod::Containment),
            (self.skimmers.is_some(), RecoveryMethod::Skimmers),
            (self.absorbents.is_some(), RecoveryMethod::Absorbents),
            (self.dispersants.is_some(), RecoveryMethod::Dispersants),
        ]
        .into_iter()
        .filter_map(|(active, method)| active.then_some(method))
        .collect()
    }

    /// Volume reported by skimmers, or zero if none were deployed.
    #[must_use]
    pub fn skimmer_volume(&self) -> Volume {
        self.skimmers.map_or(Volume::ZERO, |s| s.recovered())
    }

    /// Volume retained by absorbents, or zero if none were deployed.
    #[must_use]
    pub fn absorbent_volume(&self) -> Volume {
        self.absorbents.map_or(Volume::ZERO, |a| a.recovered())
    }

    /// Dispersion/dissolution multiplier, `1` without dispersants.
    #[must_use]
    pub fn dispersion_factor(&self) -> f64 {
        self.dispersants.map_or(1.0, |d| d.factor())
    }
}
