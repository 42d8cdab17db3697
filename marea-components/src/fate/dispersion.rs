use marea_core::{
    InvalidParameter,
    constraint::{NonNegative, UnitInterval},
};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Velocity, Volume},
    length::meter,
    velocity::meter_per_second,
};

use super::{check, check_finite};

/// Natural dispersion of oil droplets into the water column.
///
/// The dispersed volume is `total · f · dispersion_factor`, where the factor
/// accounts for dispersant application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Dispersion {
    /// Breaking-wave entrainment, `f = min(alpha · U · H, max_fraction)`.
    ///
    /// `U` is wind speed in m/s and `H` significant wave height in m.
    WaveDriven { alpha: f64, max_fraction: f64 },

    /// A constant share of the spilled volume, regardless of sea state.
    FixedFraction { fraction: f64 },
}

impl Default for Dispersion {
    fn default() -> Self {
        Self::WaveDriven {
            alpha: 0.01,
            max_fraction: 0.9,
        }
    }
}

impl Dispersion {
    /// Share of the spilled volume dispersed before any dispersant effect.
    #[must_use]
    pub fn fraction(&self, wind_speed: Velocity, wave_height: Length) -> f64 {
        match *self {
            Self::WaveDriven {
                alpha,
                max_fraction,
            } => {
                let u = wind_speed.get::<meter_per_second>();
                let h = wave_height.get::<meter>();
                let f = alpha * u * h;
                if f > max_fraction {
                    max_fraction
                } else {
                    f
                }
            }
            Self::FixedFraction { fraction } => fraction,
        }
    }

    /// Dispersed volume for a spill of `total`.
    #[must_use]
    pub fn volume(
        &self,
        total: Volume,
        wind_speed: Velocity,
        wave_height: Length,
        dispersion_factor: f64,
    ) -> Volume {
        total * self.fraction(wind_speed, wave_height) * dispersion_factor
    }

    pub(super) fn validate(&self) -> Result<(), InvalidParameter> {
        match *self {
            Self::WaveDriven {
                alpha,
                max_fraction,
            } => {
                check_finite("dispersion_alpha", alpha)?;
                check::<_, NonNegative>("dispersion_alpha", alpha)?;
                check::<_, UnitInterval>("dispersion_max_fraction", max_fraction)
            }
            Self::FixedFraction { fraction } => {
                check::<_, UnitInterval>("dispersion_fraction", fraction)
            }
        }
    }
}
