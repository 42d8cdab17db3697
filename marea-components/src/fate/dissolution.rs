use marea_core::{
    InvalidParameter,
    constraint::{NonNegative, UnitInterval},
};
use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    f64::{Area, Frequency, MassDensity, Time, Volume},
    frequency::hertz,
    mass_density::kilogram_per_cubic_meter,
    time::second,
    volume::liter,
};

use super::{check, check_finite};

/// Dissolution of soluble components into the water column.
///
/// Both variants are scaled by the dispersion factor, since dispersed
/// droplets expose more surface to the water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Dissolution {
    /// Surface mass transfer, `kLa · S · A · t`.
    ///
    /// This is a calibrated proxy rather than a mass conversion: the product
    /// of the transfer coefficient (s⁻¹), surface concentration (g/L), slick
    /// area (m²) and exposure (s) is read directly as litres dissolved.
    /// The three constants should be tuned together against observations.
    MassTransfer {
        transfer_coefficient: Frequency,
        surface_concentration: MassDensity,
        slick_area: Area,
    },

    /// A constant share of the spilled volume.
    FixedFraction { fraction: f64 },
}

impl Default for Dissolution {
    fn default() -> Self {
        Self::MassTransfer {
            transfer_coefficient: Frequency::new::<hertz>(0.001),
            // 0.02 g/L
            surface_concentration: MassDensity::new::<kilogram_per_cubic_meter>(0.02),
            slick_area: Area::new::<square_meter>(100.0),
        }
    }
}

impl Dissolution {
    /// Dissolved volume for a spill of `total` exposed for `exposure`.
    ///
    /// Nothing dissolves when nothing was spilled.
    #[must_use]
    pub fn volume(&self, total: Volume, exposure: Time, dispersion_factor: f64) -> Volume {
        match *self {
            Self::MassTransfer { .. } if total.get::<liter>() <= 0.0 => {
                Volume::new::<liter>(0.0)
            }
            Self::MassTransfer {
                transfer_coefficient,
                surface_concentration,
                slick_area,
            } => {
                let litres = transfer_coefficient.get::<hertz>()
                    * surface_concentration.get::<kilogram_per_cubic_meter>()
                    * slick_area.get::<square_meter>()
                    * exposure.get::<second>();
                Volume::new::<liter>(litres * dispersion_factor)
            }
            Self::FixedFraction { fraction } => total * fraction * dispersion_factor,
        }
    }

    pub(super) fn validate(&self) -> Result<(), InvalidParameter> {
        match *self {
            Self::MassTransfer {
                transfer_coefficient,
                surface_concentration,
                slick_area,
            } => {
                check_finite("dissolution_transfer_coefficient", transfer_coefficient.value)?;
                check::<_, NonNegative>("dissolution_transfer_coefficient", transfer_coefficient)?;
                check_finite("dissolution_surface_concentration", surface_concentration.value)?;
                check::<_, NonNegative>("dissolution_surface_concentration", surface_concentration)?;
                check_finite("dissolution_slick_area", slick_area.value)?;
                check::<_, NonNegative>("dissolution_slick_area", slick_area)
            }
            Self::FixedFraction { fraction } => {
                check::<_, UnitInterval>("dissolution_fraction", fraction)
            }
        }
    }
}
