use marea_core::{
    InvalidParameter,
    constraint::{NonNegative, UnitInterval},
};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Time, Velocity},
    time::hour,
    velocity::meter_per_second,
};

use super::{check, check_finite};

/// Empirical wind- and exposure-driven evaporation.
///
/// The evaporated share of the spill is
///
/// ```text
/// f = min(coefficient · U^wind_exponent · t^time_exponent, max_fraction)
/// ```
///
/// with wind speed `U` in m/s and exposure time `t` in hours.
/// The cap reflects the heavy components that never evaporate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evaporation {
    pub coefficient: f64,
    pub wind_exponent: f64,
    pub time_exponent: f64,
    pub max_fraction: f64,
}

impl Default for Evaporation {
    fn default() -> Self {
        Self {
            coefficient: 1e-4,
            wind_exponent: 0.78,
            time_exponent: 0.5,
            max_fraction: 0.9,
        }
    }
}

impl Evaporation {
    /// Share of the spilled volume lost to evaporation, in `[0, max_fraction]`.
    #[must_use]
    pub fn fraction(&self, wind_speed: Velocity, exposure: Time) -> f64 {
        let wind = wind_speed.get::<meter_per_second>();
        let hours = exposure.get::<hour>();

        let f = self.coefficient * wind.powf(self.wind_exponent) * hours.powf(self.time_exponent);
        // NaN passes through so the engine can reject it.
        if f > self.max_fraction {
            self.max_fraction
        } else {
            f
        }
    }

    pub(super) fn validate(&self) -> Result<(), InvalidParameter> {
        check_finite("evaporation_coefficient", self.coefficient)?;
        check::<_, NonNegative>("evaporation_coefficient", self.coefficient)?;
        check_finite("evaporation_wind_exponent", self.wind_exponent)?;
        check::<_, NonNegative>("evaporation_wind_exponent", self.wind_exponent)?;
        check_finite("evaporation_time_exponent", self.time_exponent)?;
        check::<_, NonNegative>("evaporation_time_exponent", self.time_exponent)?;
        check::<_, UnitInterval>("evaporation_max_fraction", self.max_fraction)
    }
}
