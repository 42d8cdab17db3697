use marea_core::{
    InvalidParameter,
    constraint::{NonNegative, StrictlyPositive},
};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::{degree_celsius, kelvin},
    time::day,
};

use super::{check, check_finite};

/// First-order microbial degradation of the residual slick.
///
/// The degraded share after `t` days is `1 - exp(-k · t)`, where `k` is the
/// hydrocarbon's rate constant, optionally corrected for water temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Biodegradation {
    /// `k = k_ref · theta^(T - T_ref)`, a Q10-style correction.
    TemperatureCorrected {
        theta: f64,
        reference_temperature: ThermodynamicTemperature,
    },

    /// `k = k_ref`, independent of water temperature.
    FirstOrder,
}

impl Default for Biodegradation {
    fn default() -> Self {
        Self::TemperatureCorrected {
            theta: Self::DEFAULT_THETA,
            reference_temperature: Self::default_reference_temperature(),
        }
    }
}

impl Biodegradation {
    /// Temperature coefficient commonly used for microbial kinetics.
    pub const DEFAULT_THETA: f64 = 1.07;

    /// Temperature at which catalog rate constants are quoted, 20 °C.
    #[must_use]
    pub fn default_reference_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(20.0)
    }

    /// Effective rate constant in day⁻¹.
    ///
    /// `base_rate` is the catalog rate constant at the reference temperature,
    /// in day⁻¹.
    #[must_use]
    pub fn rate(&self, base_rate: f64, water_temperature: ThermodynamicTemperature) -> f64 {
        match *self {
            Self::TemperatureCorrected {
                theta,
                reference_temperature,
            } => {
                let delta = water_temperature.get::<degree_celsius>()
                    - reference_temperature.get::<degree_celsius>();
                base_rate * theta.powf(delta)
            }
            Self::FirstOrder => base_rate,
        }
    }

    /// Share of the residual degraded over `horizon`, in `[0, 1)`.
    #[must_use]
    pub fn degraded_fraction(
        &self,
        base_rate: f64,
        water_temperature: ThermodynamicTemperature,
        horizon: Time,
    ) -> f64 {
        let days = horizon.get::<day>();
        if days <= 0.0 {
            return 0.0;
        }

        let k = self.rate(base_rate, water_temperature);
        // 1 - exp(-k·t); exp_m1 of a non-positive argument is in [-1, 0].
        (-k * days).exp_m1().abs()
    }

    pub(super) fn validate(&self) -> Result<(), InvalidParameter> {
        match *self {
            Self::TemperatureCorrected {
                theta,
                reference_temperature,
            } => {
                check_finite("biodegradation_theta", theta)?;
                check::<_, StrictlyPositive>("biodegradation_theta", theta)?;
                check_finite(
                    "biodegradation_reference_temperature",
                    reference_temperature.value,
                )?;
                check::<_, NonNegative>(
                    "biodegradation_reference_temperature",
                    reference_temperature.get::<kelvin>(),
                )
            }
            Self::FirstOrder => Ok(()),
        }
    }
}
