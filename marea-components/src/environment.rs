use marea_core::{
    InvalidParameter, constrain,
    constraint::{Constrained, ConstraintError, NonNegative},
    ensure_finite,
};
use uom::si::{
    f64::{Length, ThermodynamicTemperature, Velocity},
    thermodynamic_temperature::{degree_celsius, kelvin},
};

/// Highest accepted water temperature, the boiling point at sea level.
const MAX_WATER_TEMPERATURE_C: f64 = 100.0;

/// Sea state and water conditions at the time of the spill.
///
/// A single snapshot: conditions are assumed constant over the evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalConditions {
    wind_speed: Constrained<Velocity, NonNegative>,
    wave_height: Constrained<Length, NonNegative>,
    water_temperature: ThermodynamicTemperature,
}

impl EnvironmentalConditions {
    /// Creates a snapshot of environmental conditions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if the wind speed or significant wave
    /// height is negative or not finite, or if the water temperature is not a
    /// number, below absolute zero or above 100 °C.
    pub fn new(
        wind_speed: Velocity,
        wave_height: Length,
        water_temperature: ThermodynamicTemperature,
    ) -> Result<Self, InvalidParameter> {
        ensure_finite("wind_speed", wind_speed.value)?;
        ensure_finite("wave_height", wave_height.value)?;
        ensure_finite("water_temperature", water_temperature.value)?;

        constrain::<f64, NonNegative>("water_temperature", water_temperature.get::<kelvin>())?;
        if water_temperature.get::<degree_celsius>() > MAX_WATER_TEMPERATURE_C {
            return Err(InvalidParameter::new(
                "water_temperature",
                ConstraintError::AboveMaximum,
            ));
        }

        Ok(Self {
            wind_speed: constrain("wind_speed", wind_speed)?,
            wave_height: constrain("wave_height", wave_height)?,
            water_temperature,
        })
    }

    #[must_use]
    pub fn wind_speed(&self) -> Velocity {
        self.wind_speed.into_inner()
    }

    /// Significant wave height.
    #[must_use]
    pub fn wave_height(&self) -> Length {
        self.wave_height.into_inner()
    }

    #[must_use]
    pub fn water_temperature(&self) -> ThermodynamicTemperature {
        self.water_temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{length::meter, velocity::meter_per_second};

    fn conditions(
        wind: f64,
        wave: f64,
        celsius: f64,
    ) -> Result<EnvironmentalConditions, InvalidParameter> {
        EnvironmentalConditions::new(
            Velocity::new::<meter_per_second>(wind),
            Length::new::<meter>(wave),
            ThermodynamicTemperature::new::<degree_celsius>(celsius),
        )
    }

    #[test]
    fn calm_cold_water_is_valid() {
        let env = conditions(0.0, 0.0, -1.5).unwrap();
        assert_eq!(env.wind_speed().get::<meter_per_second>(), 0.0);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            conditions(-2.0, 1.0, 14.0).unwrap_err(),
            InvalidParameter::new("wind_speed", ConstraintError::Negative)
        );
        assert_eq!(
            conditions(2.0, -1.0, 14.0).unwrap_err(),
            InvalidParameter::new("wave_height", ConstraintError::Negative)
        );
        assert_eq!(
            conditions(2.0, 1.0, f64::NAN).unwrap_err(),
            InvalidParameter::new("water_temperature", ConstraintError::NotANumber)
        );
        assert_eq!(
            conditions(2.0, 1.0, -300.0).unwrap_err(),
            InvalidParameter::new("water_temperature", ConstraintError::Negative)
        );
    }

    #[test]
    fn rejects_unbounded_values() {
        assert_eq!(
            conditions(f64::INFINITY, 0.0, 14.0).unwrap_err(),
            InvalidParameter::new("wind_speed", ConstraintError::AboveMaximum)
        );
        assert_eq!(
            conditions(5.0, f64::INFINITY, 14.0).unwrap_err(),
            InvalidParameter::new("wave_height", ConstraintError::AboveMaximum)
        );
        assert_eq!(
            conditions(5.0, 1.5, f64::INFINITY).unwrap_err(),
            InvalidParameter::new("water_temperature", ConstraintError::AboveMaximum)
        );
        assert_eq!(
            conditions(5.0, 1.5, 20_000.0).unwrap_err(),
            InvalidParameter::new("water_temperature", ConstraintError::AboveMaximum)
        );
        assert!(conditions(5.0, 1.5, 99.0).is_ok());
    }
}
