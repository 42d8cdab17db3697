//! Plain-data description of a spill scenario.
//!
//! A [`ScenarioConfig`] holds raw numbers with unit-suffixed names so it can
//! be read from TOML, JSON or YAML. Nothing is validated until the config is
//! resolved against a [`Catalog`] into a typed [`MassBalanceInput`].
//!
//! Omitted fields fall back to the values of the interactive form this engine
//! grew out of: 100 L/min for 60 min, 3 m/s wind, 1.5 m waves and 14 °C water.

use marea_core::{Component, InvalidParameter, constrain, constraint::NonNegative};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Length, Mass, ThermodynamicTemperature, Time, Velocity, Volume, VolumeRate},
    length::meter,
    mass::kilogram,
    thermodynamic_temperature::degree_celsius,
    time::{day, minute},
    velocity::meter_per_second,
    volume::liter,
    volume_rate::liter_per_minute,
};

use crate::{
    environment::EnvironmentalConditions,
    fate::FateModels,
    hydrocarbon::{Catalog, CatalogError},
    mass_balance::{MassBalance, MassBalanceError, MassBalanceInput, MassBalanceReport},
    recovery::{Absorbents, Dispersants, RecoveryConfiguration, Skimmers},
    spill::SpillEvent,
};

/// Errors raised while turning a scenario into a mass balance.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    #[error(transparent)]
    MassBalance(#[from] MassBalanceError),
}

/// A complete spill scenario.
///
/// # Example
///
/// ```
/// use marea_components::{hydrocarbon::Catalog, scenario::ScenarioConfig};
///
/// let scenario = ScenarioConfig::from_toml_str(
///     r#"
///     hydrocarbon = "Diesel"
///     simulation_days = 7
///
///     [spill]
///     discharge_rate_l_per_min = 20.0
///     duration_min = 30.0
///
///     [recovery.skimmers]
///     recovered_volume_l = 150.0
///     "#,
/// )
/// .unwrap();
///
/// let report = scenario.run(&Catalog::bundled().unwrap()).unwrap();
/// assert!(report.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Catalog name of the spilled product.
    pub hydrocarbon: String,
    #[serde(default = "default_simulation_days")]
    pub simulation_days: f64,
    #[serde(default)]
    pub spill: SpillConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub models: FateModels,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpillConfig {
    pub discharge_rate_l_per_min: f64,
    pub duration_min: f64,
}

impl Default for SpillConfig {
    fn default() -> Self {
        Self {
            discharge_rate_l_per_min: 100.0,
            duration_min: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub wind_speed_m_per_s: f64,
    pub wave_height_m: f64,
    pub water_temperature_c: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind_speed_m_per_s: 3.0,
            wave_height_m: 1.5,
            water_temperature_c: 14.0,
        }
    }
}

/// Deployed response methods; an absent table means the method is not used.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub containment: bool,
    pub skimmers: Option<SkimmersConfig>,
    pub absorbents: Option<AbsorbentsConfig>,
    pub dispersants: Option<DispersantsConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkimmersConfig {
    pub recovered_volume_l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsorbentsConfig {
    pub dry_mass_kg: f64,
    #[serde(default = "default_max_capacity")]
    pub max_capacity_l_per_kg: f64,
    #[serde(default = "default_saturation")]
    pub saturation_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersantsConfig {
    pub dissolution_increase: f64,
}

impl Default for DispersantsConfig {
    fn default() -> Self {
        Self {
            dissolution_increase: 0.1,
        }
    }
}

fn default_simulation_days() -> f64 {
    14.0
}

fn default_max_capacity() -> f64 {
    4.0
}

fn default_saturation() -> f64 {
    0.85
}

impl ScenarioConfig {
    /// Parses a scenario from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the document is malformed.
    pub fn from_toml_str(document: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(document)?)
    }

    /// Validates the scenario and resolves the hydrocarbon in `catalog`.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::Catalog`] if the hydrocarbon is not in the catalog.
    /// - [`ScenarioError::InvalidParameter`] if any value is out of range.
    pub fn resolve(&self, catalog: &Catalog) -> Result<MassBalanceInput, ScenarioError> {
        let hydrocarbon = catalog.lookup(&self.hydrocarbon)?.clone();
        let horizon = constrain::<Time, NonNegative>(
            "simulation_horizon",
            Time::new::<day>(self.simulation_days),
        )?
        .into_inner();

        Ok(MassBalanceInput {
            spill: self.spill.build()?,
            environment: self.environment.build()?,
            hydrocarbon,
            recovery: self.recovery.build()?,
            horizon,
        })
    }

    /// Resolves the scenario and evaluates its mass balance.
    ///
    /// # Errors
    ///
    /// Any error from [`ScenarioConfig::resolve`], an invalid sub-model
    /// parameter, or a [`MassBalanceError`] from the engine.
    pub fn run(&self, catalog: &Catalog) -> Result<MassBalanceReport, ScenarioError> {
        let engine = MassBalance::new(self.models)?;
        let input = self.resolve(catalog)?;
        Ok(engine.call(input)?)
    }
}

impl SpillConfig {
    fn build(&self) -> Result<SpillEvent, InvalidParameter> {
        SpillEvent::new(
            VolumeRate::new::<liter_per_minute>(self.discharge_rate_l_per_min),
            Time::new::<minute>(self.duration_min),
        )
    }
}

impl EnvironmentConfig {
    fn build(&self) -> Result<EnvironmentalConditions, InvalidParameter> {
        EnvironmentalConditions::new(
            Velocity::new::<meter_per_second>(self.wind_speed_m_per_s),
            Length::new::<meter>(self.wave_height_m),
            ThermodynamicTemperature::new::<degree_celsius>(self.water_temperature_c),
        )
    }
}

impl RecoveryConfig {
    fn build(&self) -> Result<RecoveryConfiguration, InvalidParameter> {
        let mut recovery = RecoveryConfiguration::none();

        if self.containment {
            recovery = recovery.with_containment();
        }
        if let Some(skimmers) = self.skimmers {
            let recovered = Volume::new::<liter>(skimmers.recovered_volume_l);
            recovery = recovery.with_skimmers(Skimmers::new(recovered)?);
        }
        if let Some(absorbents) = self.absorbents {
            let max_capacity = Volume::new::<liter>(absorbents.max_capacity_l_per_kg)
                / Mass::new::<kilogram>(1.0);
            recovery = recovery.with_absorbents(Absorbents::new(
                Mass::new::<kilogram>(absorbents.dry_mass_kg),
                max_capacity,
                absorbents.saturation_fraction,
            )?);
        }
        if let Some(dispersants) = self.dispersants {
            let increase = dispersants.dissolution_increase;
            recovery = recovery.with_dispersants(Dispersants::new(increase)?);
        }

        Ok(recovery)
    }
}
