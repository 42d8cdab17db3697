//! The mass balance engine.
//!
//! Given a spill, the environmental conditions, a hydrocarbon profile and the
//! deployed response, the engine partitions the spilled volume into
//! recovered, evaporated, dispersed, dissolved, biodegraded and remaining
//! volumes that always add back up to the spill.
//!
//! The evaluation proceeds in a fixed order:
//!
//! 1. Recovery by skimmers and absorbents.
//! 2. Evaporation, dispersion and dissolution losses.
//! 3. Biodegradation of whatever is left (the residual) over the horizon.
//!
//! Volumes are allocated in that order and each is capped at what is still
//! unallocated, so overshooting inputs never produce a negative remainder.
//! Capped categories are reported as [`ConservationWarning`]s.

mod allocation;
mod result;

use marea_core::{
    Component, InvalidParameter, constrain,
    constraint::{ConstraintError, NonNegative},
};
use thiserror::Error;
use tracing::debug;
use uom::si::{
    f64::Time,
    time::day,
    volume::liter,
};

use crate::{
    environment::EnvironmentalConditions, fate::FateModels, hydrocarbon::HydrocarbonProfile,
    recovery::RecoveryConfiguration, spill::SpillEvent,
};

use allocation::Allocator;

pub use result::{
    Category, ConservationWarning, MassBalanceReport, MassBalanceResult, StackedSegment,
};

/// Errors returned by the mass balance engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MassBalanceError {
    /// An input violates its valid range.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    /// The partition does not add up to the spilled volume.
    ///
    /// Capping makes this unreachable for valid inputs; it indicates a defect
    /// in the engine and must not be ignored.
    #[error("partition sums to {partitioned_l} L but {total_l} L was spilled")]
    Conservation { total_l: f64, partitioned_l: f64 },

    /// A category ended up negative or `NaN`; also an engine defect.
    #[error("{category} volume is invalid ({volume_l} L)")]
    NegativeVolume { category: Category, volume_l: f64 },
}

/// Everything needed for one evaluation of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MassBalanceInput {
    pub spill: SpillEvent,
    pub environment: EnvironmentalConditions,
    pub hydrocarbon: HydrocarbonProfile,
    pub recovery: RecoveryConfiguration,
    /// Time over which biodegradation acts on the residual.
    pub horizon: Time,
}

/// A mass balance engine configured with a set of [`FateModels`].
///
/// The engine holds no state between evaluations.
///
/// # Example
///
/// ```
/// use marea_components::{
///     environment::EnvironmentalConditions,
///     hydrocarbon::Catalog,
///     mass_balance::MassBalance,
///     recovery::RecoveryConfiguration,
///     spill::SpillEvent,
/// };
/// use uom::si::{
///     f64::{Length, ThermodynamicTemperature, Time, Velocity, VolumeRate},
///     length::meter,
///     thermodynamic_temperature::degree_celsius,
///     time::{day, minute},
///     velocity::meter_per_second,
///     volume::liter,
///     volume_rate::liter_per_minute,
/// };
///
/// let catalog = Catalog::bundled().unwrap();
/// let spill = SpillEvent::new(
///     VolumeRate::new::<liter_per_minute>(100.0),
///     Time::new::<minute>(60.0),
/// )
/// .unwrap();
/// let environment = EnvironmentalConditions::new(
///     Velocity::new::<meter_per_second>(3.0),
///     Length::new::<meter>(1.5),
///     ThermodynamicTemperature::new::<degree_celsius>(14.0),
/// )
/// .unwrap();
///
/// let report = MassBalance::default()
///     .evaluate(
///         &spill,
///         &environment,
///         catalog.lookup("Diesel").unwrap(),
///         &RecoveryConfiguration::none(),
///         Time::new::<day>(7.0),
///     )
///     .unwrap();
///
/// let partitioned = report.result.partitioned().get::<liter>();
/// assert!((partitioned - 6000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassBalance {
    models: FateModels,
}

impl MassBalance {
    /// Creates an engine using the given sub-models.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if a sub-model parameter is out of range.
    pub fn new(models: FateModels) -> Result<Self, InvalidParameter> {
        models.validate()?;
        Ok(Self { models })
    }

    /// Partitions the spilled volume after `horizon` has elapsed.
    ///
    /// # Errors
    ///
    /// - [`MassBalanceError::InvalidParameter`] if the horizon is negative or
    ///   the spilled volume is not finite.
    /// - [`MassBalanceError::Conservation`] or
    ///   [`MassBalanceError::NegativeVolume`] on an internal inconsistency,
    ///   including a sub-model producing a `NaN` volume.
    pub fn evaluate(
        &self,
        spill: &SpillEvent,
        environment: &EnvironmentalConditions,
        hydrocarbon: &HydrocarbonProfile,
        recovery: &RecoveryConfiguration,
        horizon: Time,
    ) -> Result<MassBalanceReport, MassBalanceError> {
        let horizon = constrain::<Time, NonNegative>("simulation_horizon", horizon)?.into_inner();

        let total = spill.total_volume();
        if !total.is_finite() {
            return Err(InvalidParameter::new("total_volume", ConstraintError::AboveMaximum).into());
        }

        let exposure = spill.duration();
        let dispersion_factor = recovery.dispersion_factor();
        let FateModels {
            evaporation,
            dispersion,
            dissolution,
            emulsification,
            biodegradation,
        } = self.models;

        let mut allocator = Allocator::new(total);

        let recovered_skimmer =
            allocator.take(Category::RecoveredSkimmer, recovery.skimmer_volume())?;
        let recovered_absorbent =
            allocator.take(Category::RecoveredAbsorbent, recovery.absorbent_volume())?;

        let evaporated = allocator.take(
            Category::Evaporated,
            total * evaporation.fraction(environment.wind_speed(), exposure),
        )?;
        let dispersed = allocator.take(
            Category::Dispersed,
            dispersion.volume(
                total,
                environment.wind_speed(),
                environment.wave_height(),
                dispersion_factor,
            ),
        )?;
        let dissolved = allocator.take(
            Category::Dissolved,
            dissolution.volume(total, exposure, dispersion_factor),
        )?;

        let (residual, warnings) = allocator.finish();

        let degraded_fraction = biodegradation.degraded_fraction(
            hydrocarbon.base_biodegradation_rate(),
            environment.water_temperature(),
            horizon,
        );
        let biodegraded = residual * degraded_fraction;
        let remaining = residual - biodegraded;

        let result = MassBalanceResult {
            total,
            recovered_skimmer,
            recovered_absorbent,
            evaporated,
            dispersed,
            dissolved,
            biodegraded,
            remaining,
            emulsified: emulsification.volume(total),
        };
        result.verify()?;

        debug!(
            hydrocarbon = hydrocarbon.name(),
            total_l = total.get::<liter>(),
            horizon_days = horizon.get::<day>(),
            residual_l = residual.get::<liter>(),
            biodegraded_l = biodegraded.get::<liter>(),
            clamped = !warnings.is_empty(),
            "evaluated mass balance",
        );

        Ok(MassBalanceReport { result, warnings })
    }
}

impl Component for MassBalance {
    type Input = MassBalanceInput;
    type Output = MassBalanceReport;
    type Error = MassBalanceError;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        let MassBalanceInput {
            spill,
            environment,
            hydrocarbon,
            recovery,
            horizon,
        } = input;

        self.evaluate(&spill, &environment, &hydrocarbon, &recovery, horizon)
    }
}

/// Evaluates the mass balance with the default [`FateModels`].
///
/// # Errors
///
/// See [`MassBalance::evaluate`].
pub fn evaluate(
    spill: &SpillEvent,
    environment: &EnvironmentalConditions,
    hydrocarbon: &HydrocarbonProfile,
    recovery: &RecoveryConfiguration,
    horizon: Time,
) -> Result<MassBalanceReport, MassBalanceError> {
    MassBalance::default().evaluate(spill, environment, hydrocarbon, recovery, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Mass, ThermodynamicTemperature, Velocity, Volume, VolumeRate},
        length::meter,
        mass::kilogram,
        thermodynamic_temperature::degree_celsius,
        time::minute,
        velocity::meter_per_second,
        volume_rate::liter_per_minute,
    };

    use crate::{
        fate::{Biodegradation, Dispersion, Dissolution, Evaporation},
        hydrocarbon::{HydrocarbonKind, HydrocarbonRecord},
        recovery::{Absorbents, Dispersants, Skimmers},
    };

    fn spill(rate_l_per_min: f64, minutes: f64) -> SpillEvent {
        SpillEvent::new(
            VolumeRate::new::<liter_per_minute>(rate_l_per_min),
            Time::new::<minute>(minutes),
        )
        .unwrap()
    }

    fn environment(wind: f64, wave: f64, celsius: f64) -> EnvironmentalConditions {
        EnvironmentalConditions::new(
            Velocity::new::<meter_per_second>(wind),
            Length::new::<meter>(wave),
            ThermodynamicTemperature::new::<degree_celsius>(celsius),
        )
        .unwrap()
    }

    fn hydrocarbon(rate: f64) -> HydrocarbonProfile {
        HydrocarbonProfile::new(HydrocarbonRecord {
            name: "Medium Crude".into(),
            api_gravity: 28.0,
            biodegradation_rate: rate,
            kind: HydrocarbonKind::Crude,
            reference: "test fixture".into(),
        })
        .unwrap()
    }

    fn days(value: f64) -> Time {
        Time::new::<day>(value)
    }

    fn liters(value: f64) -> Volume {
        Volume::new::<liter>(value)
    }

    fn assert_conserved(result: &MassBalanceResult) {
        let total = result.total.get::<liter>();
        assert_relative_eq!(
            result.partitioned().get::<liter>(),
            total,
            epsilon = 1e-6 * total.max(1.0)
        );
        for (category, volume) in result.entries() {
            assert!(volume.get::<liter>() >= 0.0, "{category} is negative");
        }
    }

    #[test]
    fn golden_scenario_without_response() {
        let report = evaluate(
            &spill(50.0, 60.0),
            &environment(5.0, 1.5, 14.0),
            &hydrocarbon(0.03),
            &RecoveryConfiguration::none(),
            days(14.0),
        )
        .unwrap();
        let r = report.result;

        let f_evap = 1e-4 * 5.0_f64.powf(0.78);
        let residual = 3000.0 - 3000.0 * f_evap - 225.0 - 7.2;
        let k_bio = 0.03 * 1.07_f64.powf(-6.0);
        let biodegraded = residual * (1.0 - (-k_bio * 14.0).exp());

        assert!(report.warnings.is_empty());
        assert_relative_eq!(r.total.get::<liter>(), 3000.0, max_relative = 1e-12);
        assert_relative_eq!(r.recovered_skimmer.get::<liter>(), 0.0);
        assert_relative_eq!(r.recovered_absorbent.get::<liter>(), 0.0);
        assert_relative_eq!(r.evaporated.get::<liter>(), 1.052_732, epsilon = 1e-6);
        assert_relative_eq!(r.dispersed.get::<liter>(), 225.0, max_relative = 1e-9);
        assert_relative_eq!(r.dissolved.get::<liter>(), 7.2, max_relative = 1e-9);
        assert_relative_eq!(r.biodegraded.get::<liter>(), biodegraded, max_relative = 1e-9);
        assert_relative_eq!(r.biodegraded.get::<liter>(), 675.3997, epsilon = 1e-3);
        assert_relative_eq!(r.remaining.get::<liter>(), 2091.3476, epsilon = 1e-3);
        assert_relative_eq!(r.emulsified.get::<liter>(), 3900.0, max_relative = 1e-9);
        assert_conserved(&r);
    }

    #[test]
    fn conservation_holds_across_conditions() {
        let recovery = RecoveryConfiguration::none()
            .with_containment()
            .with_skimmers(Skimmers::new(liters(400.0)).unwrap())
            .with_absorbents(
                Absorbents::new(
                    Mass::new::<kilogram>(25.0),
                    liters(4.0) / Mass::new::<kilogram>(1.0),
                    0.85,
                )
                .unwrap(),
            )
            .with_dispersants(Dispersants::new(0.1).unwrap());

        for rate in [0.5, 10.0, 100.0, 2500.0] {
            for wind in [0.0, 3.0, 10.0, 25.0] {
                for wave in [0.0, 1.5, 5.0] {
                    for celsius in [0.0, 14.0, 30.0] {
                        let report = evaluate(
                            &spill(rate, 90.0),
                            &environment(wind, wave, celsius),
                            &hydrocarbon(0.05),
                            &recovery,
                            days(30.0),
                        )
                        .unwrap();
                        assert_conserved(&report.result);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_spill_is_all_zeros() {
        let report = evaluate(
            &spill(0.0, 0.0),
            &environment(5.0, 1.5, 14.0),
            &hydrocarbon(0.03),
            &RecoveryConfiguration::none(),
            days(14.0),
        )
        .unwrap();

        for (_, volume) in report.result.entries() {
            assert_eq!(volume.get::<liter>(), 0.0);
        }
        assert_eq!(report.result.emulsified.get::<liter>(), 0.0);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn stopped_discharge_raises_no_warnings() {
        let report = evaluate(
            &spill(0.0, 60.0),
            &environment(5.0, 1.5, 14.0),
            &hydrocarbon(0.03),
            &RecoveryConfiguration::none(),
            days(14.0),
        )
        .unwrap();

        for (_, volume) in report.result.entries() {
            assert_eq!(volume.get::<liter>(), 0.0);
        }
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn overflowing_rate_with_zero_horizon_degrades_nothing() {
        let engine = MassBalance::new(FateModels {
            biodegradation: Biodegradation::TemperatureCorrected {
                theta: 1e300,
                reference_temperature: Biodegradation::default_reference_temperature(),
            },
            ..FateModels::default()
        })
        .unwrap();

        let report = engine
            .evaluate(
                &spill(50.0, 60.0),
                &environment(5.0, 1.5, 99.0),
                &hydrocarbon(0.03),
                &RecoveryConfiguration::none(),
                days(0.0),
            )
            .unwrap();

        assert_eq!(report.result.biodegraded.get::<liter>(), 0.0);
        assert_conserved(&report.result);
    }

    #[test]
    fn nan_loss_is_reported_not_allocated() {
        let engine = MassBalance::new(FateModels {
            evaporation: Evaporation {
                coefficient: 0.0,
                wind_exponent: 1e10,
                ..Evaporation::default()
            },
            ..FateModels::default()
        })
        .unwrap();

        let err = engine
            .evaluate(
                &spill(50.0, 60.0),
                &environment(5.0, 1.5, 14.0),
                &hydrocarbon(0.03),
                &RecoveryConfiguration::none(),
                days(14.0),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            MassBalanceError::NegativeVolume {
                category: Category::Evaporated,
                ..
            }
        ));
    }

    #[test]
    fn skimmer_overshoot_is_capped_with_warning() {
        let recovery = RecoveryConfiguration::none()
            .with_skimmers(Skimmers::new(liters(5000.0)).unwrap());

        let report = evaluate(
            &spill(50.0, 60.0),
            &environment(5.0, 1.5, 14.0),
            &hydrocarbon(0.03),
            &recovery,
            days(14.0),
        )
        .unwrap();
        let r = report.result;

        assert_relative_eq!(r.recovered_skimmer.get::<liter>(), 3000.0, max_relative = 1e-12);
        assert_eq!(r.remaining.get::<liter>(), 0.0);
        assert_eq!(r.biodegraded.get::<liter>(), 0.0);
        assert_conserved(&r);

        assert!(report.is_clamped());
        let capped: Vec<_> = report.warnings.iter().map(|w| w.category).collect();
        assert_eq!(
            capped,
            [
                Category::RecoveredSkimmer,
                Category::Evaporated,
                Category::Dispersed,
                Category::Dissolved,
            ]
        );
        assert_relative_eq!(
            report.warnings[0].excess().get::<liter>(),
            2000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn longer_horizon_degrades_more() {
        let engine = MassBalance::default();
        let spill = spill(50.0, 60.0);
        let environment = environment(5.0, 1.5, 14.0);
        let hydrocarbon = hydrocarbon(0.03);
        let recovery = RecoveryConfiguration::none();

        let results: Vec<_> = [0.0, 1.0, 7.0, 14.0, 60.0, 365.0]
            .into_iter()
            .map(|d| {
                engine
                    .evaluate(&spill, &environment, &hydrocarbon, &recovery, days(d))
                    .unwrap()
                    .result
            })
            .collect();

        assert_eq!(results[0].biodegraded.get::<liter>(), 0.0);
        for pair in results.windows(2) {
            assert!(pair[1].biodegraded >= pair[0].biodegraded);
            assert!(pair[1].remaining <= pair[0].remaining);
        }
    }

    #[test]
    fn warmer_water_degrades_more() {
        let run = |celsius: f64| {
            evaluate(
                &spill(50.0, 60.0),
                &environment(5.0, 1.5, celsius),
                &hydrocarbon(0.03),
                &RecoveryConfiguration::none(),
                days(14.0),
            )
            .unwrap()
            .result
            .biodegraded
        };

        assert!(run(22.0) > run(20.0));
        assert!(run(30.0) > run(22.0));
    }

    #[test]
    fn dispersants_raise_dispersion_and_dissolution() {
        let run = |recovery: RecoveryConfiguration| {
            evaluate(
                &spill(50.0, 60.0),
                &environment(5.0, 1.5, 14.0),
                &hydrocarbon(0.03),
                &recovery,
                days(14.0),
            )
            .unwrap()
            .result
        };

        let plain = run(RecoveryConfiguration::none());
        let treated =
            run(RecoveryConfiguration::none().with_dispersants(Dispersants::new(0.1).unwrap()));

        assert_relative_eq!(
            treated.dispersed.get::<liter>(),
            plain.dispersed.get::<liter>() * 1.1,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            treated.dissolved.get::<liter>(),
            plain.dissolved.get::<liter>() * 1.1,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            treated.evaporated.get::<liter>(),
            plain.evaporated.get::<liter>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn legacy_fixed_fraction_models() {
        let engine = MassBalance::new(FateModels {
            dispersion: Dispersion::FixedFraction { fraction: 0.012 },
            dissolution: Dissolution::FixedFraction { fraction: 0.005 },
            biodegradation: Biodegradation::FirstOrder,
            ..FateModels::default()
        })
        .unwrap();

        let report = engine
            .evaluate(
                &spill(100.0, 60.0),
                &environment(3.0, 1.5, 14.0),
                &hydrocarbon(0.03),
                &RecoveryConfiguration::none(),
                days(14.0),
            )
            .unwrap();
        let r = report.result;

        assert_relative_eq!(r.dispersed.get::<liter>(), 72.0, max_relative = 1e-9);
        assert_relative_eq!(r.dissolved.get::<liter>(), 30.0, max_relative = 1e-9);

        let residual = (r.biodegraded + r.remaining).get::<liter>();
        assert_relative_eq!(
            r.biodegraded.get::<liter>(),
            residual * (1.0 - (-0.03_f64 * 14.0).exp()),
            max_relative = 1e-9
        );
        assert_conserved(&r);
    }

    #[test]
    fn negative_horizon_is_rejected() {
        let err = evaluate(
            &spill(50.0, 60.0),
            &environment(5.0, 1.5, 14.0),
            &hydrocarbon(0.03),
            &RecoveryConfiguration::none(),
            days(-1.0),
        )
        .unwrap_err();

        assert_eq!(
            err,
            MassBalanceError::InvalidParameter(InvalidParameter::new(
                "simulation_horizon",
                ConstraintError::Negative
            ))
        );
    }

    #[test]
    fn invalid_models_are_rejected() {
        let err = MassBalance::new(FateModels {
            dispersion: Dispersion::FixedFraction { fraction: 2.0 },
            ..FateModels::default()
        })
        .unwrap_err();

        assert_eq!(err.field, "dispersion_fraction");
    }

    #[test]
    fn component_call_matches_evaluate() {
        let input = MassBalanceInput {
            spill: spill(50.0, 60.0),
            environment: environment(5.0, 1.5, 14.0),
            hydrocarbon: hydrocarbon(0.03),
            recovery: RecoveryConfiguration::none(),
            horizon: days(14.0),
        };

        let direct = evaluate(
            &input.spill,
            &input.environment,
            &input.hydrocarbon,
            &input.recovery,
            input.horizon,
        )
        .unwrap();

        assert_eq!(MassBalance::default().call(input).unwrap(), direct);
    }
}
