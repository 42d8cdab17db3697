use marea_core::{
    InvalidParameter, constrain,
    constraint::{Constrained, NonNegative},
    ensure_finite,
};
use uom::si::f64::{Time, Volume, VolumeRate};

/// A continuous release of hydrocarbon at a constant rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpillEvent {
    discharge_rate: Constrained<VolumeRate, NonNegative>,
    duration: Constrained<Time, NonNegative>,
}

impl SpillEvent {
    /// Creates a spill from its discharge rate and duration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`] if either value is negative or not finite.
    pub fn new(discharge_rate: VolumeRate, duration: Time) -> Result<Self, InvalidParameter> {
        ensure_finite("discharge_rate", discharge_rate.value)?;
        ensure_finite("duration", duration.value)?;

        Ok(Self {
            discharge_rate: constrain("discharge_rate", discharge_rate)?,
            duration: constrain("duration", duration)?,
        })
    }

    #[must_use]
    pub fn discharge_rate(&self) -> VolumeRate {
        self.discharge_rate.into_inner()
    }

    /// Time over which oil was released, also used as the weathering exposure.
    #[must_use]
    pub fn duration(&self) -> Time {
        self.duration.into_inner()
    }

    /// Total released volume, `discharge_rate · duration`.
    #[must_use]
    pub fn total_volume(&self) -> Volume {
        self.discharge_rate() * self.duration()
    }
}
