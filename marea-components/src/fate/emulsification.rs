use marea_core::{InvalidParameter, constraint::UnitInterval};
use serde::{Deserialize, Serialize};
use uom::si::f64::Volume;

use super::check;

/// Water uptake forming a water-in-oil emulsion ("mousse").
///
/// The emulsified volume is `total · (1 + water_in_oil_fraction)`. It
/// describes how much the slick swells, not a loss of hydrocarbon, so it is
/// reported alongside the mass balance but excluded from conservation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emulsification {
    pub water_in_oil_fraction: f64,
}

impl Default for Emulsification {
    fn default() -> Self {
        Self {
            water_in_oil_fraction: 0.3,
        }
    }
}

impl Emulsification {
    /// Apparent volume of the emulsified slick.
    #[must_use]
    pub fn volume(&self, total: Volume) -> Volume {
        total * (1.0 + self.water_in_oil_fraction)
    }

    pub(super) fn validate(&self) -> Result<(), InvalidParameter> {
        check::<_, UnitInterval>("water_in_oil_fraction", self.water_in_oil_fraction)
    }
}
