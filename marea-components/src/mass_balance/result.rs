use std::fmt;

use uom::{
    ConstZero,
    si::{f64::Volume, volume::liter},
};

use super::MassBalanceError;

/// Relative tolerance on the conservation check.
const CONSERVATION_TOLERANCE: f64 = 1e-6;

/// A conserved destination of the spilled volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    RecoveredSkimmer,
    RecoveredAbsorbent,
    Evaporated,
    Dispersed,
    Dissolved,
    Biodegraded,
    Remaining,
}

impl Category {
    /// Every conserved category, in reporting order.
    pub const ALL: [Category; 7] = [
        Category::RecoveredSkimmer,
        Category::RecoveredAbsorbent,
        Category::Evaporated,
        Category::Dispersed,
        Category::Dissolved,
        Category::Biodegraded,
        Category::Remaining,
    ];

    /// Human-readable label for tables and charts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::RecoveredSkimmer => "Recovered (skimmers)",
            Category::RecoveredAbsorbent => "Recovered (absorbents)",
            Category::Evaporated => "Evaporated",
            Category::Dispersed => "Dispersed",
            Category::Dissolved => "Dissolved",
            Category::Biodegraded => "Biodegraded",
            Category::Remaining => "Remaining",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// How the spilled volume is partitioned at the end of the simulation horizon.
///
/// The seven [`Category`] volumes are nonnegative and sum to `total`.
/// `emulsified` is the apparent volume of the water-in-oil emulsion and is
/// reported for information only; it is not part of the partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalanceResult {
    pub total: Volume,
    pub recovered_skimmer: Volume,
    pub recovered_absorbent: Volume,
    pub evaporated: Volume,
    pub dispersed: Volume,
    pub dissolved: Volume,
    pub biodegraded: Volume,
    pub remaining: Volume,
    pub emulsified: Volume,
}

/// One block of a stacked bar, spanning `bottom..top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedSegment {
    pub category: Category,
    pub bottom: Volume,
    pub top: Volume,
}

impl MassBalanceResult {
    #[must_use]
    pub fn volume(&self, category: Category) -> Volume {
        match category {
            Category::RecoveredSkimmer => self.recovered_skimmer,
            Category::RecoveredAbsorbent => self.recovered_absorbent,
            Category::Evaporated => self.evaporated,
            Category::Dispersed => self.dispersed,
            Category::Dissolved => self.dissolved,
            Category::Biodegraded => self.biodegraded,
            Category::Remaining => self.remaining,
        }
    }

    /// The partition as a flat list, in [`Category::ALL`] order.
    #[must_use]
    pub fn entries(&self) -> [(Category, Volume); 7] {
        Category::ALL.map(|category| (category, self.volume(category)))
    }

    /// Sum of all conserved categories.
    #[must_use]
    pub fn partitioned(&self) -> Volume {
        self.entries()
            .into_iter()
            .fold(Volume::ZERO, |acc, (_, volume)| acc + volume)
    }

    /// Each category's share of the total, zero for an empty spill.
    #[must_use]
    pub fn shares(&self) -> [(Category, f64); 7] {
        let total = self.total.get::<liter>();
        self.entries().map(|(category, volume)| {
            let share = if total > 0.0 {
                volume.get::<liter>() / total
            } else {
                0.0
            };
            (category, share)
        })
    }

    /// The partition as a single stacked bar whose top reaches the total.
    #[must_use]
    pub fn stacked(&self) -> [StackedSegment; 7] {
        let mut bottom = Volume::ZERO;
        self.entries().map(|(category, volume)| {
            let segment = StackedSegment {
                category,
                bottom,
                top: bottom + volume,
            };
            bottom = segment.top;
            segment
        })
    }

    /// Checks nonnegativity and conservation of the partition.
    pub(super) fn verify(&self) -> Result<(), MassBalanceError> {
        for (category, volume) in self.entries() {
            let volume_l = volume.get::<liter>();
            if volume_l.is_nan() || volume_l < 0.0 {
                return Err(MassBalanceError::NegativeVolume { category, volume_l });
            }
        }

        let total_l = self.total.get::<liter>();
        let partitioned_l = self.partitioned().get::<liter>();
        if (partitioned_l - total_l).abs() > CONSERVATION_TOLERANCE * total_l {
            return Err(MassBalanceError::Conservation {
                total_l,
                partitioned_l,
            });
        }

        Ok(())
    }
}

/// Renders the partition as a plain-text table in litres.
impl fmt::Display for MassBalanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<28}{:>14}{:>10}", "Category", "Volume (L)", "Share")?;
        for (category, share) in self.shares() {
            writeln!(
                f,
                "{:<28}{:>14.1}{:>8.1} %",
                category.label(),
                self.volume(category).get::<liter>(),
                share * 100.0,
            )?;
        }
        writeln!(f, "{:<28}{:>14.1}", "Total spilled", self.total.get::<liter>())?;
        write!(
            f,
            "{:<28}{:>14.1}",
            "Emulsified (informational)",
            self.emulsified.get::<liter>()
        )
    }
}

/// A category whose computed volume was capped to keep the partition
/// within the spilled volume.
///
/// Signals an overshooting input combination, for example a skimmer volume
/// larger than the spill itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConservationWarning {
    pub category: Category,
    pub requested: Volume,
    pub allocated: Volume,
}

impl ConservationWarning {
    /// Volume that could not be allocated.
    #[must_use]
    pub fn excess(&self) -> Volume {
        self.requested - self.allocated
    }
}

impl fmt::Display for ConservationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} capped at {:.3} L (requested {:.3} L)",
            self.category,
            self.allocated.get::<liter>(),
            self.requested.get::<liter>(),
        )
    }
}

/// A mass balance together with any non-fatal warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct MassBalanceReport {
    pub result: MassBalanceResult,
    pub warnings: Vec<ConservationWarning>,
}

impl MassBalanceReport {
    /// Whether any category had to be capped.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn liters(value: f64) -> Volume {
        Volume::new::<liter>(value)
    }

    fn sample() -> MassBalanceResult {
        MassBalanceResult {
            total: liters(1000.0),
            recovered_skimmer: liters(100.0),
            recovered_absorbent: liters(50.0),
            evaporated: liters(250.0),
            dispersed: liters(100.0),
            dissolved: liters(0.0),
            biodegraded: liters(200.0),
            remaining: liters(300.0),
            emulsified: liters(1300.0),
        }
    }

    #[test]
    fn entries_follow_reporting_order() {
        let labels: Vec<_> = sample().entries().iter().map(|(c, _)| c.label()).collect();

        assert_eq!(labels.first(), Some(&"Recovered (skimmers)"));
        assert_eq!(labels.last(), Some(&"Remaining"));
        assert_eq!(labels.len(), 7);
    }

    #[test]
    fn shares_sum_to_one() {
        let total: f64 = sample().shares().iter().map(|(_, s)| s).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn stacked_segments_are_contiguous() {
        let segments = sample().stacked();

        assert_eq!(segments[0].bottom, Volume::ZERO);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].top, pair[1].bottom);
        }
        assert_relative_eq!(segments[6].top.get::<liter>(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_spill_has_zero_shares() {
        let empty = MassBalanceResult {
            total: Volume::ZERO,
            recovered_skimmer: Volume::ZERO,
            recovered_absorbent: Volume::ZERO,
            evaporated: Volume::ZERO,
            dispersed: Volume::ZERO,
            dissolved: Volume::ZERO,
            biodegraded: Volume::ZERO,
            remaining: Volume::ZERO,
            emulsified: Volume::ZERO,
        };

        assert!(empty.shares().iter().all(|(_, s)| *s == 0.0));
        assert!(empty.verify().is_ok());
    }

    #[test]
    fn verify_detects_imbalance() {
        let broken = MassBalanceResult {
            remaining: liters(310.0),
            ..sample()
        };

        assert!(matches!(
            broken.verify(),
            Err(MassBalanceError::Conservation { .. })
        ));
    }

    #[test]
    fn verify_detects_negative_volume() {
        let broken = MassBalanceResult {
            dissolved: liters(-10.0),
            remaining: liters(310.0),
            ..sample()
        };

        assert!(matches!(
            broken.verify(),
            Err(MassBalanceError::NegativeVolume {
                category: Category::Dissolved,
                ..
            })
        ));
    }

    #[test]
    fn table_lists_every_category() {
        let table = sample().to_string();

        for category in Category::ALL {
            assert!(table.contains(category.label()));
        }
        assert!(table.contains("Emulsified (informational)"));
    }
}
