use tracing::warn;
use uom::si::{f64::Volume, volume::liter};

use super::{Category, ConservationWarning, MassBalanceError};

/// Hands out the spilled volume to loss and recovery categories in turn.
///
/// A category never receives more than what is still unallocated, so the
/// partition cannot exceed the spill. Every shortfall is recorded as a
/// [`ConservationWarning`].
#[derive(Debug)]
pub(super) struct Allocator {
    unallocated: Volume,
    warnings: Vec<ConservationWarning>,
}

impl Allocator {
    pub(super) fn new(total: Volume) -> Self {
        Self {
            unallocated: total,
            warnings: Vec::new(),
        }
    }

    /// Allocates up to `requested` to `category` and returns the granted volume.
    ///
    /// A negative or `NaN` request is an engine defect and is returned as
    /// [`MassBalanceError::NegativeVolume`] instead of being granted.
    pub(super) fn take(
        &mut self,
        category: Category,
        requested: Volume,
    ) -> Result<Volume, MassBalanceError> {
        let requested_l = requested.get::<liter>();
        if requested_l.is_nan() || requested_l < 0.0 {
            return Err(MassBalanceError::NegativeVolume {
                category,
                volume_l: requested_l,
            });
        }

        let allocated = if requested > self.unallocated {
            self.unallocated
        } else {
            requested
        };

        if allocated < requested {
            warn!(
                category = %category,
                requested_l = requested.get::<liter>(),
                allocated_l = allocated.get::<liter>(),
                "volume exceeds what remains of the spill; capping",
            );
            self.warnings.push(ConservationWarning {
                category,
                requested,
                allocated,
            });
        }

        self.unallocated -= allocated;
        Ok(allocated)
    }

    /// Returns the volume left over and the warnings raised along the way.
    pub(super) fn finish(self) -> (Volume, Vec<ConservationWarning>) {
        (self.unallocated, self.warnings)
    }
}
