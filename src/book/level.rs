//! Price level representation.

use rust_decimal::Decimal;

/// Arena key of a [`PriceLevel`] in its side's level slab.
pub type LevelHandle = usize;

/// Aggregated resting volume at one price on one side.
///
/// Levels are threaded into a doubly-linked sequence sorted best price
/// first; the `prev`/`next` handles are what make removal O(1) once the
/// level has been located through the side's price index.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: Decimal,
    /// Total resting size across all live orders at this price.
    ///
    /// Signed: an oversized reduction may drive the aggregate below zero
    /// for the instant before the level is discarded.
    pub size: i64,
    /// Handle of the next-better level, `None` if this is the best.
    pub(crate) prev: Option<LevelHandle>,
    /// Handle of the next-worse level, `None` if this is the worst.
    pub(crate) next: Option<LevelHandle>,
}

impl PriceLevel {
    /// Create an unlinked level.
    pub(crate) fn new(price: Decimal, size: i64) -> Self {
        Self {
            price,
            size,
            prev: None,
            next: None,
        }
    }

    /// Notional value (price × size) resting at this level.
    pub fn notional(&self) -> Decimal {
        self.price * Decimal::from(self.size)
    }
}
