//! One side of the book: price-indexed levels in best-to-worst order.

use std::collections::HashMap;

use rust_decimal::Decimal;
use slab::Slab;

use crate::book::level::{LevelHandle, PriceLevel};
use crate::error::BookError;
use crate::events::Side;

/// Ordering strategy for a side, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOrdering {
    /// Best price is the highest (bids).
    BestIsHighest,
    /// Best price is the lowest (asks).
    BestIsLowest,
}

impl PriceOrdering {
    /// Whether a level at `a` belongs before a level at `b`.
    fn sorts_before(self, a: Decimal, b: Decimal) -> bool {
        match self {
            PriceOrdering::BestIsHighest => a > b,
            PriceOrdering::BestIsLowest => a < b,
        }
    }
}

impl From<Side> for PriceOrdering {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => PriceOrdering::BestIsHighest,
            Side::Sell => PriceOrdering::BestIsLowest,
        }
    }
}

/// Price levels for one side of the book.
///
/// Levels live in a slot-stable arena and are threaded into a doubly-linked
/// sequence sorted by the side's [`PriceOrdering`], best first. The price
/// index maps each live price to its arena handle, so a reduction locates
/// its level in O(1) average and removes it in O(1) via the stored links.
/// The index and the sequence always hold the same set of live prices.
#[derive(Debug)]
pub struct BookSide {
    side: Side,
    ordering: PriceOrdering,
    levels: Slab<PriceLevel>,
    by_price: HashMap<Decimal, LevelHandle>,
    /// Handle of the best level, `None` when the side is empty.
    best: Option<LevelHandle>,
    /// Running total of resting volume across all levels.
    total_volume: i64,
}

impl BookSide {
    /// Creates an empty side; the ordering strategy follows the side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ordering: PriceOrdering::from(side),
            levels: Slab::new(),
            by_price: HashMap::new(),
            best: None,
            total_volume: 0,
        }
    }

    /// Adds `size` resting volume at `price`, creating the level if needed.
    ///
    /// A new level is sorted into the sequence by the side's ordering; an
    /// existing one just grows its aggregate. Ties cannot occur (one level
    /// per price).
    pub fn add(&mut self, price: Decimal, size: u64) {
        let size = size as i64;
        self.total_volume += size;

        if let Some(&handle) = self.by_price.get(&price) {
            self.levels[handle].size += size;
            return;
        }

        let handle = self.levels.insert(PriceLevel::new(price, size));
        self.link_sorted(handle);
        self.by_price.insert(price, handle);
    }

    /// Removes `size` resting volume from the level at `price`.
    ///
    /// A level driven to zero or below is dropped from both the index and
    /// the sequence. If no level exists at `price` the side is left
    /// untouched and the condition is returned to the caller.
    pub fn reduce(&mut self, price: Decimal, size: u64) -> Result<(), BookError> {
        let Some(&handle) = self.by_price.get(&price) else {
            return Err(BookError::MissingPriceLevel {
                side: self.side,
                price,
            });
        };

        let size = size as i64;
        self.total_volume -= size;
        let level = &mut self.levels[handle];
        level.size -= size;

        if level.size <= 0 {
            self.unlink(handle);
            self.by_price.remove(&price);
            self.levels.remove(handle);
        }
        Ok(())
    }

    /// Total monetary amount to fill `target` shares, walking best to worst.
    ///
    /// Returns `None` when the side's resting volume is short of `target`;
    /// the walk is skipped entirely in that case. The completing level
    /// contributes only the partial quantity still needed. Never mutates.
    pub fn fill_total(&self, target: u64) -> Option<Decimal> {
        if self.total_volume < target as i64 {
            return None;
        }

        let mut remaining = target as i64;
        let mut total = Decimal::ZERO;
        let mut cursor = self.best;

        while remaining > 0 {
            let level = &self.levels[cursor?];
            let take = remaining.min(level.size);
            total += Decimal::from(take) * level.price;
            remaining -= take;
            cursor = level.next;
        }
        Some(total)
    }

    /// The best resting level, if any.
    pub fn best(&self) -> Option<&PriceLevel> {
        self.best.map(|handle| &self.levels[handle])
    }

    /// The level resting at `price`, if any.
    pub fn level_at(&self, price: Decimal) -> Option<&PriceLevel> {
        self.by_price.get(&price).map(|&handle| &self.levels[handle])
    }

    /// Number of live price levels.
    pub fn depth(&self) -> usize {
        self.by_price.len()
    }

    /// Total resting volume across all levels.
    pub fn total_volume(&self) -> i64 {
        self.total_volume
    }

    /// Iterates levels best to worst.
    pub fn levels(&self) -> LevelIter<'_> {
        LevelIter {
            side: self,
            cursor: self.best,
        }
    }

    /// Splices an unlinked level into the sorted sequence.
    fn link_sorted(&mut self, handle: LevelHandle) {
        let price = self.levels[handle].price;

        let mut prev = None;
        let mut cursor = self.best;
        while let Some(current) = cursor {
            if self.ordering.sorts_before(price, self.levels[current].price) {
                break;
            }
            prev = Some(current);
            cursor = self.levels[current].next;
        }

        self.levels[handle].prev = prev;
        self.levels[handle].next = cursor;
        match prev {
            Some(p) => self.levels[p].next = Some(handle),
            None => self.best = Some(handle),
        }
        if let Some(n) = cursor {
            self.levels[n].prev = Some(handle);
        }
    }

    /// Detaches a level from the sequence without touching the arena.
    fn unlink(&mut self, handle: LevelHandle) {
        let prev = self.levels[handle].prev;
        let next = self.levels[handle].next;
        match prev {
            Some(p) => self.levels[p].next = next,
            None => self.best = next,
        }
        if let Some(n) = next {
            self.levels[n].prev = prev;
        }
    }
}

/// Iterator over a side's levels, best price first.
pub struct LevelIter<'a> {
    side: &'a BookSide,
    cursor: Option<LevelHandle>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let level = &self.side.levels[handle];
        self.cursor = level.next;
        Some(level)
    }
}
