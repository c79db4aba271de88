//! Order book: both sides plus the shared order index.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::book::side::BookSide;
use crate::error::BookError;
use crate::events::{AddOrder, BookUpdate, OrderEvent, ReduceOrder, Side};

/// A live order as recorded in the order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Side the order rests on.
    pub side: Side,
    /// Resting price.
    pub price: Decimal,
    /// Remaining size.
    pub size: i64,
}

/// Limit order book for a single instrument.
///
/// Owns the bid and ask [`BookSide`]s and the order index shared across
/// both (an order id is unique across the whole book). Each accepted
/// mutation yields a [`BookUpdate`] naming the side that changed; rejected
/// events leave the book untouched and yield no update.
#[derive(Debug)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
    orders: HashMap<String, Order>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            orders: HashMap::new(),
        }
    }

    /// Applies any order event.
    pub fn apply(&mut self, event: &OrderEvent) -> Result<BookUpdate, BookError> {
        match event {
            OrderEvent::Add(add) => self.add_order(add),
            OrderEvent::Reduce(reduce) => self.reduce_order(reduce),
        }
    }

    /// Enters a new limit order into the book.
    ///
    /// The first occurrence of an identifier wins: an add reusing a live id
    /// is rejected with zero effect on the book and no update.
    pub fn add_order(&mut self, add: &AddOrder) -> Result<BookUpdate, BookError> {
        if self.orders.contains_key(&add.order_id) {
            return Err(BookError::DuplicateOrderId {
                order_id: add.order_id.clone(),
            });
        }

        self.orders.insert(
            add.order_id.clone(),
            Order {
                side: add.side,
                price: add.price,
                size: add.size as i64,
            },
        );
        self.side_mut(add.side).add(add.price, add.size);

        Ok(BookUpdate {
            timestamp: add.timestamp.clone(),
            side: add.side,
        })
    }

    /// Reduces a live order, removing it entirely when exhausted.
    ///
    /// A reduction larger than the order's remaining size still removes the
    /// full requested amount from the side's resting liquidity; the order
    /// itself is dropped from the index.
    pub fn reduce_order(&mut self, reduce: &ReduceOrder) -> Result<BookUpdate, BookError> {
        let Some(order) = self.orders.get_mut(&reduce.order_id) else {
            return Err(BookError::UnknownOrderId {
                order_id: reduce.order_id.clone(),
            });
        };

        let side = order.side;
        let price = order.price;
        let remaining = order.size - reduce.size as i64;
        if remaining <= 0 {
            self.orders.remove(&reduce.order_id);
        } else {
            order.size = remaining;
        }

        if let Err(err) = self.side_mut(side).reduce(price, reduce.size) {
            // Order index and level index disagree; the order update above
            // stands, the side is untouched.
            warn!(order_id = %reduce.order_id, %err, "book inconsistency on reduce");
        }

        Ok(BookUpdate {
            timestamp: reduce.timestamp.clone(),
            side,
        })
    }

    /// Total monetary amount to fill `target` shares against `side`.
    ///
    /// Pure read; `None` means the side's depth is short of `target`.
    pub fn fill_total(&self, target: u64, side: Side) -> Option<Decimal> {
        self.side(side).fill_total(target)
    }

    /// The requested side of the book.
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    /// The live order with `id`, if any.
    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Number of live orders across both sides.
    pub fn live_orders(&self) -> usize {
        self.orders.len()
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn add(id: &str, side: Side, price: Decimal, size: u64) -> AddOrder {
        AddOrder {
            timestamp: "28800538".to_string(),
            order_id: id.to_string(),
            side,
            price,
            size,
        }
    }

    fn reduce(id: &str, size: u64) -> ReduceOrder {
        ReduceOrder {
            timestamp: "28800744".to_string(),
            order_id: id.to_string(),
            size,
        }
    }

    /// Every level aggregate must equal the sum of live order sizes at its
    /// price and side.
    fn assert_aggregates_consistent(book: &OrderBook) {
        for side in [Side::Buy, Side::Sell] {
            for level in book.side(side).levels() {
                let expected: i64 = book
                    .orders
                    .values()
                    .filter(|order| order.side == side && order.price == level.price)
                    .map(|order| order.size)
                    .sum();
                assert_eq!(level.size, expected, "aggregate at {}", level.price);
            }
        }
    }

    #[test]
    fn add_emits_update_for_the_mutated_side() {
        let mut book = OrderBook::new();
        let update = book.add_order(&add("O1", Side::Buy, dec!(10.00), 100)).unwrap();

        assert_eq!(update.side, Side::Buy);
        assert_eq!(update.timestamp, "28800538");
        assert_eq!(book.fill_total(50, Side::Buy), Some(dec!(500.00)));
        assert_aggregates_consistent(&book);
    }

    #[test]
    fn duplicate_add_is_rejected_without_effect() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Buy, dec!(10.00), 100)).unwrap();

        let err = book
            .add_order(&add("O1", Side::Sell, dec!(11.00), 25))
            .unwrap_err();

        assert_eq!(
            err,
            BookError::DuplicateOrderId {
                order_id: "O1".to_string(),
            }
        );
        assert_eq!(book.live_orders(), 1);
        assert_eq!(book.side(Side::Buy).total_volume(), 100);
        assert_eq!(book.side(Side::Sell).depth(), 0);
        assert_aggregates_consistent(&book);
    }

    #[test]
    fn reduce_unknown_id_is_rejected() {
        let mut book = OrderBook::new();
        let err = book.reduce_order(&reduce("ghost", 10)).unwrap_err();

        assert_eq!(
            err,
            BookError::UnknownOrderId {
                order_id: "ghost".to_string(),
            }
        );
        assert_eq!(book.live_orders(), 0);
    }

    #[test]
    fn partial_reduce_keeps_order_with_remaining_size() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Sell, dec!(44.26), 100)).unwrap();

        let update = book.reduce_order(&reduce("O1", 30)).unwrap();

        assert_eq!(update.side, Side::Sell);
        assert_eq!(book.order("O1").unwrap().size, 70);
        assert_eq!(book.side(Side::Sell).total_volume(), 70);
        assert_aggregates_consistent(&book);
    }

    #[test]
    fn full_reduce_removes_order_and_level() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Buy, dec!(10.00), 100)).unwrap();

        book.reduce_order(&reduce("O1", 100)).unwrap();

        assert!(book.order("O1").is_none());
        assert_eq!(book.side(Side::Buy).depth(), 0);
        assert_eq!(book.side(Side::Buy).total_volume(), 0);
    }

    #[test]
    fn oversized_reduce_removes_order_and_takes_requested_amount() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Buy, dec!(10.00), 30)).unwrap();

        // Reduce by more than the live size: the order goes away and the
        // requested 50 leaves the resting liquidity.
        book.reduce_order(&reduce("O1", 50)).unwrap();

        assert!(book.order("O1").is_none());
        assert_eq!(book.side(Side::Buy).depth(), 0);
        assert_eq!(book.side(Side::Buy).total_volume(), -20);
    }

    #[test]
    fn reduce_after_level_loss_still_updates_index_and_notifies() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Buy, dec!(10.00), 30)).unwrap();
        book.add_order(&add("O2", Side::Buy, dec!(10.00), 10)).unwrap();

        // Oversized reduce of O1 discards the whole 10.00 level even though
        // O2 still rests there.
        book.reduce_order(&reduce("O1", 40)).unwrap();
        assert!(book.side(Side::Buy).level_at(dec!(10.00)).is_none());
        assert_eq!(book.order("O2").unwrap().size, 10);

        // Reducing O2 now hits a missing level: the side stays as it is,
        // the order index still shrinks, and an update is produced.
        let volume_before = book.side(Side::Buy).total_volume();
        let update = book.reduce_order(&reduce("O2", 5)).unwrap();

        assert_eq!(update.side, Side::Buy);
        assert_eq!(book.order("O2").unwrap().size, 5);
        assert_eq!(book.side(Side::Buy).total_volume(), volume_before);
    }

    #[test]
    fn sides_are_independent() {
        let mut book = OrderBook::new();
        book.add_order(&add("B1", Side::Buy, dec!(10.00), 50)).unwrap();
        book.add_order(&add("S1", Side::Sell, dec!(10.50), 40)).unwrap();

        assert_eq!(book.fill_total(50, Side::Buy), Some(dec!(500.00)));
        assert_eq!(book.fill_total(50, Side::Sell), None);
        assert_eq!(book.fill_total(40, Side::Sell), Some(dec!(420.00)));
        assert_aggregates_consistent(&book);
    }

    #[test]
    fn multi_level_fill_walks_best_first() {
        let mut book = OrderBook::new();
        book.add_order(&add("O1", Side::Buy, dec!(10.00), 50)).unwrap();
        book.add_order(&add("O2", Side::Buy, dec!(9.50), 50)).unwrap();

        // 50 @ 10.00 + 25 @ 9.50 = 737.50
        assert_eq!(book.fill_total(75, Side::Buy), Some(dec!(737.50)));
        assert_aggregates_consistent(&book);
    }
}
