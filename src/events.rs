//! Typed order events and book change notifications.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which half of the book an order rests on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order, resting on the bid side.
    #[strum(serialize = "B")]
    Buy,
    /// Sell order, resting on the ask side.
    #[strum(serialize = "S")]
    Sell,
}

/// A new limit order entering the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOrder {
    /// Opaque feed timestamp, passed through to reports unchanged.
    pub timestamp: String,
    /// Order identifier, unique across both sides while the order is live.
    pub order_id: String,
    /// Side the order rests on.
    pub side: Side,
    /// Limit price.
    pub price: Decimal,
    /// Order size in shares.
    pub size: u64,
}

/// A reduction (partial or full cancel/fill) of a live order.
///
/// Carries no side or price: both are resolved through the order index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOrder {
    /// Opaque feed timestamp, passed through to reports unchanged.
    pub timestamp: String,
    /// Identifier of the order being reduced.
    pub order_id: String,
    /// Size to remove from the order.
    pub size: u64,
}

/// Any event the book accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    /// New limit order.
    Add(AddOrder),
    /// Size reduction of a live order.
    Reduce(ReduceOrder),
}

impl OrderEvent {
    /// The feed timestamp carried by the event.
    pub fn timestamp(&self) -> &str {
        match self {
            OrderEvent::Add(add) => &add.timestamp,
            OrderEvent::Reduce(reduce) => &reduce.timestamp,
        }
    }
}

/// Book change notification.
///
/// Produced once per applied mutation and consumed within the same
/// notification cycle; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdate {
    /// Timestamp of the event that caused the change.
    pub timestamp: String,
    /// Side that was mutated.
    pub side: Side,
}
