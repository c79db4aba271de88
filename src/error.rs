//! Unified error types for the depth pricer.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::events::Side;

/// Unified error type for the depth pricer.
#[derive(Error, Debug)]
pub enum PricerError {
    /// Order book rejected an event.
    #[error("book error: {0}")]
    Book(#[from] BookError),

    /// Input feed error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Order-level rejections raised while mutating the book.
///
/// All of these are per-event failures: the event is dropped, the book is
/// left untouched (except where documented), and the stream continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// An add carried an identifier that is still live.
    #[error("duplicate order id {order_id}")]
    DuplicateOrderId {
        /// The rejected identifier.
        order_id: String,
    },

    /// A reduce referenced an identifier with no live order.
    #[error("no live order with id {order_id}")]
    UnknownOrderId {
        /// The unmatched identifier.
        order_id: String,
    },

    /// A reduce resolved to a price with no live level on that side.
    ///
    /// Indicates an internal consistency violation between the order index
    /// and the side's level index.
    #[error("no {side} price level at {price}")]
    MissingPriceLevel {
        /// Side the order resolved to.
        side: Side,
        /// Price with no live level.
        price: Decimal,
    },
}

/// Per-line input feed failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Message type field was not `A` or `R`.
    #[error("invalid message type {0:?}")]
    InvalidMessageType(String),

    /// Record ended before all fields for its message type were present.
    #[error("truncated {message_type} record: expected {expected} fields, got {got}")]
    TruncatedRecord {
        /// Message type of the record.
        message_type: char,
        /// Fields the record shape requires.
        expected: usize,
        /// Fields actually present.
        got: usize,
    },

    /// Side field was not `B` or `S`.
    #[error("order side must be B or S, got {0:?}")]
    InvalidSide(String),

    /// Price field did not parse as a decimal.
    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    /// Size field did not parse as a non-negative integer.
    #[error("invalid size {0:?}")]
    InvalidSize(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, PricerError>;
