//! Line-oriented input feed: parsing and the event loop.
//!
//! One event per line, whitespace separated:
//!
//! ```text
//! <timestamp> A <order-id> <B|S> <price> <size>
//! <timestamp> R <order-id> <size>
//! ```
//!
//! Malformed lines and rejected events are logged and skipped; the stream
//! always continues.

use std::io::BufRead;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::book::OrderBook;
use crate::error::{FeedError, Result};
use crate::events::{AddOrder, OrderEvent, ReduceOrder, Side};
use crate::notify::ChangeNotifier;

/// Field counts for the two record shapes (including timestamp and type).
const ADD_FIELDS: usize = 6;
const REDUCE_FIELDS: usize = 4;

/// Counters for one feed session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    /// Non-empty lines read.
    pub lines: u64,
    /// Events applied to the book.
    pub applied: u64,
    /// Lines or events rejected.
    pub rejected: u64,
}

/// Parses one input line into a typed event.
pub fn parse_line(line: &str) -> std::result::Result<OrderEvent, FeedError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.get(1).copied().unwrap_or("") {
        "A" => parse_add(&fields),
        "R" => parse_reduce(&fields),
        other => Err(FeedError::InvalidMessageType(other.to_string())),
    }
}

fn parse_add(fields: &[&str]) -> std::result::Result<OrderEvent, FeedError> {
    if fields.len() < ADD_FIELDS {
        return Err(FeedError::TruncatedRecord {
            message_type: 'A',
            expected: ADD_FIELDS,
            got: fields.len(),
        });
    }

    let side =
        Side::from_str(fields[3]).map_err(|_| FeedError::InvalidSide(fields[3].to_string()))?;
    let price = Decimal::from_str(fields[4])
        .ok()
        .filter(|price| !price.is_sign_negative())
        .ok_or_else(|| FeedError::InvalidPrice(fields[4].to_string()))?;
    let size = fields[5]
        .parse::<u64>()
        .map_err(|_| FeedError::InvalidSize(fields[5].to_string()))?;

    Ok(OrderEvent::Add(AddOrder {
        timestamp: fields[0].to_string(),
        order_id: fields[2].to_string(),
        side,
        price,
        size,
    }))
}

fn parse_reduce(fields: &[&str]) -> std::result::Result<OrderEvent, FeedError> {
    if fields.len() < REDUCE_FIELDS {
        return Err(FeedError::TruncatedRecord {
            message_type: 'R',
            expected: REDUCE_FIELDS,
            got: fields.len(),
        });
    }

    let size = fields[3]
        .parse::<u64>()
        .map_err(|_| FeedError::InvalidSize(fields[3].to_string()))?;

    Ok(OrderEvent::Reduce(ReduceOrder {
        timestamp: fields[0].to_string(),
        order_id: fields[2].to_string(),
        size,
    }))
}

/// Drives the feed to EOF: parse, apply, publish, one event at a time.
///
/// Each event fully applies (mutation, notification, observer logic)
/// before the next line is read. Only IO failures end the session early;
/// per-line failures are tallied and skipped.
pub fn run_feed<R: BufRead>(
    reader: R,
    book: &mut OrderBook,
    notifier: &mut ChangeNotifier,
) -> Result<FeedStats> {
    let mut stats = FeedStats::default();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        let event = match parse_line(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, line = %line, "rejected input line");
                stats.rejected += 1;
                continue;
            }
        };

        match book.apply(&event) {
            Ok(update) => {
                notifier.publish(book, &update);
                stats.applied += 1;
            }
            Err(err) => {
                warn!(%err, timestamp = event.timestamp(), "rejected event");
                stats.rejected += 1;
            }
        }
    }

    info!(
        lines = stats.lines,
        applied = stats.applied,
        rejected = stats.rejected,
        "feed drained"
    );
    Ok(stats)
}
