//! Liquidity pricing observer.
//!
//! Watches book changes and reports how much executing a fixed target size
//! against the changed side would earn (selling into the bids) or cost
//! (buying from the asks), whenever that value changes.

use std::fmt;
use std::io::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;
use strum::Display;
use tracing::error;

use crate::book::OrderBook;
use crate::events::{BookUpdate, Side};
use crate::notify::BookObserver;

/// Direction tag of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum Direction {
    /// Income from selling the target size into the bid side.
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    Sell,
    /// Expense of buying the target size from the ask side.
    #[strum(serialize = "B")]
    #[serde(rename = "B")]
    Buy,
}

/// One reportable change of a fill total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Timestamp of the event that moved the value, passed through.
    pub timestamp: String,
    /// Which derived quantity changed.
    pub direction: Direction,
    /// The new total; `None` when depth is insufficient (rendered `NA`).
    pub amount: Option<Decimal>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{} {} {:.2}", self.timestamp, self.direction, amount),
            None => write!(f, "{} {} NA", self.timestamp, self.direction),
        }
    }
}

/// Destination for emitted reports.
pub trait ReportSink {
    /// Accepts one report.
    fn report(&mut self, report: Report);
}

/// Collects reports in memory; the sink used by tests.
impl ReportSink for Vec<Report> {
    fn report(&mut self, report: Report) {
        self.push(report);
    }
}

/// Writes one formatted report per line.
pub struct WriteSink<W: io::Write> {
    out: W,
}

impl<W: io::Write> WriteSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: io::Write> ReportSink for WriteSink<W> {
    fn report(&mut self, report: Report) {
        if let Err(err) = writeln!(self.out, "{report}") {
            error!(%err, "failed to write report");
        }
    }
}

/// Observer that recomputes the fill total for the mutated side and
/// reports it when it differs from the last reported value.
///
/// A bid-side change reprices what selling the target size would bring in;
/// an ask-side change reprices what buying it would cost. The side queried
/// is the side that changed. Equal consecutive values are suppressed,
/// including insufficient depth before and after.
pub struct LiquidityPricer<S> {
    target_size: u64,
    selling_income: Option<Decimal>,
    buying_expense: Option<Decimal>,
    sink: S,
}

impl<S: ReportSink> LiquidityPricer<S> {
    /// Creates a pricer for a fixed target size.
    pub fn new(target_size: u64, sink: S) -> Self {
        Self {
            target_size,
            selling_income: None,
            buying_expense: None,
            sink,
        }
    }

    /// The fixed target size being priced.
    pub fn target_size(&self) -> u64 {
        self.target_size
    }

    /// The sink reports are delivered to.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ReportSink> BookObserver for LiquidityPricer<S> {
    fn on_change(&mut self, book: &OrderBook, update: &BookUpdate) {
        let amount = book.fill_total(self.target_size, update.side);
        let (direction, last) = match update.side {
            Side::Buy => (Direction::Sell, &mut self.selling_income),
            Side::Sell => (Direction::Buy, &mut self.buying_expense),
        };

        if amount == *last {
            return;
        }
        *last = amount;

        self.sink.report(Report {
            timestamp: update.timestamp.clone(),
            direction,
            amount,
        });
    }
}
