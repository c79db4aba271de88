//! Order book depth pricer.
//!
//! Maintains a live limit-order book for one instrument from a stream of
//! add/reduce events and reports, whenever the value changes, the total
//! money obtained by selling a fixed target size into the bids ("S"
//! reports) or spent buying it from the asks ("B" reports):
//!
//! ```text
//! 28800974 A g S 44.27 100     <- input: add sell order g
//! 28800974 B 8865.00           <- output: buying the target now costs 8865.00
//! ```
//!
//! # Modules
//!
//! - [`config`]: Runtime configuration
//! - [`error`]: Unified error types
//! - [`events`]: Typed order events and change notifications
//! - [`book`]: Order book data structures and mutation logic
//! - [`notify`]: Change notification fan-out
//! - [`pricer`]: Liquidity pricing observer
//! - [`feed`]: Input parsing and the event loop

pub mod book;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod notify;
pub mod pricer;

pub use config::Config;
pub use error::{PricerError, Result};
