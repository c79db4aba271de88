//! Depth pricer entry point.

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use depth_pricer::book::OrderBook;
use depth_pricer::config::Config;
use depth_pricer::feed::run_feed;
use depth_pricer::notify::ChangeNotifier;
use depth_pricer::pricer::{LiquidityPricer, WriteSink};

/// Order book depth pricer.
#[derive(Parser, Debug)]
#[command(name = "depth-pricer")]
#[command(about = "Prices a fixed target size against a live limit-order book fed on stdin")]
#[command(version)]
struct Args {
    /// Target size (shares) to price on every book change.
    #[arg(env = "PRICER_TARGET_SIZE")]
    target_size: u64,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; reports own stdout, so logs go to stderr
    let filter = if args.verbose {
        EnvFilter::new("depth_pricer=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = Config {
        target_size: args.target_size,
        verbose: args.verbose,
    };
    if let Err(reason) = config.validate() {
        anyhow::bail!("invalid configuration: {reason}");
    }

    info!(target_size = config.target_size, "starting depth pricer");

    let mut book = OrderBook::new();
    let mut notifier = ChangeNotifier::new();
    notifier.subscribe(Box::new(LiquidityPricer::new(
        config.target_size,
        WriteSink::new(io::stdout().lock()),
    )));

    let stats = run_feed(io::stdin().lock(), &mut book, &mut notifier)?;
    info!(
        lines = stats.lines,
        applied = stats.applied,
        rejected = stats.rejected,
        live_orders = book.live_orders(),
        "session complete"
    );

    Ok(())
}
