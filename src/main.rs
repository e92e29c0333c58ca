//! rankplot - Main Entry Point
//!
//! Loads the rankings from the local database, then renders the scatter
//! plot. Either a complete image is written or the failing step's error
//! propagates and the process exits non-zero.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use rankplot::{logging, plot, rankings};

/// Location of the rankings database
const DB_PATH: &str = "rankings.db";

/// Output image path, overwritten each run
const OUTPUT_PATH: &str = "results.png";

/// Fraction of players kept, lowest hours played first.
/// e.g. 0.85 cuts the players in the top 15% of hours played.
const HOURS_PERCENTILE: f64 = 1.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init_logging();

    info!("Loading rankings from {DB_PATH}");
    let (records, rank_range, hours_range) =
        rankings::load_rankings(Path::new(DB_PATH), HOURS_PERCENTILE).await?;

    plot::render_scatter(Path::new(OUTPUT_PATH), &records, rank_range, hours_range)?;
    info!("Done, wrote {OUTPUT_PATH}");

    Ok(())
}
