//! Data loader for the rankings database
//!
//! Opens the SQLite rankings database read-only, pulls every
//! `(currentRank, hoursPlayed)` pair, applies the hours-played percentile
//! filter and derives the axis ranges for the plot.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::{debug, info};

use crate::error::{RankPlotError, Result};

const RANKINGS_QUERY: &str = "SELECT currentRank, hoursPlayed FROM OsuRankings";

/// A single player's rank and hours-played record
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RankingRecord {
    #[sqlx(rename = "currentRank")]
    pub current_rank: i64,
    #[sqlx(rename = "hoursPlayed")]
    pub hours_played: f64,
}

/// Visible extent of one chart axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Range from 1 up to the given maximum
    pub fn up_to(max: f64) -> Self {
        Self { min: 1.0, max }
    }
}

/// Load rankings from the database at `db_path`.
///
/// Records are sorted ascending by hours played and truncated to the lowest
/// `percentile` fraction (`percentile` in `(0, 1]`; `1.0` keeps everything).
/// Returns the filtered dataset together with the rank and hours axis
/// ranges, both computed over the filtered set only.
pub async fn load_rankings(
    db_path: &Path,
    percentile: f64,
) -> Result<(Vec<RankingRecord>, AxisRange, AxisRange)> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(false)
        .read_only(true);

    let mut conn = SqliteConnection::connect_with(&options).await.map_err(|e| {
        RankPlotError::connection_with_source(
            format!("Could not open rankings database at {}", db_path.display()),
            e,
        )
    })?;

    debug!("Connected to rankings database at {}", db_path.display());

    let rows: std::result::Result<Vec<RankingRecord>, sqlx::Error> =
        sqlx::query_as(RANKINGS_QUERY).fetch_all(&mut conn).await;

    // Release the connection before inspecting the query outcome, so the
    // error path closes it too.
    conn.close().await.map_err(|e| {
        RankPlotError::connection_with_source("Failed to close rankings database", e)
    })?;

    let records = rows
        .map_err(|e| RankPlotError::query_with_source("Rankings query failed", e))?;

    info!("Fetched {} ranking records", records.len());

    let filtered = filter_by_hours_percentile(records, percentile);
    let (rank_range, hours_range) = axis_ranges(&filtered)?;

    Ok((filtered, rank_range, hours_range))
}

/// Keep the lowest `percentile` fraction of records by hours played.
///
/// Sorts ascending by hours played and truncates to `floor(N * percentile)`
/// records, e.g. `0.85` cuts the players in the top 15% of hours played.
pub fn filter_by_hours_percentile(
    mut records: Vec<RankingRecord>,
    percentile: f64,
) -> Vec<RankingRecord> {
    records.sort_by(|a, b| a.hours_played.total_cmp(&b.hours_played));
    let keep = (records.len() as f64 * percentile) as usize;
    records.truncate(keep);
    records
}

/// Compute the rank and hours axis ranges `[1, max]` over `records`.
pub fn axis_ranges(records: &[RankingRecord]) -> Result<(AxisRange, AxisRange)> {
    let max_rank = records
        .iter()
        .map(|r| r.current_rank)
        .max()
        .ok_or(RankPlotError::EmptyDataset)?;
    let max_hours = records
        .iter()
        .map(|r| r.hours_played)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok((
        AxisRange::up_to(max_rank as f64),
        AxisRange::up_to(max_hours),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(current_rank: i64, hours_played: f64) -> RankingRecord {
        RankingRecord {
            current_rank,
            hours_played,
        }
    }

    #[test]
    fn test_full_percentile_keeps_everything() {
        let records = vec![record(1, 500.0), record(2, 10.0), record(3, 250.0)];

        let filtered = filter_by_hours_percentile(records, 1.0);
        assert_eq!(filtered.len(), 3);
        // Sorted ascending by hours played
        assert_eq!(
            filtered,
            vec![record(2, 10.0), record(3, 250.0), record(1, 500.0)]
        );

        let (rank_range, hours_range) = axis_ranges(&filtered).unwrap();
        assert_eq!(rank_range, AxisRange { min: 1.0, max: 3.0 });
        assert_eq!(hours_range, AxisRange { min: 1.0, max: 500.0 });
    }

    #[test]
    fn test_half_percentile_keeps_lowest_hours() {
        let records = vec![
            record(1, 10.0),
            record(2, 20.0),
            record(3, 30.0),
            record(4, 40.0),
        ];

        let filtered = filter_by_hours_percentile(records, 0.5);
        assert_eq!(filtered, vec![record(1, 10.0), record(2, 20.0)]);

        let (rank_range, hours_range) = axis_ranges(&filtered).unwrap();
        assert_eq!(rank_range, AxisRange { min: 1.0, max: 2.0 });
        assert_eq!(hours_range, AxisRange { min: 1.0, max: 20.0 });
    }

    #[test]
    fn test_filtered_size_is_floor_of_fraction() {
        let records: Vec<_> = (1..=10).map(|i| record(i, i as f64)).collect();

        assert_eq!(filter_by_hours_percentile(records.clone(), 1.0).len(), 10);
        assert_eq!(filter_by_hours_percentile(records.clone(), 0.75).len(), 7);
        assert_eq!(filter_by_hours_percentile(records.clone(), 0.33).len(), 3);
        // Small enough fraction floors to zero records
        assert_eq!(filter_by_hours_percentile(records, 0.05).len(), 0);
    }

    #[test]
    fn test_filtered_hours_bounded_by_cutoff() {
        let records: Vec<_> = [42.0, 7.0, 99.0, 13.0, 56.0, 1.0, 88.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, &h)| record(i as i64 + 1, h))
            .collect();

        let percentile = 0.5;
        let mut sorted_hours: Vec<f64> = records.iter().map(|r| r.hours_played).collect();
        sorted_hours.sort_by(f64::total_cmp);
        let cutoff = sorted_hours[(records.len() as f64 * percentile) as usize - 1];

        let filtered = filter_by_hours_percentile(records, percentile);
        assert_eq!(filtered.len(), 4);
        assert!(filtered.iter().all(|r| r.hours_played <= cutoff));
    }

    #[test]
    fn test_axis_ranges_empty_dataset() {
        let result = axis_ranges(&[]);
        assert!(matches!(result, Err(RankPlotError::EmptyDataset)));
    }

    #[test]
    fn test_axis_ranges_min_is_always_one() {
        let (rank_range, hours_range) = axis_ranges(&[record(7, 3.5)]).unwrap();
        assert_eq!(rank_range.min, 1.0);
        assert_eq!(hours_range.min, 1.0);
        assert_eq!(rank_range.max, 7.0);
        assert_eq!(hours_range.max, 3.5);
    }
}
