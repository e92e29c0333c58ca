//! Scatter plot rendering for rank vs. hours played
//!
//! Builds the scatter layer, overlays the LOWESS trend curve and exports the
//! chart as a PNG sized to preserve the data aspect ratio of the two axis
//! ranges.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::lowess;
use crate::rankings::{AxisRange, RankingRecord};

/// Chart title, including the snapshot date of the rankings
pub const PLOT_TITLE: &str = "Rank vs. Hours Played (06 May 2025)";

/// Output image width in pixels; height follows from the axis ranges
pub const PLOT_WIDTH: u32 = 3000;

/// Linear tick spacing on both axes, in data units
const TICK_SPACING: f64 = 100.0;

const POINT_SIZE: i32 = 8;
const POINT_OPACITY: f64 = 0.8;
const TREND_STROKE_WIDTH: u32 = 5;

const BACKGROUND: RGBColor = RGBColor(72, 61, 139); // dark slate blue
const FOREGROUND: RGBColor = RGBColor(250, 240, 230); // linen
const POINT_COLOR: RGBColor = RGBColor(250, 128, 114); // salmon
const TREND_COLOR: RGBColor = RGBColor(144, 238, 144); // light green

/// Output image dimensions for the given axis ranges.
///
/// Width is fixed; height preserves the data aspect ratio
/// `hours_range.max / rank_range.max`.
pub fn image_dimensions(rank_range: AxisRange, hours_range: AxisRange) -> (u32, u32) {
    let height = (PLOT_WIDTH as f64 * hours_range.max / rank_range.max).round() as u32;
    (PLOT_WIDTH, height)
}

/// Render the scatter plot with its trend overlay to a PNG at `path`,
/// overwriting any existing file.
pub fn render_scatter(
    path: &Path,
    records: &[RankingRecord],
    rank_range: AxisRange,
    hours_range: AxisRange,
) -> Result<()> {
    let (width, height) = image_dimensions(rank_range, hours_range);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 60).into_font().color(&FOREGROUND))
        .margin(40)
        .x_label_area_size(90)
        .y_label_area_size(110)
        .build_cartesian_2d(rank_range.min..rank_range.max, hours_range.min..hours_range.max)?;

    chart
        .configure_mesh()
        .x_desc("Rank")
        .y_desc("Hours played")
        .x_labels(tick_count(rank_range))
        .y_labels(tick_count(hours_range))
        .x_label_formatter(&|rank| format!("{rank:.0}"))
        .axis_style(&FOREGROUND)
        .label_style(("sans-serif", 28).into_font().color(&FOREGROUND))
        .light_line_style(FOREGROUND.mix(0.15))
        .bold_line_style(FOREGROUND.mix(0.4))
        .draw()?;

    chart.draw_series(records.iter().map(|r| {
        Circle::new(
            (r.current_rank as f64, r.hours_played),
            POINT_SIZE,
            POINT_COLOR.mix(POINT_OPACITY).filled(),
        )
    }))?;

    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.current_rank as f64, r.hours_played))
        .collect();
    let trend = lowess::smooth(&points, lowess::DEFAULT_FRACTION);
    chart.draw_series(LineSeries::new(
        trend,
        TREND_COLOR.stroke_width(TREND_STROKE_WIDTH),
    ))?;

    root.present()?;
    info!(
        "Rendered {}x{} scatter plot to {}",
        width,
        height,
        path.display()
    );
    Ok(())
}

/// Number of labels producing one tick per `TICK_SPACING` data units.
fn tick_count(range: AxisRange) -> usize {
    ((range.max - range.min) / TICK_SPACING).floor().max(0.0) as usize + 1
}
