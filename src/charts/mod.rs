//! Line charts for the published series.

use chrono::DateTime;
use plotters::prelude::*;

use crate::series::{ChartGroup, SeriesId, SeriesPoint};

const CHART_SIZE: (u32, u32) = (1600, 600);
const DAY_MS: i64 = 86_400_000;
const SERIES_COLORS: [RGBColor; 3] = [BLUE, RED, RGBColor(0, 150, 0)];

/// Renders one chart group to a PNG at `path`. Nothing is written when every
/// series in the group is empty.
pub fn plot_series_chart(
    group: ChartGroup,
    series: &[(SeriesId, &[SeriesPoint])],
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let points = || series.iter().flat_map(|(_, points)| points.iter());
    let (Some(x_min), Some(x_max)) = (
        points().map(|point| point.timestamp_ms).min(),
        points().map(|point| point.timestamp_ms).max(),
    ) else {
        return Ok(());
    };
    let x_range = x_min.saturating_sub(DAY_MS)..x_max.saturating_add(DAY_MS);
    let y_max = if group.is_rate() {
        1.0
    } else {
        points().map(|point| point.value).fold(1.0, f64::max) * 1.1
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(group.title(), ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date (UTC)")
        .y_desc(group.y_desc())
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|timestamp_ms| format_day(*timestamp_ms))
        .draw()?;

    for ((id, points), color) in series.iter().zip(SERIES_COLORS.iter().cycle()) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                points
                    .iter()
                    .map(|point| (point.timestamp_ms, point.value)),
                color,
            ))?
            .label(id.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

fn format_day(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
