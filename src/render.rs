//! Chart rendering with `plotters`.
//!
//! One overlaid line chart per measured quantity: the simulator trace drawn
//! solid green, the FireVox trace dashed red, shared `Time [s]` /
//! `Temperature [K]` axes, title, legend, and grid, written as a PNG.

use std::ops::Range;
use std::path::Path;

use log::debug;
use plotters::prelude::*;
use thiserror::Error;

use crate::series::TimeSeries;

/// Figure size in pixels; the original figures were 8x6 inches.
const FIGURE_SIZE: (u32, u32) = (800, 600);

/// Errors raised while drawing a chart.
///
/// `plotters` errors are generic over the backend, so they are carried here
/// as rendered messages alongside the output path.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to draw {path}: {message}")]
    Backend { path: String, message: String },
}

/// Everything needed to draw one comparison chart.
#[derive(Debug)]
pub struct ChartInput<'a> {
    pub title: &'a str,
    pub primary_label: &'a str,
    pub secondary_label: &'a str,
    pub primary: &'a TimeSeries,
    pub secondary: &'a TimeSeries,
    /// Fixed y-range in Kelvin; auto-scaled from the data when absent.
    pub y_range: Option<(f64, f64)>,
}

/// Draw both series on shared axes and write the figure to `out_path`.
pub fn render_chart(input: &ChartInput<'_>, out_path: &Path) -> Result<(), RenderError> {
    draw(input, out_path).map_err(|e| RenderError::Backend {
        path: out_path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!("rendered {}", out_path.display());
    Ok(())
}

fn draw(input: &ChartInput<'_>, out_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(input);

    let mut chart = ChartBuilder::on(&root)
        .caption(input.title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Time [s]")
        .y_desc("Temperature [K]")
        .draw()?;

    chart
        .draw_series(LineSeries::new(input.primary.points(), GREEN.stroke_width(2)))?
        .label(input.primary_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            input.secondary.points(),
            6,
            4,
            RED.stroke_width(2),
        ))?
        .label(input.secondary_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn axis_ranges(input: &ChartInput<'_>) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for series in [input.primary, input.secondary] {
        for (t, v) in series.points() {
            x_min = x_min.min(t);
            x_max = x_max.max(t);
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    if !x_min.is_finite() || x_min >= x_max {
        x_min = 0.0;
        x_max = 1.0;
    }
    let y_range = match input.y_range {
        Some((lo, hi)) => lo..hi,
        None => {
            if !y_min.is_finite() || y_min >= y_max {
                y_min = 0.0;
                y_max = 1.0;
            }
            let pad = (y_max - y_min) * 0.05;
            (y_min - pad)..(y_max + pad)
        }
    };
    (x_min..x_max, y_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input<'a>(
        primary: &'a TimeSeries,
        secondary: &'a TimeSeries,
    ) -> ChartInput<'a> {
        ChartInput {
            title: "Slab temperature",
            primary_label: "FDS",
            secondary_label: "FireVox",
            primary,
            secondary,
            y_range: None,
        }
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chart.png");
        let primary = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![293.15, 294.0, 295.2]);
        let secondary = TimeSeries::new(vec![0.0, 0.5, 1.0, 1.5, 2.0], vec![
            293.15, 293.5, 294.1, 294.6, 295.0,
        ]);

        render_chart(&sample_input(&primary, &secondary), &out).unwrap();

        let metadata = std::fs::metadata(&out).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn fixed_y_range_is_respected() {
        let primary = TimeSeries::new(vec![0.0, 1.0], vec![1270.0, 1280.0]);
        let secondary = TimeSeries::new(vec![0.0, 1.0], vec![1272.0, 1281.0]);
        let mut input = sample_input(&primary, &secondary);
        input.y_range = Some((1260.0, 1300.0));

        let (_, y) = axis_ranges(&input);
        assert_eq!(y, 1260.0..1300.0);
    }

    #[test]
    fn degenerate_data_falls_back_to_unit_ranges() {
        let primary = TimeSeries::new(vec![], vec![]);
        let secondary = TimeSeries::new(vec![], vec![]);
        let (x, y) = axis_ranges(&sample_input(&primary, &secondary));
        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 0.0..1.0);
    }
}
