//! Grouped bar chart of a [`GridSummary`], rendered to SVG with plotters.
//!
//! One cluster of bars per x value, one bar per group value inside each
//! cluster, one colour per group, and a legend naming the groups. The y axis
//! is the predicted probability on `[0, 1]`.
use std::path::Path;

use crate::report::{
    errors::{ReportError, ReportResult},
    summary::GridSummary,
};
use plotters::prelude::*;
use tracing::info;

static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
static SIZE: (u32, u32) = (960, 540);

/// Fraction of each x slot covered by its bars.
const CLUSTER_WIDTH: f64 = 0.8;

const NUM_COLORS: usize = 8;
static GROUP_COLORS: [RGBColor; NUM_COLORS] = [
    RGBColor(31, 120, 180),
    RGBColor(255, 127, 0),
    RGBColor(46, 139, 87),
    RGBColor(227, 26, 28),
    RGBColor(139, 0, 139),
    RGBColor(0, 139, 139),
    RGBColor(255, 215, 0),
    RGBColor(0, 0, 139),
];

/// Draw `summary` as a grouped bar chart at `path` (SVG).
///
/// # Errors
/// - [`ReportError::EmptySummary`] when there is nothing to draw.
/// - [`ReportError::Plot`] for backend failures (e.g. unwritable path).
pub fn render_grouped_bar_chart<P: AsRef<Path>>(
    summary: &GridSummary, path: P, title: &str,
) -> ReportResult<()> {
    let xs = summary.x_values();
    let groups = summary.group_values();
    if xs.is_empty() || groups.is_empty() {
        return Err(ReportError::EmptySummary);
    }
    let path = path.as_ref();
    draw(summary, &xs, &groups, path, title).map_err(|e| ReportError::Plot(e.to_string()))?;
    info!(path = %path.display(), bars = summary.rows().len(), "wrote grouped bar chart");
    Ok(())
}

fn draw(
    summary: &GridSummary, xs: &[f64], groups: &[f64], path: &Path, title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root_area = SVGBackend::new(path, SIZE).into_drawing_area();
    root_area.fill(&WHITE)?;
    let root_area = root_area.titled(title, (DEFAULT_FONT, 20))?;

    let n_x = xs.len();
    let mut chart = ChartBuilder::on(&root_area)
        .margin((5).percent())
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(-0.5f64..(n_x as f64 - 0.5), 0f64..1f64)?;

    let x_label = |v: &f64| {
        let i = v.round();
        if (v - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < n_x {
            format!("{}", xs[i as usize])
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_x)
        .x_label_formatter(&x_label)
        .x_desc(summary.x_name())
        .y_desc("Predicted probability")
        .draw()?;

    let bar_width = CLUSTER_WIDTH / groups.len() as f64;
    for (j, &group) in groups.iter().enumerate() {
        let color = GROUP_COLORS[j % NUM_COLORS];
        let bars = summary.series(group).into_iter().filter_map(|(x, p)| {
            let i = xs.iter().position(|v| *v == x)?;
            let left = i as f64 - CLUSTER_WIDTH / 2.0 + j as f64 * bar_width;
            Some(Rectangle::new([(left, 0.0), (left + bar_width, p)], color.filled()))
        });
        chart
            .draw_series(bars)?
            .label(format!("{} = {}", summary.group_name(), group))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logistic::Coefficients,
        report::grid::{GridAxis, PredictionGrid},
    };
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The chart is written as an SVG file with one bar per summary row and a
    // legend entry per group.
    //
    // Given
    // -----
    // - A 3 × 2 summary, rendered into a temporary directory.
    //
    // Expect
    // ------
    // - The file exists, starts with an `<svg` element, and mentions both
    //   legend labels.
    fn renders_svg_with_legend() {
        let coefs = Coefficients::new(&["x", "g"], array![0.1, -0.2, 0.4]).unwrap();
        let grid = PredictionGrid::new(vec![
            GridAxis::new("x", vec![1.0, 2.0, 3.0]).unwrap(),
            GridAxis::new("g", vec![0.0, 1.0]).unwrap(),
        ])
        .unwrap();
        let summary = GridSummary::from_grid(&grid, &coefs, "x", "g").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.svg");

        render_grouped_bar_chart(&summary, &path, "Make probability").unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("g = 0"));
        assert!(svg.contains("g = 1"));
    }
}
