//! Static Chart Renderer
//! Renders the analysis figures to PNG or SVG with Plotters.
//!
//! Chart kinds:
//! 1. Categorical-year panels (scatter or bar), standalone or in a 2x2 grid
//!    under a shared title
//! 2. Multi-country trend line chart with point markers and a legend
//! 3. Side-by-side distribution histograms with a shared frequency axis

use crate::stats::format_thousands;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

// Series colors (RGB)
pub const COTE_DIVOIRE_COLOR: RGBColor = RGBColor(0, 128, 0); // Green
pub const GHANA_COLOR: RGBColor = RGBColor(255, 165, 0); // Orange

/// Number of equal-width bins in the distribution histograms.
pub const HIST_BINS: usize = 8;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render chart: {0}")]
    Render(String),
}

impl ChartError {
    fn render<E: std::fmt::Display>(err: E) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Chart kind for a categorical-year panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// One dot per year, grid on both axes.
    Scatter,
    /// One vertical bar per year, horizontal grid only.
    Bar,
}

/// One categorical-axis chart: a value per year label for one country.
#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub year_labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

/// One country's numeric-year series for trend and histogram charts.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    pub label: String,
    pub years: Vec<i64>,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

/// Renders static chart files; `.svg` paths get vector output, anything
/// else is rasterized to PNG.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a single panel to `path`.
    pub fn save_panel(path: &Path, panel: &Panel, size: (u32, u32)) -> Result<(), ChartError> {
        if Self::is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_panel(&root, panel)?;
            root.present().map_err(ChartError::render)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_panel(&root, panel)?;
            root.present().map_err(ChartError::render)
        }
    }

    /// Render up to four panels as a 2x2 grid under a shared title.
    pub fn save_panel_grid(
        path: &Path,
        title: &str,
        panels: &[Panel],
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        if Self::is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_panel_grid(&root, title, panels)?;
            root.present().map_err(ChartError::render)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_panel_grid(&root, title, panels)?;
            root.present().map_err(ChartError::render)
        }
    }

    /// Render the population trend line chart (markers + legend).
    pub fn save_trend_chart(
        path: &Path,
        title: &str,
        series: &[CountrySeries],
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        if Self::is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_trend_chart(&root, title, series)?;
            root.present().map_err(ChartError::render)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_trend_chart(&root, title, series)?;
            root.present().map_err(ChartError::render)
        }
    }

    /// Render side-by-side distribution histograms with a shared y range.
    pub fn save_histogram_pair(
        path: &Path,
        series: &[CountrySeries],
        size: (u32, u32),
    ) -> Result<(), ChartError> {
        if Self::is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_histogram_pair(&root, series)?;
            root.present().map_err(ChartError::render)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&WHITE).map_err(ChartError::render)?;
            Self::draw_histogram_pair(&root, series)?;
            root.present().map_err(ChartError::render)
        }
    }

    fn is_svg(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }

    fn draw_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &Panel,
    ) -> Result<(), ChartError> {
        if panel.values.is_empty() {
            return Ok(());
        }

        let n = panel.year_labels.len().min(panel.values.len()) as i32;
        let (y_lo, y_hi) = match panel.kind {
            PanelKind::Scatter => value_range(&panel.values, false),
            PanelKind::Bar => value_range(&panel.values, true),
        };

        let mut chart = ChartBuilder::on(area)
            .caption(panel.title.as_str(), ("sans-serif", 16))
            .margin(8)
            .x_label_area_size(52)
            .y_label_area_size(64)
            .build_cartesian_2d((0..n).into_segmented(), y_lo..y_hi)
            .map_err(ChartError::render)?;

        let labels = &panel.year_labels;
        let x_formatter = |seg: &SegmentValue<i32>| match seg {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                labels.get(*i as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };
        let y_formatter = |v: &f64| format_thousands(*v);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(panel.x_desc.as_str())
            .y_desc(panel.y_desc.as_str())
            .x_labels(labels.len())
            .x_label_style(
                ("sans-serif", 11)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        if panel.kind == PanelKind::Bar {
            mesh.disable_x_mesh();
        }
        mesh.draw().map_err(ChartError::render)?;

        match panel.kind {
            PanelKind::Scatter => {
                chart
                    .draw_series(panel.values.iter().enumerate().map(|(i, &v)| {
                        Circle::new((SegmentValue::CenterOf(i as i32), v), 4, panel.color.filled())
                    }))
                    .map_err(ChartError::render)?;
            }
            PanelKind::Bar => {
                chart
                    .draw_series(
                        Histogram::vertical(&chart)
                            .style(panel.color.filled())
                            .margin(1)
                            .data(panel.values.iter().enumerate().map(|(i, &v)| (i as i32, v))),
                    )
                    .map_err(ChartError::render)?;
            }
        }

        Ok(())
    }

    fn draw_panel_grid<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        title: &str,
        panels: &[Panel],
    ) -> Result<(), ChartError> {
        let titled = root
            .titled(title, ("sans-serif", 28))
            .map_err(ChartError::render)?;
        let cells = titled.split_evenly((2, 2));
        for (cell, panel) in cells.iter().zip(panels.iter()) {
            Self::draw_panel(cell, panel)?;
        }
        Ok(())
    }

    fn draw_trend_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        title: &str,
        series: &[CountrySeries],
    ) -> Result<(), ChartError> {
        let (x_lo, x_hi) = year_range(series);
        let all_values: Vec<f64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
        let (y_lo, y_hi) = value_range(&all_values, false);

        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Population")
            .y_label_formatter(&|v| format_millions(*v))
            .draw()
            .map_err(ChartError::render)?;

        for s in series {
            let color = s.color;
            let points: Vec<(i32, f64)> = s
                .years
                .iter()
                .zip(s.values.iter())
                .map(|(&year, &v)| (year as i32, v))
                .collect();

            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(ChartError::render)?
                .label(s.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });

            // Point markers on top of the line
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(ChartError::render)?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(ChartError::render)?;

        Ok(())
    }

    fn draw_histogram_pair<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        series: &[CountrySeries],
    ) -> Result<(), ChartError> {
        let cells = root.split_evenly((1, 2));
        let binned: Vec<(Vec<f64>, Vec<usize>)> = series
            .iter()
            .map(|s| bin_counts(&s.values, HIST_BINS))
            .collect();

        // Shared frequency axis: tallest bin across both countries
        let tallest = binned
            .iter()
            .flat_map(|(_, counts)| counts.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        let y_hi = tallest * 1.05;

        for (i, cell) in cells.iter().enumerate() {
            let Some(s) = series.get(i) else {
                break;
            };
            let (edges, counts) = &binned[i];
            let x_lo = *edges.first().unwrap_or(&0.0);
            let x_hi = *edges.last().unwrap_or(&1.0);

            let mut chart = ChartBuilder::on(cell)
                .caption(
                    format!("{}'s Population Distribution", s.label),
                    ("sans-serif", 16),
                )
                .margin(8)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)
                .map_err(ChartError::render)?;

            // Left cell carries the shared frequency labels
            let first = i == 0;
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc("Population")
                .y_desc(if first { "Frequency (years)" } else { "" })
                .x_label_formatter(&|v| format_millions(*v))
                .y_labels((tallest as usize + 1).min(10))
                .y_label_formatter(&|v| {
                    if first {
                        format!("{v:.0}")
                    } else {
                        String::new()
                    }
                })
                .draw()
                .map_err(ChartError::render)?;

            let bars: Vec<Rectangle<(f64, f64)>> = edges
                .windows(2)
                .zip(counts.iter())
                .filter(|(_, &count)| count > 0)
                .map(|(edge, &count)| {
                    Rectangle::new(
                        [(edge[0], 0.0), (edge[1], count as f64)],
                        s.color.mix(0.7).filled(),
                    )
                })
                .collect();
            chart.draw_series(bars).map_err(ChartError::render)?;
        }

        Ok(())
    }
}

/// Equal-width histogram bins over `[min, max]`; the maximum value lands
/// in the last bin. A constant sample widens to +/-0.5 around the value.
///
/// Returns `bins + 1` edges and one count per bin.
pub fn bin_counts(values: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        let edges = (0..=bins).map(|i| i as f64 / bins as f64).collect();
        return (edges, vec![0; bins]);
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in &finite {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in finite {
        let mut idx = ((v - lo) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }

    (edges, counts)
}

/// Padded value range for a chart axis. Bar baselines anchor at zero.
fn value_range(values: &[f64], include_zero: bool) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }

    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };
    if include_zero {
        (lo.min(0.0), hi + pad)
    } else {
        (lo - pad, hi + pad)
    }
}

fn year_range(series: &[CountrySeries]) -> (i32, i32) {
    let mut lo = i32::MAX;
    let mut hi = i32::MIN;
    for s in series {
        for &year in &s.years {
            lo = lo.min(year as i32);
            hi = hi.max(year as i32);
        }
    }
    if lo > hi {
        return (0, 1);
    }

    let pad = ((((hi - lo) as f64) * 0.05).ceil() as i32).max(1);
    (lo - pad, hi + pad)
}

fn format_millions(value: f64) -> String {
    format!("{:.0}M", value / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_counts_cover_every_value() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let (edges, counts) = bin_counts(&values, 8);
        assert_eq!(edges.len(), 9);
        assert_eq!(counts.len(), 8);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
        // maximum value belongs to the last bin, not an overflow bin
        assert_eq!(*counts.last().unwrap(), 1);
        assert_eq!(edges[0], 1.0);
        assert!((edges[8] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn bin_counts_widen_constant_samples() {
        let (edges, counts) = bin_counts(&[5.0, 5.0, 5.0], 8);
        assert_eq!(edges[0], 4.5);
        assert_eq!(edges[8], 5.5);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn bin_counts_empty_input() {
        let (edges, counts) = bin_counts(&[], 8);
        assert_eq!(edges.len(), 9);
        assert!(counts.iter().all(|&c| c == 0));
    }

    #[test]
    fn value_range_pads_and_anchors() {
        let (lo, hi) = value_range(&[10.0, 20.0], false);
        assert!(lo < 10.0 && hi > 20.0);

        let (lo, hi) = value_range(&[10.0, 20.0], true);
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);

        // degenerate inputs still produce a drawable range
        let (lo, hi) = value_range(&[], false);
        assert!(lo < hi);
        let (lo, hi) = value_range(&[3.0], false);
        assert!(lo < 3.0 && hi > 3.0);
    }

    #[test]
    fn panel_renders_to_svg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let panel = Panel {
            kind: PanelKind::Scatter,
            title: "Year vs Yield - Ghana".into(),
            x_desc: "Year".into(),
            y_desc: "Yield".into(),
            year_labels: vec!["2019".into(), "2020".into(), "2021".into()],
            values: vec![5000.0, 5200.0, 5150.0],
            color: GHANA_COLOR,
        };

        for name in ["panel.svg", "panel.png"] {
            let path = dir.path().join(name);
            ChartRenderer::save_panel(&path, &panel, (640, 480)).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn trend_chart_renders_deterministically() {
        let dir = tempfile::tempdir().unwrap();
        let series = vec![
            CountrySeries {
                label: "Côte d'Ivoire".into(),
                years: vec![1960, 1970, 1980],
                values: vec![3_508_000.0, 5_411_000.0, 8_066_000.0],
                color: COTE_DIVOIRE_COLOR,
            },
            CountrySeries {
                label: "Ghana".into(),
                years: vec![1960, 1970, 1980],
                values: vec![6_728_000.0, 8_678_000.0, 12_081_000.0],
                color: GHANA_COLOR,
            },
        ];

        let first = dir.path().join("trend_a.svg");
        let second = dir.path().join("trend_b.svg");
        ChartRenderer::save_trend_chart(&first, "Population Trends", &series, (800, 500)).unwrap();
        ChartRenderer::save_trend_chart(&second, "Population Trends", &series, (800, 500)).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }
}
