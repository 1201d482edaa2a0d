//! Plotters chart backends
//!
//! Each function renders one PNG. Binning and box statistics are pure
//! helpers so the numbers can be checked without a drawing backend.

use std::path::Path;

use log::debug;
use plotters::prelude::*;

use crate::stats::descriptive::quantile_sorted;
use crate::stats::regression::LinearFit;
use crate::vis::PlotSettings;
use crate::{CourtsideError, Result};

/// Equal-width bin edges spanning [min, max]
fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let width = (max - min) / bins as f64;
    (0..=bins).map(|i| min + i as f64 * width).collect()
}

/// Counts per bin for the given edges; values on the top edge land in the
/// last bin
fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len() - 1;
    let min = edges[0];
    let max = edges[bins];
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        if value < min || value > max {
            continue;
        }
        let bin = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }
    counts
}

/// Five-number box summary with 1.5 IQR whiskers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(CourtsideError::Plot("No data for boxplot".into()));
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile_sorted(&sorted, 0.25)
            .ok_or_else(|| CourtsideError::Plot("Quartile computation failed".into()))?;
        let median = quantile_sorted(&sorted, 0.5)
            .ok_or_else(|| CourtsideError::Plot("Quartile computation failed".into()))?;
        let q3 = quantile_sorted(&sorted, 0.75)
            .ok_or_else(|| CourtsideError::Plot("Quartile computation failed".into()))?;

        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        // Whiskers reach the extreme observations inside the fences
        let whisker_low = sorted
            .iter()
            .cloned()
            .find(|&v| v >= low_fence)
            .unwrap_or(sorted[0]);
        let whisker_high = sorted
            .iter()
            .rev()
            .cloned()
            .find(|&v| v <= high_fence)
            .unwrap_or(sorted[sorted.len() - 1]);

        Ok(BoxStats {
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
        })
    }
}

fn value_range(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(CourtsideError::Plot("No data to plot".into()));
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        // Constant data still needs a nonzero axis span
        return Ok((min - 0.5, max + 0.5));
    }
    Ok((min, max))
}

/// Single-series frequency histogram
pub fn histogram_png<P: AsRef<Path>>(
    values: &[f64],
    bins: usize,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if bins == 0 {
        return Err(CourtsideError::Plot("Histogram needs at least one bin".into()));
    }
    let (min, max) = value_range(values)?;
    let edges = bin_edges(min, max, bins);
    let counts = bin_counts(values, &edges);
    let bin_width = edges[1] - edges[0];
    let max_count = *counts.iter().max().unwrap_or(&1) as f64;

    debug!("Rendering histogram to {}", path.as_ref().display());
    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (min - bin_width * 0.1)..(max + bin_width * 0.1),
            0.0..(max_count * 1.1),
        )?;

    chart
        .configure_mesh()
        .x_desc(&settings.x_label)
        .y_desc(&settings.y_label)
        .draw()?;

    let (r, g, b) = settings.color(0);
    let color = RGBColor(r, g, b);
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new(
            [(edges[i], 0.0), (edges[i + 1], count as f64)],
            color.mix(0.7).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Two or more histograms over shared bin edges, alpha-blended with a legend
pub fn overlay_histograms_png<P: AsRef<Path>>(
    series: &[(String, Vec<f64>)],
    bins: usize,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if bins == 0 {
        return Err(CourtsideError::Plot("Histogram needs at least one bin".into()));
    }
    if series.is_empty() {
        return Err(CourtsideError::Plot("No series to plot".into()));
    }

    let pooled: Vec<f64> = series.iter().flat_map(|(_, v)| v.iter().cloned()).collect();
    let (min, max) = value_range(&pooled)?;
    let edges = bin_edges(min, max, bins);
    let bin_width = edges[1] - edges[0];

    let all_counts: Vec<Vec<usize>> = series
        .iter()
        .map(|(_, values)| bin_counts(values, &edges))
        .collect();
    let max_count = all_counts
        .iter()
        .flat_map(|c| c.iter())
        .cloned()
        .max()
        .unwrap_or(1) as f64;

    debug!(
        "Rendering {}-series histogram to {}",
        series.len(),
        path.as_ref().display()
    );
    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (min - bin_width * 0.1)..(max + bin_width * 0.1),
            0.0..(max_count * 1.1),
        )?;

    chart
        .configure_mesh()
        .x_desc(&settings.x_label)
        .y_desc(&settings.y_label)
        .draw()?;

    for (index, ((label, _), counts)) in series.iter().zip(all_counts.iter()).enumerate() {
        let (r, g, b) = settings.color(index);
        let color = RGBColor(r, g, b);
        let edges = edges.clone();
        chart
            .draw_series(counts.iter().enumerate().map(move |(i, &count)| {
                Rectangle::new(
                    [(edges[i], 0.0), (edges[i + 1], count as f64)],
                    color.mix(0.5).filled(),
                )
            }))?
            .label(label.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.5).filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Scatterplot with a fitted trend line
pub fn scatter_with_trend_png<P: AsRef<Path>>(
    x: &[f64],
    y: &[f64],
    fit: &LinearFit,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if x.len() != y.len() {
        return Err(CourtsideError::Plot(format!(
            "Mismatched scatter inputs: {} x values, {} y values",
            x.len(),
            y.len()
        )));
    }
    let (x_min, x_max) = value_range(x)?;
    let (y_min, y_max) = value_range(y)?;
    let x_pad = (x_max - x_min) * 0.05;
    let y_pad = (y_max - y_min) * 0.05;

    debug!("Rendering scatterplot to {}", path.as_ref().display());
    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )?;

    chart
        .configure_mesh()
        .x_desc(&settings.x_label)
        .y_desc(&settings.y_label)
        .draw()?;

    let (r, g, b) = settings.color(0);
    let point_color = RGBColor(r, g, b);
    chart.draw_series(
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| Circle::new((xi, yi), 3, point_color.mix(0.6).filled())),
    )?;

    let (r, g, b) = settings.color(1);
    let line_color = RGBColor(r, g, b);
    chart.draw_series(LineSeries::new(
        [x_min, x_max]
            .iter()
            .map(|&xi| (xi, fit.predict(xi))),
        line_color.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

/// Side-by-side vertical boxplots, one per labeled group
pub fn boxplot_png<P: AsRef<Path>>(
    groups: &[(String, Vec<f64>)],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if groups.is_empty() {
        return Err(CourtsideError::Plot("No groups to plot".into()));
    }

    let stats: Vec<BoxStats> = groups
        .iter()
        .map(|(_, values)| BoxStats::from_values(values))
        .collect::<Result<_>>()?;

    let y_min = stats
        .iter()
        .map(|s| s.whisker_low)
        .fold(f64::INFINITY, f64::min);
    let y_max = stats
        .iter()
        .map(|s| s.whisker_high)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_pad = (y_max - y_min).max(1.0) * 0.1;

    debug!("Rendering boxplot to {}", path.as_ref().display());
    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption(&settings.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(groups.len() as f64 - 0.5), (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|x| {
            let index = x.round();
            if (x - index).abs() < 0.01 && index >= 0.0 && (index as usize) < labels.len() {
                labels[index as usize].clone()
            } else {
                String::new()
            }
        })
        .y_desc(&settings.y_label)
        .draw()?;

    let half_width = 0.2;
    for (i, s) in stats.iter().enumerate() {
        let center = i as f64;
        let (r, g, b) = settings.color(i);
        let color = RGBColor(r, g, b);

        // Box
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - half_width, s.q1), (center + half_width, s.q3)],
            color.mix(0.3).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - half_width, s.q1), (center + half_width, s.q3)],
            color.stroke_width(1),
        )))?;

        // Median line
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(center - half_width, s.median), (center + half_width, s.median)],
            color.stroke_width(2),
        )))?;

        // Whiskers with caps
        for (from, to) in [(s.whisker_low, s.q1), (s.q3, s.whisker_high)] {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(center, from), (center, to)],
                color.stroke_width(1),
            )))?;
        }
        for cap in [s.whisker_low, s.whisker_high] {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(center - half_width / 2.0, cap), (center + half_width / 2.0, cap)],
                color.stroke_width(1),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_edges_span_range() {
        let edges = bin_edges(0.0, 10.0, 5);
        assert_eq!(edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_bin_counts_include_top_edge() {
        let edges = bin_edges(0.0, 10.0, 5);
        let counts = bin_counts(&[0.0, 1.9, 2.0, 9.9, 10.0], &edges);
        assert_eq!(counts, vec![2, 1, 0, 0, 2]);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_bin_counts_skip_out_of_range() {
        let edges = bin_edges(0.0, 10.0, 2);
        let counts = bin_counts(&[-1.0, 5.0, 11.0], &edges);
        assert_eq!(counts.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_box_stats_ordering() {
        let values: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let s = BoxStats::from_values(&values).unwrap();
        assert!(s.whisker_low <= s.q1);
        assert!(s.q1 <= s.median);
        assert!(s.median <= s.q3);
        assert!(s.q3 <= s.whisker_high);
        assert!((s.median - 50.5).abs() < 1e-9);
    }

    #[test]
    fn test_box_stats_clips_outliers() {
        let mut values: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        values.push(1000.0);
        let s = BoxStats::from_values(&values).unwrap();
        // The outlier must not stretch the whisker
        assert!(s.whisker_high < 1000.0);
    }

    #[test]
    fn test_box_stats_empty_is_error() {
        assert!(BoxStats::from_values(&[]).is_err());
    }

    #[test]
    fn test_value_range_constant_data() {
        let (min, max) = value_range(&[5.0, 5.0]).unwrap();
        assert!(min < max);
    }
}
