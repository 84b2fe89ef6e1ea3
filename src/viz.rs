//! Chart generation using Plotters

use crate::data::{numeric_column, AGE_COL, CLUSTER_COL, INCOME_COL, SCORE_COL};
use plotters::prelude::*;
use polars::prelude::*;
use std::path::Path;

/// Color palette for different clusters
const CLUSTER_COLORS: [RGBColor; 8] = [
    RED,
    BLUE,
    GREEN,
    MAGENTA,
    CYAN,
    RGBColor(255, 140, 0),
    RGBColor(128, 0, 128),
    RGBColor(139, 69, 19),
];

/// Fixed bin count for the age histogram
const AGE_HISTOGRAM_BINS: usize = 15;

fn cluster_color(cluster: u32) -> RGBColor {
    *CLUSTER_COLORS.get(cluster as usize).unwrap_or(&BLACK)
}

/// Create the income-vs-spending scatter plot over the whole dataset,
/// one point per customer, colored by assigned cluster.
///
/// # Arguments
/// * `table` - Segmented table including the cluster column
/// * `output_path` - Path to save the PNG plot
pub fn create_segmentation_scatter(table: &DataFrame, output_path: &Path) -> crate::Result<()> {
    let incomes = numeric_column(table, INCOME_COL)?;
    let scores = numeric_column(table, SCORE_COL)?;
    let labels: Vec<u32> = table
        .column(CLUSTER_COL)?
        .u32()?
        .into_no_null_iter()
        .collect();

    // Bounds with a little padding around the raw values
    let x_min = incomes.iter().fold(f64::INFINITY, |a, &b| a.min(b)) - 5.0;
    let x_max = incomes.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)) + 5.0;
    let y_min = scores.iter().fold(f64::INFINITY, |a, &b| a.min(b)) - 5.0;
    let y_max = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)) + 5.0;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Customer Segmentation: Income vs Spending Score",
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Annual Income (k$)")
        .y_desc("Spending Score (1-100)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (i, (&income, &score)) in incomes.iter().zip(scores.iter()).enumerate() {
        let color = cluster_color(labels[i]);
        chart.draw_series(std::iter::once(Circle::new(
            (income, score),
            4,
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Segmentation scatter saved to: {}", output_path.display());

    Ok(())
}

/// Create the age distribution histogram for one cluster: 15 bins plus
/// a smoothed density overlay.
///
/// # Arguments
/// * `cluster_table` - Rows of the selected cluster only
/// * `cluster` - Selected cluster id, used in the caption
/// * `output_path` - Path to save the PNG plot
pub fn create_age_histogram(
    cluster_table: &DataFrame,
    cluster: u32,
    output_path: &Path,
) -> crate::Result<()> {
    let ages = numeric_column(cluster_table, AGE_COL)?;

    let (age_min, age_max) = if ages.is_empty() {
        (0.0, 100.0)
    } else {
        let min = ages.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = ages.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        // A single distinct value still needs a non-degenerate range
        if (max - min).abs() < f64::EPSILON {
            (min - 1.0, max + 1.0)
        } else {
            (min, max)
        }
    };

    let bin_width = (age_max - age_min) / AGE_HISTOGRAM_BINS as f64;
    let mut counts = vec![0usize; AGE_HISTOGRAM_BINS];
    for &age in &ages {
        let mut bin = ((age - age_min) / bin_width) as usize;
        if bin >= AGE_HISTOGRAM_BINS {
            bin = AGE_HISTOGRAM_BINS - 1;
        }
        counts[bin] += 1;
    }

    let max_count = *counts.iter().max().unwrap_or(&0) as f64;
    let y_max = (max_count * 1.15).max(1.0);

    let root = BitMapBackend::new(output_path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Age Distribution - Cluster {}", cluster),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(age_min..age_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Age")
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (bin, &count) in counts.iter().enumerate() {
        let x0 = age_min + bin as f64 * bin_width;
        let x1 = x0 + bin_width;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, 0.0), (x1, count as f64)],
            RGBColor(0, 128, 128).mix(0.6).filled(),
        )))?;
    }

    // Smoothed density overlay, scaled to the count axis
    if let Some(density) = kde_curve(&ages, age_min, age_max) {
        let scale = ages.len() as f64 * bin_width;
        chart.draw_series(LineSeries::new(
            density.into_iter().map(|(x, d)| (x, d * scale)),
            RGBColor(0, 80, 80).stroke_width(2),
        ))?;
    }

    root.present()?;
    println!("Age histogram saved to: {}", output_path.display());

    Ok(())
}

/// Gaussian kernel density estimate over `[min, max]`, Silverman
/// bandwidth. Returns `None` when there are too few points or no spread
/// to estimate from.
fn kde_curve(values: &[f64], min: f64, max: f64) -> Option<Vec<(f64, f64)>> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64).sqrt();
    if std < 1e-10 {
        return None;
    }

    let bandwidth = 1.06 * std * (n as f64).powf(-0.2);
    let steps = 200;
    let step = (max - min) / steps as f64;

    let curve = (0..=steps)
        .map(|i| {
            let x = min + i as f64 * step;
            let density = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density)
        })
        .collect();

    Some(curve)
}
