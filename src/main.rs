//! SegView: Customer segmentation dashboard over a pre-trained K-Means model
//!
//! This is the main entrypoint that runs one full render: load the
//! dataset and model, assign clusters, and display metrics, charts, and
//! tables for the selected cluster.

use anyhow::Result;
use clap::Parser;
use segview::{cluster_rows, viz, Args, ClusterSummary, Dashboard, PipelineError, SelectionState};
use std::path::Path;
use std::time::Instant;

fn main() {
    let args = Args::parse();

    if let Err(err) = render(&args) {
        report_error(&err, &args);
        std::process::exit(1);
    }
}

/// Run one complete render. Every invocation re-executes the whole
/// pipeline from disk; nothing is cached between renders.
fn render(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    if args.verbose {
        println!("SegView - Customer Segmentation Dashboard");
        println!("==========================================\n");
        println!("Dataset: {}", args.data);
        println!("Model artifact: {}", args.model);
    }

    // Step 1: load, preprocess, predict
    let dashboard = Dashboard::build(Path::new(&args.data), Path::new(&args.model))?;

    println!(
        "✓ Loaded {} customers, {} clusters",
        dashboard.table.height(),
        dashboard.model.n_clusters
    );

    // Step 2: resolve the selection against the assigned cluster ids
    let selection = SelectionState::resolve(args.cluster, args.show_raw, &dashboard)?;

    if args.verbose {
        println!("Available clusters: {:?}", dashboard.cluster_ids());
        println!("Selected cluster: {}\n", selection.cluster);
    }

    // Step 3: summary metrics for the selected cluster
    let summary = ClusterSummary::compute(&dashboard.table, selection.cluster)?;

    println!("\n=== Cluster {} Metrics ===", selection.cluster);
    println!("Customers:           {}", summary.count);
    println!("Mean age:            {}", summary.formatted_age());
    println!("Mean annual income:  {}", summary.formatted_income());
    println!("Mean spending score: {}", summary.formatted_score());

    // Step 4: charts
    std::fs::create_dir_all(&args.out_dir)?;
    let out_dir = Path::new(&args.out_dir);
    let scatter_path = out_dir.join("segmentation_scatter.png");
    let histogram_path = out_dir.join("age_histogram.png");

    let rows = cluster_rows(&dashboard.table, selection.cluster)?;
    viz::create_segmentation_scatter(&dashboard.table, &scatter_path)?;
    viz::create_age_histogram(&rows, selection.cluster, &histogram_path)?;

    // Step 5: tables
    println!("\n=== Cluster {} Customers ===", selection.cluster);
    println!("{}", rows);

    if selection.show_raw_data {
        println!("\n=== Raw Data ===");
        println!("{}", dashboard.table);
    }

    if args.verbose {
        println!(
            "\nRender completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Map a render failure to its user-facing message. A missing input file
/// gets the remediation text naming both required files; everything else
/// is shown raw.
fn report_error(err: &anyhow::Error, args: &Args) {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::NotFound { .. }) => {
            eprintln!("{}", PipelineError::remediation(&args.data, &args.model));
        }
        _ => eprintln!("Error: {}", err),
    }
}
