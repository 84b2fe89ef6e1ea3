//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Customer segmentation dashboard: assigns customers to clusters with a
/// pre-trained K-Means model and reports per-cluster statistics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the customer dataset CSV
    #[arg(short, long, default_value = "Mall_Customers.csv")]
    pub data: String,

    /// Path to the trained K-Means model artifact
    #[arg(short, long, default_value = "kmeans_model.bin")]
    pub model: String,

    /// Cluster to analyze; defaults to the smallest assigned cluster id
    #[arg(short, long)]
    pub cluster: Option<u32>,

    /// Also display the full raw table including the cluster column
    #[arg(long)]
    pub show_raw: bool,

    /// Directory the chart PNGs are written to
    #[arg(short, long, default_value = "charts")]
    pub out_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let args = Args::parse_from(["segview"]);

        assert_eq!(args.data, "Mall_Customers.csv");
        assert_eq!(args.model, "kmeans_model.bin");
        assert_eq!(args.cluster, None);
        assert!(!args.show_raw);
    }

    #[test]
    fn test_selection_flags() {
        let args = Args::parse_from(["segview", "--cluster", "2", "--show-raw"]);

        assert_eq!(args.cluster, Some(2));
        assert!(args.show_raw);
    }
}
