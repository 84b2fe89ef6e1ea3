//! SegView: a customer segmentation dashboard
//!
//! Loads a fixed mall-customer dataset and a pre-trained K-Means model,
//! re-applies preprocessing (gender encoding, feature scaling), assigns
//! every customer to a cluster, and produces per-cluster summary metrics,
//! charts, and tabular views.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod summary;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::load_customers;
pub use error::{PipelineError, PipelineResult};
pub use model::KMeansModel;
pub use pipeline::{Dashboard, SelectionState};
pub use summary::{cluster_rows, ClusterSummary};

/// Common result type for orchestration and chart output
pub type Result<T> = anyhow::Result<T>;
