//! End-to-end render pipeline: load, preprocess, predict

use crate::data::{load_customers, CLUSTER_COL};
use crate::error::PipelineResult;
use crate::model::KMeansModel;
use crate::preprocess::{encode_gender, feature_matrix, StandardScaler};
use polars::prelude::*;
use std::path::Path;

/// User-selected display options, read once per render
#[derive(Debug, Clone, Copy)]
pub struct SelectionState {
    /// Selected cluster id; must be one of the assigned cluster ids
    pub cluster: u32,
    /// Whether to also display the full raw table
    pub show_raw_data: bool,
}

impl SelectionState {
    /// Resolve the requested cluster id against the ids actually
    /// assigned. `None` defaults to the smallest assigned id; an id with
    /// no assigned customers is rejected with the list of valid ids.
    pub fn resolve(
        requested: Option<u32>,
        show_raw_data: bool,
        dashboard: &Dashboard,
    ) -> crate::Result<Self> {
        let ids = dashboard.cluster_ids();

        let cluster = match requested {
            Some(cluster) => {
                if !ids.contains(&cluster) {
                    anyhow::bail!(
                        "cluster {} has no assigned customers; available clusters: {:?}",
                        cluster,
                        ids
                    );
                }
                cluster
            }
            None => ids[0],
        };

        Ok(Self {
            cluster,
            show_raw_data,
        })
    }
}

/// Everything one render needs, built from scratch on every invocation.
///
/// Holds the segmented table (customer rows plus the appended `Cluster`
/// column) and the loaded model. Passed by reference into the summary
/// and chart code; nothing here is global or cached across renders.
#[derive(Debug)]
pub struct Dashboard {
    /// Customer table with gender indicators and the `Cluster` column
    pub table: DataFrame,
    /// The loaded model artifact
    pub model: KMeansModel,
    /// Cluster label per row, in row order
    pub labels: Vec<u32>,
}

impl Dashboard {
    /// Run the full pipeline: load the dataset and model, encode gender,
    /// scale the numeric features, and assign every row to a cluster.
    ///
    /// Scaling statistics are fit on the loaded dataset itself, not
    /// taken from the model artifact, so they track whatever data is
    /// currently on disk. The gender indicator columns are appended to
    /// the table but excluded from the feature matrix. Both behaviors
    /// are deliberate; changing either would change the predictions.
    pub fn build(data_path: &Path, model_path: &Path) -> PipelineResult<Self> {
        let df = load_customers(data_path)?;
        let model = KMeansModel::load(model_path)?;

        let mut df = encode_gender(df)?;
        let features = feature_matrix(&df)?;
        let (_scaler, scaled) = StandardScaler::fit_transform(&features);

        let labels = model.predict(&scaled)?;
        df.with_column(Series::new(CLUSTER_COL, labels.clone()))
            .map_err(|e| crate::error::PipelineError::Parse(e.to_string()))?;

        Ok(Self {
            table: df,
            model,
            labels,
        })
    }

    /// Sorted distinct cluster ids actually assigned; exactly the option
    /// set the cluster selector offers.
    pub fn cluster_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.labels.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
