//! Pre-trained K-Means model artifact

use crate::error::{PipelineError, PipelineResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

/// A trained K-Means model loaded from disk.
///
/// The model is an opaque artifact as far as the dashboard is concerned:
/// it exposes a single predict operation and is never retrained here.
/// Centroids live in the scaled feature space the model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansModel {
    /// Number of clusters the model was trained with
    pub n_clusters: usize,
    /// Cluster centroids, shape (n_clusters, n_features)
    pub centroids: Array2<f64>,
}

impl KMeansModel {
    /// Deserialize a model artifact from disk
    ///
    /// # Arguments
    /// * `path` - Path to the bincode artifact
    ///
    /// Fails with `NotFound` if the file is absent, and with
    /// `CorruptArtifact` if deserialization fails or the artifact is
    /// internally inconsistent. The feature-width contract with the
    /// preprocessor is not checked here; a mismatch surfaces from
    /// `predict`.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PipelineError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                PipelineError::CorruptArtifact(e.to_string())
            }
        })?;
        let reader = BufReader::new(file);

        let model: Self = bincode::deserialize_from(reader)
            .map_err(|e| PipelineError::CorruptArtifact(e.to_string()))?;

        if model.n_clusters == 0 || model.centroids.nrows() != model.n_clusters {
            return Err(PipelineError::CorruptArtifact(format!(
                "artifact declares {} clusters but carries {} centroids",
                model.n_clusters,
                model.centroids.nrows()
            )));
        }

        Ok(model)
    }

    /// Serialize the model to disk. Used to generate the artifact the
    /// dashboard consumes; the dashboard itself never writes one.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Assign each row of the feature matrix to its nearest centroid
    ///
    /// # Arguments
    /// * `features` - Scaled feature matrix, shape (n, n_features)
    ///
    /// # Returns
    /// * One cluster id per row, each in [0, n_clusters)
    ///
    /// Fails with `Prediction` if the matrix width does not match the
    /// centroid width.
    pub fn predict(&self, features: &Array2<f64>) -> PipelineResult<Vec<u32>> {
        if features.ncols() != self.centroids.ncols() {
            return Err(PipelineError::Prediction {
                expected: self.centroids.ncols(),
                actual: features.ncols(),
            });
        }

        let mut labels = Vec::with_capacity(features.nrows());
        for row in features.rows() {
            let mut min_distance = f64::INFINITY;
            let mut closest = 0u32;

            for (cluster_idx, centroid) in self.centroids.rows().into_iter().enumerate() {
                let distance: f64 = row
                    .iter()
                    .zip(centroid.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();

                if distance < min_distance {
                    min_distance = distance;
                    closest = cluster_idx as u32;
                }
            }

            labels.push(closest);
        }

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_model() -> KMeansModel {
        // Three well-separated centroids in 3-d scaled space
        let centroids = Array2::from_shape_vec(
            (3, 3),
            vec![-1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )
        .unwrap();

        KMeansModel {
            n_clusters: 3,
            centroids,
        }
    }

    #[test]
    fn test_predict_nearest_centroid() {
        let model = create_test_model();
        let features = Array2::from_shape_vec(
            (3, 3),
            vec![-0.9, -1.1, -1.0, 0.1, -0.1, 0.0, 1.2, 0.8, 1.0],
        )
        .unwrap();

        let labels = model.predict(&features).unwrap();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let model = create_test_model();
        let features = Array2::from_shape_vec((2, 4), vec![0.0; 8]).unwrap();

        let result = model.predict(&features);
        assert!(matches!(
            result,
            Err(PipelineError::Prediction {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_artifact_round_trip() {
        let model = create_test_model();
        let dir = tempdir().unwrap();
        let path = dir.path().join("kmeans_model.bin");

        model.save(&path).unwrap();
        let loaded = KMeansModel::load(&path).unwrap();

        assert_eq!(loaded.n_clusters, model.n_clusters);
        assert_eq!(loaded.centroids, model.centroids);
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let result = KMeansModel::load(Path::new("no_such_model.bin"));
        assert!(matches!(result, Err(PipelineError::NotFound { .. })));
    }

    #[test]
    fn test_garbage_artifact_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.bin");
        std::fs::write(&path, b"not a model").unwrap();

        let result = KMeansModel::load(&path);
        assert!(matches!(result, Err(PipelineError::CorruptArtifact(_))));
    }

    #[test]
    fn test_inconsistent_artifact_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inconsistent.bin");

        let model = KMeansModel {
            n_clusters: 5,
            centroids: Array2::zeros((3, 3)),
        };
        model.save(&path).unwrap();

        let result = KMeansModel::load(&path);
        assert!(matches!(result, Err(PipelineError::CorruptArtifact(_))));
    }
}
