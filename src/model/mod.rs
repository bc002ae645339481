mod forest;
mod linear;
mod types;

pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use linear::LogisticRegression;
pub use types::ModelArtifact;

use crate::{
    Error, Result,
    features::{FEATURE_COUNT, FeatureVector},
};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

/// Anything that turns a feature vector into model outputs.
///
/// The server only forwards what comes back, one value per input row.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>>;
}

/// Predictor backed by a model artifact loaded at start-up.
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    artifact: ModelArtifact,
}

impl ArtifactPredictor {
    pub fn new(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading model artifact from: {}", path.display());

        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::model(format!("failed to read {}: {}", path.display(), e))
        })?;
        let artifact = ModelArtifact::from_json(&json)?;

        info!(
            "Loaded {} model ({} features) from {}",
            artifact.kind(),
            FEATURE_COUNT,
            path.display()
        );
        Ok(Self { artifact })
    }

}

#[async_trait]
impl Predictor for ArtifactPredictor {
    async fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        if let Some(column) = features.first_non_finite() {
            return Err(Error::model(format!(
                "input contains NaN or infinity in {}",
                column
            )));
        }

        let label = self.artifact.classify(features.as_slice());
        if !label.is_finite() {
            return Err(Error::model("model produced a non-finite prediction"));
        }
        debug!("Model predicted {}", label);
        Ok(vec![label])
    }
}
