use super::{forest::RandomForest, linear::LogisticRegression};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// On-disk model description, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::LogisticRegression(model) => model.validate(),
            Self::RandomForest(model) => model.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::RandomForest(_) => "random_forest",
        }
    }

    pub fn classify(&self, features: &[f64]) -> f64 {
        match self {
            Self::LogisticRegression(model) => model.classify(features),
            Self::RandomForest(model) => model.classify(features),
        }
    }
}

pub(super) fn default_classes() -> Vec<f64> {
    vec![0.0, 1.0]
}

pub(super) fn check_classes(classes: &[f64]) -> Result<()> {
    if classes.len() < 2 {
        return Err(Error::model(format!(
            "a classifier needs at least two classes, found {}",
            classes.len()
        )));
    }
    if classes.iter().any(|c| !c.is_finite()) {
        return Err(Error::model("class labels must be finite numbers"));
    }
    Ok(())
}
