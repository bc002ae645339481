use super::types::{check_classes, default_classes};
use crate::{Error, Result, features::FEATURE_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<f64>,
}

impl LogisticRegression {
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(Error::model(format!(
                "logistic regression expects {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(Error::model("logistic regression weights must be finite"));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(Error::model(format!(
                "decision threshold {} must lie strictly between 0 and 1",
                self.threshold
            )));
        }
        check_classes(&self.classes)?;
        if self.classes.len() != 2 {
            return Err(Error::model("logistic regression is a binary classifier"));
        }
        Ok(())
    }

    /// Probability of the positive class.
    pub fn probability(&self, features: &[f64]) -> f64 {
        let margin = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x);
        1.0 / (1.0 + (-margin).exp())
    }

    pub fn classify(&self, features: &[f64]) -> f64 {
        if self.probability(features) >= self.threshold {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }
}

fn default_threshold() -> f64 {
    0.5
}
