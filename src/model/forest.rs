use super::types::{check_classes, default_classes};
use crate::{Error, Result, features::FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Flattened tree; node 0 is the root and children always follow their parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    #[serde(default = "default_classes")]
    pub classes: Vec<f64>,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn validate(&self, index: usize, class_count: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::model(format!("tree {} has no nodes", index)));
        }
        for (position, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(Error::model(format!(
                            "tree {} node {} splits on unknown feature {}",
                            index, position, feature
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(Error::model(format!(
                            "tree {} node {} has a NaN threshold",
                            index, position
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= position || child >= self.nodes.len() {
                            return Err(Error::model(format!(
                                "tree {} node {} points at invalid child {}",
                                index, position, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != class_count {
                        return Err(Error::model(format!(
                            "tree {} leaf {} has {} class weights, expected {}",
                            index,
                            position,
                            value.len(),
                            class_count
                        )));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(Error::model(format!(
                            "tree {} leaf {} has a negative or non-finite weight",
                            index, position
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut position = 0;
        loop {
            match &self.nodes[position] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    position = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

impl RandomForest {
    pub fn validate(&self) -> Result<()> {
        check_classes(&self.classes)?;
        if self.trees.is_empty() {
            return Err(Error::model("random forest has no trees"));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean of the per-tree normalized leaf distributions.
    pub fn probabilities(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let weight: f64 = leaf.iter().sum();
            if weight > 0.0 {
                for (total, w) in totals.iter_mut().zip(leaf) {
                    *total += w / weight;
                }
            }
        }
        let count = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= count);
        totals
    }

    pub fn classify(&self, features: &[f64]) -> f64 {
        let probabilities = self.probabilities(features);
        let mut best = 0;
        for (index, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = index;
            }
        }
        self.classes[best]
    }
}
