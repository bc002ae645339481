use crate::{Error, Result, features::BmiCategory};
use serde::{Deserialize, Serialize};
use serde_json::Number;

// Largest magnitude at which every integer is exact in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Vec<Number>,
    pub bmi_a: f64,
    pub bmi_b: f64,
    pub bmi_c: f64,
}

impl PredictionResponse {
    pub fn new(predictions: Vec<f64>, category: BmiCategory) -> Result<Self> {
        let [bmi_a, bmi_b, bmi_c] = category.one_hot();
        Ok(Self {
            predictions: predictions
                .into_iter()
                .map(label)
                .collect::<Result<Vec<_>>>()?,
            bmi_a,
            bmi_b,
            bmi_c,
        })
    }
}

/// Whole-number outputs are class labels and go out as JSON integers.
fn label(value: f64) -> Result<Number> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        return Ok(Number::from(value as i64));
    }
    Number::from_f64(value)
        .ok_or_else(|| Error::model(format!("model produced a non-finite prediction: {}", value)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
