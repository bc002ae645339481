mod bmi;
mod record;

pub use bmi::BmiCategory;
pub use record::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, SurveyRecord};

use crate::Result;
use serde_json::Value;

/// Validates a raw request body and derives the model input from it.
pub fn extract(body: &Value) -> Result<(FeatureVector, BmiCategory)> {
    let record = SurveyRecord::from_json(body)?;
    Ok((record.features(), record.bmi_category()))
}
