use async_trait::async_trait;
use symptom_predictor::{Error, Result, features::FeatureVector, model::Predictor};
use std::sync::{Arc, Mutex};

/// Mock predictor for testing
#[derive(Debug)]
pub struct MockPredictor {
    pub output: Vec<f64>,
    pub requests: Arc<Mutex<Vec<FeatureVector>>>,
    pub error: Option<String>,
}

impl MockPredictor {
    pub fn new() -> Self {
        Self {
            output: vec![1.0],
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_output(mut self, output: Vec<f64>) -> Self {
        self.output = output;
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<FeatureVector> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.requests.lock().unwrap().push(*features);

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        Ok(self.output.clone())
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new()
    }
}
