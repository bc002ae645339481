use serde::{Deserialize, Serialize};

const UNDERWEIGHT_LIMIT: f64 = 18.0;
const OVERWEIGHT_LIMIT: f64 = 26.0;

/// Bucket derived from a body-mass-index value.
///
/// `A` is below 18, `B` covers `[18, 26)` and `C` is everything else,
/// including non-comparable values such as NaN. A record that left the
/// BMI field empty is always `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    A,
    B,
    C,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_LIMIT {
            Self::A
        } else if bmi >= UNDERWEIGHT_LIMIT && bmi < OVERWEIGHT_LIMIT {
            Self::B
        } else {
            Self::C
        }
    }

    /// Category for an optional measurement; an empty field maps to `C`.
    pub fn from_measurement(bmi: Option<f64>) -> Self {
        bmi.map_or(Self::C, Self::from_bmi)
    }

    /// One-hot encoding in `[a, b, c]` order.
    pub fn one_hot(self) -> [f64; 3] {
        match self {
            Self::A => [1.0, 0.0, 0.0],
            Self::B => [0.0, 1.0, 0.0],
            Self::C => [0.0, 0.0, 1.0],
        }
    }
}
