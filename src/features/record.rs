use super::bmi::BmiCategory;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

pub const FEATURE_COUNT: usize = 14;

/// Column names in the order the model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "cycle_regular",
    "cycle_length",
    "waist",
    "weight_gain",
    "hair_growth",
    "skin_darkening",
    "hair_loss",
    "pimples",
    "fast_food",
    "reg_exercise",
    "bmi_a",
    "bmi_b",
    "bmi_c",
];

// Request body keys
pub const AGE: &str = "age";
pub const CYCLE_LENGTH: &str = "cycleLength";
pub const WAIST: &str = "waist";
pub const CYCLE: &str = "Cycle(R/I)";
pub const WEIGHT_GAIN: &str = "weightGain";
pub const HAIR_GROWTH: &str = "hairGrowth";
pub const SKIN_DARKENING: &str = "skinDarkening";
pub const HAIR_LOSS: &str = "hairLoss";
pub const PIMPLES: &str = "pimples";
pub const FAST_FOOD: &str = "fastFood";
pub const REG_EXERCISE: &str = "regExercise";
pub const BMI: &str = "bmi";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    /// Pairs each value with its column name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Column name of the first NaN or infinite value, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.named()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A validated survey submission.
///
/// Built from the raw JSON body by [`SurveyRecord::from_json`], which is the
/// only place coercion happens. Empty `cycleLength` and `waist` are stored
/// as zero; an empty `bmi` is kept as `None` so it can pick category `C`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub age: i64,
    pub cycle_regular: bool,
    pub cycle_length: i64,
    pub waist: f64,
    pub weight_gain: bool,
    pub hair_growth: bool,
    pub skin_darkening: bool,
    pub hair_loss: bool,
    pub pimples: bool,
    pub fast_food: bool,
    pub reg_exercise: bool,
    pub bmi: Option<f64>,
}

impl SurveyRecord {
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_input("body", "expected a JSON object"))?;

        // Fields are read in feature order so the first bad one is reported.
        let age = coerce_int(AGE, require(object, AGE)?)?;
        let cycle_length = optional(require(object, CYCLE_LENGTH)?)
            .map(|v| coerce_int(CYCLE_LENGTH, v))
            .transpose()?
            .unwrap_or(0);
        let waist = optional(require(object, WAIST)?)
            .map(|v| coerce_decimal(WAIST, v))
            .transpose()?
            .unwrap_or(0.0);

        let cycle = require(object, CYCLE)?
            .as_str()
            .ok_or_else(|| Error::invalid_input(CYCLE, "expected a string"))?;
        let cycle_regular = cycle.to_lowercase() == "regular";

        let weight_gain = yes_flag(require(object, WEIGHT_GAIN)?);
        let hair_growth = yes_flag(require(object, HAIR_GROWTH)?);
        let skin_darkening = yes_flag(require(object, SKIN_DARKENING)?);
        let hair_loss = yes_flag(require(object, HAIR_LOSS)?);
        let pimples = yes_flag(require(object, PIMPLES)?);
        let fast_food = yes_flag(require(object, FAST_FOOD)?);
        let reg_exercise = yes_flag(require(object, REG_EXERCISE)?);

        let bmi = optional(require(object, BMI)?)
            .map(|v| coerce_decimal(BMI, v))
            .transpose()?;

        Ok(Self {
            age,
            cycle_regular,
            cycle_length,
            waist,
            weight_gain,
            hair_growth,
            skin_darkening,
            hair_loss,
            pimples,
            fast_food,
            reg_exercise,
            bmi,
        })
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_measurement(self.bmi)
    }

    pub fn features(&self) -> FeatureVector {
        let [bmi_a, bmi_b, bmi_c] = self.bmi_category().one_hot();
        FeatureVector([
            self.age as f64,
            flag(self.cycle_regular),
            self.cycle_length as f64,
            self.waist,
            flag(self.weight_gain),
            flag(self.hair_growth),
            flag(self.skin_darkening),
            flag(self.hair_loss),
            flag(self.pimples),
            flag(self.fast_food),
            flag(self.reg_exercise),
            bmi_a,
            bmi_b,
            bmi_c,
        ])
    }
}

fn flag(set: bool) -> f64 {
    if set { 1.0 } else { 0.0 }
}

fn require<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| Error::invalid_input(field, "missing required field"))
}

/// `None` for values that count as an empty answer.
fn optional(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

fn yes_flag(value: &Value) -> bool {
    value.as_str() == Some("Y")
}

fn coerce_int(field: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Floats truncate toward zero
            match n.as_f64().map(f64::trunc) {
                Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                _ => Err(Error::invalid_input(
                    field,
                    format!("number {} is out of integer range", n),
                )),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            Error::invalid_input(field, format!("could not convert {:?} to an integer", s))
        }),
        other => Err(Error::invalid_input(
            field,
            format!("expected an integer, got {}", type_name(other)),
        )),
    }
}

fn coerce_decimal(field: &str, value: &Value) -> Result<f64> {
    let decimal = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            Error::invalid_input(field, format!("could not convert {} to a decimal", n))
        })?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            Error::invalid_input(field, format!("could not convert {:?} to a decimal", s))
        })?,
        other => {
            return Err(Error::invalid_input(
                field,
                format!("expected a decimal, got {}", type_name(other)),
            ));
        }
    };

    // str::parse accepts "nan" and "inf"
    if !decimal.is_finite() {
        return Err(Error::invalid_input(field, "must be a finite number"));
    }
    Ok(decimal)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
