//! Turning requests into measurements.
//!
//! Query strings and JSON bodies both land in a [`MeasurementInput`], which is
//! the only place presence and number parsing are checked. Handlers never
//! look at the raw fields themselves.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::bmi::{BmiResult, HeightUnit, Measurement};
use crate::error::{Parameter, ValidationError};

/// A field as it arrived: JSON bodies may carry numbers or strings, query
/// strings only carry strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(text) if text.trim().is_empty())
    }

    fn to_number(&self, parameter: Parameter) -> Result<f64, ValidationError> {
        let value = match self {
            RawValue::Number(number) => *number,
            RawValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NonNumericParameter(parameter))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValidationError::NonNumericParameter(parameter))
        }
    }
}

/// Query string parameters for `GET /api/bmi`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub weight: Option<String>,
    pub height: Option<String>,
    pub unit: Option<String>,
}

/// Unvalidated measurement fields extracted from a request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MeasurementInput {
    #[serde(default)]
    pub weight: Option<RawValue>,
    #[serde(default)]
    pub height: Option<RawValue>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl From<QueryParams> for MeasurementInput {
    fn from(params: QueryParams) -> Self {
        Self {
            weight: params.weight.map(RawValue::Text),
            height: params.height.map(RawValue::Text),
            unit: params.unit,
        }
    }
}

impl MeasurementInput {
    /// Parse a JSON object body. The body is read regardless of `Content-Type`.
    ///
    /// Only objects are accepted; a derived struct would otherwise also take
    /// an array and bind its elements to fields by position.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let object: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedRequestBody(e.to_string()))?;

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ValidationError::MalformedRequestBody(e.to_string()))
    }

    /// Check presence of both fields, then parse both as finite numbers.
    ///
    /// Absent, `null` and blank fields count as missing.
    pub fn into_measurement(self) -> Result<Measurement, ValidationError> {
        let weight = self
            .weight
            .filter(|value| !value.is_blank())
            .ok_or(ValidationError::MissingParameter(Parameter::Weight))?;
        let height = self
            .height
            .filter(|value| !value.is_blank())
            .ok_or(ValidationError::MissingParameter(Parameter::Height))?;

        let weight_kg = weight.to_number(Parameter::Weight)?;
        let height_value = height.to_number(Parameter::Height)?;

        Ok(Measurement::new(
            weight_kg,
            height_value,
            HeightUnit::parse(self.unit.as_deref()),
        ))
    }

    pub fn evaluate(self) -> Result<BmiResult, ValidationError> {
        self.into_measurement()?.evaluate()
    }
}
