//! BMI evaluation.
//!
//! `evaluate` is a pure function: it validates a weight and height, normalizes
//! the height to meters, computes the BMI rounded to two decimals and
//! classifies the rounded value into a [`Category`]. It never touches
//! transport details; see [`crate::extract`] for turning requests into
//! measurements.

mod category;

pub use category::Category;

use crate::config::{CENTIMETERS_PER_METER, MAX_HEIGHT_M, MAX_WEIGHT_KG};
use crate::error::{Bound, Parameter, ValidationError};

/// Unit the height value was supplied in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeightUnit {
    #[default]
    Centimeters,
    Meters,
}

impl HeightUnit {
    /// `"m"` (any case) selects meters; anything else, including no unit, is centimeters.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(unit) if unit.trim().eq_ignore_ascii_case("m") => HeightUnit::Meters,
            _ => HeightUnit::Centimeters,
        }
    }

    pub fn to_meters(self, height: f64) -> f64 {
        match self {
            HeightUnit::Meters => height,
            HeightUnit::Centimeters => height / CENTIMETERS_PER_METER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeightUnit::Centimeters => "cm",
            HeightUnit::Meters => "m",
        }
    }
}

/// A parsed but not yet validated weight/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_value: f64,
    pub unit: HeightUnit,
}

impl Measurement {
    pub fn new(weight_kg: f64, height_value: f64, unit: HeightUnit) -> Self {
        Self {
            weight_kg,
            height_value,
            unit,
        }
    }

    pub fn evaluate(&self) -> Result<BmiResult, ValidationError> {
        evaluate(self.weight_kg, self.height_value, self.unit)
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub weight_kg: f64,
    /// Height normalized to meters
    pub height_m: f64,
    /// BMI rounded to two decimal places
    pub bmi: f64,
    pub category: Category,
}

impl BmiResult {
    /// Human-readable one-line summary, e.g. `Your BMI is 22.86 (Normal)`.
    pub fn summary(&self) -> String {
        format!("Your BMI is {} ({})", self.bmi, self.category.label())
    }
}

/// Validate a measurement and compute its BMI.
///
/// Checks run in order and the first failure is returned:
/// finite numbers, strictly positive values, then the weight limit and the
/// normalized height limit.
pub fn evaluate(
    weight_kg: f64,
    height_value: f64,
    unit: HeightUnit,
) -> Result<BmiResult, ValidationError> {
    if !weight_kg.is_finite() {
        return Err(ValidationError::NonNumericParameter(Parameter::Weight));
    }
    if !height_value.is_finite() {
        return Err(ValidationError::NonNumericParameter(Parameter::Height));
    }
    if weight_kg <= 0.0 {
        return Err(ValidationError::NonPositiveValue(Parameter::Weight));
    }
    if height_value <= 0.0 {
        return Err(ValidationError::NonPositiveValue(Parameter::Height));
    }

    let height_m = unit.to_meters(height_value);

    if weight_kg > MAX_WEIGHT_KG {
        return Err(ValidationError::OutOfRange {
            parameter: Parameter::Weight,
            bound: Bound::AtMost {
                limit: MAX_WEIGHT_KG,
                unit: "kg",
            },
        });
    }
    if height_m > MAX_HEIGHT_M {
        return Err(ValidationError::OutOfRange {
            parameter: Parameter::Height,
            bound: Bound::AtMost {
                limit: MAX_HEIGHT_M,
                unit: "m",
            },
        });
    }

    let bmi = round_to_cents(weight_kg / (height_m * height_m));
    // A subnormal height squares to zero
    if !bmi.is_finite() {
        return Err(ValidationError::OutOfRange {
            parameter: Parameter::Height,
            bound: Bound::TooSmall,
        });
    }

    Ok(BmiResult {
        weight_kg,
        height_m,
        bmi,
        category: Category::classify(bmi),
    })
}

/// Round to two decimal places, halves away from zero.
///
/// Rounding is applied to `value * 100.0` as computed in `f64`, so 22.995
/// (which scales to exactly 2299.5) becomes 23.0.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_reference_example() {
        let result = evaluate(70.0, 175.0, HeightUnit::Centimeters).unwrap();
        assert_eq!(result.height_m, 1.75);
        assert_eq!(result.bmi, 22.86);
        assert_eq!(result.category, Category::Normal);
        assert_eq!(result.summary(), "Your BMI is 22.86 (Normal)");
    }

    #[test]
    fn test_unit_equivalence() {
        let cm = evaluate(70.0, 170.0, HeightUnit::Centimeters).unwrap();
        let m = evaluate(70.0, 1.70, HeightUnit::Meters).unwrap();
        assert_eq!(cm.bmi, m.bmi);
        assert_eq!(cm.bmi, 24.22);
        assert_eq!(cm.category, Category::Overweight);
    }

    #[test]
    fn test_band_boundaries() {
        // At 1 m the BMI equals the weight
        let cases = [
            (18.5, Category::Normal),
            (23.0, Category::Overweight),
            (25.0, Category::Obese),
            (30.0, Category::SeverelyObese),
        ];
        for (weight, expected) in cases {
            let result = evaluate(weight, 100.0, HeightUnit::Centimeters).unwrap();
            assert_eq!(result.bmi, weight);
            assert_eq!(result.category, expected, "weight {}", weight);
        }
    }

    #[test]
    fn test_classification_uses_rounded_bmi() {
        let result = evaluate(18.495, 1.0, HeightUnit::Meters).unwrap();
        assert_eq!(result.bmi, 18.5);
        assert_eq!(result.category, Category::Normal);

        let result = evaluate(18.494, 1.0, HeightUnit::Meters).unwrap();
        assert_eq!(result.bmi, 18.49);
        assert_eq!(result.category, Category::Underweight);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_to_cents(22.995), 23.0);
        assert_eq!(round_to_cents(22.857142857142858), 22.86);
        assert_eq!(round_to_cents(18.494), 18.49);

        let result = evaluate(22.995, 1.0, HeightUnit::Meters).unwrap();
        assert_eq!(result.bmi, 23.0);
        assert_eq!(result.category, Category::Overweight);
        assert_eq!(result.summary(), "Your BMI is 23 (Overweight (mild))");
    }

    #[test]
    fn test_non_positive_values() {
        assert_eq!(
            evaluate(0.0, 170.0, HeightUnit::Centimeters),
            Err(ValidationError::NonPositiveValue(Parameter::Weight))
        );
        assert_eq!(
            evaluate(70.0, -1.0, HeightUnit::Centimeters),
            Err(ValidationError::NonPositiveValue(Parameter::Height))
        );
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(
            evaluate(f64::NAN, 170.0, HeightUnit::Centimeters),
            Err(ValidationError::NonNumericParameter(Parameter::Weight))
        );
        assert_eq!(
            evaluate(70.0, f64::INFINITY, HeightUnit::Meters),
            Err(ValidationError::NonNumericParameter(Parameter::Height))
        );
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = evaluate(600.0, 170.0, HeightUnit::Centimeters).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                parameter: Parameter::Weight,
                ..
            }
        ));
        assert!(evaluate(500.0, 170.0, HeightUnit::Centimeters).is_ok());
    }

    #[test]
    fn test_height_out_of_range_after_normalization() {
        let err = evaluate(70.0, 350.0, HeightUnit::Centimeters).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                parameter: Parameter::Height,
                ..
            }
        ));
        assert!(evaluate(70.0, 300.0, HeightUnit::Centimeters).is_ok());
        assert!(evaluate(70.0, 3.01, HeightUnit::Meters).is_err());
    }

    #[test]
    fn test_weight_checked_before_height() {
        let err = evaluate(600.0, 350.0, HeightUnit::Centimeters).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                parameter: Parameter::Weight,
                ..
            }
        ));
    }

    #[test]
    fn test_vanishing_height_rejected() {
        let err = evaluate(70.0, 1e-300, HeightUnit::Meters).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                parameter: Parameter::Height,
                bound: Bound::TooSmall,
            }
        );
    }

    #[test]
    fn test_height_unit_parse() {
        assert_eq!(HeightUnit::parse(None), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::parse(Some("m")), HeightUnit::Meters);
        assert_eq!(HeightUnit::parse(Some("M")), HeightUnit::Meters);
        assert_eq!(HeightUnit::parse(Some("cm")), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::parse(Some("")), HeightUnit::Centimeters);
        assert_eq!(HeightUnit::parse(Some("inch")), HeightUnit::Centimeters);
    }

    #[test]
    fn test_measurement_evaluate_is_idempotent() {
        let measurement = Measurement::new(82.5, 1.81, HeightUnit::Meters);
        assert_eq!(measurement.evaluate(), measurement.evaluate());
    }

    #[quickcheck]
    fn prop_valid_inputs_always_evaluate(grams: u32, millimeters: u32) -> bool {
        // weight in (0, 500] kg, height in (0, 3] m
        let weight = f64::from(grams % 500_000 + 1) / 1000.0;
        let height = f64::from(millimeters % 3000 + 1) / 1000.0;

        match evaluate(weight, height, HeightUnit::Meters) {
            Ok(result) => {
                result.bmi == round_to_cents(weight / (height * height))
                    && result.category == Category::classify(result.bmi)
            }
            Err(_) => false,
        }
    }
}
