//! BMI bands and their static reference data.
//!
//! Each band is a half-open interval `[lower, next band's lower)`. The bands
//! are contiguous and the last one is unbounded, so every positive BMI falls
//! into exactly one of them.

use std::fmt;

use serde::Serialize;

use crate::config::{
    BMI_NORMAL_LOWER, BMI_OBESE_LOWER, BMI_OVERWEIGHT_LOWER, BMI_SEVERELY_OBESE_LOWER,
};

/// Health classification for a BMI value, ordered from lowest to highest band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

struct Band {
    code: &'static str,
    label: &'static str,
    description: &'static str,
    lower: f64,
    advice: &'static [&'static str; 4],
}

const UNDERWEIGHT_ADVICE: [&str; 4] = [
    "Eat nutrient-dense meals with enough calories",
    "Focus on quality protein such as lean meat, eggs and beans",
    "Do strength training to build muscle mass",
    "If your weight is very low, see a doctor to find the cause and a treatment plan",
];

const NORMAL_ADVICE: [&str; 4] = [
    "Keep a balance between what you eat and how active you are",
    "Exercise regularly, at least 150 minutes per week",
    "Eat a varied diet from all five food groups in sensible portions",
    "Drink enough water, around 8 glasses a day",
];

// Overweight and obese share the same guidance.
const EXCESS_WEIGHT_ADVICE: [&str; 4] = [
    "Control your calorie intake and increase physical activity",
    "Cut down on foods high in fat and sugar",
    "Do aerobic exercise for at least 30 minutes a day, 5 days a week",
    "Consult a nutrition professional to plan a suitable diet",
];

const SEVERELY_OBESE_ADVICE: [&str; 4] = [
    "See a doctor for guidance and a safe weight-loss plan",
    "Start with gentle exercise such as walking or swimming under professional supervision",
    "Control your diet and reduce calories, especially from fat and sugar",
    "Have regular health checks to watch for weight-related conditions",
];

// Indexed by `Category as usize`.
static BANDS: [Band; 5] = [
    Band {
        code: "underweight",
        label: "Underweight",
        description: "BMI is below the standard range, which may be caused by \
                      insufficient food intake or certain health problems",
        lower: 0.0,
        advice: &UNDERWEIGHT_ADVICE,
    },
    Band {
        code: "normal",
        label: "Normal",
        description: "BMI is within the healthy range, indicating a balanced weight \
                      and good health",
        lower: BMI_NORMAL_LOWER,
        advice: &NORMAL_ADVICE,
    },
    Band {
        code: "overweight",
        label: "Overweight (mild)",
        description: "BMI is starting to rise above the normal range; watch and \
                      control your weight",
        lower: BMI_OVERWEIGHT_LOWER,
        advice: &EXCESS_WEIGHT_ADVICE,
    },
    Band {
        code: "obese",
        label: "Obese",
        description: "BMI is above the normal range, with increased risk of \
                      weight-related diseases such as diabetes and high blood pressure",
        lower: BMI_OBESE_LOWER,
        advice: &EXCESS_WEIGHT_ADVICE,
    },
    Band {
        code: "severely_obese",
        label: "Severely obese",
        description: "BMI is very high, with risk of heart disease, diabetes, high \
                      blood pressure and other health problems; consult a doctor",
        lower: BMI_SEVERELY_OBESE_LOWER,
        advice: &SEVERELY_OBESE_ADVICE,
    },
];

impl Category {
    /// All bands in ascending order.
    pub const ALL: [Category; 5] = [
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::Obese,
        Category::SeverelyObese,
    ];

    fn band(self) -> &'static Band {
        &BANDS[self as usize]
    }

    /// Find the band containing `bmi`.
    ///
    /// Lower bounds are inclusive, so a BMI of exactly 25.0 is `Obese`.
    /// Anything below 18.5 (and NaN) is `Underweight`.
    pub fn classify(bmi: f64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|category| bmi >= category.lower_bound())
            .unwrap_or(Category::Underweight)
    }

    pub fn code(self) -> &'static str {
        self.band().code
    }

    pub fn label(self) -> &'static str {
        self.band().label
    }

    pub fn description(self) -> &'static str {
        self.band().description
    }

    pub fn advice(self) -> &'static [&'static str] {
        self.band().advice
    }

    /// Inclusive lower bound of the band.
    pub fn lower_bound(self) -> f64 {
        self.band().lower
    }

    /// Exclusive upper bound of the band, `None` for the highest band.
    pub fn upper_bound(self) -> Option<f64> {
        Self::ALL
            .get(self as usize + 1)
            .map(|next| next.lower_bound())
    }

    /// Whether `bmi` lies in `[lower_bound, upper_bound)`.
    pub fn contains(self, bmi: f64) -> bool {
        bmi >= self.lower_bound() && self.upper_bound().map_or(true, |upper| bmi < upper)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_classify_boundaries_are_inclusive_lower() {
        assert_eq!(Category::classify(18.49), Category::Underweight);
        assert_eq!(Category::classify(18.5), Category::Normal);
        assert_eq!(Category::classify(22.99), Category::Normal);
        assert_eq!(Category::classify(23.0), Category::Overweight);
        assert_eq!(Category::classify(24.99), Category::Overweight);
        assert_eq!(Category::classify(25.0), Category::Obese);
        assert_eq!(Category::classify(29.99), Category::Obese);
        assert_eq!(Category::classify(30.0), Category::SeverelyObese);
        assert_eq!(Category::classify(75.0), Category::SeverelyObese);
    }

    #[test]
    fn test_classify_degenerate_values() {
        assert_eq!(Category::classify(0.01), Category::Underweight);
        assert_eq!(Category::classify(f64::NAN), Category::Underweight);
        assert_eq!(Category::classify(f64::INFINITY), Category::SeverelyObese);
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in Category::ALL.windows(2) {
            assert_eq!(pair[0].upper_bound(), Some(pair[1].lower_bound()));
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Category::Underweight.lower_bound(), 0.0);
        assert_eq!(Category::SeverelyObese.upper_bound(), None);
    }

    #[test]
    fn test_every_band_has_four_tips() {
        for category in Category::ALL {
            assert_eq!(category.advice().len(), 4, "{}", category.code());
            assert!(!category.description().is_empty());
        }
    }

    #[test]
    fn test_overweight_and_obese_share_advice() {
        assert_eq!(Category::Overweight.advice(), Category::Obese.advice());
        assert_ne!(Category::Normal.advice(), Category::Overweight.advice());
    }

    #[test]
    fn test_table_order_matches_enum() {
        let codes: Vec<_> = Category::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(
            codes,
            ["underweight", "normal", "overweight", "obese", "severely_obese"]
        );
        assert_eq!(Category::Overweight.to_string(), "Overweight (mild)");
    }

    #[quickcheck]
    fn prop_exactly_one_band_contains_each_bmi(hundredths: u32) -> bool {
        let bmi = f64::from(hundredths % 10_000_000) / 100.0;
        let containing: Vec<_> = Category::ALL
            .iter()
            .filter(|category| category.contains(bmi))
            .collect();
        containing.len() == 1 && *containing[0] == Category::classify(bmi)
    }
}
