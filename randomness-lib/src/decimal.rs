//! Random decimal numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    GenerateError, Result,
    settings::{DEFAULT_SCHEME_NAME, Scheme, SchemeSettings, Settings},
    validation::{Target, ValidationInfo, validate_bounded, validate_range},
};

/// Digits beyond this are noise for an `f64`.
pub const MAX_DECIMAL_COUNT: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalScheme {
    pub name: String,
    pub min_value: f64,
    pub max_value: f64,
    pub decimal_count: usize,
    /// Inserted between groups of three integer digits. Empty disables grouping.
    pub grouping_separator: String,
    pub decimal_separator: String,
}

impl Default for DecimalScheme {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEME_NAME.into(),
            min_value: 0.0,
            max_value: 1000.0,
            decimal_count: 2,
            grouping_separator: String::new(),
            decimal_separator: ".".into(),
        }
    }
}

impl DecimalScheme {
    /// Render `value` with this scheme's precision and separators.
    pub fn format(&self, value: f64) -> String {
        let plain = format!("{value:.*}", self.decimal_count);
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let mut out = String::from(sign);
        let digits = integer.chars().count();
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push_str(&self.grouping_separator);
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push_str(&self.decimal_separator);
            out.push_str(fraction);
        }

        out
    }
}

impl Scheme for DecimalScheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.into();
    }

    fn validate(&self) -> Option<ValidationInfo> {
        if !self.min_value.is_finite() {
            return Some(ValidationInfo::new(
                "The minimum value should be a finite number.",
                Target::MinValue,
            ));
        }
        if !self.max_value.is_finite() {
            return Some(ValidationInfo::new(
                "The maximum value should be a finite number.",
                Target::MaxValue,
            ));
        }

        validate_range(self.min_value, self.max_value, "value", Target::MaxValue)
            .or_else(|| {
                validate_bounded(
                    self.decimal_count,
                    0,
                    MAX_DECIMAL_COUNT,
                    "number of decimals",
                    Target::DecimalCount,
                )
            })
            .or_else(|| {
                self.decimal_separator.is_empty().then(|| {
                    ValidationInfo::new(
                        "The decimal separator should not be empty.",
                        Target::Separators,
                    )
                })
            })
            .or_else(|| {
                (self.grouping_separator == self.decimal_separator).then(|| {
                    ValidationInfo::new(
                        "The grouping separator and the decimal separator should differ.",
                        Target::Separators,
                    )
                })
            })
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(GenerateError::NonFinite.into());
        }
        if self.min_value > self.max_value {
            return Err(GenerateError::InvertedRange("value").into());
        }

        // Interpolating keeps the result finite even when the span overflows.
        let t: f64 = rng.random();
        let value = (self.min_value * (1.0 - t) + self.max_value * t)
            .clamp(self.min_value, self.max_value);

        Ok(self.format(value))
    }

    fn of(settings: &Settings) -> &SchemeSettings<Self> {
        &settings.decimal
    }

    fn of_mut(settings: &mut Settings) -> &mut SchemeSettings<Self> {
        &mut settings.decimal
    }
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::Error;

    fn scheme(grouping: &str, decimal: &str, count: usize) -> DecimalScheme {
        DecimalScheme {
            grouping_separator: grouping.into(),
            decimal_separator: decimal.into(),
            decimal_count: count,
            ..Default::default()
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(scheme("", ".", 2).format(1234.567), "1234.57");
        assert_eq!(scheme(",", ".", 2).format(1234567.891), "1,234,567.89");
        assert_eq!(scheme(".", ",", 1).format(-98765.43), "-98.765,4");
        assert_eq!(scheme(",", ".", 0).format(999.6), "1,000");
        assert_eq!(scheme(",", ".", 3).format(12.0), "12.000");
    }

    #[test]
    fn test_generate_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let scheme = DecimalScheme {
            min_value: -5.0,
            max_value: 5.0,
            ..Default::default()
        };

        for _ in 0..100 {
            let value: f64 = scheme.generate(&mut rng).unwrap().parse().unwrap();
            assert!((-5.0..=5.0).contains(&value));
        }
    }

    #[test]
    fn test_generate_single_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let scheme = DecimalScheme {
            min_value: 42.0,
            max_value: 42.0,
            ..Default::default()
        };

        assert_eq!(scheme.generate(&mut rng).unwrap(), "42.00");
    }

    #[test]
    fn test_generate_huge_span() {
        let mut rng = StdRng::seed_from_u64(2);
        let scheme = DecimalScheme {
            min_value: -f64::MAX,
            max_value: f64::MAX,
            decimal_count: 0,
            ..Default::default()
        };

        assert!(scheme.generate(&mut rng).is_ok());
    }

    #[test]
    fn test_generate_rejects_bad_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let inverted = DecimalScheme {
            min_value: 3.0,
            max_value: 2.0,
            ..Default::default()
        };
        let infinite = DecimalScheme {
            max_value: f64::INFINITY,
            ..Default::default()
        };

        assert!(matches!(
            inverted.generate(&mut rng),
            Err(Error::Generate(GenerateError::InvertedRange(_)))
        ));
        assert!(matches!(
            infinite.generate(&mut rng),
            Err(Error::Generate(GenerateError::NonFinite))
        ));
    }

    #[test]
    fn test_validate() {
        assert_eq!(DecimalScheme::default().validate(), None);

        let nan = DecimalScheme {
            min_value: f64::NAN,
            ..Default::default()
        };
        assert_eq!(nan.validate().unwrap().target(), Target::MinValue);

        let inverted = DecimalScheme {
            min_value: 10.0,
            max_value: 1.0,
            ..Default::default()
        };
        assert_eq!(
            inverted.validate().unwrap().message(),
            "The maximum value should not be smaller than the minimum value."
        );

        assert_eq!(
            scheme("", ".", 17).validate().unwrap().target(),
            Target::DecimalCount
        );
        assert_eq!(
            scheme(".", ".", 2).validate().unwrap().target(),
            Target::Separators
        );
        assert_eq!(
            scheme(",", "", 2).validate().unwrap().target(),
            Target::Separators
        );
    }
}
