//! Validation of raw query parameter tokens.
//!
//! Every function here is pure and total: a bad token never panics, it
//! produces a [`ParamError`] citing the offending value and the violated
//! bound. Validation happens before any SQL is assembled.

use thiserror::Error;

/// Bounds for the `limit` and `offset` parameters.
pub const LIMIT_MIN: i64 = 0;
/// Upper bound shared by `limit` and `offset`.
pub const LIMIT_MAX: i64 = 10_000;
/// Lower bound for the one-indexed `page` parameter.
pub const PAGE_MIN: i64 = 1;
/// Upper bound for the `page` parameter.
pub const PAGE_MAX: i64 = 10_000;

/// A malformed or out-of-range query parameter.
///
/// Each variant renders a distinct human-readable message naming the
/// parameter and the raw value, suitable for returning to the client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// A date component token did not parse as an integer.
    #[error("malformed query parameter '{field}': '{value}' is not a valid integer date value")]
    MalformedDate {
        /// The parameter name (`year` or `month`).
        field: &'static str,
        /// The raw token.
        value: String,
    },

    /// A date component fell outside its domain bounds.
    #[error("invalid {field} value '{value}': {field}s must be between {min} and {max}")]
    DateOutOfRange {
        /// The parameter name (`year` or `month`).
        field: &'static str,
        /// The raw token.
        value: String,
        /// Inclusive lower bound.
        min: i32,
        /// Inclusive upper bound.
        max: i32,
    },

    /// A threshold token did not parse as a decimal number.
    #[error("malformed query parameters: {unit} value '{value}' should be a decimal number")]
    MalformedThreshold {
        /// The measurement unit (`ppm` or `ppb`).
        unit: &'static str,
        /// The raw token.
        value: String,
    },

    /// A threshold fell outside the dataset's domain range.
    #[error("malformed query parameters: {unit} value '{value}' is outside the query range {min} to {max}")]
    ThresholdOutOfRange {
        /// The measurement unit (`ppm` or `ppb`).
        unit: &'static str,
        /// The raw token.
        value: String,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A single-valued parameter was supplied more than once.
    #[error("malformed query parameters: only one value is allowed for '{field}'")]
    SingleValueExpected {
        /// The parameter name.
        field: &'static str,
    },

    /// A boolean token did not parse as `true` or `false`.
    #[error("malformed query parameter '{field}': '{value}' is not a valid boolean value")]
    MalformedBool {
        /// The parameter name.
        field: &'static str,
        /// The raw token.
        value: String,
    },

    /// An integer token did not parse as an integer.
    #[error("malformed query parameter '{field}': '{value}' is not a valid integer value")]
    MalformedInt {
        /// The parameter name.
        field: &'static str,
        /// The raw token.
        value: String,
    },

    /// An integer parameter fell outside its bounds.
    #[error("invalid {field} value '{value}': {field} must be between {min} and {max}")]
    IntOutOfRange {
        /// The parameter name.
        field: &'static str,
        /// The raw token.
        value: String,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

/// A date component accepted by the `year` and `month` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// Calendar year, `[0, 3000]`.
    Year,
    /// Calendar month, `[1, 12]`.
    Month,
}

impl DateField {
    /// The physical column and parameter name.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
        }
    }

    fn bounds(self) -> (i32, i32) {
        match self {
            Self::Year => (0, 3000),
            Self::Month => (1, 12),
        }
    }
}

/// Validates a single date component token.
///
/// # Errors
///
/// Returns a [`ParamError`] if the token is not an integer or falls outside
/// the field's bounds.
pub fn validate_date(field: DateField, token: &str) -> Result<i32, ParamError> {
    let value: i32 = token.parse().map_err(|_| ParamError::MalformedDate {
        field: field.column(),
        value: token.to_string(),
    })?;

    let (min, max) = field.bounds();
    if value < min || value > max {
        return Err(ParamError::DateOutOfRange {
            field: field.column(),
            value: token.to_string(),
            min,
            max,
        });
    }
    Ok(value)
}

/// Validates a single threshold token against the dataset's domain range.
///
/// # Errors
///
/// Returns a [`ParamError`] if the token is not a decimal number or falls
/// outside `[min, max]`.
pub fn validate_threshold(
    token: &str,
    (min, max): (f64, f64),
    unit: &'static str,
) -> Result<f64, ParamError> {
    let value: f64 = token.parse().map_err(|_| ParamError::MalformedThreshold {
        unit,
        value: token.to_string(),
    })?;

    if !(value >= min && value <= max) {
        return Err(ParamError::ThresholdOutOfRange {
            unit,
            value: token.to_string(),
            min,
            max,
        });
    }
    Ok(value)
}

/// Validates a single-valued boolean parameter.
///
/// # Errors
///
/// Returns a [`ParamError`] unless exactly one token parses as a boolean
/// literal.
pub fn validate_bool(field: &'static str, tokens: &[String]) -> Result<bool, ParamError> {
    let [token] = tokens else {
        return Err(ParamError::SingleValueExpected { field });
    };
    token.parse().map_err(|_| ParamError::MalformedBool {
        field,
        value: token.clone(),
    })
}

/// Validates a single-valued integer parameter within `[min, max]`.
///
/// # Errors
///
/// Returns a [`ParamError`] unless exactly one token parses as an integer
/// inside the bounds.
pub fn validate_int(
    field: &'static str,
    tokens: &[String],
    min: i64,
    max: i64,
) -> Result<i64, ParamError> {
    let [token] = tokens else {
        return Err(ParamError::SingleValueExpected { field });
    };

    let value: i64 = token.parse().map_err(|_| ParamError::MalformedInt {
        field,
        value: token.clone(),
    })?;

    if value < min || value > max {
        return Err(ParamError::IntOutOfRange {
            field,
            value: token.clone(),
            min,
            max,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_valid_dates() {
        assert_eq!(validate_date(DateField::Year, "2020"), Ok(2020));
        assert_eq!(validate_date(DateField::Year, "0"), Ok(0));
        assert_eq!(validate_date(DateField::Year, "3000"), Ok(3000));
        assert_eq!(validate_date(DateField::Month, "1"), Ok(1));
        assert_eq!(validate_date(DateField::Month, "12"), Ok(12));
    }

    #[test]
    fn test_non_numeric_date_cites_field_and_value() {
        let err = validate_date(DateField::Year, "2020a").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("year"));
        assert!(message.contains("2020a"));
    }

    #[test]
    fn test_date_bounds() {
        assert!(validate_date(DateField::Year, "3001").is_err());
        assert!(validate_date(DateField::Year, "-1").is_err());
        assert!(validate_date(DateField::Month, "0").is_err());
        assert!(validate_date(DateField::Month, "13").is_err());

        let message = validate_date(DateField::Month, "13").unwrap_err().to_string();
        assert!(message.contains("between 1 and 12"));
    }

    #[test]
    fn test_valid_thresholds() {
        assert_eq!(validate_threshold("411.23", (0.0, 1000.0), "ppm"), Ok(411.23));
        assert_eq!(validate_threshold("0", (0.0, 1000.0), "ppm"), Ok(0.0));
        assert_eq!(
            validate_threshold("3000", (0.0, 3000.0), "ppb"),
            Ok(3000.0)
        );
    }

    #[test]
    fn test_threshold_failures() {
        assert!(validate_threshold("high", (0.0, 1000.0), "ppm").is_err());
        assert!(validate_threshold("1000.1", (0.0, 1000.0), "ppm").is_err());
        assert!(validate_threshold("-0.5", (0.0, 1000.0), "ppm").is_err());
        // NaN never satisfies the range check.
        assert!(validate_threshold("NaN", (0.0, 1000.0), "ppm").is_err());

        let message = validate_threshold("1000.1", (0.0, 1000.0), "ppm")
            .unwrap_err()
            .to_string();
        assert!(message.contains("ppm"));
        assert!(message.contains("0 to 1000"));
    }

    #[test]
    fn test_bool_values() {
        assert_eq!(validate_bool("simple", &tokens(&["true"])), Ok(true));
        assert_eq!(validate_bool("simple", &tokens(&["false"])), Ok(false));
        assert!(validate_bool("simple", &tokens(&["yes"])).is_err());
        assert!(validate_bool("simple", &tokens(&["true", "false"])).is_err());
        assert!(validate_bool("simple", &tokens(&[])).is_err());
    }

    #[test]
    fn test_int_values() {
        assert_eq!(validate_int("limit", &tokens(&["10"]), 0, 10_000), Ok(10));
        assert_eq!(validate_int("limit", &tokens(&["0"]), 0, 10_000), Ok(0));
        assert!(validate_int("limit", &tokens(&["-1"]), 0, 10_000).is_err());
        assert!(validate_int("limit", &tokens(&["10001"]), 0, 10_000).is_err());
        assert!(validate_int("limit", &tokens(&["ten"]), 0, 10_000).is_err());
        assert!(validate_int("limit", &tokens(&["1", "2"]), 0, 10_000).is_err());
    }

    #[test]
    fn test_page_lower_bound_is_one() {
        assert!(validate_int("page", &tokens(&["0"]), PAGE_MIN, PAGE_MAX).is_err());
        assert_eq!(
            validate_int("page", &tokens(&["1"]), PAGE_MIN, PAGE_MAX),
            Ok(1)
        );
    }
}
