//! Filter expression building.
//!
//! Converts the expanded parameter map into typed SQL filter expressions and
//! internal directives. Filters become parameterized WHERE fragments when the
//! query is rendered; directives (projection, pagination, pretty-printing)
//! shape the [`QuerySpec`](crate::query::QuerySpec) itself.

use crate::query::endpoint::Endpoint;
use crate::query::validate::{
    validate_bool, validate_date, validate_int, validate_threshold, DateField, ParamError,
    LIMIT_MAX, LIMIT_MIN, PAGE_MAX, PAGE_MIN,
};
use std::collections::BTreeMap;

/// Comparison operators accepted by threshold filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl CmpOp {
    /// The SQL spelling of the operator.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Whether the operator constrains from below.
    ///
    /// Lower bounds collapse multiple values to the maximum (the tightest
    /// constraint); upper bounds collapse to the minimum.
    #[must_use]
    pub fn is_lower_bound(self) -> bool {
        matches!(self, Self::Gt | Self::Gte)
    }
}

/// A single validated SQL boolean expression.
///
/// Expressions are typed rather than preformatted text so that rendering can
/// emit placeholders and bind arguments instead of interpolating values.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Membership of a date component in a validated token list.
    In {
        /// The filtered column (`year` or `month`).
        column: &'static str,
        /// The validated member values.
        values: Vec<i32>,
    },
    /// A single comparison against the endpoint's value column.
    Compare {
        /// The filtered column, resolved from the endpoint context.
        column: &'static str,
        /// The comparison operator.
        op: CmpOp,
        /// The collapsed threshold value.
        value: f64,
    },
}

/// Internal directives consumed when assembling the final query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directives {
    /// Switch to the reduced column projection.
    pub simple: bool,
    /// Pretty-print the JSON response.
    pub pretty: bool,
    /// Maximum number of rows, `-1` meaning unbounded.
    pub limit: i64,
    /// Row offset.
    pub offset: i64,
    /// Zero-indexed page number.
    pub page: i64,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            simple: false,
            pretty: false,
            limit: -1,
            offset: 0,
            page: 0,
        }
    }
}

/// The outcome of filter building: SQL filter expressions plus directives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedParams {
    /// Validated filter expressions, AND-combined at render time.
    pub filters: Vec<FilterExpr>,
    /// Internal directives for query assembly and response encoding.
    pub directives: Directives,
}

/// Builds filter expressions and directives from the expanded parameter map.
///
/// Unrecognized parameter keys are silently ignored: new client-side
/// parameters must not break older servers. The map's sorted iteration
/// order makes the resulting filter list deterministic.
///
/// # Errors
///
/// Returns the first [`ParamError`] encountered; no partial query is ever
/// assembled from invalid input.
pub fn build_filters(
    params: &BTreeMap<String, Vec<String>>,
    endpoint: &Endpoint,
) -> Result<ParsedParams, ParamError> {
    let mut parsed = ParsedParams::default();

    for (key, tokens) in params {
        match key.as_str() {
            "year" => parsed
                .filters
                .push(date_filter(DateField::Year, tokens)?),
            "month" => parsed
                .filters
                .push(date_filter(DateField::Month, tokens)?),
            "gt" => parsed.filters.push(threshold_filter(CmpOp::Gt, tokens, endpoint)?),
            "gte" => parsed
                .filters
                .push(threshold_filter(CmpOp::Gte, tokens, endpoint)?),
            "lt" => parsed.filters.push(threshold_filter(CmpOp::Lt, tokens, endpoint)?),
            "lte" => parsed
                .filters
                .push(threshold_filter(CmpOp::Lte, tokens, endpoint)?),
            "simple" => parsed.directives.simple = validate_bool("simple", tokens)?,
            "pretty" => parsed.directives.pretty = validate_bool("pretty", tokens)?,
            "limit" => {
                parsed.directives.limit = validate_int("limit", tokens, LIMIT_MIN, LIMIT_MAX)?;
            }
            "offset" => {
                parsed.directives.offset = validate_int("offset", tokens, LIMIT_MIN, LIMIT_MAX)?;
            }
            "page" => {
                // Pages are one-indexed at the boundary, zero-indexed here.
                parsed.directives.page = validate_int("page", tokens, PAGE_MIN, PAGE_MAX)? - 1;
            }
            other => {
                tracing::trace!(param = other, "ignoring unrecognized query parameter");
            }
        }
    }
    Ok(parsed)
}

fn date_filter(field: DateField, tokens: &[String]) -> Result<FilterExpr, ParamError> {
    let values = tokens
        .iter()
        .map(|token| validate_date(field, token))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FilterExpr::In {
        column: field.column(),
        values,
    })
}

/// Collapses one or more threshold tokens into the single strictest
/// constraint for the operator.
fn threshold_filter(
    op: CmpOp,
    tokens: &[String],
    endpoint: &Endpoint,
) -> Result<FilterExpr, ParamError> {
    let mut strictest: Option<f64> = None;
    for token in tokens {
        let value = validate_threshold(token, endpoint.value_range, endpoint.unit)?;
        strictest = Some(match strictest {
            None => value,
            Some(current) if op.is_lower_bound() => current.max(value),
            Some(current) => current.min(value),
        });
    }

    match strictest {
        Some(value) => Ok(FilterExpr::Compare {
            column: endpoint.value_column,
            op,
            value,
        }),
        // An absent token list cannot occur via expand_params, but an empty
        // comparison must never reach the query.
        None => Err(ParamError::SingleValueExpected {
            field: "threshold",
        }),
    }
}
