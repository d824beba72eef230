//! The fully-resolved query specification.
//!
//! A [`QuerySpec`] is constructed once per inbound request after filter
//! building, is immutable from then on, and renders deterministically to a
//! parameterized SQL statement plus its bind arguments.

use crate::models::Dataset;
use crate::query::endpoint::Endpoint;
use crate::query::filter::{FilterExpr, ParsedParams};
use std::fmt::Write as _;

/// A value bound to a SQL placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlValue {
    /// A 32-bit integer (date components).
    Int(i32),
    /// A double-precision float (threshold values).
    Float(f64),
}

/// The immutable description of one database query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    dataset: Dataset,
    table: String,
    columns: Vec<String>,
    filters: Vec<FilterExpr>,
    order_by: String,
    limit: i64,
    offset: i64,
    page: i64,
    simple: bool,
    pretty: bool,
}

impl QuerySpec {
    /// Assembles the query for an endpoint from its parsed parameters.
    ///
    /// The projection switches to the dataset's reduced column list when the
    /// `simple` directive is set. Ordering is always applied: pagination
    /// without a stable sort is unsound, so an endpoint with an empty
    /// order-by falls back to sorting on its value column.
    #[must_use]
    pub fn build(endpoint: &Endpoint, parsed: ParsedParams) -> Self {
        let directives = parsed.directives;

        let columns = if directives.simple {
            dedup(endpoint.dataset.simple_columns().iter().map(ToString::to_string))
        } else {
            vec!["*".to_string()]
        };

        let order_by = if endpoint.order_by.is_empty() {
            endpoint.value_column.to_string()
        } else {
            endpoint.order_by.to_string()
        };

        Self {
            dataset: endpoint.dataset,
            table: endpoint.table.to_string(),
            columns,
            filters: parsed.filters,
            order_by,
            limit: directives.limit.max(-1),
            offset: directives.offset.max(0),
            page: directives.page.max(0),
            simple: directives.simple,
            pretty: directives.pretty,
        }
    }

    /// The dataset this query targets.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Whether the reduced column projection was requested.
    #[must_use]
    pub fn simple(&self) -> bool {
        self.simple
    }

    /// Whether the response should be pretty-printed.
    #[must_use]
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Renders the SQL text and its ordered bind arguments.
    ///
    /// Filters are AND-combined in their construction order and all client
    /// supplied values are emitted as `$n` placeholders, never interpolated
    /// into the statement text.
    #[must_use]
    pub fn to_sql(&self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.table);
        let mut args = Vec::new();

        for (i, filter) in self.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            render_filter(filter, &mut sql, &mut args);
        }

        // Always present, for deterministic pagination.
        let _ = write!(sql, " ORDER BY {}", self.order_by);

        let mut offset = self.offset;
        if self.limit >= 0 {
            let _ = write!(sql, " LIMIT {}", self.limit);
            offset += self.limit * self.page;
        }
        if offset > 0 {
            let _ = write!(sql, " OFFSET {offset}");
        }

        (sql, args)
    }
}

fn render_filter(filter: &FilterExpr, sql: &mut String, args: &mut Vec<SqlValue>) {
    match filter {
        FilterExpr::In { column, values } => {
            sql.push_str(column);
            sql.push_str(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                args.push(SqlValue::Int(*value));
                let _ = write!(sql, "${}", args.len());
            }
            sql.push(')');
        }
        FilterExpr::Compare { column, op, value } => {
            args.push(SqlValue::Float(*value));
            let _ = write!(sql, "{column} {} ${}", op.as_sql(), args.len());
        }
    }
}

fn dedup(columns: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for column in columns {
        if !seen.contains(&column) {
            seen.push(column);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::endpoint::{CH4_MONTHLY, CO2_WEEKLY};
    use crate::query::filter::{build_filters, Directives};
    use crate::query::params::expand_params;

    fn spec_for(query: &[(&str, &str)], endpoint: &Endpoint) -> QuerySpec {
        let pairs: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let parsed = build_filters(&expand_params(&pairs), endpoint).unwrap();
        QuerySpec::build(endpoint, parsed)
    }

    #[test]
    fn test_bare_query_selects_everything_ordered() {
        let (sql, args) = spec_for(&[], &CO2_WEEKLY).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM public.co2_weekly_mlo ORDER BY year,month,day"
        );
        assert!(args.is_empty());
    }

    #[test]
    fn test_year_filter_renders_parameterized_in_clause() {
        let (sql, args) = spec_for(&[("year", "2020,2021")], &CO2_WEEKLY).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM public.co2_weekly_mlo WHERE year IN ($1, $2) ORDER BY year,month,day"
        );
        assert_eq!(args, vec![SqlValue::Int(2020), SqlValue::Int(2021)]);
    }

    #[test]
    fn test_threshold_filter_renders_comparison() {
        let (sql, args) = spec_for(&[("gt", "1890.1")], &CH4_MONTHLY).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM public.ch4_mm_gl WHERE average > $1 ORDER BY year,month"
        );
        assert_eq!(args, vec![SqlValue::Float(1890.1)]);
    }

    #[test]
    fn test_filters_are_and_combined_with_sequential_placeholders() {
        let (sql, args) =
            spec_for(&[("year", "2020"), ("month", "10,11"), ("gte", "400")], &CO2_WEEKLY).to_sql();
        // BTreeMap iteration: gte, month, year.
        assert_eq!(
            sql,
            "SELECT * FROM public.co2_weekly_mlo \
             WHERE average >= $1 AND month IN ($2, $3) AND year IN ($4) \
             ORDER BY year,month,day"
        );
        assert_eq!(
            args,
            vec![
                SqlValue::Float(400.0),
                SqlValue::Int(10),
                SqlValue::Int(11),
                SqlValue::Int(2020),
            ]
        );
    }

    #[test]
    fn test_limit_and_offset() {
        let (sql, _) = spec_for(&[("limit", "5")], &CO2_WEEKLY).to_sql();
        assert!(sql.ends_with("ORDER BY year,month,day LIMIT 5"));

        let (sql, _) = spec_for(&[("offset", "7")], &CO2_WEEKLY).to_sql();
        assert!(sql.ends_with("ORDER BY year,month,day OFFSET 7"));

        let (sql, _) = spec_for(&[("limit", "5"), ("offset", "7")], &CO2_WEEKLY).to_sql();
        assert!(sql.ends_with("LIMIT 5 OFFSET 7"));
    }

    #[test]
    fn test_page_shifts_offset_by_whole_pages() {
        let (sql, _) = spec_for(&[("limit", "2"), ("page", "2")], &CO2_WEEKLY).to_sql();
        assert!(sql.ends_with("LIMIT 2 OFFSET 2"));

        // Page and offset are independent additive contributions.
        let (sql, _) =
            spec_for(&[("limit", "2"), ("page", "3"), ("offset", "1")], &CO2_WEEKLY).to_sql();
        assert!(sql.ends_with("LIMIT 2 OFFSET 5"));
    }

    #[test]
    fn test_page_is_equivalent_to_precomputed_offset() {
        let paged = spec_for(&[("limit", "10"), ("page", "4")], &CO2_WEEKLY).to_sql();
        let offset = spec_for(&[("limit", "10"), ("offset", "30")], &CO2_WEEKLY).to_sql();
        assert_eq!(paged, offset);
    }

    #[test]
    fn test_page_without_limit_does_not_shift() {
        // An unbounded query has no page size to multiply by.
        let (sql, _) = spec_for(&[("page", "3")], &CO2_WEEKLY).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM public.co2_weekly_mlo ORDER BY year,month,day"
        );
    }

    #[test]
    fn test_simple_switches_projection() {
        let (sql, _) = spec_for(&[("simple", "true")], &CO2_WEEKLY).to_sql();
        assert_eq!(
            sql,
            "SELECT year, month, day, average, increase_since_1800 \
             FROM public.co2_weekly_mlo ORDER BY year,month,day"
        );

        let (sql, _) = spec_for(&[("simple", "true")], &CH4_MONTHLY).to_sql();
        assert_eq!(
            sql,
            "SELECT year, month, average, trend FROM public.ch4_mm_gl ORDER BY year,month"
        );
    }

    #[test]
    fn test_simple_false_is_the_identity() {
        let explicit = spec_for(&[("simple", "false"), ("year", "2020")], &CO2_WEEKLY);
        let implicit = spec_for(&[("year", "2020")], &CO2_WEEKLY);
        assert_eq!(explicit.to_sql(), implicit.to_sql());
    }

    #[test]
    fn test_build_clamps_directive_floors() {
        let parsed = ParsedParams {
            filters: Vec::new(),
            directives: Directives {
                simple: false,
                pretty: false,
                limit: -5,
                offset: -3,
                page: -2,
            },
        };
        let (sql, _) = QuerySpec::build(&CO2_WEEKLY, parsed).to_sql();
        assert_eq!(
            sql,
            "SELECT * FROM public.co2_weekly_mlo ORDER BY year,month,day"
        );
    }
}
