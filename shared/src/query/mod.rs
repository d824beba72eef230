//! The parameter-to-query translation pipeline.
//!
//! Untrusted URL query parameters flow through four stages, each pure and
//! separately testable:
//!
//! 1. [`expand_params`] - flattens repeated keys and comma lists into a
//!    token map
//! 2. [`validate`] - checks raw tokens against domain bounds
//! 3. [`build_filters`] - produces typed SQL filter expressions and
//!    internal directives
//! 4. [`QuerySpec`] - assembles and renders the final parameterized query
//!
//! # Example
//!
//! ```
//! use shared::query::{build_filters, expand_params, QuerySpec, CH4_MONTHLY};
//!
//! let pairs = vec![("gt".to_string(), "1890.1".to_string())];
//! let parsed = build_filters(&expand_params(&pairs), &CH4_MONTHLY).unwrap();
//! let (sql, args) = QuerySpec::build(&CH4_MONTHLY, parsed).to_sql();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM public.ch4_mm_gl WHERE average > $1 ORDER BY year,month"
//! );
//! assert_eq!(args.len(), 1);
//! ```

mod endpoint;
mod filter;
mod params;
mod spec;
pub mod validate;

pub use endpoint::{Endpoint, CH4_MONTHLY, CH4_MONTHLY_TREND, CO2_WEEKLY, CO2_WEEKLY_INCREASE};
pub use filter::{build_filters, CmpOp, Directives, FilterExpr, ParsedParams};
pub use params::expand_params;
pub use spec::{QuerySpec, SqlValue};
pub use validate::ParamError;
