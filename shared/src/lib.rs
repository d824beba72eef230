//! Pulse Shared Library
//!
//! This crate contains the measurement models and the query-building pipeline
//! shared by the Pulse climate data API.
//!
//! # Modules
//!
//! - [`models`] - Measurement records for the CO2 and CH4 datasets, row
//!   loading, and the response envelope
//! - [`query`] - Query parameter expansion, validation, filter building, and
//!   SQL query assembly
//!
//! # Example
//!
//! ```
//! use shared::query::{build_filters, expand_params, QuerySpec, CO2_WEEKLY};
//!
//! let pairs = vec![("year".to_string(), "2020,2021".to_string())];
//! let params = expand_params(&pairs);
//! let parsed = build_filters(&params, &CO2_WEEKLY).unwrap();
//! let spec = QuerySpec::build(&CO2_WEEKLY, parsed);
//!
//! let (sql, args) = spec.to_sql();
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM public.co2_weekly_mlo WHERE year IN ($1, $2) ORDER BY year,month,day"
//! );
//! assert_eq!(args.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod query;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
