//! CH4 monthly measurement records.
//!
//! Models the rows of the `public.ch4_mm_gl` table, which holds globally
//! averaged monthly CH4 readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// The maximum ppb value that may be used in a query for CH4 data.
pub const CH4_PPB_MAX: f64 = 3000.0;

/// The minimum ppb value that may be used in a query for CH4 data.
pub const CH4_PPB_MIN: f64 = 0.0;

/// The reduced column projection served when `simple=true`.
pub const CH4_SIMPLE_COLUMNS: &[&str] = &["year", "month", "average", "trend"];

/// A single monthly CH4 measurement as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ch4Record {
    /// Year the measurement was taken.
    pub year: i32,
    /// Month the measurement was taken.
    pub month: i32,
    /// The measurement date expressed as a decimal year.
    pub date_decimal: f32,
    /// Average CH4 concentration for the month, in ppb.
    pub average: f32,
    /// Uncertainty of the monthly average, in ppb.
    pub average_uncertainty: f32,
    /// Long-term trend value for the month, in ppb.
    pub trend: f32,
    /// Uncertainty of the trend value, in ppb.
    pub trend_uncertainty: f32,
    /// Timestamp of the measurement date.
    pub timestamp: NaiveDateTime,
}

/// The simplified CH4 measurement shape.
///
/// This is an explicit, hand-written subset of [`Ch4Record`]; the column
/// order must match [`CH4_SIMPLE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ch4RecordSimple {
    /// Year the measurement was taken.
    pub year: i32,
    /// Month the measurement was taken.
    pub month: i32,
    /// Average CH4 concentration for the month, in ppb.
    pub average: f32,
    /// Long-term trend value for the month, in ppb.
    pub trend: f32,
}

impl Ch4Record {
    /// Scans one full-projection result row in physical column order.
    pub(crate) fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            year: row.try_get(0)?,
            month: row.try_get(1)?,
            date_decimal: row.try_get(2)?,
            average: row.try_get(3)?,
            average_uncertainty: row.try_get(4)?,
            trend: row.try_get(5)?,
            trend_uncertainty: row.try_get(6)?,
            timestamp: row.try_get(7)?,
        })
    }
}

impl Ch4RecordSimple {
    /// Scans one simple-projection result row in [`CH4_SIMPLE_COLUMNS`] order.
    pub(crate) fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            year: row.try_get(0)?,
            month: row.try_get(1)?,
            average: row.try_get(2)?,
            trend: row.try_get(3)?,
        })
    }
}
