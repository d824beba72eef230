//! CO2 weekly measurement records.
//!
//! Models the rows of the `public.co2_weekly_mlo` table, which holds weekly
//! averaged CO2 readings from the Mauna Loa observatory.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// The maximum ppm value that may be used in a query for CO2 data.
pub const CO2_PPM_MAX: f64 = 1000.0;

/// The minimum ppm value that may be used in a query for CO2 data.
pub const CO2_PPM_MIN: f64 = 0.0;

/// The reduced column projection served when `simple=true`.
pub const CO2_SIMPLE_COLUMNS: &[&str] = &["year", "month", "day", "average", "increase_since_1800"];

/// A single weekly CO2 measurement as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Co2Record {
    /// Year the measurement was taken.
    pub year: i32,
    /// Month the measurement was taken.
    pub month: i32,
    /// Day the measurement was taken.
    pub day: i32,
    /// The measurement date expressed as a decimal year.
    pub date_decimal: f32,
    /// Average CO2 concentration for the week, in ppm.
    pub average: f32,
    /// Number of daily readings contributing to the average.
    pub num_days: i32,
    /// Average reading one year prior, in ppm.
    pub one_year_ago: f32,
    /// Average reading ten years prior, in ppm.
    pub ten_years_ago: f32,
    /// Increase in ppm since pre-industrial levels.
    pub inc_since_pre_industrial: f32,
    /// Timestamp of the measurement date.
    pub timestamp: NaiveDateTime,
}

/// The simplified CO2 measurement shape.
///
/// This is an explicit, hand-written subset of [`Co2Record`]; the column
/// order must match [`CO2_SIMPLE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Co2RecordSimple {
    /// Year the measurement was taken.
    pub year: i32,
    /// Month the measurement was taken.
    pub month: i32,
    /// Day the measurement was taken.
    pub day: i32,
    /// Average CO2 concentration for the week, in ppm.
    pub average: f32,
    /// Increase in ppm since pre-industrial levels.
    pub inc_since_pre_industrial: f32,
}

impl Co2Record {
    /// Scans one full-projection result row in physical column order.
    pub(crate) fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            year: row.try_get(0)?,
            month: row.try_get(1)?,
            day: row.try_get(2)?,
            date_decimal: row.try_get(3)?,
            average: row.try_get(4)?,
            num_days: row.try_get(5)?,
            one_year_ago: row.try_get(6)?,
            ten_years_ago: row.try_get(7)?,
            inc_since_pre_industrial: row.try_get(8)?,
            timestamp: row.try_get(9)?,
        })
    }
}

impl Co2RecordSimple {
    /// Scans one simple-projection result row in [`CO2_SIMPLE_COLUMNS`] order.
    pub(crate) fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            year: row.try_get(0)?,
            month: row.try_get(1)?,
            day: row.try_get(2)?,
            average: row.try_get(3)?,
            inc_since_pre_industrial: row.try_get(4)?,
        })
    }
}
