//! Measurement data models for the Pulse API.
//!
//! Each dataset contributes a full record shape and an explicit, hand-written
//! simple projection. Rows are materialized through [`Dataset::load_row`],
//! which knows the exact column order of every dataset/projection pairing.

mod ch4;
mod co2;
mod envelope;

pub use ch4::{Ch4Record, Ch4RecordSimple, CH4_PPB_MAX, CH4_PPB_MIN, CH4_SIMPLE_COLUMNS};
pub use co2::{Co2Record, Co2RecordSimple, CO2_PPM_MAX, CO2_PPM_MIN, CO2_SIMPLE_COLUMNS};
pub use envelope::Envelope;

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use thiserror::Error;

/// The measurement datasets served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dataset {
    /// Weekly CO2 measurements (`public.co2_weekly_mlo`).
    Co2Weekly,
    /// Monthly CH4 measurements (`public.ch4_mm_gl`).
    Ch4Monthly,
}

impl Dataset {
    /// The reduced column projection used when `simple=true`.
    #[must_use]
    pub fn simple_columns(self) -> &'static [&'static str] {
        match self {
            Self::Co2Weekly => CO2_SIMPLE_COLUMNS,
            Self::Ch4Monthly => CH4_SIMPLE_COLUMNS,
        }
    }

    /// Materializes one result row into the record shape for this dataset
    /// and projection.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if any column fails to scan into its target
    /// field. The caller is expected to fail the request fast on the first
    /// row that does not scan.
    pub fn load_row(self, row: &PgRow, simple: bool) -> Result<Measurement, LoadError> {
        let loaded = match (self, simple) {
            (Self::Co2Weekly, false) => Co2Record::from_row(row).map(Measurement::Co2),
            (Self::Co2Weekly, true) => Co2RecordSimple::from_row(row).map(Measurement::Co2Simple),
            (Self::Ch4Monthly, false) => Ch4Record::from_row(row).map(Measurement::Ch4),
            (Self::Ch4Monthly, true) => Ch4RecordSimple::from_row(row).map(Measurement::Ch4Simple),
        };
        loaded.map_err(|source| LoadError {
            dataset: self,
            source,
        })
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Co2Weekly => write!(f, "co2-weekly"),
            Self::Ch4Monthly => write!(f, "ch4-monthly"),
        }
    }
}

/// A measurement in either the full or the simple projection.
///
/// The variant is selected at load time from the dataset and the requested
/// projection; it is never inferred from field names. Serialization is
/// untagged so the wire shape stays flat. Full variants precede simple ones
/// so that deserialization matches the richest shape first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// A full CO2 weekly record.
    Co2(Co2Record),
    /// A full CH4 monthly record.
    Ch4(Ch4Record),
    /// A simplified CO2 weekly record.
    Co2Simple(Co2RecordSimple),
    /// A simplified CH4 monthly record.
    Ch4Simple(Ch4RecordSimple),
}

/// Failure to scan a result row into a typed record.
#[derive(Debug, Error)]
#[error("failed to scan a result row into a {dataset} record")]
pub struct LoadError {
    dataset: Dataset,
    #[source]
    source: sqlx::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_columns_per_dataset() {
        assert_eq!(
            Dataset::Co2Weekly.simple_columns(),
            &["year", "month", "day", "average", "increase_since_1800"]
        );
        assert_eq!(
            Dataset::Ch4Monthly.simple_columns(),
            &["year", "month", "average", "trend"]
        );
    }

    #[test]
    fn test_measurement_serializes_flat() {
        let measurement = Measurement::Ch4Simple(Ch4RecordSimple {
            year: 2020,
            month: 11,
            average: 1891.7,
            trend: 1889.4,
        });

        let json = serde_json::to_value(&measurement).unwrap();
        // Untagged: no variant wrapper object.
        assert_eq!(json["Year"], 2020);
    }
}
