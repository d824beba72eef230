//! Endpoint contexts.
//!
//! Each HTTP endpoint fixes the dataset it serves, the physical column its
//! threshold filters and ordering apply to, and the valid value range for
//! that column. The endpoint context, never the client, chooses which
//! column is filtered.

use crate::models::{Dataset, CH4_PPB_MAX, CH4_PPB_MIN, CO2_PPM_MAX, CO2_PPM_MIN};

/// The fixed query context of one measurement endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    /// Endpoint name, used in logs.
    pub name: &'static str,
    /// The dataset served.
    pub dataset: Dataset,
    /// The table queried.
    pub table: &'static str,
    /// The ORDER BY expression guaranteeing deterministic pagination.
    pub order_by: &'static str,
    /// The column targeted by `gt`/`gte`/`lt`/`lte` filters.
    pub value_column: &'static str,
    /// Inclusive domain range accepted for threshold values.
    pub value_range: (f64, f64),
    /// The measurement unit, used in validation messages.
    pub unit: &'static str,
}

/// Weekly CO2 data filtered on the weekly average.
pub const CO2_WEEKLY: Endpoint = Endpoint {
    name: "co2Weekly",
    dataset: Dataset::Co2Weekly,
    table: "public.co2_weekly_mlo",
    order_by: "year,month,day",
    value_column: "average",
    value_range: (CO2_PPM_MIN, CO2_PPM_MAX),
    unit: "ppm",
};

/// Weekly CO2 data filtered on the increase since pre-industrial levels.
pub const CO2_WEEKLY_INCREASE: Endpoint = Endpoint {
    name: "co2WeeklyIncrease",
    dataset: Dataset::Co2Weekly,
    table: "public.co2_weekly_mlo",
    order_by: "year,month,day",
    value_column: "increase_since_1800",
    value_range: (CO2_PPM_MIN, CO2_PPM_MAX),
    unit: "ppm",
};

/// Monthly CH4 data filtered on the monthly average.
pub const CH4_MONTHLY: Endpoint = Endpoint {
    name: "ch4Monthly",
    dataset: Dataset::Ch4Monthly,
    table: "public.ch4_mm_gl",
    order_by: "year,month",
    value_column: "average",
    value_range: (CH4_PPB_MIN, CH4_PPB_MAX),
    unit: "ppb",
};

/// Monthly CH4 data filtered on the long-term trend.
pub const CH4_MONTHLY_TREND: Endpoint = Endpoint {
    name: "ch4MonthlyTrend",
    dataset: Dataset::Ch4Monthly,
    table: "public.ch4_mm_gl",
    order_by: "year,month",
    value_column: "trend",
    value_range: (CH4_PPB_MIN, CH4_PPB_MAX),
    unit: "ppb",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_share_dataset_tables() {
        assert_eq!(CO2_WEEKLY.table, CO2_WEEKLY_INCREASE.table);
        assert_eq!(CH4_MONTHLY.table, CH4_MONTHLY_TREND.table);
        assert_ne!(CO2_WEEKLY.table, CH4_MONTHLY.table);
    }

    #[test]
    fn test_value_columns_differ_per_endpoint() {
        assert_eq!(CO2_WEEKLY.value_column, "average");
        assert_eq!(CO2_WEEKLY_INCREASE.value_column, "increase_since_1800");
        assert_eq!(CH4_MONTHLY_TREND.value_column, "trend");
    }

    #[test]
    fn test_every_endpoint_orders_its_results() {
        for endpoint in [CO2_WEEKLY, CO2_WEEKLY_INCREASE, CH4_MONTHLY, CH4_MONTHLY_TREND] {
            assert!(!endpoint.order_by.is_empty(), "{} must sort", endpoint.name);
        }
    }
}
