//! Dashboard and reporting types.
//!
//! Report payloads keep the store's Spanish names (`ingresos`, `egresos`,
//! `resultado`, `saldo_total`) since dashboard clients chart them directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{account::AccountBalance, movement::MovementDetail};

/// Inclusive calendar-day window applied to movement dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Named dashboard period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    Today,
    Yesterday,
    ThisWeek,
    #[default]
    ThisMonth,
    LastMonth,
    #[serde(rename = "last_3_months")]
    Last3Months,
    #[serde(rename = "last_6_months")]
    Last6Months,
    ThisYear,
    All,
}

/// Income and expense totals of a period.
///
/// Transfers move money between accounts and count towards neither side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PeriodTotals {
    pub ingresos: Decimal,
    pub egresos: Decimal,
    /// `ingresos - egresos`
    pub resultado: Decimal,
}

/// Income and expense sums of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    /// `YYYY-MM-DD`
    pub date: String,
    pub ingresos: Decimal,
    pub egresos: Decimal,
}

/// Output of the report aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    pub totals: PeriodTotals,
    /// One entry per day with movements, ascending by date
    pub series: Vec<DailyTotals>,
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Global balance from the store, independent of the selected range
    pub saldo_total: Decimal,

    #[serde(flatten)]
    pub totals: PeriodTotals,
}

/// Query string of the dashboard endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<String>,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    pub range: DateRange,

    /// `None` for [`DateRange::All`]
    pub window: Option<DateWindow>,

    pub stats: DashboardStats,

    pub series: Vec<DailyTotals>,

    pub accounts: Vec<AccountBalance>,

    pub recent_movements: Vec<MovementDetail>,
}
