//! Dashboard service - statistics and chart series for a named period.

use chrono::NaiveDate;

use crate::{
    error::AppError,
    models::report::{DashboardResponse, DashboardStats, DateRange},
    services::report::summarize,
    store::LedgerStore,
};

/// How many of the latest movements the dashboard lists.
pub const RECENT_MOVEMENTS: i64 = 5;

/// Build the dashboard for `range`, resolved against `today`.
///
/// The four store reads are independent and run concurrently. The global
/// balance ignores the range; totals and series only cover it.
pub async fn dashboard(
    store: &dyn LedgerStore,
    range: DateRange,
    today: NaiveDate,
) -> Result<DashboardResponse, AppError> {
    let window = range.window(today);

    let (saldo_total, rows, accounts, recent_movements) = tokio::try_join!(
        store.total_balance(),
        store.movement_amounts(window),
        store.list_account_balances(),
        store.list_movement_details(false, RECENT_MOVEMENTS),
    )?;

    let summary = summarize(&rows, window);
    tracing::debug!(
        range = ?range,
        movements = rows.len(),
        days = summary.series.len(),
        "dashboard aggregated"
    );

    Ok(DashboardResponse {
        range,
        window,
        stats: DashboardStats {
            saldo_total,
            totals: summary.totals,
        },
        series: summary.series,
        accounts,
        recent_movements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::movement::MovementType, store::memory::MemoryStore, test_support,
    };
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn empty_store_gives_zero_dashboard() {
        let store = MemoryStore::new();

        let dashboard = dashboard(&store, DateRange::All, day(2024, 3, 13)).await.unwrap();

        assert_eq!(dashboard.stats.saldo_total, dec!(0));
        assert_eq!(dashboard.stats.totals.resultado, dec!(0));
        assert!(dashboard.series.is_empty());
        assert!(dashboard.recent_movements.is_empty());
        assert_eq!(dashboard.window, None);
    }

    #[tokio::test]
    async fn balance_ignores_range_but_totals_do_not() {
        let store = MemoryStore::new();
        let fixtures = test_support::seed(&store);
        test_support::insert_dated(&store, MovementType::Income, dec!(1000), day(2024, 3, 1), fixtures.income_category);
        test_support::insert_dated(&store, MovementType::Expense, dec!(500), day(2024, 3, 2), fixtures.expense_category);
        test_support::insert_dated(&store, MovementType::Income, dec!(7000), day(2024, 1, 15), fixtures.income_category);

        let dashboard = dashboard(&store, DateRange::ThisMonth, day(2024, 3, 13))
            .await
            .unwrap();

        assert_eq!(dashboard.stats.saldo_total, dec!(7500));
        assert_eq!(dashboard.stats.totals.ingresos, dec!(1000));
        assert_eq!(dashboard.stats.totals.egresos, dec!(500));
        assert_eq!(dashboard.stats.totals.resultado, dec!(500));
        let dates: Vec<_> = dashboard.series.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-02"]);
        assert_eq!(dashboard.accounts.len(), 2);
        assert_eq!(dashboard.recent_movements.len(), 3);
    }

    #[tokio::test]
    async fn voided_movements_leave_dashboard() {
        let store = MemoryStore::new();
        let fixtures = test_support::seed(&store);
        test_support::insert_dated(&store, MovementType::Income, dec!(1000), day(2024, 3, 1), fixtures.income_category);
        store.state().movements[0].voided = true;

        let dashboard = dashboard(&store, DateRange::All, day(2024, 3, 13)).await.unwrap();

        assert_eq!(dashboard.stats.saldo_total, dec!(0));
        assert!(dashboard.series.is_empty());
        assert!(dashboard.recent_movements.is_empty());
    }
}
