//! Reporting aggregator and dashboard period resolution.
//!
//! The aggregator derives income/expense totals and a per-day series from
//! raw movement rows. The global balance is not computed here: it comes from
//! the store's `calcular_saldo_total()` and ignores the selected window.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    movement::{MovementAmount, MovementType},
    report::{DailyTotals, DateRange, DateWindow, PeriodTotals, ReportSummary},
};

/// Calendar-day key of a stored date: the text before any `T`.
///
/// `"2024-03-01T23:30:00-05:00"` buckets under `"2024-03-01"`; the offset is
/// deliberately ignored.
pub fn day_key(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Aggregate non-voided movements into totals and a per-day series.
///
/// Rows whose day falls outside `window` are skipped. The store query
/// already applies the same window, so this only matters for callers
/// passing unfiltered rows.
pub fn summarize(rows: &[MovementAmount], window: Option<DateWindow>) -> ReportSummary {
    let bounds = window.map(|window| (window.start.to_string(), window.end.to_string()));

    let mut totals = PeriodTotals::default();
    let mut buckets: BTreeMap<&str, DailyTotals> = BTreeMap::new();

    for row in rows {
        let day = day_key(&row.date);
        if let Some((start, end)) = &bounds {
            if day < start.as_str() || day > end.as_str() {
                continue;
            }
        }

        let bucket = buckets.entry(day).or_insert_with(|| DailyTotals {
            date: day.to_string(),
            ingresos: Decimal::ZERO,
            egresos: Decimal::ZERO,
        });

        match row.kind {
            MovementType::Income => {
                bucket.ingresos += row.amount;
                totals.ingresos += row.amount;
            }
            MovementType::Expense => {
                bucket.egresos += row.amount;
                totals.egresos += row.amount;
            }
            MovementType::Transfer => {}
        }
    }

    totals.resultado = totals.ingresos - totals.egresos;

    ReportSummary {
        totals,
        series: buckets.into_values().collect(),
    }
}

impl DateRange {
    /// Parse the `range` query value; missing or unknown values fall back to
    /// [`DateRange::ThisMonth`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("today") => Self::Today,
            Some("yesterday") => Self::Yesterday,
            Some("this_week") => Self::ThisWeek,
            Some("this_month") => Self::ThisMonth,
            Some("last_month") => Self::LastMonth,
            Some("last_3_months") => Self::Last3Months,
            Some("last_6_months") => Self::Last6Months,
            Some("this_year") => Self::ThisYear,
            Some("all") => Self::All,
            _ => Self::default(),
        }
    }

    /// Resolve the range against `today`. `None` means no window.
    ///
    /// Weeks start on Monday. Ranges that end "now" end on `today`.
    pub fn window(self, today: NaiveDate) -> Option<DateWindow> {
        let month_start = today.with_day(1).unwrap_or(today);
        let months_back = |months: u32| {
            month_start
                .checked_sub_months(Months::new(months))
                .unwrap_or(month_start)
        };

        let (start, end) = match self {
            Self::Today => (today, today),
            Self::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                (yesterday, yesterday)
            }
            Self::ThisWeek => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let monday = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
                (monday, sunday)
            }
            Self::ThisMonth => (month_start, today),
            Self::LastMonth => {
                let start = months_back(1);
                let end = month_start.pred_opt().unwrap_or(start);
                (start, end)
            }
            Self::Last3Months => (months_back(3), today),
            Self::Last6Months => (months_back(6), today),
            Self::ThisYear => (today.with_ordinal(1).unwrap_or(today), today),
            Self::All => return None,
        };

        Some(DateWindow { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn row(date: &str, kind: MovementType, amount: Decimal) -> MovementAmount {
        MovementAmount {
            date: date.to_string(),
            kind,
            amount,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let summary = summarize(&[], None);

        assert_eq!(summary.totals, PeriodTotals::default());
        assert!(summary.series.is_empty());
    }

    #[test]
    fn two_days_are_bucketed_ascending() {
        let rows = vec![
            row("2024-03-02", MovementType::Expense, dec!(500)),
            row("2024-03-01", MovementType::Income, dec!(1000)),
        ];

        let summary = summarize(&rows, None);

        assert_eq!(
            summary.series,
            vec![
                DailyTotals {
                    date: "2024-03-01".into(),
                    ingresos: dec!(1000),
                    egresos: dec!(0),
                },
                DailyTotals {
                    date: "2024-03-02".into(),
                    ingresos: dec!(0),
                    egresos: dec!(500),
                },
            ]
        );
        assert_eq!(summary.totals.ingresos, dec!(1000));
        assert_eq!(summary.totals.egresos, dec!(500));
        assert_eq!(summary.totals.resultado, dec!(500));
    }

    #[test]
    fn transfers_count_towards_neither_side() {
        let rows = vec![
            row("2024-03-01", MovementType::Transfer, dec!(700)),
            row("2024-03-01", MovementType::Income, dec!(100)),
        ];

        let summary = summarize(&rows, None);

        assert_eq!(summary.totals.ingresos, dec!(100));
        assert_eq!(summary.totals.egresos, dec!(0));
        assert_eq!(summary.series.len(), 1);
    }

    #[test]
    fn timestamps_bucket_on_their_own_day() {
        let rows = vec![
            row("2024-03-01T23:30:00-05:00", MovementType::Income, dec!(10)),
            row("2024-03-01", MovementType::Income, dec!(5)),
        ];

        let summary = summarize(&rows, None);

        assert_eq!(summary.series.len(), 1);
        assert_eq!(summary.series[0].date, "2024-03-01");
        assert_eq!(summary.series[0].ingresos, dec!(15));
    }

    #[test]
    fn decimal_sums_are_exact() {
        let rows: Vec<_> = (0..10)
            .map(|_| row("2024-03-01", MovementType::Income, dec!(1.10)))
            .collect();

        let summary = summarize(&rows, None);

        assert_eq!(summary.totals.ingresos, dec!(11.00));
    }

    #[test]
    fn series_sums_match_windowed_totals() {
        let rows = vec![
            row("2024-02-28", MovementType::Income, dec!(999)),
            row("2024-03-01", MovementType::Income, dec!(1000.25)),
            row("2024-03-01", MovementType::Expense, dec!(20)),
            row("2024-03-15", MovementType::Expense, dec!(300.75)),
            row("2024-03-31", MovementType::Income, dec!(1)),
            row("2024-04-01", MovementType::Expense, dec!(888)),
        ];
        let window = DateWindow {
            start: day(2024, 3, 1),
            end: day(2024, 3, 31),
        };

        let summary = summarize(&rows, Some(window));

        let series_income: Decimal = summary.series.iter().map(|b| b.ingresos).sum();
        let series_expense: Decimal = summary.series.iter().map(|b| b.egresos).sum();
        assert_eq!(series_income, summary.totals.ingresos);
        assert_eq!(series_expense, summary.totals.egresos);
        assert_eq!(summary.totals.ingresos, dec!(1001.25));
        assert_eq!(summary.totals.egresos, dec!(320.75));
        assert_eq!(summary.series.first().unwrap().date, "2024-03-01");
        assert_eq!(summary.series.last().unwrap().date, "2024-03-31");
    }

    #[rstest]
    #[case(None, DateRange::ThisMonth)]
    #[case(Some("all"), DateRange::All)]
    #[case(Some("last_3_months"), DateRange::Last3Months)]
    #[case(Some("bogus"), DateRange::ThisMonth)]
    fn range_param_falls_back_to_this_month(#[case] raw: Option<&str>, #[case] range: DateRange) {
        assert_eq!(DateRange::from_param(raw), range);
    }

    #[rstest]
    // 2024-03-13 is a Wednesday
    #[case(DateRange::Today, (2024, 3, 13), (2024, 3, 13))]
    #[case(DateRange::Yesterday, (2024, 3, 12), (2024, 3, 12))]
    #[case(DateRange::ThisWeek, (2024, 3, 11), (2024, 3, 17))]
    #[case(DateRange::ThisMonth, (2024, 3, 1), (2024, 3, 13))]
    #[case(DateRange::LastMonth, (2024, 2, 1), (2024, 2, 29))]
    #[case(DateRange::Last3Months, (2023, 12, 1), (2024, 3, 13))]
    #[case(DateRange::Last6Months, (2023, 9, 1), (2024, 3, 13))]
    #[case(DateRange::ThisYear, (2024, 1, 1), (2024, 3, 13))]
    fn ranges_resolve_against_today(
        #[case] range: DateRange,
        #[case] start: (i32, u32, u32),
        #[case] end: (i32, u32, u32),
    ) {
        let window = range.window(day(2024, 3, 13)).unwrap();

        assert_eq!(window.start, day(start.0, start.1, start.2));
        assert_eq!(window.end, day(end.0, end.1, end.2));
    }

    #[test]
    fn all_has_no_window() {
        assert_eq!(DateRange::All.window(day(2024, 3, 13)), None);
    }

    #[test]
    fn this_week_on_sunday_starts_previous_monday() {
        let window = DateRange::ThisWeek.window(day(2024, 3, 17)).unwrap();
        assert_eq!(window.start, day(2024, 3, 11));
        assert_eq!(window.end, day(2024, 3, 17));
    }
}
