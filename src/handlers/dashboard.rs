//! Dashboard endpoint: `GET /api/v1/dashboard?range=this_month`.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;

use crate::{
    error::AppError,
    models::report::{DashboardQuery, DashboardResponse, DateRange},
    services::dashboard_service,
    store::SharedStore,
};

/// Statistics, daily series, account balances and recent movements.
///
/// `range` accepts `today`, `yesterday`, `this_week`, `this_month`,
/// `last_month`, `last_3_months`, `last_6_months`, `this_year` and `all`.
/// Anything else falls back to `this_month`. Periods are resolved against
/// the server's local date.
pub async fn dashboard(
    State(store): State<SharedStore>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let range = DateRange::from_param(query.range.as_deref());
    let today = Local::now().date_naive();

    let response = dashboard_service::dashboard(store.as_ref(), range, today).await?;
    Ok(Json(response))
}
