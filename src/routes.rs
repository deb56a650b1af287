//! HTTP router: public and authenticated route groups.

use axum::{
    Router,
    extract::FromRef,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, middleware, store::SharedStore};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,

    /// Page size of the movement listing when the request gives none
    pub movement_list_limit: i64,
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

/// Build the application router.
///
/// Everything under `/api/v1` requires an API key; `/health` is public.
/// CORS is open so the dashboard front end can be served from anywhere.
pub fn router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Accounts
        .route(
            "/api/v1/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/api/v1/accounts/balances",
            get(handlers::accounts::list_account_balances),
        )
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::accounts::get_account).put(handlers::accounts::update_account),
        )
        .route(
            "/api/v1/accounts/{id}/toggle",
            post(handlers::accounts::toggle_account_status),
        )
        // Categories
        .route(
            "/api/v1/categories",
            get(handlers::categories::category_tree).post(handlers::categories::create_category),
        )
        .route(
            "/api/v1/categories/parent-candidates",
            get(handlers::categories::list_parent_candidates),
        )
        .route(
            "/api/v1/categories/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        // Movements
        .route(
            "/api/v1/movements",
            get(handlers::movements::list_movements).post(handlers::movements::create_movement),
        )
        .route(
            "/api/v1/movements/{id}/void",
            post(handlers::movements::void_movement),
        )
        .route("/api/v1/dashboard", get(handlers::dashboard::dashboard))
        .route_layer(axum_middleware::from_fn_with_state(
            state.store.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
