//! Route definitions for the supply-chain dashboard

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public, except /me)
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes
        .merge(protected_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(protected)
}

/// Everything that needs a signed-in user. Permissions are checked per handler.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/inventory", inventory_routes())
        .nest("/reorder", reorder_routes())
        .nest("/deliveries", delivery_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/sustainability", sustainability_routes())
        .nest("/users", user_routes())
        .route("/dashboard/summary", get(handlers::get_dashboard_summary))
        .route("/simulator/scenarios", get(handlers::list_scenarios))
        .route("/simulator/run", post(handlers::run_scenario))
        .route("/seed", post(handlers::seed_database))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route("/summary", get(handlers::get_inventory_summary))
        .route("/:item_id", put(handlers::update_inventory_item))
}

/// Reorder recommendation routes
fn reorder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_recommendations).post(handlers::create_recommendation),
        )
        .route("/summary", get(handlers::get_reorder_summary))
        .route("/evaluate", post(handlers::evaluate_stock_position))
        .route("/:recommendation_id", put(handlers::update_recommendation))
        .route(
            "/:recommendation_id/process",
            post(handlers::process_recommendation),
        )
}

/// Delivery tracking routes
fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_deliveries).post(handlers::create_delivery))
        .route("/summary", get(handlers::get_delivery_summary))
        .route("/:delivery_id", put(handlers::update_delivery))
        .route("/:delivery_id/cancel", post(handlers::cancel_delivery))
        .route("/:delivery_id/deliver", post(handlers::complete_delivery))
}

/// Supplier scorecard routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route("/categories", get(handlers::list_supplier_categories))
        .route("/:supplier_id", put(handlers::update_supplier))
}

/// Sustainability metric routes
fn sustainability_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_metrics).post(handlers::create_metric))
        .route("/:metric_id", put(handlers::update_metric))
}

/// User administration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/:user_id", put(handlers::update_user))
}
