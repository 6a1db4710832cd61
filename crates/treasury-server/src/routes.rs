//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use treasury_engine::YieldService;
use treasury_ext_file::InMemoryOrderStore;

use crate::handlers::{self, AppState};

/// Create the API router with a fresh order store.
///
/// # Arguments
/// * `service` - The yield query service
pub fn create_router(service: Arc<YieldService>) -> Router {
    create_router_with_orders(service, Arc::new(InMemoryOrderStore::new()))
}

/// Create the API router with a specific order store.
///
/// # Arguments
/// * `service` - The yield query service
/// * `orders` - The order store
pub fn create_router_with_orders(
    service: Arc<YieldService>,
    orders: Arc<InMemoryOrderStore>,
) -> Router {
    let state = Arc::new(AppState { service, orders });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Yield curve
        .route("/api/v1/yield-curve", get(handlers::yield_curve))
        // Orders
        .route("/api/v1/orders", get(handlers::list_orders).post(handlers::create_order))
        .route("/api/v1/orders/{id}", get(handlers::get_order))
        // State
        .with_state(state)
}
