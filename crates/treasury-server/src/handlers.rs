//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use treasury_core::Curve;
use treasury_engine::YieldService;
use treasury_ext_file::{InMemoryOrderStore, NewOrder, StoredOrder};

/// Application state.
pub struct AppState {
    /// The yield query service
    pub service: Arc<YieldService>,
    /// Order store
    pub orders: Arc<InMemoryOrderStore>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Current yield curve as a JSON array of `{term, rate}`.
///
/// Always 200: when no data is available the array is empty.
pub async fn yield_curve(State(state): State<Arc<AppState>>) -> Json<Curve> {
    Json(state.service.current_curve().await)
}

/// Order submission body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Term label, any case
    pub term: String,
    /// Notional amount, must be positive
    pub amount: Decimal,
}

/// Submit an order, stamped with the current curve rate for its term.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid order: {}", rejection.body_text()))),
            )
                .into_response();
        }
    };

    if request.amount <= Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Amount must be > 0")),
        )
            .into_response();
    }

    let curve = state.service.current_curve().await;
    let rate = curve.rate_for_label(&request.term);

    let order = state.orders.insert(NewOrder {
        term: request.term,
        amount: request.amount,
        created_at: Utc::now(),
        rate_at_submission: rate,
    });
    info!(id = order.id, term = %order.term, "order submitted");

    (StatusCode::CREATED, Json(order)).into_response()
}

/// All orders, newest first.
pub async fn list_orders(State(state): State<Arc<AppState>>) -> Json<Vec<StoredOrder>> {
    Json(state.orders.list())
}

/// One order by id.
pub async fn get_order(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    match state.orders.get(id) {
        Some(order) => Json(order).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Order not found: {id}"))),
        )
            .into_response(),
    }
}
