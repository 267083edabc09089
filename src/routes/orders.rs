//! Order route handlers
//!
//! Orders live in the school API; these handlers validate and price them
//! before passing them on.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{paginate, Page, ORDERS_PER_PAGE};
use crate::error::Result;
use crate::models::Order;
use crate::pricing::requests::{QuoteRequest, UpdateOrderRequest};
use crate::pricing::responses::QuoteResponse;
use crate::pricing::services;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/:id",
            get(order_detail).put(update_order).delete(delete_order),
        )
}

/// Query parameters for the order listing
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// A stored order together with the quote it was priced from
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
    pub quote: QuoteResponse,
}

/// Order listing, paginated
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Page<Order>>> {
    let orders = state.api.get_orders().await?;
    Ok(Json(paginate(&orders, query.page, ORDERS_PER_PAGE)))
}

/// Order detail
pub async fn order_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>> {
    Ok(Json(state.api.get_order(id).await?))
}

/// Price and submit a new order
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let (payload, quote) = services::prepare_order(
        &state.api,
        &state.cache,
        &state.config.pricing_policy,
        &request,
        Utc::now(),
    )
    .await?;

    let order = state.api.create_order(&payload).await?;
    info!("Created order {} ({} persons, price {})", order.id, payload.persons, order.price);

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            order,
            quote: QuoteResponse::from(&quote),
        }),
    ))
}

/// Apply edits to an order and re-price it
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(edit): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let stored = state.api.get_order(id).await?;

    let (update, quote) = services::prepare_order_update(
        &state.api,
        &state.cache,
        &state.config.pricing_policy,
        &stored,
        &edit,
        Utc::now(),
    )
    .await?;

    let order = state.api.update_order(id, &update).await?;
    info!("Updated order {}: price {} -> {}", id, stored.price, order.price);

    Ok(Json(OrderResponse {
        order,
        quote: QuoteResponse::from(&quote),
    }))
}

/// Delete an order
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    state.api.delete_order(id).await?;
    info!("Deleted order {}", id);
    Ok(StatusCode::NO_CONTENT)
}
