//! Pricing route handlers

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::error::Result;
use crate::AppState;

use super::calculators::available_options;
use super::models::SubjectType;
use super::requests::QuoteRequest;
use super::responses::{AvailableOptionsResponse, QuoteResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quotes", post(quote))
        .route("/api/pricing/options/:subject", get(options))
}

/// Price a booking without placing an order
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let target = request.target()?;
    let booking = request.booking(target);

    let quote = services::quote_booking(
        &state.api,
        &state.cache,
        &state.config.pricing_policy,
        target,
        &booking,
        Utc::now(),
    )
    .await?;

    Ok(Json(QuoteResponse::from(&quote)))
}

/// Options a booking form should offer for a subject type
pub async fn options(Path(subject): Path<String>) -> Result<Json<AvailableOptionsResponse>> {
    let subject: SubjectType = subject.parse()?;
    Ok(Json(AvailableOptionsResponse {
        subject_type: subject.as_str(),
        options: available_options(subject),
    }))
}
