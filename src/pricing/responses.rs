//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::models::{AppliedFlags, LineKind, PricingStep, Quote};

/// Currency all catalog rates are quoted in
pub const CURRENCY: &str = "RUB";

/// A breakdown line for display
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub step: PricingStep,
    pub kind: LineKind,
    pub label: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub running_total: Decimal,
}

/// Response for quote calculation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub total_price: u64,
    pub currency: &'static str,
    pub persons: u32,
    pub duration_hours: u32,
    pub days_until_start: i64,
    pub flags: AppliedFlags,
    pub breakdown: Vec<LineItemResponse>,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            total_price: quote.total_price,
            currency: CURRENCY,
            persons: quote.headcount,
            duration_hours: quote.duration_hours,
            days_until_start: quote.days_until_start,
            flags: quote.applied,
            breakdown: quote
                .breakdown
                .iter()
                .map(|line| LineItemResponse {
                    step: line.step,
                    kind: line.step.kind(),
                    label: line.step.label(),
                    amount: line.amount,
                    running_total: line.running_total,
                })
                .collect(),
        }
    }
}

/// Response listing the options a form should offer
#[derive(Debug, Serialize)]
pub struct AvailableOptionsResponse {
    pub subject_type: &'static str,
    pub options: &'static [&'static str],
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
