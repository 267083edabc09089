//! Pricing engine module.
//!
//! Quote calculation for course enrollments and tutor bookings, plus the
//! HTTP endpoints that expose it to the storefront pages.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{available_options, compute_quote, compute_quote_with_policy, round_money};
pub use models::{BookingRequest, PricedEntity, PricingPolicy, Quote, SubjectType, ValidationError};
pub use routes::router;
pub use services::PricingError;
