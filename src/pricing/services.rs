//! Pricing service functions with catalog access.
//!
//! These resolve the catalog record behind a booking (cache first, then the
//! school API) and hand it to the pure calculator.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::{ApiError, SchoolApiClient};
use crate::cache::CatalogCache;
use crate::models::{BookingTarget, Order, OrderPayload, OrderUpdate};

use super::calculators::{compute_quote_with_policy, parse_date};
use super::models::{BookingRequest, PricedEntity, PricingPolicy, Quote, SubjectType, ValidationError};
use super::requests::{QuoteRequest, UpdateOrderRequest};

/// Pricing calculation error types
#[derive(Debug)]
pub enum PricingError {
    Validation(ValidationError),
    CatalogNotFound { subject: SubjectType, id: u64 },
    Upstream { message: String },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::Validation(e) => write!(f, "Invalid booking: {}", e),
            PricingError::CatalogNotFound { subject, id } => {
                write!(f, "No {} found with id {}", subject, id)
            }
            PricingError::Upstream { message } => {
                write!(f, "Catalog unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for PricingError {}

impl From<ValidationError> for PricingError {
    fn from(e: ValidationError) -> Self {
        PricingError::Validation(e)
    }
}

impl PricingError {
    fn from_api(target: BookingTarget, e: ApiError) -> Self {
        if e.is_not_found() {
            PricingError::CatalogNotFound {
                subject: target.subject_type(),
                id: target.id(),
            }
        } else {
            warn!("Failed to load {} {}: {}", target.subject_type(), target.id(), e);
            PricingError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

/// Load the catalog record a booking is priced against.
///
/// A record that cannot be loaded is an error; the caller never gets a
/// placeholder to quote with.
pub async fn resolve_priced_entity(
    api: &SchoolApiClient,
    cache: &CatalogCache,
    target: BookingTarget,
) -> Result<PricedEntity, PricingError> {
    let entity = match target {
        BookingTarget::Course(id) => cache
            .load_course(api, id)
            .await
            .map_err(|e| PricingError::from_api(target, e))?
            .priced_entity(),
        BookingTarget::Tutor(id) => cache
            .load_tutor(api, id)
            .await
            .map_err(|e| PricingError::from_api(target, e))?
            .priced_entity(),
    };
    Ok(entity)
}

/// Price a booking against its catalog record
pub async fn quote_booking(
    api: &SchoolApiClient,
    cache: &CatalogCache,
    policy: &PricingPolicy,
    target: BookingTarget,
    booking: &BookingRequest,
    as_of: DateTime<Utc>,
) -> Result<Quote, PricingError> {
    let entity = resolve_priced_entity(api, cache, target).await?;
    let quote = compute_quote_with_policy(booking, &entity, as_of, policy)?;
    debug!(
        "Quoted {} {}: {} ({} lines)",
        target.subject_type(),
        target.id(),
        quote.total_price,
        quote.breakdown.len()
    );
    Ok(quote)
}

/// Reject start dates before the current day (UTC)
pub fn ensure_not_in_past(booking: &BookingRequest, as_of: DateTime<Utc>) -> Result<(), ValidationError> {
    let start = parse_date(&booking.start_date)?;
    if start < as_of.date_naive() {
        return Err(ValidationError::new(
            "start_date",
            "start date cannot be in the past",
        ));
    }
    Ok(())
}

/// Build the body for a new order. The price is always recomputed here.
pub async fn prepare_order(
    api: &SchoolApiClient,
    cache: &CatalogCache,
    policy: &PricingPolicy,
    request: &QuoteRequest,
    as_of: DateTime<Utc>,
) -> Result<(OrderPayload, Quote), PricingError> {
    let target = request.target()?;
    let booking = request.booking(target);
    ensure_not_in_past(&booking, as_of)?;

    let quote = quote_booking(api, cache, policy, target, &booking, as_of).await?;
    Ok((OrderPayload::from_quote(target, &quote), quote))
}

/// Build the body for an order edit, re-pricing against the same catalog record
pub async fn prepare_order_update(
    api: &SchoolApiClient,
    cache: &CatalogCache,
    policy: &PricingPolicy,
    order: &Order,
    edit: &UpdateOrderRequest,
    as_of: DateTime<Utc>,
) -> Result<(OrderUpdate, Quote), PricingError> {
    let target = order.target()?;
    let booking = edit.merge_into(order, target);
    ensure_not_in_past(&booking, as_of)?;

    let quote = quote_booking(api, cache, policy, target, &booking, as_of).await?;
    Ok((OrderUpdate::from_quote(&quote), quote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Tutor};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn offline_api() -> SchoolApiClient {
        SchoolApiClient::new("http://127.0.0.1:9", "key", Duration::from_millis(500)).unwrap()
    }

    async fn warm_cache() -> CatalogCache {
        let cache = CatalogCache::new(Duration::from_secs(60));
        cache
            .insert_courses(vec![Course {
                id: 1,
                name: "General English".to_string(),
                description: String::new(),
                teacher: "Olga Petrova".to_string(),
                level: "Beginner".to_string(),
                total_length: 4,
                week_length: 10,
                start_dates: vec![],
                course_fee_per_hour: dec!(1000),
            }])
            .await;
        cache
            .insert_tutors(vec![Tutor {
                id: 2,
                name: "Ivan Sokolov".to_string(),
                work_experience: 7,
                languages_spoken: vec!["Russian".to_string()],
                languages_offered: vec!["English".to_string()],
                language_level: "Advanced".to_string(),
                price_per_hour: dec!(2000),
            }])
            .await;
        cache
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::CatalogNotFound {
            subject: SubjectType::Tutor,
            id: 5,
        };
        assert_eq!(err.to_string(), "No tutor found with id 5");

        let err = PricingError::from(ValidationError::new("headcount", "too many"));
        assert!(err.to_string().contains("headcount"));
    }

    #[test]
    fn test_past_dates_are_rejected() {
        let booking = BookingRequest {
            subject_type: SubjectType::Course,
            start_date: "2025-01-04".to_string(),
            start_time: "10:00".to_string(),
            headcount: 1,
            duration_hours: None,
            options: Default::default(),
        };
        assert_eq!(ensure_not_in_past(&booking, as_of()).unwrap_err().field, "start_date");

        let today = BookingRequest {
            start_date: "2025-01-05".to_string(),
            ..booking
        };
        assert!(ensure_not_in_past(&today, as_of()).is_ok());
    }

    #[tokio::test]
    async fn test_prepare_order_uses_computed_price() {
        let cache = warm_cache().await;
        let request: QuoteRequest = serde_json::from_str(
            r#"{"tutor_id": 2, "date_start": "2025-02-14", "time_start": "19:00",
                "duration": 10, "persons": 6, "assessment": true, "price": 1}"#,
        )
        .unwrap();

        let (payload, quote) = prepare_order(
            &offline_api(),
            &cache,
            &PricingPolicy::default(),
            &request,
            as_of(),
        )
        .await
        .unwrap();

        assert_eq!(payload.price, 96620);
        assert_eq!(payload.flags, quote.applied);
        assert_eq!((payload.course_id, payload.tutor_id), (0, 2));
    }

    #[tokio::test]
    async fn test_prepare_order_update_reprices() {
        let cache = warm_cache().await;
        let order = Order {
            id: 30,
            course_id: 1,
            tutor_id: 0,
            date_start: chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            time_start: "14:00".to_string(),
            duration: 40,
            persons: 1,
            price: 40000,
            flags: Default::default(),
            student_id: None,
            created_at: None,
            updated_at: None,
        };
        let edit = UpdateOrderRequest {
            persons: Some(5),
            ..UpdateOrderRequest::default()
        };

        let (update, _) = prepare_order_update(
            &offline_api(),
            &cache,
            &PricingPolicy::default(),
            &order,
            &edit,
            as_of(),
        )
        .await
        .unwrap();

        // 1000 * 40 * 5 * 0.85
        assert_eq!(update.price, Some(170000));
        assert_eq!(update.group_enrollment, Some(true));
        assert_eq!(update.duration, Some(40));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_an_error() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        let booking = BookingRequest {
            subject_type: SubjectType::Tutor,
            start_date: "2025-02-14".to_string(),
            start_time: "10:00".to_string(),
            headcount: 1,
            duration_hours: Some(1),
            options: Default::default(),
        };

        let err = quote_booking(
            &offline_api(),
            &cache,
            &PricingPolicy::default(),
            BookingTarget::Tutor(77),
            &booking,
            as_of(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PricingError::Upstream { .. }));
    }
}
