//! Request DTOs for quote and order endpoints.

use serde::Deserialize;

use crate::models::{BookingTarget, Order};
use crate::pricing::models::{BookingRequest, OptionFlags, ValidationError};

/// Request to price a booking, also used to create an order.
///
/// Exactly one of `course_id` / `tutor_id` must be non-zero. A `price`
/// field, if the client sends one, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub course_id: u64,
    #[serde(default)]
    pub tutor_id: u64,
    pub date_start: String,
    pub time_start: String,
    #[serde(default)]
    pub duration: Option<u32>,
    pub persons: u32,
    #[serde(default)]
    pub intensive_course: bool,
    #[serde(default)]
    pub supplementary: bool,
    #[serde(default)]
    pub personalized: bool,
    #[serde(default)]
    pub excursions: bool,
    #[serde(default)]
    pub assessment: bool,
    #[serde(default)]
    pub interactive: bool,
}

impl QuoteRequest {
    pub fn target(&self) -> Result<BookingTarget, ValidationError> {
        BookingTarget::from_ids(self.course_id, self.tutor_id)
    }

    pub fn booking(&self, target: BookingTarget) -> BookingRequest {
        BookingRequest {
            subject_type: target.subject_type(),
            start_date: self.date_start.clone(),
            start_time: self.time_start.clone(),
            headcount: self.persons,
            duration_hours: self.duration,
            options: OptionFlags {
                intensive_course: self.intensive_course,
                supplementary_materials: self.supplementary,
                personalized_sessions: self.personalized,
                cultural_excursions: self.excursions,
                level_assessment: self.assessment,
                interactive_platform: self.interactive,
            },
        }
    }
}

/// Request to edit an order. Missing fields keep the stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub persons: Option<u32>,
    #[serde(default)]
    pub intensive_course: Option<bool>,
    #[serde(default)]
    pub supplementary: Option<bool>,
    #[serde(default)]
    pub personalized: Option<bool>,
    #[serde(default)]
    pub excursions: Option<bool>,
    #[serde(default)]
    pub assessment: Option<bool>,
    #[serde(default)]
    pub interactive: Option<bool>,
}

impl UpdateOrderRequest {
    /// The booking the edited order describes
    pub fn merge_into(&self, order: &Order, target: BookingTarget) -> BookingRequest {
        let stored = order.options();
        BookingRequest {
            subject_type: target.subject_type(),
            start_date: self
                .date_start
                .clone()
                .unwrap_or_else(|| order.date_start.format("%Y-%m-%d").to_string()),
            start_time: self
                .time_start
                .clone()
                .unwrap_or_else(|| order.time_start.clone()),
            headcount: self.persons.unwrap_or(order.persons),
            duration_hours: Some(self.duration.unwrap_or(order.duration)),
            options: OptionFlags {
                intensive_course: self.intensive_course.unwrap_or(stored.intensive_course),
                supplementary_materials: self
                    .supplementary
                    .unwrap_or(stored.supplementary_materials),
                personalized_sessions: self.personalized.unwrap_or(stored.personalized_sessions),
                cultural_excursions: self.excursions.unwrap_or(stored.cultural_excursions),
                level_assessment: self.assessment.unwrap_or(stored.level_assessment),
                interactive_platform: self.interactive.unwrap_or(stored.interactive_platform),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{AppliedFlags, SubjectType};
    use chrono::NaiveDate;

    fn stored_order() -> Order {
        Order {
            id: 8,
            course_id: 0,
            tutor_id: 4,
            date_start: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time_start: "10:00".to_string(),
            duration: 6,
            persons: 2,
            price: 9000,
            flags: AppliedFlags {
                supplementary: true,
                ..AppliedFlags::default()
            },
            student_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_quote_request_defaults_options_to_false() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{"tutor_id": 3, "date_start": "2025-03-10", "time_start": "10:00", "duration": 2, "persons": 1, "price": 1}"#,
        )
        .unwrap();
        let target = request.target().unwrap();
        let booking = request.booking(target);
        assert_eq!(booking.subject_type, SubjectType::Tutor);
        assert_eq!(booking.duration_hours, Some(2));
        assert_eq!(booking.options, OptionFlags::default());
    }

    #[test]
    fn test_update_keeps_stored_values() {
        let order = stored_order();
        let booking = UpdateOrderRequest::default().merge_into(&order, BookingTarget::Tutor(4));
        assert_eq!(booking.start_date, "2025-03-10");
        assert_eq!(booking.start_time, "10:00");
        assert_eq!(booking.headcount, 2);
        assert_eq!(booking.duration_hours, Some(6));
        assert!(booking.options.supplementary_materials);
    }

    #[test]
    fn test_update_overrides_given_fields() {
        let order = stored_order();
        let edit = UpdateOrderRequest {
            persons: Some(5),
            supplementary: Some(false),
            assessment: Some(true),
            ..UpdateOrderRequest::default()
        };
        let booking = edit.merge_into(&order, BookingTarget::Tutor(4));
        assert_eq!(booking.headcount, 5);
        assert!(!booking.options.supplementary_materials);
        assert!(booking.options.level_assessment);
    }
}
