//! Orders (enrollments) and the payloads sent to create or edit them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pricing::models::{AppliedFlags, OptionFlags, Quote, SubjectType, ValidationError};

/// Order from `/api/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub course_id: u64,
    #[serde(default)]
    pub tutor_id: u64,
    pub date_start: NaiveDate,
    pub time_start: String,
    pub duration: u32,
    pub persons: u32,
    pub price: u64,
    #[serde(flatten)]
    pub flags: AppliedFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Order {
    pub fn target(&self) -> Result<BookingTarget, ValidationError> {
        BookingTarget::from_ids(self.course_id, self.tutor_id)
    }

    pub fn options(&self) -> OptionFlags {
        self.flags.options()
    }
}

/// The catalog record an order books. Zero ids mean "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingTarget {
    Course(u64),
    Tutor(u64),
}

impl BookingTarget {
    pub fn from_ids(course_id: u64, tutor_id: u64) -> Result<Self, ValidationError> {
        match (course_id, tutor_id) {
            (0, 0) => Err(ValidationError::new(
                "subject",
                "either course_id or tutor_id must be set",
            )),
            (course, 0) => Ok(BookingTarget::Course(course)),
            (0, tutor) => Ok(BookingTarget::Tutor(tutor)),
            _ => Err(ValidationError::new(
                "subject",
                "course_id and tutor_id are mutually exclusive",
            )),
        }
    }

    pub fn subject_type(&self) -> SubjectType {
        match self {
            BookingTarget::Course(_) => SubjectType::Course,
            BookingTarget::Tutor(_) => SubjectType::Tutor,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            BookingTarget::Course(id) | BookingTarget::Tutor(id) => *id,
        }
    }

    /// `(course_id, tutor_id)` with the unused one zeroed
    pub fn ids(&self) -> (u64, u64) {
        match self {
            BookingTarget::Course(id) => (*id, 0),
            BookingTarget::Tutor(id) => (0, *id),
        }
    }
}

/// Body of `POST /api/orders`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    pub course_id: u64,
    pub tutor_id: u64,
    pub date_start: String,
    pub time_start: String,
    pub duration: u32,
    pub persons: u32,
    pub price: u64,
    #[serde(flatten)]
    pub flags: AppliedFlags,
}

impl OrderPayload {
    /// Build the order body from a quote. Price and flags are taken from the
    /// quote as-is so the stored order matches what was calculated.
    pub fn from_quote(target: BookingTarget, quote: &Quote) -> Self {
        let (course_id, tutor_id) = target.ids();
        Self {
            course_id,
            tutor_id,
            date_start: quote.start_date.format("%Y-%m-%d").to_string(),
            time_start: quote.start_time.format("%H:%M").to_string(),
            duration: quote.duration_hours,
            persons: quote.headcount,
            price: quote.total_price,
            flags: quote.applied,
        }
    }

    pub fn target(&self) -> Result<BookingTarget, ValidationError> {
        BookingTarget::from_ids(self.course_id, self.tutor_id)
    }
}

/// Body of `PUT /api/orders/{id}`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_enrollment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensive_course: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excursions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
}

impl OrderUpdate {
    /// A full update carrying a recalculated price and every flag
    pub fn from_quote(quote: &Quote) -> Self {
        let flags = quote.applied;
        Self {
            date_start: Some(quote.start_date.format("%Y-%m-%d").to_string()),
            time_start: Some(quote.start_time.format("%H:%M").to_string()),
            duration: Some(quote.duration_hours),
            persons: Some(quote.headcount),
            price: Some(quote.total_price),
            early_registration: Some(flags.early_registration),
            group_enrollment: Some(flags.group_enrollment),
            intensive_course: Some(flags.intensive_course),
            supplementary: Some(flags.supplementary),
            personalized: Some(flags.personalized),
            excursions: Some(flags.excursions),
            assessment: Some(flags.assessment),
            interactive: Some(flags.interactive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::compute_quote;
    use crate::pricing::models::{BookingRequest, PricedEntity};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn tutor_quote(headcount: u32, assessment: bool) -> Quote {
        let request = BookingRequest {
            subject_type: SubjectType::Tutor,
            start_date: "2025-02-14".to_string(),
            start_time: "19:00:00".to_string(),
            headcount,
            duration_hours: Some(10),
            options: OptionFlags {
                level_assessment: assessment,
                ..OptionFlags::default()
            },
        };
        let entity = PricedEntity::Tutor {
            hourly_rate: dec!(2000),
        };
        compute_quote(&request, &entity, Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_booking_target_from_ids() {
        assert_eq!(BookingTarget::from_ids(4, 0).unwrap(), BookingTarget::Course(4));
        assert_eq!(BookingTarget::from_ids(0, 9).unwrap(), BookingTarget::Tutor(9));
        assert_eq!(BookingTarget::from_ids(0, 0).unwrap_err().field, "subject");
        assert_eq!(BookingTarget::from_ids(1, 2).unwrap_err().field, "subject");
        assert_eq!(BookingTarget::Tutor(9).ids(), (0, 9));
    }

    #[test]
    fn test_payload_mirrors_quote() {
        let quote = tutor_quote(6, true);
        let payload = OrderPayload::from_quote(BookingTarget::Tutor(12), &quote);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["course_id"], 0);
        assert_eq!(json["tutor_id"], 12);
        assert_eq!(json["date_start"], "2025-02-14");
        assert_eq!(json["time_start"], "19:00");
        assert_eq!(json["duration"], 10);
        assert_eq!(json["persons"], 6);
        assert_eq!(json["price"], 96620);
        assert_eq!(json["early_registration"], true);
        assert_eq!(json["group_enrollment"], true);
        assert_eq!(json["assessment"], true);
        for flag in ["intensive_course", "supplementary", "personalized", "excursions", "interactive"] {
            assert_eq!(json[flag], false, "{flag}");
        }
    }

    #[test]
    fn test_partial_update_skips_unset_fields() {
        let update = OrderUpdate {
            persons: Some(3),
            ..OrderUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "persons": 3 }));
    }

    #[test]
    fn test_full_update_carries_every_flag() {
        let update = OrderUpdate::from_quote(&tutor_quote(2, false));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 13);
        assert_eq!(json["group_enrollment"], false);
    }

    #[test]
    fn test_order_deserializes_with_flags() {
        let json = r#"{
            "id": 41,
            "course_id": 0,
            "tutor_id": 7,
            "date_start": "2025-03-10",
            "time_start": "10:00",
            "duration": 4,
            "persons": 2,
            "price": 5600,
            "early_registration": false,
            "group_enrollment": false,
            "intensive_course": false,
            "supplementary": true,
            "personalized": false,
            "excursions": false,
            "assessment": true,
            "interactive": false,
            "student_id": 15,
            "created_at": "2025-01-02T10:11:12"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.target().unwrap(), BookingTarget::Tutor(7));
        assert!(order.options().supplementary_materials);
        assert!(order.options().level_assessment);
        assert!(!order.options().interactive_platform);
    }
}
