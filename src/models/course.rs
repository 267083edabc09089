//! Course catalog records

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::models::PricedEntity;

/// Course from `/api/courses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub level: String,
    /// Length in weeks
    #[serde(default)]
    pub total_length: u32,
    /// Hours per week
    #[serde(default)]
    pub week_length: u32,
    #[serde(default)]
    pub start_dates: Vec<NaiveDateTime>,
    #[serde(default)]
    pub course_fee_per_hour: Decimal,
}

impl Course {
    /// Scheduled hours, or `None` when the schedule does not fit a `u32`
    pub fn total_hours(&self) -> Option<u32> {
        self.total_length.checked_mul(self.week_length)
    }

    pub fn priced_entity(&self) -> PricedEntity {
        PricedEntity::Course {
            hourly_rate: self.course_fee_per_hour,
            weeks_total: self.total_length,
            hours_per_week: self.week_length,
        }
    }
}
