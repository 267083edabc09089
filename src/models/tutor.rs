//! Tutor catalog records

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::models::PricedEntity;

/// Tutor from `/api/tutors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: u64,
    pub name: String,
    /// Years of teaching
    #[serde(default)]
    pub work_experience: u32,
    #[serde(default)]
    pub languages_spoken: Vec<String>,
    #[serde(default)]
    pub languages_offered: Vec<String>,
    #[serde(default)]
    pub language_level: String,
    #[serde(default)]
    pub price_per_hour: Decimal,
}

impl Tutor {
    pub fn priced_entity(&self) -> PricedEntity {
        PricedEntity::Tutor {
            hourly_rate: self.price_per_hour,
        }
    }

    /// Offered and spoken languages, lowercased
    pub fn languages(&self) -> impl Iterator<Item = String> + '_ {
        self.languages_offered
            .iter()
            .chain(self.languages_spoken.iter())
            .map(|lang| lang.to_lowercase())
    }
}
