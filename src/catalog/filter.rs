//! Course and tutor search filters

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::models::{Course, Tutor};

/// Course search form. Blank fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        if let Some(name) = non_blank(&self.name) {
            if !course.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if let Some(level) = non_blank(&self.level) {
            if course.level != level {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        courses.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

/// Tutor search form. Blank fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorFilter {
    #[serde(default)]
    pub level: Option<String>,
    /// Minimum years of experience
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub min_experience: Option<u32>,
    /// Comma-separated; every term must match some language
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub price_min: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub price_max: Option<Decimal>,
}

impl TutorFilter {
    pub fn matches(&self, tutor: &Tutor) -> bool {
        if let Some(level) = non_blank(&self.level) {
            if tutor.language_level != level {
                return false;
            }
        }

        if let Some(min) = self.min_experience {
            if tutor.work_experience < min {
                return false;
            }
        }

        if let Some(languages) = non_blank(&self.languages) {
            let known: Vec<String> = tutor.languages().collect();
            let all_found = languages
                .split(',')
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .all(|term| known.iter().any(|lang| lang.contains(&term)));
            if !all_found {
                return false;
            }
        }

        let price = tutor.price_per_hour;
        if price < self.price_min.unwrap_or(Decimal::ZERO) {
            return false;
        }
        if let Some(max) = self.price_max {
            if price > max {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, tutors: &[Tutor]) -> Vec<Tutor> {
        tutors.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// An empty form field means "any"
fn deserialize_blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match non_blank(&value) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Display class for a course or tutor level
pub fn level_badge(level: &str) -> &'static str {
    let level = level.to_lowercase();
    if level.contains("beginner") || level.contains("начальный") {
        "success"
    } else if level.contains("intermediate") || level.contains("средний") {
        "warning"
    } else if level.contains("advanced") || level.contains("продвинутый") {
        "danger"
    } else {
        "secondary"
    }
}
