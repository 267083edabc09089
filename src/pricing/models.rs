//! Pricing domain types.
//!
//! Inputs and outputs of the quote calculator. Nothing in here performs I/O;
//! the catalog records are turned into a [`PricedEntity`] before quoting.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What is being booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    Course,
    Tutor,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Course => "course",
            SubjectType::Tutor => "tutor",
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "course" | "courses" => Ok(SubjectType::Course),
            "tutor" | "tutors" => Ok(SubjectType::Tutor),
            other => Err(ValidationError::new(
                "subject_type",
                format!("unknown subject type '{}'", other),
            )),
        }
    }
}

/// User-selected booking options.
///
/// Early registration and group enrollment are not here: they are derived
/// by the calculator and reported through [`AppliedFlags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionFlags {
    pub intensive_course: bool,
    pub supplementary_materials: bool,
    pub personalized_sessions: bool,
    pub cultural_excursions: bool,
    pub level_assessment: bool,
    pub interactive_platform: bool,
}

/// A booking as entered on one of the application forms.
///
/// Date and time are kept as entered; the calculator parses them so that a
/// malformed value is reported against its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub subject_type: SubjectType,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM`, seconds tolerated
    pub start_time: String,
    pub headcount: u32,
    /// Only read for tutor bookings; course hours come from the catalog.
    pub duration_hours: Option<u32>,
    pub options: OptionFlags,
}

/// Catalog data the price is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricedEntity {
    Course {
        hourly_rate: Decimal,
        weeks_total: u32,
        hours_per_week: u32,
    },
    Tutor {
        hourly_rate: Decimal,
    },
}

impl PricedEntity {
    pub fn subject_type(&self) -> SubjectType {
        match self {
            PricedEntity::Course { .. } => SubjectType::Course,
            PricedEntity::Tutor { .. } => SubjectType::Tutor,
        }
    }

    pub fn hourly_rate(&self) -> Decimal {
        match self {
            PricedEntity::Course { hourly_rate, .. } | PricedEntity::Tutor { hourly_rate } => {
                *hourly_rate
            }
        }
    }
}

/// The eight order flags, named as the order resource names them.
///
/// Each one is true exactly when the matching pricing step fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppliedFlags {
    pub early_registration: bool,
    pub group_enrollment: bool,
    pub intensive_course: bool,
    pub supplementary: bool,
    pub personalized: bool,
    pub excursions: bool,
    pub assessment: bool,
    pub interactive: bool,
}

impl AppliedFlags {
    /// The user-set part of the flags
    pub fn options(&self) -> OptionFlags {
        OptionFlags {
            intensive_course: self.intensive_course,
            supplementary_materials: self.supplementary,
            personalized_sessions: self.personalized,
            cultural_excursions: self.excursions,
            level_assessment: self.assessment,
            interactive_platform: self.interactive,
        }
    }
}

/// How a breakdown line changed the running price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Base,
    Surcharge,
    Multiplier,
    Addition,
    Discount,
}

/// One step of the pricing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStep {
    Base,
    Weekend,
    MorningSurcharge,
    EveningSurcharge,
    IntensiveCourse,
    SupplementaryMaterials,
    PersonalizedSessions,
    CulturalExcursions,
    LevelAssessment,
    InteractivePlatform,
    EarlyRegistration,
    GroupEnrollment,
}

impl PricingStep {
    pub fn kind(&self) -> LineKind {
        match self {
            PricingStep::Base => LineKind::Base,
            PricingStep::Weekend | PricingStep::MorningSurcharge | PricingStep::EveningSurcharge => {
                LineKind::Surcharge
            }
            PricingStep::IntensiveCourse
            | PricingStep::CulturalExcursions
            | PricingStep::InteractivePlatform => LineKind::Multiplier,
            PricingStep::SupplementaryMaterials
            | PricingStep::PersonalizedSessions
            | PricingStep::LevelAssessment => LineKind::Addition,
            PricingStep::EarlyRegistration | PricingStep::GroupEnrollment => LineKind::Discount,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PricingStep::Base => "Base price",
            PricingStep::Weekend => "Weekend session (x1.5)",
            PricingStep::MorningSurcharge => "Morning slot surcharge",
            PricingStep::EveningSurcharge => "Evening slot surcharge",
            PricingStep::IntensiveCourse => "Intensive course (x1.2)",
            PricingStep::SupplementaryMaterials => "Supplementary materials",
            PricingStep::PersonalizedSessions => "Personalized sessions",
            PricingStep::CulturalExcursions => "Cultural excursions (x1.25)",
            PricingStep::LevelAssessment => "Level assessment",
            PricingStep::InteractivePlatform => "Interactive platform (x1.5)",
            PricingStep::EarlyRegistration => "Early registration (-10%)",
            PricingStep::GroupEnrollment => "Group enrollment (-15%)",
        }
    }
}

/// A breakdown line: the change a step made and the price after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub step: PricingStep,
    pub amount: Decimal,
    pub running_total: Decimal,
}

/// Result of pricing one booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Whole currency units, rounded once at the end
    pub total_price: u64,
    pub breakdown: Vec<LineItem>,
    pub applied: AppliedFlags,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub headcount: u32,
    pub duration_hours: u32,
    pub days_until_start: i64,
}

impl Quote {
    /// Whether the given step contributed a breakdown line
    pub fn fired(&self, step: PricingStep) -> bool {
        self.breakdown.iter().any(|line| line.step == step)
    }
}

/// Per-subject switches for the discount rules that differ between forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub early_registration_for_courses: bool,
    pub early_registration_for_tutors: bool,
}

impl PricingPolicy {
    pub fn early_registration_applies(&self, subject: SubjectType) -> bool {
        match subject {
            SubjectType::Course => self.early_registration_for_courses,
            SubjectType::Tutor => self.early_registration_for_tutors,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            early_registration_for_courses: true,
            early_registration_for_tutors: true,
        }
    }
}

/// Rejected booking input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
