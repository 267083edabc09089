//! Core pricing calculation functions.
//!
//! Pure functions for quote math - no catalog or network access.
//! Course enrollment, tutor booking and order editing all price through
//! [`compute_quote`], so the three flows cannot drift apart.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{
    AppliedFlags, BookingRequest, LineItem, PricedEntity, PricingPolicy, PricingStep, Quote,
    SubjectType, ValidationError,
};

pub const MIN_HEADCOUNT: u32 = 1;
pub const MAX_HEADCOUNT: u32 = 20;
pub const MIN_DURATION_HOURS: u32 = 1;
pub const MAX_TUTOR_DURATION_HOURS: u32 = 40;

const WEEKEND_MULTIPLIER: Decimal = dec!(1.5);
const MORNING_SURCHARGE_PER_PERSON: Decimal = dec!(400);
const EVENING_SURCHARGE_PER_PERSON: Decimal = dec!(1000);
const INTENSIVE_MULTIPLIER: Decimal = dec!(1.2);
const SUPPLEMENTARY_PER_PERSON: Decimal = dec!(2000);
const PERSONALIZED_PER_WEEK: Decimal = dec!(1500);
const EXCURSIONS_MULTIPLIER: Decimal = dec!(1.25);
const ASSESSMENT_FEE: Decimal = dec!(300);
const INTERACTIVE_MULTIPLIER: Decimal = dec!(1.5);
const EARLY_REGISTRATION_MULTIPLIER: Decimal = dec!(0.9);
const GROUP_MULTIPLIER: Decimal = dec!(0.85);

/// Tutoring hours counted as one "week" for the personalized sessions option.
const TUTOR_HOURS_PER_WEEK: u32 = 5;
pub const EARLY_REGISTRATION_DAYS: i64 = 30;
pub const GROUP_MIN_HEADCOUNT: u32 = 5;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Round to specified decimal places, halves away from zero.
///
/// Prices are never negative, so this is round-half-up.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use linguaschool_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(96619.5), 0), dec!(96620));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole days from `as_of` until midnight UTC of `start_date`, rounded up.
///
/// Negative once the start date has passed.
pub fn days_until_start(start_date: NaiveDate, as_of: DateTime<Utc>) -> i64 {
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    let millis = (start - as_of).num_milliseconds();

    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Order flag names a form should offer for a subject type.
///
/// Advisory only: [`compute_quote`] prices any combination.
pub fn available_options(subject: SubjectType) -> &'static [&'static str] {
    match subject {
        SubjectType::Course => &[
            "intensive_course",
            "supplementary",
            "personalized",
            "excursions",
            "assessment",
            "interactive",
        ],
        SubjectType::Tutor => &["supplementary", "assessment"],
    }
}

/// Quote a booking with the default policy (early registration for both
/// courses and tutors).
pub fn compute_quote(
    request: &BookingRequest,
    entity: &PricedEntity,
    as_of: DateTime<Utc>,
) -> Result<Quote, ValidationError> {
    compute_quote_with_policy(request, entity, as_of, &PricingPolicy::default())
}

/// Quote a booking.
///
/// Steps run in a fixed order and each one works on the running price left
/// by the previous step; rounding happens once at the end.
pub fn compute_quote_with_policy(
    request: &BookingRequest,
    entity: &PricedEntity,
    as_of: DateTime<Utc>,
    policy: &PricingPolicy,
) -> Result<Quote, ValidationError> {
    let checked = validate(request, entity)?;
    let persons = Decimal::from(checked.headcount);
    let options = &request.options;
    let mut applied = AppliedFlags::default();

    let base = entity
        .hourly_rate()
        .checked_mul(Decimal::from(checked.duration_hours))
        .and_then(|v| v.checked_mul(persons))
        .ok_or_else(price_out_of_range)?;
    let mut ledger = Ledger::new(base);

    if matches!(checked.start_date.weekday(), Weekday::Sat | Weekday::Sun) {
        ledger.multiply(PricingStep::Weekend, WEEKEND_MULTIPLIER)?;
    }

    match checked.start_time.hour() {
        9..=11 => ledger.add(
            PricingStep::MorningSurcharge,
            MORNING_SURCHARGE_PER_PERSON * persons,
        )?,
        18..=19 => ledger.add(
            PricingStep::EveningSurcharge,
            EVENING_SURCHARGE_PER_PERSON * persons,
        )?,
        _ => {}
    }

    if options.intensive_course {
        ledger.multiply(PricingStep::IntensiveCourse, INTENSIVE_MULTIPLIER)?;
        applied.intensive_course = true;
    }

    if options.supplementary_materials {
        ledger.add(
            PricingStep::SupplementaryMaterials,
            SUPPLEMENTARY_PER_PERSON * persons,
        )?;
        applied.supplementary = true;
    }

    if options.personalized_sessions {
        let weeks = match entity {
            PricedEntity::Course { weeks_total, .. } => *weeks_total,
            PricedEntity::Tutor { .. } => checked.duration_hours.div_ceil(TUTOR_HOURS_PER_WEEK),
        };
        ledger.add(
            PricingStep::PersonalizedSessions,
            PERSONALIZED_PER_WEEK * Decimal::from(weeks),
        )?;
        applied.personalized = true;
    }

    if options.cultural_excursions {
        ledger.multiply(PricingStep::CulturalExcursions, EXCURSIONS_MULTIPLIER)?;
        applied.excursions = true;
    }

    if options.level_assessment {
        ledger.add(PricingStep::LevelAssessment, ASSESSMENT_FEE)?;
        applied.assessment = true;
    }

    if options.interactive_platform {
        ledger.multiply(PricingStep::InteractivePlatform, INTERACTIVE_MULTIPLIER)?;
        applied.interactive = true;
    }

    let days = days_until_start(checked.start_date, as_of);
    if days >= EARLY_REGISTRATION_DAYS && policy.early_registration_applies(request.subject_type)
    {
        ledger.multiply(PricingStep::EarlyRegistration, EARLY_REGISTRATION_MULTIPLIER)?;
        applied.early_registration = true;
    }

    if checked.headcount >= GROUP_MIN_HEADCOUNT {
        ledger.multiply(PricingStep::GroupEnrollment, GROUP_MULTIPLIER)?;
        applied.group_enrollment = true;
    }

    let total_price = round_money(ledger.total, 0)
        .to_u64()
        .ok_or_else(price_out_of_range)?;

    Ok(Quote {
        total_price,
        breakdown: ledger.lines,
        applied,
        start_date: checked.start_date,
        start_time: checked.start_time,
        headcount: checked.headcount,
        duration_hours: checked.duration_hours,
        days_until_start: days,
    })
}

/// Booking input after validation
#[derive(Debug, Clone, Copy)]
struct CheckedBooking {
    start_date: NaiveDate,
    start_time: NaiveTime,
    headcount: u32,
    duration_hours: u32,
}

fn validate(
    request: &BookingRequest,
    entity: &PricedEntity,
) -> Result<CheckedBooking, ValidationError> {
    if request.subject_type != entity.subject_type() {
        return Err(ValidationError::new(
            "subject_type",
            format!(
                "{} booking cannot be priced against a {}",
                request.subject_type,
                entity.subject_type()
            ),
        ));
    }

    if !(MIN_HEADCOUNT..=MAX_HEADCOUNT).contains(&request.headcount) {
        return Err(ValidationError::new(
            "headcount",
            format!("must be between {} and {}", MIN_HEADCOUNT, MAX_HEADCOUNT),
        ));
    }

    let duration_hours = match entity {
        PricedEntity::Course {
            weeks_total,
            hours_per_week,
            ..
        } => {
            let hours = weeks_total.checked_mul(*hours_per_week).ok_or_else(|| {
                ValidationError::new("duration_hours", "course schedule is too long")
            })?;
            if hours < MIN_DURATION_HOURS {
                return Err(ValidationError::new(
                    "duration_hours",
                    "course has no scheduled hours",
                ));
            }
            hours
        }
        PricedEntity::Tutor { .. } => {
            let hours = request.duration_hours.ok_or_else(|| {
                ValidationError::new("duration_hours", "is required for tutor bookings")
            })?;
            if !(MIN_DURATION_HOURS..=MAX_TUTOR_DURATION_HOURS).contains(&hours) {
                return Err(ValidationError::new(
                    "duration_hours",
                    format!(
                        "must be between {} and {} hours",
                        MIN_DURATION_HOURS, MAX_TUTOR_DURATION_HOURS
                    ),
                ));
            }
            hours
        }
    };

    let start_date = parse_date(&request.start_date)?;
    let start_time = parse_time(&request.start_time)?;

    if entity.hourly_rate().is_sign_negative() {
        return Err(ValidationError::new(
            "hourly_rate",
            "catalog rate cannot be negative",
        ));
    }

    Ok(CheckedBooking {
        start_date,
        start_time,
        headcount: request.headcount,
        duration_hours,
    })
}

/// Parse a `YYYY-MM-DD` start date
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::new("start_date", format!("'{}' is not a YYYY-MM-DD date", value))
    })
}

/// Parse an `HH:MM` (or `HH:MM:SS`) start time
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ValidationError::new("start_time", format!("'{}' is not an HH:MM time", value)))
}

/// Running price plus the lines that produced it
struct Ledger {
    total: Decimal,
    lines: Vec<LineItem>,
}

impl Ledger {
    fn new(base: Decimal) -> Self {
        Self {
            total: base,
            lines: vec![LineItem {
                step: PricingStep::Base,
                amount: base,
                running_total: base,
            }],
        }
    }

    fn add(&mut self, step: PricingStep, amount: Decimal) -> Result<(), ValidationError> {
        self.total = self
            .total
            .checked_add(amount)
            .ok_or_else(price_out_of_range)?;
        self.lines.push(LineItem {
            step,
            amount,
            running_total: self.total,
        });
        Ok(())
    }

    fn multiply(&mut self, step: PricingStep, factor: Decimal) -> Result<(), ValidationError> {
        let before = self.total;
        self.total = self
            .total
            .checked_mul(factor)
            .ok_or_else(price_out_of_range)?;
        self.lines.push(LineItem {
            step,
            amount: self.total - before,
            running_total: self.total,
        });
        Ok(())
    }
}

fn price_out_of_range() -> ValidationError {
    ValidationError::new("hourly_rate", "price out of range")
}
