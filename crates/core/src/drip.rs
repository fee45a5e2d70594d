//! Drip-content access windows.
//!
//! A lesson becomes visible `days_to_unlock` calendar days after the
//! enrollment was created. The unlock instant keeps the enrollment's
//! time-of-day, so a lesson with `days_to_unlock = 0` is visible from the
//! moment the enrollment exists.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::types::Timestamp;

/// Milliseconds in one day, the unit for [`days_until_unlock`].
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Instant at which a lesson unlocks for an enrollment.
///
/// Uses calendar-day addition rather than a raw seconds offset. Negative
/// offsets are treated as zero. Saturates at the maximum representable
/// timestamp instead of overflowing.
pub fn unlock_at(enrollment_created_at: Timestamp, days_to_unlock: i32) -> Timestamp {
    let days = u64::from(days_to_unlock.max(0).unsigned_abs());
    enrollment_created_at
        .checked_add_days(Days::new(days))
        .unwrap_or(Timestamp::MAX_UTC)
}

/// Whether the lesson is visible at `now`. The boundary is inclusive.
pub fn is_unlocked(enrollment_created_at: Timestamp, days_to_unlock: i32, now: Timestamp) -> bool {
    now >= unlock_at(enrollment_created_at, days_to_unlock)
}

/// Whole days left until `unlock_at`, rounded up. Zero once unlocked.
///
/// Rounds a partial day up, so a lesson unlocking in one hour reports one
/// day remaining.
pub fn days_until_unlock(unlock_at: Timestamp, now: Timestamp) -> i64 {
    let remaining_ms = (unlock_at - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Everything a lesson page needs to know about a lesson's drip window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonAccess {
    pub is_unlocked: bool,
    pub days_to_unlock: i32,
    pub unlock_at: Timestamp,
    pub unlock_date: NaiveDate,
    /// Zero when unlocked.
    pub days_until_unlock: i64,
    /// Long-form Spanish date, e.g. `"sábado, 6 de enero de 2024"`.
    pub unlock_date_label: String,
}

impl LessonAccess {
    pub fn evaluate(enrollment_created_at: Timestamp, days_to_unlock: i32, now: Timestamp) -> Self {
        let days_to_unlock = days_to_unlock.max(0);
        let unlock_at = unlock_at(enrollment_created_at, days_to_unlock);
        let unlock_date = unlock_at.date_naive();
        Self {
            is_unlocked: now >= unlock_at,
            days_to_unlock,
            unlock_at,
            unlock_date,
            days_until_unlock: days_until_unlock(unlock_at, now),
            unlock_date_label: format_long_date_es(unlock_date),
        }
    }

    /// Human-readable countdown shown under a locked lesson.
    pub fn remaining_label(&self) -> String {
        match self.days_until_unlock {
            1 => "Falta 1 día".to_string(),
            n => format!("Faltan {n} días"),
        }
    }
}

/// Format a date as the viewer sees it, e.g. `"lunes, 1 de enero de 2024"`.
pub fn format_long_date_es(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name_es(date.weekday()),
        date.day(),
        month_name_es(date.month()),
        date.year()
    )
}

fn weekday_name_es(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn month_name_es(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}
