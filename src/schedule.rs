use chrono::{DateTime, Days, Months, Utc};

use crate::models::Frequency;

/// Step a timestamp (ms since epoch, UTC) forward by one interval.
///
/// Month and year steps clamp the day-of-month to the last valid day of the
/// target month: Jan 31 + 1 month lands on Feb 28 (29 in leap years), and
/// Feb 29 + 1 year lands on Feb 28. This clamping rule is part of the
/// contract, not an artifact of chrono. Time-of-day is preserved.
///
/// Total over all four frequencies. A timestamp outside chrono's
/// representable range is a programmer error and panics.
pub fn advance(ts_millis: i64, frequency: Frequency) -> i64 {
    let dt = DateTime::<Utc>::from_timestamp_millis(ts_millis)
        .unwrap_or_else(|| panic!("timestamp out of range: {ts_millis}"));
    let next = match frequency {
        Frequency::Daily => dt.checked_add_days(Days::new(1)),
        Frequency::Weekly => dt.checked_add_days(Days::new(7)),
        Frequency::Monthly => dt.checked_add_months(Months::new(1)),
        Frequency::Yearly => dt.checked_add_months(Months::new(12)),
    };
    next.unwrap_or_else(|| panic!("timestamp overflow advancing {ts_millis} by {frequency}"))
        .timestamp_millis()
}

/// Current wall-clock time as ms since epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[allow(dead_code)]
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
