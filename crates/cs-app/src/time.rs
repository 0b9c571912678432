//! Local calendar-day arithmetic over Unix milliseconds.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

pub const MS_PER_DAY: i64 = 86_400_000;

/// First instant of `date` in the local time zone.
///
/// When midnight falls into a DST gap the day starts one hour later.
pub fn local_midnight_ms(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

/// `[start, end)` of `date` in the local time zone.
pub fn local_day_range_ms(date: NaiveDate) -> (i64, i64) {
    let start = local_midnight_ms(date);
    let end = date.succ_opt().map(local_midnight_ms).unwrap_or(i64::MAX);
    (start, end)
}

pub fn local_date_of(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Cutoff for age-based retention: everything strictly older is expired.
pub fn retention_cutoff_ms(now_ms: i64, max_age_days: u32) -> i64 {
    now_ms.saturating_sub(i64::from(max_age_days).saturating_mul(MS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_range_contains_its_own_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = local_day_range_ms(date);
        assert!(start < end);
        assert_eq!(local_date_of(start), Some(date));
        assert_eq!(local_date_of(end - 1), Some(date));
        assert_eq!(local_date_of(end), date.succ_opt());
    }

    #[test]
    fn cutoff_is_plain_millisecond_arithmetic() {
        assert_eq!(retention_cutoff_ms(10 * MS_PER_DAY, 3), 7 * MS_PER_DAY);
        assert_eq!(retention_cutoff_ms(5, 0), 5);
    }
}
