//! Time-of-day arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Offset of `t` from the preceding midnight, with the date discarded.
pub fn time_of_day(t: NaiveDateTime) -> TimeDelta {
    t - t.date().and_time(NaiveTime::MIN)
}

/// Instant at `offset` after midnight of `day`.
///
/// Offsets outside `0..24h` land on the neighbouring days.
pub fn at_time_of_day(day: NaiveDate, offset: TimeDelta) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + offset
}

/// Duration in (fractional) seconds.
pub fn delta_seconds(d: TimeDelta) -> f64 {
    d.num_seconds() as f64 + f64::from(d.subsec_nanos()) * 1e-9
}

/// Duration from (fractional) seconds, rounded to the nearest microsecond.
pub fn delta_from_seconds(seconds: f64) -> TimeDelta {
    TimeDelta::microseconds((seconds * 1e6).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn time_of_day_discards_date() {
        let a = day().and_hms_micro_opt(12, 0, 3, 500_000).unwrap();
        let b = NaiveDate::from_ymd_opt(1999, 1, 1)
            .unwrap()
            .and_hms_micro_opt(12, 0, 3, 500_000)
            .unwrap();
        assert_eq!(time_of_day(a), time_of_day(b));
        assert_eq!(time_of_day(a), TimeDelta::microseconds(43_203_500_000));
    }

    #[test]
    fn at_time_of_day_inverts_time_of_day() {
        let t = day().and_hms_opt(7, 45, 12).unwrap();
        assert_eq!(at_time_of_day(day(), time_of_day(t)), t);
    }

    #[test]
    fn negative_offset_lands_on_previous_day() {
        let t = at_time_of_day(day(), TimeDelta::seconds(-60));
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2024, 3, 13)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap()
        );
    }

    #[test]
    fn seconds_round_trip_at_microsecond_resolution() {
        assert_abs_diff_eq!(delta_seconds(delta_from_seconds(3.5)), 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(
            delta_seconds(delta_from_seconds(-3.5)),
            -3.5,
            epsilon = 1e-9
        );
        assert_eq!(delta_from_seconds(0.000_001_4), TimeDelta::microseconds(1));
    }
}
