use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Business-day arithmetic over a fixed Mon-Fri work week.
///
/// All operations step one calendar day at a time, so they are O(n) in the
/// number of days skipped. Fine for project-scale horizons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkCalendar;

impl WorkCalendar {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a date falls on a working day (Mon-Fri).
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Step `n` working days forward from `date`. A no-op for `n == 0`.
    pub fn add_business_days(&self, date: NaiveDate, n: i64) -> NaiveDate {
        let mut current = date;
        let mut remaining = n;
        while remaining > 0 {
            current = current + Duration::days(1);
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }
        current
    }

    /// Step `n` working days backward from `date`. A no-op for `n == 0`.
    pub fn subtract_business_days(&self, date: NaiveDate, n: i64) -> NaiveDate {
        let mut current = date;
        let mut remaining = n;
        while remaining > 0 {
            current = current - Duration::days(1);
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }
        current
    }

    /// Signed shift: forward for `n >= 0`, backward otherwise. Lag offsets
    /// may be negative (lead time), which is where the sign shows up.
    pub fn shift_business_days(&self, date: NaiveDate, n: i64) -> NaiveDate {
        if n >= 0 {
            self.add_business_days(date, n)
        } else {
            self.subtract_business_days(date, -n)
        }
    }

    /// Count working days strictly after `start` up to and including `end`.
    /// Returns 0 when `end <= start`.
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;
        while current < end {
            current = current + Duration::days(1);
            if self.is_working_day(current) {
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn add_zero_is_noop() {
        let cal = WorkCalendar::new();
        let sat = d(2025, 1, 4);
        assert_eq!(cal.add_business_days(sat, 0), sat);
    }

    #[test]
    fn add_from_friday_skips_weekend() {
        let cal = WorkCalendar::new();
        assert_eq!(cal.add_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
    }

    #[test]
    fn between_is_half_open() {
        let cal = WorkCalendar::new();
        // Mon 1/6 .. Fri 1/10: the start day itself is not counted
        assert_eq!(cal.business_days_between(d(2025, 1, 6), d(2025, 1, 10)), 4);
        assert_eq!(cal.business_days_between(d(2025, 1, 10), d(2025, 1, 10)), 0);
        assert_eq!(cal.business_days_between(d(2025, 1, 10), d(2025, 1, 6)), 0);
    }

    #[test]
    fn shift_negative_steps_backward() {
        let cal = WorkCalendar::new();
        assert_eq!(cal.shift_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
    }
}
