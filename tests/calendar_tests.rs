use chrono::{Datelike, NaiveDate, Weekday};
use cpm_engine::WorkCalendar;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn weekends_are_not_working_days() {
    let cal = WorkCalendar::new();
    assert!(!cal.is_working_day(d(2025, 1, 4))); // Saturday
    assert!(!cal.is_working_day(d(2025, 1, 5))); // Sunday
    assert!(cal.is_working_day(d(2025, 1, 6))); // Monday
}

#[test]
fn add_business_days_counts_only_weekdays() {
    let cal = WorkCalendar::new();
    let mon = d(2025, 1, 6);
    assert_eq!(cal.add_business_days(mon, 4), d(2025, 1, 10)); // Friday
    assert_eq!(cal.add_business_days(mon, 5), d(2025, 1, 13)); // next Monday
}

#[test]
fn add_zero_days_is_identity() {
    let cal = WorkCalendar::new();
    for day in 4..=10 {
        let date = d(2025, 1, day);
        assert_eq!(cal.add_business_days(date, 0), date);
        assert_eq!(cal.subtract_business_days(date, 0), date);
    }
}

#[test]
fn subtract_then_add_round_trips_on_weekdays() {
    let cal = WorkCalendar::new();
    // Holds whenever the anchor date is itself a weekday
    for day in [6, 7, 8, 9, 10] {
        let date = d(2025, 1, day);
        for n in 0..8 {
            assert_eq!(cal.add_business_days(cal.subtract_business_days(date, n), n), date);
        }
    }
}

#[test]
fn add_from_weekend_lands_on_weekday() {
    let cal = WorkCalendar::new();
    let sat = d(2025, 1, 4);
    let result = cal.add_business_days(sat, 1);
    assert_eq!(result, d(2025, 1, 6));
    assert_eq!(result.weekday(), Weekday::Mon);
}

#[test]
fn business_days_between_excludes_start_includes_end() {
    let cal = WorkCalendar::new();
    // Mon -> Fri same week: Tue, Wed, Thu, Fri
    assert_eq!(cal.business_days_between(d(2025, 1, 6), d(2025, 1, 10)), 4);
    // Fri -> next Mon: only the Monday
    assert_eq!(cal.business_days_between(d(2025, 1, 10), d(2025, 1, 13)), 1);
    // Spanning a full weekend from Monday to Monday
    assert_eq!(cal.business_days_between(d(2025, 1, 6), d(2025, 1, 13)), 5);
}

#[test]
fn business_days_between_is_zero_when_end_not_after_start() {
    let cal = WorkCalendar::new();
    assert_eq!(cal.business_days_between(d(2025, 1, 10), d(2025, 1, 10)), 0);
    assert_eq!(cal.business_days_between(d(2025, 1, 13), d(2025, 1, 6)), 0);
}

#[test]
fn shift_business_days_is_signed() {
    let cal = WorkCalendar::new();
    let wed = d(2025, 1, 8);
    assert_eq!(cal.shift_business_days(wed, 3), d(2025, 1, 13));
    assert_eq!(cal.shift_business_days(wed, -3), d(2025, 1, 3));
    assert_eq!(cal.shift_business_days(wed, 0), wed);
}
