//! Calendar arithmetic for the timeline (proleptic Gregorian, naive local time).

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Signed number of whole days elapsed from `from` to `to`.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_days()
}

/// Midnight of the given day.
pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Midnight of the first day of the month containing `date`.
pub fn start_of_month(date: NaiveDateTime) -> NaiveDateTime {
    let first = date.date().with_day(1).unwrap_or(date.date());
    first.and_time(NaiveTime::MIN)
}

/// Midnight of January 1 of the year containing `date`.
pub fn start_of_year(date: NaiveDateTime) -> NaiveDateTime {
    let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date.date());
    first.and_time(NaiveTime::MIN)
}

/// Number of days in the month containing `date` (28–31).
pub fn days_in_month(date: NaiveDateTime) -> u32 {
    let first = start_of_month(date).date();
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // Only reachable at the very end of chrono's range; December has 31 days.
        None => 31,
    }
}

/// The same moment one calendar month later, clamped to the end of shorter months.
pub fn next_month(date: NaiveDateTime) -> NaiveDateTime {
    date.checked_add_months(Months::new(1)).unwrap_or(NaiveDateTime::MAX)
}

/// First day of the `n`-th month after the month containing `date`.
pub fn month_after(date: NaiveDateTime, n: u32) -> NaiveDate {
    let first = start_of_month(date).date();
    first.checked_add_months(Months::new(n)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn days_between_same_moment_is_zero() {
        let a = at(2020, 10, 30, 9);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn days_between_is_signed() {
        let a = at(2020, 1, 30, 0);
        let b = at(2020, 2, 1, 0);
        assert_eq!(days_between(a, b), 2);
        assert_eq!(days_between(b, a), -2);
    }

    #[test]
    fn days_between_counts_whole_days_only() {
        let a = at(2020, 1, 1, 0);
        let b = at(2020, 1, 2, 23);
        assert_eq!(days_between(a, b), 1);
    }

    #[test]
    fn truncation_helpers_land_on_midnight() {
        let d = at(2021, 7, 19, 15);
        assert_eq!(start_of_day(d), at(2021, 7, 19, 0));
        assert_eq!(start_of_month(d), at(2021, 7, 1, 0));
        assert_eq!(start_of_year(d), at(2021, 1, 1, 0));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(at(2020, 2, 10, 0)), 29);
        assert_eq!(days_in_month(at(2021, 2, 10, 0)), 28);
        assert_eq!(days_in_month(at(1900, 2, 1, 0)), 28);
        assert_eq!(days_in_month(at(2000, 2, 1, 0)), 29);
        assert_eq!(days_in_month(at(2021, 4, 30, 0)), 30);
        assert_eq!(days_in_month(at(2021, 12, 31, 0)), 31);
    }

    #[test]
    fn next_month_rolls_over_the_year() {
        assert_eq!(next_month(at(2020, 12, 1, 0)), at(2021, 1, 1, 0));
    }

    #[test]
    fn month_after_counts_from_month_start() {
        let d = at(2020, 11, 20, 8);
        assert_eq!(month_after(d, 0), NaiveDate::from_ymd_opt(2020, 11, 1).unwrap());
        assert_eq!(month_after(d, 3), NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
    }
}
