//! Human-readable buckets for raid dates
//!
//! Weeks end on Sunday. "Next month" runs to the end of the calendar month
//! after the current one.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "bucket", content = "weekday", rename_all = "snake_case")]
pub enum WordDate {
    InThePast,
    Today,
    Tomorrow,
    ThisWeek(Weekday),
    NextWeek(Weekday),
    LaterThisMonth,
    NextMonth,
    LaterThisYear,
    InTheFuture,
}

impl fmt::Display for WordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InThePast => f.write_str("In the past"),
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::ThisWeek(day) => write!(f, "This {}", day_name(*day)),
            Self::NextWeek(day) => write!(f, "Next {}", day_name(*day)),
            Self::LaterThisMonth => f.write_str("Later this month"),
            Self::NextMonth => f.write_str("Next month"),
            Self::LaterThisYear => f.write_str("Later this year"),
            Self::InTheFuture => f.write_str("In the future"),
        }
    }
}

/// Bucket `date` relative to `today`
pub fn word_date(date: NaiveDate, today: NaiveDate) -> WordDate {
    let days = (date - today).num_days();
    let week_left = i64::from(6 - today.weekday().num_days_from_monday());
    let month_left = days_to_month_end(today, 0);
    let two_months_left = days_to_month_end(today, 1);
    let year_left = i64::from(last_day_of_year(today) - today.ordinal());

    if days < 0 {
        WordDate::InThePast
    } else if days == 0 {
        WordDate::Today
    } else if days == 1 {
        WordDate::Tomorrow
    } else if (2..=week_left).contains(&days) {
        WordDate::ThisWeek(date.weekday())
    } else if (week_left + 1..=week_left + 7).contains(&days) {
        WordDate::NextWeek(date.weekday())
    } else if (week_left + 8..=month_left).contains(&days) {
        WordDate::LaterThisMonth
    } else if (month_left + 1..=two_months_left).contains(&days) {
        WordDate::NextMonth
    } else if (two_months_left + 1..=year_left).contains(&days) {
        WordDate::LaterThisYear
    } else {
        WordDate::InTheFuture
    }
}

/// Days from `today` to the last day of the month `months_ahead` after today's
fn days_to_month_end(today: NaiveDate, months_ahead: u32) -> i64 {
    today
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(months_ahead + 1)))
        .and_then(|next_first| next_first.pred_opt())
        .map_or(0, |end| (end - today).num_days())
}

fn last_day_of_year(today: NaiveDate) -> u32 {
    if today.leap_year() {
        366
    } else {
        365
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        let today = d(2026, 3, 25);
        assert_eq!(word_date(today, today), WordDate::Today);
        assert_eq!(word_date(d(2026, 3, 26), today), WordDate::Tomorrow);
        assert_eq!(word_date(d(2026, 3, 24), today), WordDate::InThePast);
    }

    #[test]
    fn test_this_and_next_week() {
        // Wednesday; the week ends on Sunday the 29th
        let today = d(2026, 3, 25);
        assert_eq!(word_date(d(2026, 3, 27), today).to_string(), "This Friday");
        assert_eq!(word_date(d(2026, 3, 29), today).to_string(), "This Sunday");
        assert_eq!(word_date(d(2026, 3, 30), today).to_string(), "Next Monday");
        assert_eq!(word_date(d(2026, 4, 5), today).to_string(), "Next Sunday");
    }

    #[test]
    fn test_later_this_month() {
        let today = d(2026, 3, 2); // Monday
        assert_eq!(word_date(d(2026, 3, 16), today), WordDate::LaterThisMonth);
        assert_eq!(word_date(d(2026, 3, 31), today), WordDate::LaterThisMonth);
    }

    #[test]
    fn test_next_month_and_beyond() {
        let today = d(2026, 3, 25);
        assert_eq!(word_date(d(2026, 4, 20), today), WordDate::NextMonth);
        assert_eq!(word_date(d(2026, 4, 30), today), WordDate::NextMonth);

        // 40 days out lands past the end of April
        let forty = today + Duration::days(40);
        assert_eq!(forty, d(2026, 5, 4));
        assert_eq!(word_date(forty, today).to_string(), "Later this year");

        assert_eq!(word_date(d(2026, 12, 31), today), WordDate::LaterThisYear);
        assert_eq!(word_date(d(2027, 1, 1), today).to_string(), "In the future");
    }

    #[test]
    fn test_next_month_from_month_end() {
        // January 31st: "next month" is February, ending on the 28th
        let today = d(2026, 1, 31);
        assert_eq!(word_date(d(2026, 2, 28), today), WordDate::NextMonth);
        assert_eq!(word_date(d(2026, 3, 1), today), WordDate::LaterThisYear);
    }

    #[test]
    fn test_week_overlapping_month_end() {
        // Saturday the 28th; "next week" reaches into March
        let today = d(2026, 2, 28);
        assert_eq!(word_date(d(2026, 3, 1), today), WordDate::Tomorrow);
        assert_eq!(word_date(d(2026, 3, 6), today).to_string(), "Next Friday");
        assert_eq!(word_date(d(2026, 3, 9), today), WordDate::NextMonth);
    }
}
