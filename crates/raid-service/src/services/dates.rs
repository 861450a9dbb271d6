//! Raid date input handling
//!
//! Raid forms send the date and the clock time as two separate strings.
//! Either may be missing, in which case that part is taken from a fallback
//! date (tomorrow at the default raid hour for new raids, the current date
//! for edits). All times are UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Timelike, Utc};

use super::error::{FieldErrors, ServiceError, ServiceResult};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Tomorrow at `hour:00`
pub fn default_raid_date(now: DateTime<Utc>, hour: u32) -> ServiceResult<DateTime<Utc>> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::internal(format!("no default raid date for hour {hour}")))
}

/// Combine `caldate` and `caltime` into a raid date
///
/// # Errors
/// Returns `ServiceError::InvalidFields` naming every part that could not
/// be parsed.
pub fn parse_raid_date(
    caldate: Option<&str>,
    caltime: Option<&str>,
    fallback: DateTime<Utc>,
) -> ServiceResult<DateTime<Utc>> {
    let mut errors = FieldErrors::new();

    let date = match caldate.map(str::trim).filter(|s| !s.is_empty()) {
        Some(input) => parse_date(input).unwrap_or_else(|| {
            errors.insert("caldate".to_string(), vec![format!("'{input}' is not a date")]);
            fallback.date_naive()
        }),
        None => fallback.date_naive(),
    };

    let time = match caltime.map(str::trim).filter(|s| !s.is_empty()) {
        Some(input) => parse_time(input).unwrap_or_else(|| {
            errors.insert("caltime".to_string(), vec![format!("'{input}' is not a time")]);
            fallback.time()
        }),
        None => fallback.time().with_nanosecond(0).unwrap_or(fallback.time()),
    };

    if !errors.is_empty() {
        return Err(ServiceError::InvalidFields(errors));
    }
    Ok(date.and_time(time).and_utc())
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&input, format).ok())
}
