//! Conversion of the reference dataset's `DD.MM.YYYY HH:MM` timestamps.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a `DD.MM.YYYY HH:MM` timestamp.
///
/// Day and month may be written with a single digit (`1.3.2024 06:00`).
/// Returns `None` for anything that does not have that shape; callers skip such
/// records.
///
/// The day is only checked against `1..=31`, not against the length of the
/// month. A day past the end of the month rolls over into the next month, so
/// `31.04.2024 12:00` yields 2024-05-01T12:00.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weatherfetch::normalize_date;
///
/// let ts = normalize_date("21.03.2024 14:00").unwrap();
/// assert_eq!(ts, NaiveDate::from_ymd_opt(2024, 3, 21).unwrap().and_hms_opt(14, 0, 0).unwrap());
/// assert_eq!(normalize_date("not-a-date"), None);
/// ```
pub fn normalize_date(raw: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = raw.trim().split_once(' ')?;

    let mut date_fields = date_part.split('.');
    let day = pad_two(date_fields.next()?)?;
    let month = pad_two(date_fields.next()?)?;
    let year = date_fields.next()?;
    if date_fields.next().is_some() || year.len() != 4 || !is_digits(year) {
        return None;
    }

    let (hour, minute) = time_part.trim().split_once(':')?;
    let hour = pad_two(hour)?;
    if minute.len() != 2 || !is_digits(minute) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    if !(1..=31).contains(&day) {
        return None;
    }

    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first_of_month.checked_add_signed(Duration::days(i64::from(day) - 1))?;

    Some(date.and_time(time))
}

/// Left-pads a one or two digit field to two digits.
fn pad_two(field: &str) -> Option<String> {
    if field.is_empty() || field.len() > 2 || !is_digits(field) {
        return None;
    }
    Some(format!("{:0>2}", field))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
