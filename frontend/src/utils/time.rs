use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::config;

/// Local hour a shift day rolls over; anything earlier belongs to the previous day.
pub const SHIFT_DAY_START_HOUR: u32 = 6;

pub fn display_time_zone() -> Tz {
    config::display_time_zone()
}

pub fn to_display_tz(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}

pub fn now_in_display_tz() -> DateTime<Tz> {
    to_display_tz(Utc::now(), display_time_zone())
}

pub fn today_in_display_tz() -> NaiveDate {
    now_in_display_tz().date_naive()
}

/// `9:05:03 AM` style wall clock in the given zone.
pub fn format_clock_12h(instant: DateTime<Utc>, tz: Tz) -> String {
    to_display_tz(instant, tz).format("%-I:%M:%S %p").to_string()
}

pub fn format_date(instant: DateTime<Utc>, tz: Tz) -> String {
    to_display_tz(instant, tz).format("%Y-%m-%d").to_string()
}

pub fn format_optional_clock(instant: Option<DateTime<Utc>>, tz: Tz) -> String {
    instant
        .map(|value| format_clock_12h(value, tz))
        .unwrap_or_else(|| "-".into())
}

/// `09:00` / `18:30` time-of-day values as used by shifts, shown on a 12-hour clock.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl IsoDuration {
    /// `None` when the components overflow.
    pub fn total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Out-of-range values collapse to zero like any other unreadable duration.
    pub fn to_duration(&self) -> Duration {
        self.total_seconds()
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .unwrap_or_else(Duration::zero)
    }
}

/// Parses `PT#H#M#S` (any subset, fractional seconds truncated). Malformed input is zero.
pub fn parse_iso_duration(raw: Option<&str>) -> IsoDuration {
    raw.and_then(try_parse_iso_duration).unwrap_or_default()
}

fn try_parse_iso_duration(raw: &str) -> Option<IsoDuration> {
    let body = raw.trim().strip_prefix("PT")?;
    if body.is_empty() {
        return None;
    }
    let mut parsed = IsoDuration::default();
    let mut number = String::new();
    for c in body.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'H' | 'M' | 'S' => {
                let whole = number.split('.').next().unwrap_or_default();
                let value: u64 = whole.parse().ok()?;
                match c {
                    'H' => parsed.hours = value,
                    'M' => parsed.minutes = value,
                    _ => parsed.seconds = value,
                }
                number.clear();
            }
            _ => return None,
        }
    }
    if !number.is_empty() {
        return None;
    }
    Some(parsed)
}

pub fn format_hours_minutes(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

pub fn format_iso_duration(raw: Option<&str>) -> String {
    format_hours_minutes(parse_iso_duration(raw).to_duration())
}

/// Zero-padded `HH:MM:SS`; negative spans render as zero.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Calendar date of the shift day a local wall-clock instant belongs to.
pub fn shift_day_for(local: NaiveDateTime) -> NaiveDate {
    let date = local.date();
    if local.hour() < SHIFT_DAY_START_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

pub fn shift_day_for_instant(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    shift_day_for(to_display_tz(instant, tz).naive_local())
}
