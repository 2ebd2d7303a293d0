use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Short local date and time, e.g. `2024-03-01 14:05`.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    format_datetime_in(value, &Local)
}

#[must_use]
pub fn format_datetime_in<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
