//! Note timestamp display formatting.
//!
//! Dates render as `18 Oct 2026`, times as `02:30 pm` (12-hour clock,
//! two-digit hour, lowercase marker). Callers choose the time zone; the
//! terminal front-end passes `chrono::Local`.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Separator between date and time on a note card.
pub const STAMP_SEPARATOR: &str = " • ";

pub fn format_note_date<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%-d %b %Y").to_string()
}

pub fn format_note_time<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%I:%M %P").to_string()
}

/// Date and time joined for a single-line note footer.
pub fn format_note_stamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}{}{}",
        format_note_date(timestamp, tz),
        STAMP_SEPARATOR,
        format_note_time(timestamp, tz)
    )
}
