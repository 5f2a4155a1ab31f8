//! Date parsing for the mixed formats found in activity exports.
//!
//! Slash-separated dates are disambiguated by the length of the first field
//! alone: four characters means `YYYY/MM/DD`, anything else `DD/MM/YYYY`.
//! So `01/02/2024` is always the 1st of February, and a two-digit leading
//! field such as `03/04/05` is read day-first with year 5. Everything else
//! goes through a list of ISO-8601 and common textual layouts.
//!
//! Invalid input yields `None`. Malformed dates are routine in source data,
//! so they are never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Layouts with both date and time, no offset.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Layouts carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%a %b %d %Y",
];

/// Turns raw date cells into wall-clock instants.
///
/// Values with an explicit offset (`...Z`, `...+02:00`) are converted into
/// `timezone` before the offset is dropped; all other values are taken as
/// already being wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    timezone: Tz,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

impl DateNormalizer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Parse one cell. Returns `None` for empty or unrecognised input.
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if raw.contains('/') {
            let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
            if let [a, b, c] = parts.as_slice() {
                return if a.chars().count() == 4 {
                    from_parts(a, b, c)
                } else {
                    from_parts(c, b, a)
                };
            }
        }

        self.parse_generic(raw)
    }

    fn parse_generic(&self, raw: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.to_wall_clock(dt));
        }
        if let Some(dt) = OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        {
            return Some(self.to_wall_clock(dt));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(self.to_wall_clock(dt));
        }
        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        {
            return Some(dt);
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn to_wall_clock<O: TimeZone>(&self, dt: DateTime<O>) -> NaiveDateTime {
        dt.with_timezone(&self.timezone).naive_local()
    }
}

/// Parse with the default (UTC) normalizer.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    DateNormalizer::default().parse(raw)
}

fn from_parts(year: &str, month: &str, day: &str) -> Option<NaiveDateTime> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}
