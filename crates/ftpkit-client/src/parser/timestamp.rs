//! Listing timestamps.

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Utc};

use super::{Cursor, Grammar};

/// Width of the timestamp column in a Unix listing.
const TIMESTAMP_LEN: usize = 12;

/// Twelve-column `ls -l` timestamp.
///
/// Two shapes are accepted:
/// - `Mon DD HH:MM` for recent files; the year is the current year.
/// - `Mon DD  YYYY` for older files; the time of day is midnight.
///
/// Leading spaces before the first column are skipped.
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: Vec<u8>,
    current_year: i32,
    value: Option<NaiveDateTime>,
}

impl Timestamp {
    /// Creates a timestamp parser that infers the current UTC year.
    #[must_use]
    pub fn new() -> Self {
        Self::with_current_year(Utc::now().year())
    }

    /// Creates a timestamp parser that uses `year` for recent timestamps.
    #[must_use]
    pub fn with_current_year(year: i32) -> Self {
        Self {
            raw: Vec::with_capacity(TIMESTAMP_LEN),
            current_year: year,
            value: None,
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for Timestamp {
    type Output = NaiveDateTime;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        while let Some(byte) = cursor.advance() {
            if self.raw.is_empty() && byte == b' ' {
                continue;
            }

            self.raw.push(byte);
            if self.raw.len() == TIMESTAMP_LEN {
                self.value = parse_timestamp(&self.raw, self.current_year);
                return Some(self.value.is_some());
            }
        }

        None
    }

    fn take_output(&mut self) -> Option<NaiveDateTime> {
        self.value.take()
    }
}

/// Interprets the twelve timestamp columns.
fn parse_timestamp(raw: &[u8], current_year: i32) -> Option<NaiveDateTime> {
    let text = std::str::from_utf8(raw).ok()?;
    let mut fields = text.split_ascii_whitespace();

    let month = fields.next()?.parse::<Month>().ok()?.number_from_month();
    let day = fields.next()?.parse::<u32>().ok()?;
    let year_or_time = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let (date, hour, minute) = match year_or_time.split_once(':') {
        Some((hour, minute)) => (
            recent_date(current_year, month, day)?,
            hour.parse().ok()?,
            minute.parse().ok()?,
        ),
        None => (
            NaiveDate::from_ymd_opt(year_or_time.parse().ok()?, month, day)?,
            0,
            0,
        ),
    };

    date.and_hms_opt(hour, minute, 0)
}

/// Dates shown with a time of day are recent. `Feb 29` in a non-leap year
/// belongs to the last leap year; leap years are at most eight apart.
fn recent_date(current_year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (0..=8).find_map(|back| NaiveDate::from_ymd_opt(current_year - back, month, day))
}
