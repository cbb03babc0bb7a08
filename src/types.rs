use crate::consts::{ALT_DATE_SEPARATOR, DATE_SEPARATOR, FIRST_MONTH, LAST_MONTH, MIN_DAY};
use crate::error::ParseError;
use crate::prelude::*;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A civil (Bikram Sambat) calendar date.
///
/// This is a plain value: constructing one never consults the calendar table,
/// so a `BsDate` may name a day that does not exist. Validity is decided by
/// [`CalendarTable::is_valid`](crate::CalendarTable::is_valid).
///
/// Field order makes the derived `Ord` lexicographic on
/// `(year, month, day)`, which is chronological for every valid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct BsDate {
    year:  u16,
    month: u8,
    day:   u8,
}

impl BsDate {
    /// Creates a civil date without validating it against any table
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Civil year
    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Month number, 1 is Baisakh
    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Day of the month
    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns the fields as `(year, month, day)`
    pub const fn to_tuple(self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Whether the month and day fields are in their structural ranges.
    ///
    /// This does not look at month lengths; use the table for that.
    pub const fn has_plausible_fields(self) -> bool {
        self.month >= FIRST_MONTH && self.month <= LAST_MONTH && self.day >= MIN_DAY
    }

    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
    }
}

impl From<(u16, u8, u8)> for BsDate {
    fn from((year, month, day): (u16, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<BsDate> for (u16, u8, u8) {
    fn from(date: BsDate) -> Self {
        date.to_tuple()
    }
}

impl FromStr for BsDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD` or `YYYY/MM/DD`. Only the shape is checked here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(ALT_DATE_SEPARATOR);
        let separator = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {ALT_DATE_SEPARATOR}): {trimmed}"
                )));
            }
            (true, false) => DATE_SEPARATOR,
            (false, true) => ALT_DATE_SEPARATOR,
            (false, false) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {trimmed}"
                )));
            }
        };

        let parts: Vec<&str> = trimmed.split(separator).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected 3 date components separated by {separator}, found {}",
                parts.len()
            )));
        };

        Ok(Self::new(
            Self::parse_u16(year)?,
            Self::parse_u8(month)?,
            Self::parse_u8(day)?,
        ))
    }
}

impl Serialize for BsDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BsDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the calendar reference data: a civil month and the gregorian
/// interval it covers.
///
/// `start` and `end` are both inclusive, so a well-formed entry satisfies
/// `end - start + 1 == days_in_month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthEntry {
    pub year:          u16,
    pub month:         u8,
    pub days_in_month: u8,
    pub start:         NaiveDate,
    pub end:           NaiveDate,
}

impl MonthEntry {
    /// Creates an entry, deriving `end` from `start` and the month length.
    ///
    /// Returns `None` if `days_in_month` is zero or the end date overflows.
    pub fn new(year: u16, month: u8, days_in_month: u8, start: NaiveDate) -> Option<Self> {
        let last_offset = u64::from(days_in_month.checked_sub(1)?);
        let end = start.checked_add_days(chrono::Days::new(last_offset))?;
        Some(Self {
            year,
            month,
            days_in_month,
            start,
            end,
        })
    }

    /// Whether the gregorian `date` falls inside `[start, end]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days `[start, end]` actually spans
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Gregorian date of civil `day` within this month, if the day exists
    pub fn gregorian_of(&self, day: u8) -> Option<NaiveDate> {
        if day < MIN_DAY || day > self.days_in_month {
            return None;
        }
        self.start
            .checked_add_days(chrono::Days::new(u64::from(day - MIN_DAY)))
    }

    /// Civil key of this entry as `(year, month)`
    pub const fn key(&self) -> (u16, u8) {
        (self.year, self.month)
    }
}
