//! Error types for the calendar engine.

use crate::prelude::*;
use crate::types::BsDate;
use chrono::NaiveDate;

/// Error type for every fallible calendar operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The civil date does not exist in the calendar table.
    #[error("invalid date: {year:04}-{month:02}-{day:02} does not exist in the calendar")]
    InvalidDate { year: u16, month: u8, day: u8 },

    /// A gregorian date falls outside the window the table covers.
    #[error("date out of range: {date} is outside {first}..={last}")]
    OutOfRange {
        date:  NaiveDate,
        first: NaiveDate,
        last:  NaiveDate,
    },

    /// Date arithmetic left the window the table covers.
    #[error("date out of range: {date} shifted by {days} days leaves the supported window")]
    ShiftOutOfRange { date: BsDate, days: i64 },

    /// The reference data is incomplete or inconsistent.
    #[error("calendar data integrity violation: {0}")]
    DataIntegrity(IntegrityIssue),

    /// Error parsing a date or range.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error reading engine configuration.
    #[error("invalid calendar configuration: {0}")]
    Config(String),
}

impl CalendarError {
    pub(crate) const fn invalid(date: BsDate) -> Self {
        Self::InvalidDate {
            year:  date.year(),
            month: date.month(),
            day:   date.day(),
        }
    }

    /// Whether this error reports a date outside the supported window
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::ShiftOutOfRange { .. })
    }
}

impl From<IntegrityIssue> for CalendarError {
    fn from(issue: IntegrityIssue) -> Self {
        Self::DataIntegrity(issue)
    }
}

/// The specific way reference data broke a table invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum IntegrityIssue {
    #[display(fmt = "no month entries supplied")]
    Empty,
    #[display(fmt = "year {year} is outside the supported range")]
    YearOutOfRange { year: u16 },
    #[display(fmt = "month {month} of year {year} is not a valid month number")]
    MonthOutOfRange { year: u16, month: u8 },
    #[display(fmt = "{year:04}-{month:02} has {days} days (must be 29..=32)")]
    DayCountOutOfRange { year: u16, month: u8, days: u8 },
    #[display(fmt = "{year:04}-{month:02} claims {days} days but spans {start}..={end}")]
    SpanMismatch {
        year:  u16,
        month: u8,
        days:  u8,
        start: NaiveDate,
        end:   NaiveDate,
    },
    #[display(fmt = "missing entry for {year:04}-{month:02}")]
    MissingEntry { year: u16, month: u8 },
    #[display(fmt = "duplicate entry for {year:04}-{month:02}")]
    DuplicateEntry { year: u16, month: u8 },
    #[display(fmt = "{year:04}-{month:02} starts on {found}, expected {expected}")]
    Discontiguous {
        year:     u16,
        month:    u8,
        expected: NaiveDate,
        found:    NaiveDate,
    },
    #[display(fmt = "epoch month starts on {found}, expected {expected}")]
    EpochMismatch { expected: NaiveDate, found: NaiveDate },
    #[display(fmt = "{year:04}-{month:02} runs past the last representable gregorian date")]
    DateOverflow { year: u16, month: u8 },
    #[display(fmt = "{count} month lengths supplied for year {year}, expected 12")]
    IncompleteYear { year: u16, count: usize },
}

impl std::error::Error for IntegrityIssue {}

/// Error parsing civil dates and ranges from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid number: {_0}")]
    InvalidNumber(String),
    #[display(fmt = "Invalid range: start ({start}) is after end ({end})")]
    InvertedRange { start: BsDate, end: BsDate },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error building an engine from a [`MonthEntrySource`](crate::MonthEntrySource).
#[derive(Debug, thiserror::Error)]
pub enum LoadError<E>
where
    E: std::error::Error + 'static,
{
    /// The data source failed; passed through as-is.
    #[error("failed to fetch calendar reference data")]
    Source(#[source] E),

    /// The data was fetched but does not form a valid table.
    #[error(transparent)]
    Table(#[from] CalendarError),
}
