//! Conversion between the Bikram Sambat (BS) civil calendar and the
//! Gregorian calendar.
//!
//! BS month lengths (29 to 32 days) vary from year to year with no formula,
//! so every conversion goes through a [`CalendarTable`] built once from
//! externally supplied reference data. The table is anchored at
//! 2000-01-01 BS = 1943-04-14 AD.
//!
//! # Examples
//!
//! ```
//! use bs_calendar::{BsDate, CalendarTable};
//!
//! // Twelve month lengths per civil year, starting with 2000 BS.
//! let rows: [[u8; 12]; 1] = [[30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31]];
//! let table = CalendarTable::from_epoch_month_lengths(rows).unwrap();
//!
//! let date = BsDate::new(2000, 1, 1);
//! let gregorian = table.to_gregorian(date).unwrap();
//! assert_eq!(gregorian.to_string(), "1943-04-14");
//! assert_eq!(table.from_gregorian(gregorian).unwrap(), date);
//!
//! let later = table.add_days(date, 45).unwrap();
//! assert_eq!(later.to_string(), "2000-02-16");
//! assert_eq!(table.diff(date, later).unwrap(), 45);
//! ```
//!
//! Long-running services hold a [`Calendar`], which keeps the current table
//! behind an atomically swappable snapshot and loads it from any
//! [`MonthEntrySource`].

mod arith;
mod calendar;
mod config;
mod consts;
mod convert;
mod error;
mod format;
mod prelude;
mod range;
mod source;
mod table;
mod types;
mod validate;

#[cfg(test)]
mod test_utils;

pub use arith::compare;
pub use calendar::Calendar;
pub use config::CalendarConfig;
pub use consts::*;
pub use error::{CalendarError, IntegrityIssue, LoadError, ParseError};
pub use format::{
    CivilStyle, DualFormatOptions, NumeralSystem, format_custom, format_local, format_long,
    format_short, to_ascii_numerals, to_local_numerals,
};
pub use range::BsDateRange;
pub use source::MonthEntrySource;
pub use table::CalendarTable;
pub use types::{BsDate, MonthEntry};
