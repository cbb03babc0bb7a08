//! Date arithmetic on civil dates, always by way of the gregorian conversion.

use crate::error::CalendarError;
use crate::table::CalendarTable;
use crate::types::BsDate;
use chrono::TimeDelta;
use std::cmp::Ordering;

impl CalendarTable {
    /// Shifts `date` by `days` (negative moves backwards).
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if `date` is not valid, or
    /// `CalendarError::ShiftOutOfRange` if the result leaves the table.
    pub fn add_days(&self, date: BsDate, days: i64) -> Result<BsDate, CalendarError> {
        let gregorian = self.to_gregorian(date)?;
        let out_of_range = CalendarError::ShiftOutOfRange { date, days };

        let shifted = TimeDelta::try_days(days)
            .and_then(|delta| gregorian.checked_add_signed(delta))
            .ok_or_else(|| out_of_range.clone())?;

        self.from_gregorian(shifted).map_err(|err| {
            if err.is_out_of_range() {
                out_of_range
            } else {
                err
            }
        })
    }

    /// Signed whole days from `from` to `to`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if either date is not valid.
    pub fn diff(&self, from: BsDate, to: BsDate) -> Result<i64, CalendarError> {
        let from = self.to_gregorian(from)?;
        let to = self.to_gregorian(to)?;
        Ok((to - from).num_days())
    }
}

/// Chronological order of two civil dates, by field comparison alone.
///
/// Months never wrap within a civil year, so `(year, month, day)` order is
/// the same as gregorian order for every valid date.
pub fn compare(a: BsDate, b: BsDate) -> Ordering {
    a.cmp(&b)
}
