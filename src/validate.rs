use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::error::{CalendarError, IntegrityIssue};
use crate::table::CalendarTable;
use crate::types::BsDate;

impl CalendarTable {
    /// Whether `year-month-day` is a legal civil date in this table.
    ///
    /// Never fails: anything out of range is simply `false`.
    pub fn is_valid(&self, year: u16, month: u8, day: u8) -> bool {
        self.locate(BsDate::new(year, month, day)).is_ok()
    }

    /// [`CalendarTable::is_valid`] for a `BsDate`
    pub fn is_valid_date(&self, date: BsDate) -> bool {
        self.locate(date).is_ok()
    }

    /// Validates `date` and returns the index of its month entry.
    ///
    /// A year the table claims to cover whose entry is absent is a data
    /// problem, not a caller problem.
    pub(crate) fn locate(&self, date: BsDate) -> Result<usize, CalendarError> {
        let (year, month, day) = date.to_tuple();

        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !date.has_plausible_fields()
            || !self.covers_year(year)
        {
            return Err(CalendarError::invalid(date));
        }

        let index = self
            .index_of(year, month)
            .filter(|&index| self.entry_at(index).is_some_and(|entry| entry.key() == (year, month)))
            .ok_or(IntegrityIssue::MissingEntry { year, month })?;

        match self.entry_at(index) {
            Some(entry) if day <= entry.days_in_month => Ok(index),
            _ => Err(CalendarError::invalid(date)),
        }
    }
}
