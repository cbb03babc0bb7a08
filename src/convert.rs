//! Civil <-> gregorian conversion.
//!
//! Both directions are O(1) or O(log n) table lookups: the day count from the
//! epoch to each month's first day is precomputed when the table is built.

use crate::consts::{EPOCH_AD, MIN_DAY};
use crate::error::{CalendarError, IntegrityIssue};
use crate::table::CalendarTable;
use crate::types::BsDate;
use chrono::{Datelike, Local, NaiveDate, TimeDelta, Weekday};

impl CalendarTable {
    /// Converts a civil date to its gregorian date.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the date is not valid in this
    /// table.
    pub fn to_gregorian(&self, date: BsDate) -> Result<NaiveDate, CalendarError> {
        let days = self.days_since_epoch(date)?;
        TimeDelta::try_days(days)
            .and_then(|delta| EPOCH_AD.checked_add_signed(delta))
            .ok_or_else(|| CalendarError::invalid(date))
    }

    /// Converts a gregorian date to its civil date.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the date lies outside
    /// [`first_day`](CalendarTable::first_day)..=[`last_day`](CalendarTable::last_day).
    pub fn from_gregorian(&self, date: NaiveDate) -> Result<BsDate, CalendarError> {
        let index = self
            .index_containing(date)
            .ok_or_else(|| CalendarError::OutOfRange {
                date,
                first: self.first_day(),
                last: self.last_day(),
            })?;
        let entry = self
            .entry_at(index)
            .ok_or(IntegrityIssue::Empty)?;

        let day = u8::try_from((date - entry.start).num_days() + 1).map_err(|_| {
            IntegrityIssue::SpanMismatch {
                year:  entry.year,
                month: entry.month,
                days:  entry.days_in_month,
                start: entry.start,
                end:   entry.end,
            }
        })?;

        Ok(BsDate::new(entry.year, entry.month, day))
    }

    /// Number of days from the epoch (2000-01-01 BS) to `date`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the date is not valid in this
    /// table.
    pub fn days_since_epoch(&self, date: BsDate) -> Result<i64, CalendarError> {
        let index = self.locate(date)?;
        Ok(self.offset_at(index) + i64::from(date.day() - MIN_DAY))
    }

    /// Civil date `days` days after the epoch, if the table covers it
    pub fn from_days_since_epoch(&self, days: i64) -> Option<BsDate> {
        let index = self
            .offsets()
            .partition_point(|&offset| offset <= days)
            .checked_sub(1)?;
        let entry = self.entry_at(index)?;
        let day = days - self.offset_at(index) + i64::from(MIN_DAY);
        if day > i64::from(entry.days_in_month) {
            return None;
        }
        Some(BsDate::new(entry.year, entry.month, u8::try_from(day).ok()?))
    }

    /// Day of the week of a civil date
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the date is not valid in this
    /// table.
    pub fn weekday(&self, date: BsDate) -> Result<Weekday, CalendarError> {
        self.to_gregorian(date).map(|gregorian| gregorian.weekday())
    }

    /// Today's civil date according to the local system clock
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if today is outside the table.
    pub fn today(&self) -> Result<BsDate, CalendarError> {
        self.from_gregorian(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_YEAR, MIN_YEAR};
    use crate::test_utils::{bs, dates_in_year, fixture_table, ymd};

    #[test]
    fn test_epoch_boundary() {
        let table = fixture_table();
        assert_eq!(table.to_gregorian(bs(2000, 1, 1)).unwrap(), ymd(1943, 4, 14));
        assert_eq!(table.from_gregorian(ymd(1943, 4, 14)).unwrap(), bs(2000, 1, 1));
        assert_eq!(table.days_since_epoch(bs(2000, 1, 1)).unwrap(), 0);
    }

    #[test]
    fn test_known_month_start_and_end() {
        let table = fixture_table();
        assert_eq!(table.to_gregorian(bs(2081, 1, 1)).unwrap(), ymd(2024, 4, 13));
        assert_eq!(table.to_gregorian(bs(2081, 1, 31)).unwrap(), ymd(2024, 5, 13));
        assert_eq!(table.from_gregorian(ymd(2024, 5, 14)).unwrap(), bs(2081, 2, 1));
    }

    #[test]
    fn test_invalid_dates_are_not_clamped() {
        let table = fixture_table();
        for date in [bs(2081, 1, 32), bs(2081, 13, 1), bs(1999, 12, 30), bs(2081, 1, 0)] {
            assert_eq!(
                table.to_gregorian(date),
                Err(CalendarError::invalid(date)),
                "{date}"
            );
        }
    }

    #[test]
    fn test_out_of_window_gregorian() {
        let table = fixture_table();
        let before = ymd(1943, 4, 13);
        assert_eq!(
            table.from_gregorian(before),
            Err(CalendarError::OutOfRange {
                date:  before,
                first: ymd(1943, 4, 14),
                last:  ymd(2044, 4, 12),
            })
        );
        assert!(table.from_gregorian(ymd(2044, 4, 13)).unwrap_err().is_out_of_range());
        assert_eq!(table.from_gregorian(ymd(2044, 4, 12)).unwrap().year(), MAX_YEAR);
    }

    #[test]
    fn test_round_trip_civil_first() {
        let table = fixture_table();
        for year in MIN_YEAR..=MAX_YEAR {
            for date in dates_in_year(&table, year) {
                let gregorian = table.to_gregorian(date).unwrap();
                assert_eq!(table.from_gregorian(gregorian).unwrap(), date);
            }
        }
    }

    #[test]
    fn test_round_trip_gregorian_first() {
        let table = fixture_table();
        let mut date = table.first_day();
        while date <= table.last_day() {
            let civil = table.from_gregorian(date).unwrap();
            assert_eq!(table.to_gregorian(civil).unwrap(), date);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_matches_naive_month_summation() {
        let table = fixture_table();
        for date in [bs(2000, 1, 1), bs(2000, 12, 5), bs(2001, 1, 1), bs(2045, 7, 19), bs(2100, 12, 30)] {
            let preceding: i64 = table
                .entries()
                .iter()
                .filter(|entry| entry.key() < (date.year(), date.month()))
                .map(|entry| i64::from(entry.days_in_month))
                .sum();
            let expected = EPOCH_AD + TimeDelta::days(preceding + i64::from(date.day()) - 1);
            assert_eq!(table.to_gregorian(date).unwrap(), expected, "{date}");
        }
    }

    #[test]
    fn test_days_since_epoch_round_trip() {
        let table = fixture_table();
        let total = (table.last_day() - table.first_day()).num_days();
        for days in (0..=total).step_by(97) {
            let date = table.from_days_since_epoch(days).unwrap();
            assert_eq!(table.days_since_epoch(date).unwrap(), days);
        }
        assert_eq!(table.from_days_since_epoch(-1), None);
        assert_eq!(table.from_days_since_epoch(total + 1), None);
        assert_eq!(table.from_days_since_epoch(total), Some(bs(2100, 12, 30)));
    }

    #[test]
    fn test_weekday() {
        let table = fixture_table();
        // 2024-04-13 was a Saturday
        assert_eq!(table.weekday(bs(2081, 1, 1)).unwrap(), Weekday::Sat);
        assert_eq!(table.weekday(bs(2081, 1, 2)).unwrap(), Weekday::Sun);
    }

    #[test]
    fn test_today_follows_local_clock() {
        let table = fixture_table();
        let clock = Local::now().date_naive();
        match table.today() {
            Ok(today) => {
                assert!(table.is_valid_date(today));
                // The clock may cross midnight between the two reads.
                let gregorian = table.to_gregorian(today).unwrap();
                assert!((gregorian - clock).num_days().abs() <= 1);
            }
            Err(err) => {
                assert!(err.is_out_of_range());
                assert!(!(table.first_day()..=table.last_day()).contains(&clock));
            }
        }
    }
}
