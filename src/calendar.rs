//! Shared engine handle with atomically replaceable table snapshots.

use crate::config::CalendarConfig;
use crate::error::{CalendarError, LoadError};
use crate::format::DualFormatOptions;
use crate::source::MonthEntrySource;
use crate::table::CalendarTable;
use crate::types::BsDate;
use arc_swap::ArcSwap;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// The calendar engine.
///
/// Holds the current [`CalendarTable`] snapshot. Every operation reads one
/// snapshot and works on it without locking; [`Calendar::replace`] and
/// [`Calendar::refresh`] swap in a fully built table in a single atomic
/// store, so concurrent readers see either the old table or the new one.
#[derive(Debug)]
pub struct Calendar {
    table:  ArcSwap<CalendarTable>,
    format: DualFormatOptions,
    years:  Option<[u16; 2]>,
}

impl Calendar {
    /// Wraps an already built table with default options
    pub fn new(table: CalendarTable) -> Self {
        Self {
            table:  ArcSwap::from_pointee(table),
            format: DualFormatOptions::default(),
            years:  None,
        }
    }

    /// Fetches reference data from `source` and builds the first snapshot.
    ///
    /// # Errors
    /// Returns `LoadError::Source` if the source fails, or `LoadError::Table`
    /// if the configuration or the data is invalid.
    #[tracing::instrument(skip_all, fields(year_range = ?config.year_range))]
    pub fn load<S>(source: &S, config: &CalendarConfig) -> Result<Self, LoadError<S::Error>>
    where
        S: MonthEntrySource + ?Sized,
    {
        config.validate()?;
        let table = build_table(source, config.year_range)?;
        let (first_year, last_year) = table.supported_range();
        info!(first_year, last_year, entries = table.len(), "loaded calendar table");

        Ok(Self {
            table:  ArcSwap::from_pointee(table),
            format: config.format.clone(),
            years:  config.year_range,
        })
    }

    /// Rebuilds the table from `source` and swaps it in.
    ///
    /// On any error the current snapshot stays active.
    ///
    /// # Errors
    /// Returns `LoadError::Source` if the source fails, or `LoadError::Table`
    /// if the new data is invalid.
    #[tracing::instrument(skip_all)]
    pub fn refresh<S>(&self, source: &S) -> Result<(), LoadError<S::Error>>
    where
        S: MonthEntrySource + ?Sized,
    {
        let table = build_table(source, self.years)?;
        self.replace(table);
        Ok(())
    }

    /// Atomically replaces the active snapshot
    pub fn replace(&self, table: CalendarTable) {
        let (first_year, last_year) = table.supported_range();
        let previous = self.table.swap(Arc::new(table));
        info!(
            first_year,
            last_year,
            previous_entries = previous.len(),
            "replaced calendar table"
        );
    }

    /// The active snapshot; stays valid even if the engine is refreshed
    pub fn snapshot(&self) -> Arc<CalendarTable> {
        self.table.load_full()
    }

    /// Default options used by [`Calendar::format_dual_default`]
    pub const fn format_options(&self) -> &DualFormatOptions {
        &self.format
    }

    /// First and last civil year of the active snapshot
    pub fn supported_range(&self) -> (u16, u16) {
        self.table.load().supported_range()
    }

    /// See [`CalendarTable::is_valid`]
    pub fn is_valid(&self, year: u16, month: u8, day: u8) -> bool {
        self.table.load().is_valid(year, month, day)
    }

    /// # Errors
    /// See [`CalendarTable::to_gregorian`].
    pub fn to_gregorian(&self, date: BsDate) -> Result<NaiveDate, CalendarError> {
        self.table.load().to_gregorian(date)
    }

    /// # Errors
    /// See [`CalendarTable::from_gregorian`].
    pub fn from_gregorian(&self, date: NaiveDate) -> Result<BsDate, CalendarError> {
        self.table.load().from_gregorian(date)
    }

    /// # Errors
    /// See [`CalendarTable::add_days`].
    pub fn add_days(&self, date: BsDate, days: i64) -> Result<BsDate, CalendarError> {
        self.table.load().add_days(date, days)
    }

    /// # Errors
    /// See [`CalendarTable::diff`].
    pub fn diff(&self, from: BsDate, to: BsDate) -> Result<i64, CalendarError> {
        self.table.load().diff(from, to)
    }

    /// # Errors
    /// See [`CalendarTable::format_dual`].
    pub fn format_dual(
        &self,
        date: BsDate,
        options: &DualFormatOptions,
    ) -> Result<String, CalendarError> {
        self.table.load().format_dual(date, options)
    }

    /// [`Calendar::format_dual`] with the configured default options
    ///
    /// # Errors
    /// See [`CalendarTable::format_dual`].
    pub fn format_dual_default(&self, date: BsDate) -> Result<String, CalendarError> {
        self.table.load().format_dual(date, &self.format)
    }

    /// # Errors
    /// See [`CalendarTable::today`].
    pub fn today(&self) -> Result<BsDate, CalendarError> {
        self.table.load().today()
    }
}

impl From<CalendarTable> for Calendar {
    fn from(table: CalendarTable) -> Self {
        Self::new(table)
    }
}

fn build_table<S>(
    source: &S,
    years: Option<[u16; 2]>,
) -> Result<CalendarTable, LoadError<S::Error>>
where
    S: MonthEntrySource + ?Sized,
{
    let entries = match years {
        Some([min, max]) => source.fetch_range(min, max),
        None => source.fetch_all_month_entries(),
    }
    .map_err(LoadError::Source)?;

    Ok(CalendarTable::new(entries)?)
}
