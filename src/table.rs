//! Frozen in-memory calendar table.

use crate::consts::{
    EPOCH_AD, FIRST_MONTH, LAST_MONTH, MAX_MONTH_DAYS, MAX_YEAR, MIN_DAY, MIN_MONTH_DAYS, MIN_YEAR,
    MONTHS_PER_YEAR,
};
use crate::error::{CalendarError, IntegrityIssue};
use crate::types::{BsDate, MonthEntry};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Immutable lookup structure over the civil calendar's month entries.
///
/// Built once from reference data and never mutated afterwards. Entries are
/// stored in `(year, month)` order, which for a contiguous table is also
/// `start` order, so one arena serves both indexes:
///
/// - by key: `(year - first_year) * 12 + (month - 1)`
/// - by gregorian date: binary search over `start`
///
/// Every entry also carries its precomputed day offset from the epoch anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarTable {
    entries:    Vec<MonthEntry>,
    offsets:    Vec<i64>,
    first_year: u16,
    last_year:  u16,
}

impl CalendarTable {
    /// Builds a table from reference data, in any order.
    ///
    /// # Errors
    /// Returns `CalendarError::DataIntegrity` if the entries are empty, out of
    /// range, duplicated, incomplete, or not date-contiguous.
    pub fn new(entries: impl IntoIterator<Item = MonthEntry>) -> Result<Self, CalendarError> {
        let mut entries: Vec<MonthEntry> = entries.into_iter().collect();
        entries.sort_by_key(MonthEntry::key);

        if let Err(issue) = check_entries(&entries) {
            warn!(%issue, entries = entries.len(), "rejecting calendar reference data");
            return Err(issue.into());
        }

        let (first_year, last_year) = match (entries.first(), entries.last()) {
            (Some(first), Some(last)) => (first.year, last.year),
            _ => return Err(IntegrityIssue::Empty.into()),
        };
        let offsets = entries
            .iter()
            .map(|entry| (entry.start - EPOCH_AD).num_days())
            .collect();

        debug!(
            entries = entries.len(),
            first_year, last_year, "built calendar table"
        );

        Ok(Self {
            entries,
            offsets,
            first_year,
            last_year,
        })
    }

    /// Builds a table from per-year month lengths, starting at `first_start`.
    ///
    /// `rows[i]` holds the twelve month lengths of year `first_year + i`.
    ///
    /// # Errors
    /// Returns `CalendarError::DataIntegrity` if a row does not have twelve
    /// lengths or the resulting entries break a table invariant.
    pub fn from_month_lengths<R>(
        first_year: u16,
        first_start: NaiveDate,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, CalendarError>
    where
        R: AsRef<[u8]>,
    {
        let mut entries = Vec::new();
        let mut start = first_start;
        let mut year = first_year;

        for row in rows {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(IntegrityIssue::YearOutOfRange { year }.into());
            }
            let row = row.as_ref();
            if row.len() != usize::from(MONTHS_PER_YEAR) {
                return Err(IntegrityIssue::IncompleteYear {
                    year,
                    count: row.len(),
                }
                .into());
            }
            for (month, &days) in (FIRST_MONTH..=LAST_MONTH).zip(row) {
                if !(MIN_MONTH_DAYS..=MAX_MONTH_DAYS).contains(&days) {
                    return Err(IntegrityIssue::DayCountOutOfRange { year, month, days }.into());
                }
                let entry = MonthEntry::new(year, month, days, start)
                    .ok_or(IntegrityIssue::DateOverflow { year, month })?;
                start = entry
                    .end
                    .succ_opt()
                    .ok_or(IntegrityIssue::DateOverflow { year, month })?;
                entries.push(entry);
            }
            year += 1;
        }

        Self::new(entries)
    }

    /// Builds an epoch-anchored table: `rows[0]` is year 2000, whose first
    /// month starts on 1943-04-14.
    ///
    /// # Errors
    /// See [`CalendarTable::from_month_lengths`].
    pub fn from_epoch_month_lengths<R>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, CalendarError>
    where
        R: AsRef<[u8]>,
    {
        Self::from_month_lengths(MIN_YEAR, EPOCH_AD, rows)
    }

    /// Exact lookup by civil year and month
    pub fn entry(&self, year: u16, month: u8) -> Option<&MonthEntry> {
        self.index_of(year, month).and_then(|index| self.entries.get(index))
    }

    /// The unique entry whose `[start, end]` interval contains `date`
    pub fn entry_containing(&self, date: NaiveDate) -> Option<&MonthEntry> {
        self.index_containing(date).map(|index| &self.entries[index])
    }

    /// First and last civil year covered, inclusive
    pub const fn supported_range(&self) -> (u16, u16) {
        (self.first_year, self.last_year)
    }

    /// Whether every month of civil `year` is in the table
    pub const fn covers_year(&self, year: u16) -> bool {
        year >= self.first_year && year <= self.last_year
    }

    /// First gregorian date the table covers
    pub fn first_day(&self) -> NaiveDate {
        self.entries[0].start
    }

    /// Last gregorian date the table covers
    pub fn last_day(&self) -> NaiveDate {
        self.entries[self.entries.len() - 1].end
    }

    /// Length of a civil month, if the table has it
    pub fn days_in_month(&self, year: u16, month: u8) -> Option<u8> {
        self.entry(year, month).map(|entry| entry.days_in_month)
    }

    /// Length of a civil year, if the table has it
    pub fn days_in_year(&self, year: u16) -> Option<u16> {
        if !self.covers_year(year) {
            return None;
        }
        (FIRST_MONTH..=LAST_MONTH)
            .map(|month| self.days_in_month(year, month).map(u16::from))
            .sum()
    }

    /// First day of a civil month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not in the table.
    pub fn month_start(&self, year: u16, month: u8) -> Result<BsDate, CalendarError> {
        self.entry(year, month)
            .map(|entry| BsDate::new(entry.year, entry.month, MIN_DAY))
            .ok_or(CalendarError::InvalidDate {
                year,
                month,
                day: MIN_DAY,
            })
    }

    /// Last day of a civil month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not in the table.
    pub fn month_end(&self, year: u16, month: u8) -> Result<BsDate, CalendarError> {
        self.entry(year, month)
            .map(|entry| BsDate::new(entry.year, entry.month, entry.days_in_month))
            .ok_or(CalendarError::InvalidDate {
                year,
                month,
                day: MIN_DAY,
            })
    }

    /// All entries in chronological order
    pub fn entries(&self) -> &[MonthEntry] {
        &self.entries
    }

    /// Number of month entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a built table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn index_of(&self, year: u16, month: u8) -> Option<usize> {
        if !self.covers_year(year) || !(FIRST_MONTH..=LAST_MONTH).contains(&month) {
            return None;
        }
        let years = usize::from(year - self.first_year);
        Some(years * usize::from(MONTHS_PER_YEAR) + usize::from(month - FIRST_MONTH))
    }

    pub(crate) fn index_containing(&self, date: NaiveDate) -> Option<usize> {
        let index = self
            .entries
            .partition_point(|entry| entry.start <= date)
            .checked_sub(1)?;
        self.entries[index].contains(date).then_some(index)
    }

    pub(crate) fn entry_at(&self, index: usize) -> Option<&MonthEntry> {
        self.entries.get(index)
    }

    pub(crate) fn offset_at(&self, index: usize) -> i64 {
        self.offsets[index]
    }

    pub(crate) fn offsets(&self) -> &[i64] {
        &self.offsets
    }
}

/// Checks every table invariant on key-sorted entries, reporting the first
/// violation found.
fn check_entries(entries: &[MonthEntry]) -> Result<(), IntegrityIssue> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Err(IntegrityIssue::Empty);
    };

    for entry in entries {
        check_entry(entry)?;
    }

    if first.month != FIRST_MONTH {
        return Err(IntegrityIssue::MissingEntry {
            year:  first.year,
            month: FIRST_MONTH,
        });
    }
    if first.year == MIN_YEAR && first.start != EPOCH_AD {
        return Err(IntegrityIssue::EpochMismatch {
            expected: EPOCH_AD,
            found:    first.start,
        });
    }

    for pair in entries.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.key() == next.key() {
            return Err(IntegrityIssue::DuplicateEntry {
                year:  next.year,
                month: next.month,
            });
        }
        let (year, month) = following_month(prev.key());
        if next.key() != (year, month) {
            return Err(IntegrityIssue::MissingEntry { year, month });
        }
        match prev.end.succ_opt() {
            Some(expected) if expected == next.start => {}
            Some(expected) => {
                return Err(IntegrityIssue::Discontiguous {
                    year,
                    month,
                    expected,
                    found: next.start,
                });
            }
            None => {
                return Err(IntegrityIssue::DateOverflow {
                    year:  prev.year,
                    month: prev.month,
                });
            }
        }
    }

    if last.month != LAST_MONTH {
        let (year, month) = following_month(last.key());
        return Err(IntegrityIssue::MissingEntry { year, month });
    }

    Ok(())
}

fn check_entry(entry: &MonthEntry) -> Result<(), IntegrityIssue> {
    let MonthEntry {
        year,
        month,
        days_in_month: days,
        start,
        end,
    } = *entry;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(IntegrityIssue::YearOutOfRange { year });
    }
    if !(FIRST_MONTH..=LAST_MONTH).contains(&month) {
        return Err(IntegrityIssue::MonthOutOfRange { year, month });
    }
    if !(MIN_MONTH_DAYS..=MAX_MONTH_DAYS).contains(&days) {
        return Err(IntegrityIssue::DayCountOutOfRange { year, month, days });
    }
    if entry.span_days() != i64::from(days) {
        return Err(IntegrityIssue::SpanMismatch {
            year,
            month,
            days,
            start,
            end,
        });
    }
    Ok(())
}

const fn following_month((year, month): (u16, u8)) -> (u16, u8) {
    if month >= LAST_MONTH {
        (year + 1, FIRST_MONTH)
    } else {
        (year, month + 1)
    }
}
