//! Seam to whatever owns the calendar reference data.

use crate::types::MonthEntry;
use std::convert::Infallible;

/// Read-only access to the calendar reference data.
///
/// Implemented by the application's data layer (a database repository, a
/// bundled file, ...). The engine calls it only when building or refreshing
/// a table snapshot, never per conversion.
pub trait MonthEntrySource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every month entry, ordered by `(year, month)`
    ///
    /// # Errors
    /// Whatever the underlying store reports.
    fn fetch_all_month_entries(&self) -> Result<Vec<MonthEntry>, Self::Error>;

    /// Month entries for civil years `min_year..=max_year`
    ///
    /// # Errors
    /// Whatever the underlying store reports.
    fn fetch_range(&self, min_year: u16, max_year: u16) -> Result<Vec<MonthEntry>, Self::Error> {
        let mut entries = self.fetch_all_month_entries()?;
        entries.retain(|entry| (min_year..=max_year).contains(&entry.year));
        Ok(entries)
    }
}

impl MonthEntrySource for [MonthEntry] {
    type Error = Infallible;

    fn fetch_all_month_entries(&self) -> Result<Vec<MonthEntry>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl MonthEntrySource for Vec<MonthEntry> {
    type Error = Infallible;

    fn fetch_all_month_entries(&self) -> Result<Vec<MonthEntry>, Self::Error> {
        Ok(self.clone())
    }
}

impl<S> MonthEntrySource for &S
where
    S: MonthEntrySource + ?Sized,
{
    type Error = S::Error;

    fn fetch_all_month_entries(&self) -> Result<Vec<MonthEntry>, Self::Error> {
        (**self).fetch_all_month_entries()
    }

    fn fetch_range(&self, min_year: u16, max_year: u16) -> Result<Vec<MonthEntry>, Self::Error> {
        (**self).fetch_range(min_year, max_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixture_table;

    #[test]
    fn test_fetch_range_filters_years() {
        let entries = fixture_table().entries().to_vec();
        let range = entries.fetch_range(2080, 2081).unwrap();
        assert_eq!(range.len(), 24);
        assert!(range.iter().all(|entry| entry.year == 2080 || entry.year == 2081));
        assert_eq!(range[0].key(), (2080, 1));
    }

    #[test]
    fn test_slice_source_returns_everything() {
        let entries = fixture_table().entries().to_vec();
        let source: &[MonthEntry] = &entries;
        assert_eq!(source.fetch_all_month_entries().unwrap(), entries);
        assert!(source.fetch_range(2101, 2200).unwrap().is_empty());
    }
}
