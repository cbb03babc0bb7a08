use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BsDate, CalendarError, CalendarTable, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive range of civil dates, such as a fee period or a term.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct BsDateRange {
    start: BsDate,
    end:   BsDate,
}

impl BsDateRange {
    /// Creates a new date range.
    ///
    /// # Errors
    /// Returns `ParseError::InvertedRange` if start > end.
    pub fn new(start: BsDate, end: BsDate) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whole civil month `year-month` as a range
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not in the table.
    pub fn month(table: &CalendarTable, year: u16, month: u8) -> Result<Self, CalendarError> {
        let start = table.month_start(year, month)?;
        let end = table.month_end(year, month)?;
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> BsDate {
        self.start
    }

    pub const fn end(&self) -> BsDate {
        self.end
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: BsDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of days in the range, both ends included.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if either end is not valid in
    /// `table`.
    pub fn num_days(&self, table: &CalendarTable) -> Result<i64, CalendarError> {
        Ok(table.diff(self.start, self.end)? + 1)
    }
}

impl FromStr for BsDateRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // `/` also separates date fields, so `YYYY/MM/DD/YYYY/MM/DD` is accepted too.
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
        let split_at = match separator_count {
            1 => trimmed.find(RANGE_SEPARATOR),
            5 => trimmed.match_indices(RANGE_SEPARATOR).nth(2).map(|(pos, _)| pos),
            0 => {
                return Err(ParseError::InvalidFormat(format!(
                    "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
                )));
            }
            _ => None,
        };
        let pos = split_at.ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "Unexpected number of '{RANGE_SEPARATOR}' separators: {separator_count}"
            ))
        })?;

        let start = trimmed[..pos].parse::<BsDate>()?;
        let end = trimmed[pos + 1..].parse::<BsDate>()?;
        Self::new(start, end)
    }
}

impl Serialize for BsDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BsDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bs, fixture_table};

    fn range(start: BsDate, end: BsDate) -> BsDateRange {
        BsDateRange::new(start, end).unwrap()
    }

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          BsDate,
            end:            BsDate,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          bs(2081, 1, 1),
                end:            bs(2081, 3, 15),
                should_succeed: true,
                description:    "start before end",
            },
            TestCase {
                start:          bs(2081, 3, 15),
                end:            bs(2081, 1, 1),
                should_succeed: false,
                description:    "start after end",
            },
            TestCase {
                start:          bs(2081, 1, 1),
                end:            bs(2081, 1, 1),
                should_succeed: true,
                description:    "single day",
            },
        ];

        for case in &cases {
            let result = BsDateRange::new(case.start, case.end);
            assert_eq!(result.is_ok(), case.should_succeed, "{}", case.description);
        }
    }

    #[test]
    fn test_contains_overlaps_within() {
        let term = range(bs(2081, 1, 1), bs(2081, 4, 32));
        let fee_period = range(bs(2081, 4, 1), bs(2081, 6, 30));
        let week = range(bs(2081, 2, 10), bs(2081, 2, 16));

        assert!(term.contains(bs(2081, 4, 32)));
        assert!(!term.contains(bs(2081, 5, 1)));
        assert!(term.overlaps(&fee_period));
        assert!(fee_period.overlaps(&term));
        assert!(!week.overlaps(&fee_period));
        assert!(week.is_within(&term));
        assert!(!fee_period.is_within(&term));
    }

    #[test]
    fn test_num_days() {
        let table = fixture_table();
        assert_eq!(range(bs(2081, 1, 1), bs(2081, 1, 31)).num_days(&table).unwrap(), 31);
        assert_eq!(range(bs(2081, 1, 1), bs(2081, 1, 1)).num_days(&table).unwrap(), 1);
        let year = range(bs(2081, 1, 1), bs(2081, 12, 30));
        assert_eq!(
            year.num_days(&table).unwrap(),
            i64::from(table.days_in_year(2081).unwrap())
        );
    }

    #[test]
    fn test_whole_month() {
        let table = fixture_table();
        let baisakh = BsDateRange::month(&table, 2081, 1).unwrap();
        assert_eq!(baisakh, range(bs(2081, 1, 1), bs(2081, 1, 31)));
        assert!(BsDateRange::month(&table, 2081, 13).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let r = range(bs(2081, 1, 1), bs(2081, 1, 31));
        assert_eq!(r.to_string(), "2081-01-01/2081-01-31");
        assert_eq!("2081-01-01/2081-01-31".parse::<BsDateRange>().unwrap(), r);
        assert_eq!(" 2081/1/1 / 2081/1/31 ".parse::<BsDateRange>().unwrap(), r);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "2081-01-01".parse::<BsDateRange>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2081-01-01/2081-01-02/2081-01-03".parse::<BsDateRange>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2081-02-01/2081-01-01".parse::<BsDateRange>(),
            Err(ParseError::InvertedRange { .. })
        ));
        assert_eq!("".parse::<BsDateRange>(), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_ordering() {
        let a = range(bs(2081, 1, 1), bs(2081, 1, 31));
        let b = range(bs(2081, 1, 1), bs(2081, 2, 5));
        let c = range(bs(2081, 1, 2), bs(2081, 1, 3));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_serde_string_format() {
        let r = range(bs(2081, 1, 1), bs(2081, 1, 31));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#""2081-01-01/2081-01-31""#);
        let parsed: BsDateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);

        let result: Result<BsDateRange, _> = serde_json::from_str(r#""2081-02-01/2081-01-01""#);
        assert!(result.is_err());
    }
}
