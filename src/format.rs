//! String rendering of civil dates.
//!
//! Everything here except [`CalendarTable::format_dual`] is a pure function of
//! the date fields and the static name tables in [`crate::consts`].

use crate::consts::{
    CIVIL_LABEL, FIRST_MONTH, GREGORIAN_LABEL, LAST_MONTH, LOCAL_DIGITS, MONTH_NAMES,
    MONTH_NAMES_LOCAL, MONTH_NAMES_SHORT,
};
use crate::error::CalendarError;
use crate::table::CalendarTable;
use crate::types::BsDate;
use serde::{Deserialize, Serialize};

/// Tokens understood by [`format_custom`], longest first so that `MMMM` is
/// never read as two `MM`s.
const TOKENS: [Token; 8] = [
    Token::YearFull,
    Token::YearShort,
    Token::MonthName,
    Token::MonthNameShort,
    Token::MonthPadded,
    Token::Month,
    Token::DayPadded,
    Token::Day,
];

#[derive(Debug, Clone, Copy)]
enum Token {
    YearFull,
    YearShort,
    MonthName,
    MonthNameShort,
    MonthPadded,
    Month,
    DayPadded,
    Day,
}

impl Token {
    const fn pattern(self) -> &'static str {
        match self {
            Self::YearFull => "YYYY",
            Self::YearShort => "YY",
            Self::MonthName => "MMMM",
            Self::MonthNameShort => "MMM",
            Self::MonthPadded => "MM",
            Self::Month => "M",
            Self::DayPadded => "DD",
            Self::Day => "D",
        }
    }

    fn render(self, out: &mut String, year: u16, month: u8, day: u8) -> Result<(), CalendarError> {
        match self {
            Self::YearFull => out.push_str(&format!("{year:04}")),
            Self::YearShort => out.push_str(&format!("{:02}", year % 100)),
            Self::MonthName => out.push_str(month_name(year, month, day)?),
            Self::MonthNameShort => out.push_str(month_name_short(year, month, day)?),
            Self::MonthPadded => out.push_str(&format!("{month:02}")),
            Self::Month => out.push_str(&month.to_string()),
            Self::DayPadded => out.push_str(&format!("{day:02}")),
            Self::Day => out.push_str(&day.to_string()),
        }
        Ok(())
    }
}

/// Which digit glyphs rendered strings use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralSystem {
    /// ASCII `0-9`
    #[default]
    Ascii,
    /// Devanagari `०-९`
    Local,
}

/// How the civil half of a dual rendering is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CivilStyle {
    /// `2081-01-15`
    #[default]
    Short,
    /// `15 Baisakh 2081`
    Long,
    /// `15 बैशाख 2081`
    Local,
}

/// Options for [`CalendarTable::format_dual`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualFormatOptions {
    #[serde(default)]
    pub numerals:        NumeralSystem,
    #[serde(default)]
    pub style:           CivilStyle,
    #[serde(default = "default_civil_label")]
    pub civil_label:     String,
    #[serde(default = "default_gregorian_label")]
    pub gregorian_label: String,
}

fn default_civil_label() -> String {
    CIVIL_LABEL.to_string()
}
fn default_gregorian_label() -> String {
    GREGORIAN_LABEL.to_string()
}

impl Default for DualFormatOptions {
    fn default() -> Self {
        Self {
            numerals:        NumeralSystem::default(),
            style:           CivilStyle::default(),
            civil_label:     default_civil_label(),
            gregorian_label: default_gregorian_label(),
        }
    }
}

fn month_index(year: u16, month: u8, day: u8) -> Result<usize, CalendarError> {
    if (FIRST_MONTH..=LAST_MONTH).contains(&month) {
        Ok(usize::from(month - FIRST_MONTH))
    } else {
        Err(CalendarError::InvalidDate { year, month, day })
    }
}

fn month_name(year: u16, month: u8, day: u8) -> Result<&'static str, CalendarError> {
    month_index(year, month, day).map(|index| MONTH_NAMES[index])
}

fn month_name_short(year: u16, month: u8, day: u8) -> Result<&'static str, CalendarError> {
    month_index(year, month, day).map(|index| MONTH_NAMES_SHORT[index])
}

fn month_name_local(year: u16, month: u8, day: u8) -> Result<&'static str, CalendarError> {
    month_index(year, month, day).map(|index| MONTH_NAMES_LOCAL[index])
}

/// `YYYY-MM-DD`, zero padded
pub fn format_short(year: u16, month: u8, day: u8) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// `{day} {English month name} {year}`
///
/// # Errors
/// Returns `CalendarError::InvalidDate` if `month` is not 1..=12.
pub fn format_long(year: u16, month: u8, day: u8) -> Result<String, CalendarError> {
    Ok(format!("{day} {} {year}", month_name(year, month, day)?))
}

/// `{day} {Devanagari month name} {year}`
///
/// # Errors
/// Returns `CalendarError::InvalidDate` if `month` is not 1..=12.
pub fn format_local(year: u16, month: u8, day: u8) -> Result<String, CalendarError> {
    Ok(format!("{day} {} {year}", month_name_local(year, month, day)?))
}

/// Renders `pattern`, replacing `YYYY YY MMMM MMM MM M DD D` with date fields.
///
/// The pattern is scanned once, left to right, trying the longest token
/// first at each position; substituted text is never rescanned, so month
/// names such as "Magh" come through intact.
///
/// # Errors
/// Returns `CalendarError::InvalidDate` if the pattern asks for a month name
/// and `month` is not 1..=12.
pub fn format_custom(year: u16, month: u8, day: u8, pattern: &str) -> Result<String, CalendarError> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    'scan: while let Some(ch) = rest.chars().next() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token.pattern()) {
                token.render(&mut out, year, month, day)?;
                rest = tail;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    Ok(out)
}

/// Replaces ASCII digits with Devanagari digits; other characters pass through
pub fn to_local_numerals(s: &str) -> String {
    s.chars()
        .map(|ch| ch.to_digit(10).map_or(ch, |value| LOCAL_DIGITS[value as usize]))
        .collect()
}

/// Replaces Devanagari digits with ASCII digits; other characters pass through
pub fn to_ascii_numerals(s: &str) -> String {
    s.chars()
        .map(|ch| {
            LOCAL_DIGITS
                .iter()
                .position(|&digit| digit == ch)
                .and_then(|value| char::from_digit(u32::try_from(value).ok()?, 10))
                .unwrap_or(ch)
        })
        .collect()
}

impl BsDate {
    /// See [`format_long`]
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1..=12.
    pub fn format_long(self) -> Result<String, CalendarError> {
        format_long(self.year(), self.month(), self.day())
    }

    /// See [`format_local`]
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if the month is not 1..=12.
    pub fn format_local(self) -> Result<String, CalendarError> {
        format_local(self.year(), self.month(), self.day())
    }

    /// See [`format_custom`]
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if a month name is requested and
    /// the month is not 1..=12.
    pub fn format(self, pattern: &str) -> Result<String, CalendarError> {
        format_custom(self.year(), self.month(), self.day(), pattern)
    }
}

impl CalendarTable {
    /// Civil and gregorian renderings side by side:
    /// `2081-01-15 (BS) (2024-04-27 AD)`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDate` if `date` is not valid in this
    /// table.
    pub fn format_dual(
        &self,
        date: BsDate,
        options: &DualFormatOptions,
    ) -> Result<String, CalendarError> {
        let gregorian = self.to_gregorian(date)?;
        let (year, month, day) = date.to_tuple();
        let civil = match options.style {
            CivilStyle::Short => format_short(year, month, day),
            CivilStyle::Long => format_long(year, month, day)?,
            CivilStyle::Local => format_local(year, month, day)?,
        };

        let rendered = format!(
            "{civil} ({}) ({} {})",
            options.civil_label,
            gregorian.format("%Y-%m-%d"),
            options.gregorian_label
        );

        Ok(match options.numerals {
            NumeralSystem::Ascii => rendered,
            NumeralSystem::Local => to_local_numerals(&rendered),
        })
    }
}
