//! Shared fixtures for unit tests.
//!
//! The fixture table is synthetic: each civil year starts on 13 April of
//! `year - 57` when that gregorian year is a leap year and on 14 April
//! otherwise, and the one or two extra days beyond a 364-day base year are
//! spread over rotating months. That reproduces the real anchors
//! (2000-01-01 is 1943-04-14, 2081-01-01 is 2024-04-13 with 31 days) and
//! gives irregular month lengths without claiming to be official data.

use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::table::CalendarTable;
use crate::types::BsDate;
use chrono::NaiveDate;

const BASE_YEAR: [u8; 12] = [31, 31, 32, 31, 31, 30, 30, 29, 30, 29, 30, 30];
const EXTRA_DAY_MONTHS: [usize; 10] = [6, 7, 8, 9, 10, 11, 5, 4, 3, 1];

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub const fn bs(year: u16, month: u8, day: u8) -> BsDate {
    BsDate::new(year, month, day)
}

fn new_year(year: u16) -> NaiveDate {
    let gregorian = i32::from(year) - 57;
    let leap = NaiveDate::from_ymd_opt(gregorian, 2, 29).is_some();
    ymd(gregorian, 4, if leap { 13 } else { 14 })
}

pub fn fixture_rows() -> Vec<[u8; 12]> {
    (MIN_YEAR..=MAX_YEAR)
        .map(|year| {
            let length = (new_year(year + 1) - new_year(year)).num_days();
            let extra = usize::try_from(length - 364).unwrap();
            let rotation = usize::from(year) * 7 % EXTRA_DAY_MONTHS.len();
            let mut row = BASE_YEAR;
            for k in 0..extra {
                row[EXTRA_DAY_MONTHS[(rotation + k * 3) % EXTRA_DAY_MONTHS.len()]] += 1;
            }
            row
        })
        .collect()
}

pub fn fixture_table() -> CalendarTable {
    CalendarTable::from_epoch_month_lengths(fixture_rows()).unwrap()
}

/// Every valid civil date in `year`
pub fn dates_in_year(table: &CalendarTable, year: u16) -> Vec<BsDate> {
    (1..=12)
        .flat_map(|month| {
            let days = table.days_in_month(year, month).unwrap();
            (1..=days).map(move |day| bs(year, month, day))
        })
        .collect()
}
