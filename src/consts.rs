use chrono::NaiveDate;

/// Earliest civil year a calendar table may contain (inclusive)
pub const MIN_YEAR: u16 = 2000;
/// Latest civil year a calendar table may contain (inclusive)
pub const MAX_YEAR: u16 = 2100;

/// Months in a civil year
pub const MONTHS_PER_YEAR: u8 = 12;
/// Month number for Baisakh, the first month of the civil year
pub const FIRST_MONTH: u8 = 1;
/// Month number for Chaitra, the last month of the civil year
pub const LAST_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Shortest month the reference data may contain
pub const MIN_MONTH_DAYS: u8 = 29;
/// Longest month the reference data may contain
pub const MAX_MONTH_DAYS: u8 = 32;

/// Civil date of the epoch anchor: 2000-01-01 BS
pub const EPOCH_BS: (u16, u8, u8) = (2000, 1, 1);

/// Gregorian date of the epoch anchor: 1943-04-14 AD
pub const EPOCH_AD: NaiveDate = match NaiveDate::from_ymd_opt(1943, 4, 14) {
    Some(date) => date,
    None => panic!("epoch anchor is a valid gregorian date"),
};

/// English month names, index 0 is Baisakh
pub const MONTH_NAMES: [&str; 12] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Asoj", "Kartik", "Mangsir", "Poush", "Magh",
    "Falgun", "Chaitra",
];

/// Three-letter English month abbreviations
pub const MONTH_NAMES_SHORT: [&str; 12] = [
    "Bai", "Jes", "Asa", "Shr", "Bha", "Aso", "Kar", "Man", "Pou", "Mag", "Fal", "Cha",
];

/// Month names in Devanagari script
pub const MONTH_NAMES_LOCAL: [&str; 12] = [
    "बैशाख", "जेठ", "असार", "साउन", "भदौ", "असोज", "कार्तिक", "मंसिर", "पुष", "माघ", "फागुन",
    "चैत",
];

/// Devanagari digits, indexed by their value
pub const LOCAL_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Default label appended to civil dates in dual rendering
pub const CIVIL_LABEL: &str = "BS";
/// Default label appended to gregorian dates in dual rendering
pub const GREGORIAN_LABEL: &str = "AD";

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Alternative separator accepted when parsing civil dates
pub const ALT_DATE_SEPARATOR: char = '/';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
