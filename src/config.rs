//! Engine configuration, usually read from the application's TOML file.

use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::error::CalendarError;
use crate::format::DualFormatOptions;
use serde::Deserialize;

/// Top-level calendar configuration.
///
/// ```toml
/// year_range = [2070, 2090]
///
/// [format]
/// numerals = "local"
/// style = "long"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Civil years to load, inclusive. Loads everything the source has when
    /// absent.
    #[serde(default)]
    pub year_range: Option<[u16; 2]>,

    /// Default options for dual rendering.
    #[serde(default)]
    pub format: DualFormatOptions,
}

impl CalendarConfig {
    /// Parses and checks a TOML document.
    ///
    /// # Errors
    /// Returns `CalendarError::Config` if the document does not parse or
    /// `year_range` is inverted or outside 2000..=2100.
    pub fn from_toml_str(s: &str) -> Result<Self, CalendarError> {
        let config: Self =
            toml::from_str(s).map_err(|err| CalendarError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `CalendarError::Config` if `year_range` is inverted or outside
    /// 2000..=2100.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if let Some([min, max]) = self.year_range {
            if min > max {
                return Err(CalendarError::Config(format!(
                    "year_range is inverted: [{min}, {max}]"
                )));
            }
            if min < MIN_YEAR || max > MAX_YEAR {
                return Err(CalendarError::Config(format!(
                    "year_range [{min}, {max}] is outside {MIN_YEAR}..={MAX_YEAR}"
                )));
            }
        }
        Ok(())
    }
}
