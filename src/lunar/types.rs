//! Domain types for lunar-solar calendar conversion.
//!
//! Solar and lunar dates are distinct types so the two calendar systems
//! cannot be confused at a call site. All calendar math is delegated to the
//! external date service; these types only carry and format the triples.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Year range covered by the external date service.
pub const MIN_YEAR: i32 = 1000;
/// Upper bound of the year range covered by the external date service.
pub const MAX_YEAR: i32 = 3000;

/// Calendar system an event date was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    Solar,
    Lunar,
}

/// A date in the Gregorian solar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A date in the Korean lunar calendar.
///
/// Whether the date sits in a leap (intercalary) month is carried
/// separately, because the same (year, month, day) triple can exist in both
/// the regular and the leap month of the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        validate_triple(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Parse a zero-padded `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(year, month, day)
    }
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        validate_triple(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Parse a zero-padded `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (year, month, day) = parse_ymd(s)?;
        Self::new(year, month, day)
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Result of a solar-to-lunar conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarConversion {
    pub lunar: LunarDate,
    pub leap_month: bool,
}

/// One lunar-to-solar mapping outcome.
///
/// `leap_month` is the leap interpretation that was actually sent to the
/// external service for this candidate, never inferred from the response of
/// the other branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionCandidate {
    pub solar: SolarDate,
    pub leap_month: bool,
}

/// One calendar-year occurrence of a fixed lunar (month, day) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceMatch {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub leap_month: bool,
}

/// Input to [`CalendarConverter::convert_calendar_dates`].
///
/// [`CalendarConverter::convert_calendar_dates`]: crate::lunar::CalendarConverter::convert_calendar_dates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDatesInput {
    pub calendar_type: CalendarType,
    #[serde(default)]
    pub solar_date: Option<String>,
    #[serde(default)]
    pub lunar_date: Option<String>,
    /// Explicit leap-month preference, meaningful only for lunar input.
    #[serde(default)]
    pub leap_month: Option<bool>,
}

/// Fully-resolved dual-calendar representation of an event date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDates {
    /// Solar date, zero-padded `YYYY-MM-DD`.
    pub solar_date: String,
    /// Lunar date, zero-padded `YYYY-MM-DD`. For lunar input this is the
    /// caller's string unchanged, not re-derived from the picked candidate.
    pub lunar_date: String,
    pub leap_month: bool,
}

pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn validate_triple(year: i32, month: u32, day: u32) -> Result<(), ValidationError> {
    check_range("year", i64::from(year), i64::from(MIN_YEAR), i64::from(MAX_YEAR))?;
    check_range("month", i64::from(month), 1, 12)?;
    // Day-for-month validity is delegated to the external service.
    check_range("day", i64::from(day), 1, 31)?;
    Ok(())
}

/// Parse a strict zero-padded `YYYY-MM-DD` string into a (year, month, day)
/// triple. Field widths must be exactly 4, 2 and 2.
fn parse_ymd(s: &str) -> Result<(i32, u32, u32), ValidationError> {
    let malformed = || ValidationError::MalformedDate(s.to_string());

    let mut parts = s.split('-');
    let (y, m, d) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d), None) => (y, m, d),
        _ => return Err(malformed()),
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(malformed());
    }
    let year: i32 = y.parse().map_err(|_| malformed())?;
    let month: u32 = m.parse().map_err(|_| malformed())?;
    let day: u32 = d.parse().map_err(|_| malformed())?;
    Ok((year, month, day))
}
