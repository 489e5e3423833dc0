//! Lunar-solar calendar conversion subsystem.
//!
//! Three layers, leaf to top:
//!
//! - [`service`]: the external date service adapter. One HTTP GET per
//!   lookup, sorted query parameters, XML envelope parsing, and the
//!   asymmetric leap-marker rule live here and in [`response`].
//! - Single-date conversions: [`CalendarConverter::solar_to_lunar`] and
//!   [`CalendarConverter::lunar_to_solar`], one adapter call each.
//! - Candidate resolution and policy:
//!   [`CalendarConverter::lunar_to_solar_candidates`] resolves the inherent
//!   leap/non-leap ambiguity of a lunar date into 0-2 solar candidates;
//!   [`CalendarConverter::convert_calendar_dates`] picks one and produces
//!   the dual-calendar record an event stores;
//!   [`CalendarConverter::find_lunar_date_range`] answers recurring
//!   memorial/anniversary lookups across a year range.
//!
//! The irregular calendar math itself is delegated to the external service;
//! nothing here computes lunar-solar mappings locally.

mod convert;
mod response;
mod service;
mod types;

pub use convert::CalendarConverter;
pub use response::{is_leap_marker, parse_response, ConversionItem, RawItem, SpanItem, LEAP_MONTH_MARKER};
pub use service::{build_url, DateService, LookupOperation, OpenApiClient};
pub use types::{
    CalendarDatesInput, CalendarType, ConversionCandidate, LunarConversion, LunarDate,
    RecurrenceMatch, ResolvedDates, SolarDate, MAX_YEAR, MIN_YEAR,
};

pub(crate) use types::check_range;
