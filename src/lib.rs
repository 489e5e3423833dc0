//! Dear Days: lunar-solar calendar conversion service.
//!
//! The core of the Dear Days personal-events reminder app: converting
//! between the Korean lunar calendar and the Gregorian solar calendar,
//! disambiguating lunar leap months, and answering recurring lunar-date
//! queries across year ranges. The irregular calendar math is delegated to
//! an external government open-data service; this crate is the adapter,
//! the conversion engine, and the REST surface over it.

pub mod api;
pub mod config;
pub mod error;
pub mod lunar;

pub use api::{create_rest_router, ApiState, RestApiConfig};
pub use config::Config;
pub use error::{ConfigError, DearDaysError, Result, ServiceError, ValidationError};
pub use lunar::{
    CalendarConverter, CalendarDatesInput, CalendarType, ConversionCandidate, ConversionItem,
    DateService, LunarConversion, LunarDate, OpenApiClient, RecurrenceMatch, ResolvedDates,
    SolarDate, SpanItem,
};
