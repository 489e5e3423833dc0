//! Fixture date service used across the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use deardays::error::ServiceError;
use deardays::lunar::{ConversionItem, SpanItem};
use deardays::{CalendarConverter, DateService, LunarDate, Result, SolarDate};

pub fn solar(year: i32, month: u32, day: u32) -> SolarDate {
    SolarDate { year, month, day }
}

pub fn lunar(year: i32, month: u32, day: u32) -> LunarDate {
    LunarDate { year, month, day }
}

pub fn item(sol: SolarDate, lun: LunarDate, leap_month: bool) -> ConversionItem {
    ConversionItem {
        solar: sol,
        lunar: lun,
        leap_month,
    }
}

/// In-memory stand-in for the external date service. Lookups not present in
/// the maps fail the way the real service fails an invalid interpretation
/// (a non-"00" result code).
#[derive(Default)]
pub struct FixtureService {
    solar_lookups: HashMap<(i32, u32, u32), ConversionItem>,
    lunar_lookups: HashMap<(i32, u32, u32, bool), ConversionItem>,
    spans: Vec<SpanItem>,
}

impl FixtureService {
    pub fn with_solar(mut self, date: SolarDate, result: ConversionItem) -> Self {
        self.solar_lookups
            .insert((date.year, date.month, date.day), result);
        self
    }

    pub fn with_lunar(mut self, date: LunarDate, leap_month: bool, result: ConversionItem) -> Self {
        self.lunar_lookups
            .insert((date.year, date.month, date.day, leap_month), result);
        self
    }

    pub fn with_span(mut self, span: SpanItem) -> Self {
        self.spans.push(span);
        self
    }

    pub fn into_converter(self) -> CalendarConverter {
        CalendarConverter::new(Arc::new(self))
    }
}

fn no_data() -> deardays::DearDaysError {
    ServiceError::Api {
        code: "03".to_string(),
        message: "NODATA_ERROR".to_string(),
    }
    .into()
}

#[async_trait]
impl DateService for FixtureService {
    async fn solar_to_lunar(&self, date: SolarDate) -> Result<ConversionItem> {
        self.solar_lookups
            .get(&(date.year, date.month, date.day))
            .cloned()
            .ok_or_else(no_data)
    }

    async fn lunar_to_solar(&self, date: LunarDate, leap_month: bool) -> Result<ConversionItem> {
        self.lunar_lookups
            .get(&(date.year, date.month, date.day, leap_month))
            .cloned()
            .ok_or_else(no_data)
    }

    async fn lunar_span(
        &self,
        lunar_month: u32,
        lunar_day: u32,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<SpanItem>> {
        Ok(self
            .spans
            .iter()
            .filter(|s| {
                s.lunar.month == lunar_month
                    && s.lunar.day == lunar_day
                    && s.solar.year >= from_year
                    && s.solar.year <= to_year
            })
            .cloned()
            .collect())
    }
}

/// The 1988 ambiguous eighth month: lunar 1988-08-15 exists in both the
/// regular month (solar 1988-09-25) and the leap month (solar 1988-10-25).
pub fn ambiguous_1988_service() -> FixtureService {
    FixtureService::default()
        .with_lunar(
            lunar(1988, 8, 15),
            false,
            item(solar(1988, 9, 25), lunar(1988, 8, 15), false),
        )
        .with_lunar(
            lunar(1988, 8, 15),
            true,
            item(solar(1988, 10, 25), lunar(1988, 8, 15), true),
        )
        .with_solar(
            solar(1988, 9, 25),
            item(solar(1988, 9, 25), lunar(1988, 8, 15), false),
        )
}
