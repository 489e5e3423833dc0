//! CLI command handlers for one-shot conversions.

use anyhow::Result;
use std::sync::Arc;

use deardays::{
    CalendarConverter, CalendarDatesInput, CalendarType, Config, LunarDate, OpenApiClient,
    SolarDate,
};

/// Build a converter backed by the real open-data service.
fn converter(config: &Config) -> Result<CalendarConverter> {
    let client = OpenApiClient::from_config(&config.lunar_api)?;
    Ok(CalendarConverter::new(Arc::new(client)))
}

fn print_json<T: serde::Serialize>(value: &T, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Run the solar-to-lunar command.
pub async fn run_solar_to_lunar(config: Config, date: String, json_output: bool) -> Result<()> {
    let date = SolarDate::parse(&date)?;
    let result = converter(&config)?.solar_to_lunar(date).await?;
    print_json(&result, json_output)
}

/// Run the lunar-to-solar command.
pub async fn run_lunar_to_solar(
    config: Config,
    date: String,
    leap_month: bool,
    json_output: bool,
) -> Result<()> {
    let date = LunarDate::parse(&date)?;
    let result = converter(&config)?.lunar_to_solar(date, leap_month).await?;
    print_json(&result, json_output)
}

/// Run the candidates command.
pub async fn run_candidates(config: Config, date: String, json_output: bool) -> Result<()> {
    let date = LunarDate::parse(&date)?;
    let candidates = converter(&config)?.lunar_to_solar_candidates(date).await;
    print_json(&candidates, json_output)
}

/// Run the resolve command: full dual-calendar resolution as performed when
/// an event is saved.
pub async fn run_resolve(
    config: Config,
    calendar_type: CalendarType,
    solar_date: Option<String>,
    lunar_date: Option<String>,
    leap_month: Option<bool>,
    json_output: bool,
) -> Result<()> {
    let resolved = converter(&config)?
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type,
            solar_date,
            lunar_date,
            leap_month,
        })
        .await?;
    print_json(&resolved, json_output)
}

/// Run the recurrence command.
pub async fn run_recurrence(
    config: Config,
    lunar_month: u32,
    lunar_day: u32,
    from_year: i32,
    to_year: i32,
    json_output: bool,
) -> Result<()> {
    let matches = converter(&config)?
        .find_lunar_date_range(lunar_month, lunar_day, from_year, to_year)
        .await?;
    print_json(&matches, json_output)
}
