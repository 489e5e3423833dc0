//! Calendar conversion engine.
//!
//! Pure orchestration over a [`DateService`]: single-date conversions,
//! leap-month candidate resolution, the dual-calendar policy used when an
//! event is created or updated, and the recurring date-range search. All
//! operations are stateless single-shot calls; there is no cache and no
//! shared mutable state.

use std::sync::Arc;

use crate::error::{Result, ValidationError};
use crate::lunar::service::DateService;
use crate::lunar::types::{
    CalendarDatesInput, CalendarType, ConversionCandidate, LunarConversion, LunarDate,
    RecurrenceMatch, ResolvedDates, SolarDate,
};

/// Conversion engine over an external date service.
#[derive(Clone)]
pub struct CalendarConverter {
    service: Arc<dyn DateService>,
}

impl CalendarConverter {
    pub fn new(service: Arc<dyn DateService>) -> Self {
        Self { service }
    }

    /// Convert a solar date to its lunar representation.
    pub async fn solar_to_lunar(&self, date: SolarDate) -> Result<LunarConversion> {
        let item = self.service.solar_to_lunar(date).await?;
        Ok(LunarConversion {
            lunar: item.lunar,
            leap_month: item.leap_month,
        })
    }

    /// Convert a lunar date to its solar representation under one leap
    /// interpretation.
    pub async fn lunar_to_solar(&self, date: LunarDate, leap_month: bool) -> Result<SolarDate> {
        let item = self.service.lunar_to_solar(date, leap_month).await?;
        Ok(item.solar)
    }

    /// Resolve the leap/non-leap ambiguity of a lunar date into the set of
    /// valid solar candidates.
    ///
    /// Both interpretations are queried concurrently. A branch failure of
    /// any kind reads as "this candidate does not exist" and drops the
    /// candidate silently; the engine cannot distinguish "no such leap
    /// month this year" from a transient service hiccup on that one call,
    /// and accepts the ambiguity rather than guessing. The returned list
    /// has length 0, 1, or 2, always ordered [non-leap, leap], and is not
    /// deduplicated if both interpretations map to the same solar date.
    ///
    /// An empty list is a valid outcome, not an error; callers decide what
    /// "unconvertible date" means at their own layer.
    pub async fn lunar_to_solar_candidates(&self, date: LunarDate) -> Vec<ConversionCandidate> {
        let (regular, leap) = tokio::join!(
            self.service.lunar_to_solar(date, false),
            self.service.lunar_to_solar(date, true),
        );

        let mut candidates = Vec::with_capacity(2);
        match regular {
            Ok(item) => candidates.push(ConversionCandidate {
                solar: item.solar,
                leap_month: false,
            }),
            Err(e) => {
                tracing::debug!(lunar = %date, error = %e, "no regular-month candidate");
            }
        }
        match leap {
            Ok(item) => candidates.push(ConversionCandidate {
                solar: item.solar,
                leap_month: true,
            }),
            Err(e) => {
                tracing::debug!(lunar = %date, error = %e, "no leap-month candidate");
            }
        }
        candidates
    }

    /// Resolve an event date into its dual-calendar representation.
    ///
    /// For lunar input the candidate set is resolved via
    /// [`Self::lunar_to_solar_candidates`] and one candidate is picked:
    /// an explicit leap preference wins, otherwise the leap candidate is
    /// preferred, otherwise the first candidate. The returned lunar string
    /// is the caller's input unchanged, never re-derived from the picked
    /// candidate.
    pub async fn convert_calendar_dates(&self, input: CalendarDatesInput) -> Result<ResolvedDates> {
        match input.calendar_type {
            CalendarType::Lunar => {
                let lunar_str = input
                    .lunar_date
                    .ok_or(ValidationError::MissingDate { calendar: "lunar" })?;
                let lunar = LunarDate::parse(&lunar_str)?;

                let candidates = self.lunar_to_solar_candidates(lunar).await;
                let picked = pick_candidate(&candidates, input.leap_month)
                    .ok_or(ValidationError::NoCandidates)?;
                Ok(ResolvedDates {
                    solar_date: picked.solar.to_string(),
                    lunar_date: lunar_str,
                    leap_month: picked.leap_month,
                })
            }
            CalendarType::Solar => {
                let solar_str = input
                    .solar_date
                    .ok_or(ValidationError::MissingDate { calendar: "solar" })?;
                let solar = SolarDate::parse(&solar_str)?;

                let conversion = self.solar_to_lunar(solar).await?;
                Ok(ResolvedDates {
                    solar_date: solar_str,
                    lunar_date: conversion.lunar.to_string(),
                    leap_month: conversion.leap_month,
                })
            }
        }
    }

    /// Find every solar occurrence of a fixed lunar (month, day) pair
    /// across an inclusive year range.
    ///
    /// One range call; matches are returned in service order (callers
    /// needing chronological order sort by solar date themselves). An empty
    /// list is a valid outcome. `from_year > to_year` is passed through
    /// unvalidated; the service answers with an empty set or its own error.
    pub async fn find_lunar_date_range(
        &self,
        lunar_month: u32,
        lunar_day: u32,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<RecurrenceMatch>> {
        let items = self
            .service
            .lunar_span(lunar_month, lunar_day, from_year, to_year)
            .await?;
        Ok(items
            .into_iter()
            .map(|item| RecurrenceMatch {
                solar: item.solar,
                lunar: item.lunar,
                leap_month: item.leap_month,
            })
            .collect())
    }
}

/// Candidate selection policy: explicit preference match first, then the
/// leap candidate, then the first candidate. The product treats leap-month
/// dates as the more intentional choice when the user has not disambiguated.
fn pick_candidate(
    candidates: &[ConversionCandidate],
    preference: Option<bool>,
) -> Option<ConversionCandidate> {
    if let Some(preferred) = preference {
        if let Some(candidate) = candidates.iter().find(|c| c.leap_month == preferred) {
            return Some(*candidate);
        }
    }
    candidates
        .iter()
        .find(|c| c.leap_month)
        .or_else(|| candidates.first())
        .copied()
}
