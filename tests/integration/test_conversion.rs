//! Conversion engine scenarios against the fixture date service.

use deardays::{CalendarDatesInput, CalendarType, DearDaysError, SpanItem, ValidationError};

use super::fixture::{ambiguous_1988_service, item, lunar, solar, FixtureService};

fn span(sol: (i32, u32, u32), lun: (i32, u32, u32), leap_month: bool) -> SpanItem {
    SpanItem {
        solar: solar(sol.0, sol.1, sol.2),
        lunar: lunar(lun.0, lun.1, lun.2),
        leap_month,
    }
}

#[tokio::test]
async fn round_trip_non_leap_date() {
    let converter = ambiguous_1988_service().into_converter();

    let conversion = converter.solar_to_lunar(solar(1988, 9, 25)).await.unwrap();
    assert_eq!(conversion.lunar, lunar(1988, 8, 15));
    assert!(!conversion.leap_month);

    let back = converter
        .lunar_to_solar(conversion.lunar, conversion.leap_month)
        .await
        .unwrap();
    assert_eq!(back, solar(1988, 9, 25));
}

#[tokio::test]
async fn candidates_are_ordered_non_leap_then_leap() {
    let converter = ambiguous_1988_service().into_converter();

    let candidates = converter.lunar_to_solar_candidates(lunar(1988, 8, 15)).await;
    assert_eq!(candidates.len(), 2);
    assert!(!candidates[0].leap_month);
    assert_eq!(candidates[0].solar, solar(1988, 9, 25));
    assert!(candidates[1].leap_month);
    assert_eq!(candidates[1].solar, solar(1988, 10, 25));
}

#[tokio::test]
async fn failed_leap_branch_drops_only_that_candidate() {
    // 2024-01-01 has no leap first month; only the regular lookup succeeds.
    let converter = FixtureService::default()
        .with_lunar(
            lunar(2024, 1, 1),
            false,
            item(solar(2024, 2, 10), lunar(2024, 1, 1), false),
        )
        .into_converter();

    let candidates = converter.lunar_to_solar_candidates(lunar(2024, 1, 1)).await;
    assert_eq!(candidates.len(), 1);
    assert!(!candidates[0].leap_month);
    assert_eq!(candidates[0].solar, solar(2024, 2, 10));
}

#[tokio::test]
async fn failed_regular_branch_leaves_leap_candidate() {
    let converter = FixtureService::default()
        .with_lunar(
            lunar(2025, 6, 15),
            true,
            item(solar(2025, 8, 8), lunar(2025, 6, 15), true),
        )
        .into_converter();

    let candidates = converter.lunar_to_solar_candidates(lunar(2025, 6, 15)).await;
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].leap_month);
}

#[tokio::test]
async fn no_candidates_is_an_empty_list_not_an_error() {
    let converter = FixtureService::default().into_converter();
    let candidates = converter.lunar_to_solar_candidates(lunar(2024, 1, 1)).await;
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn resolve_prefers_leap_candidate_by_default() {
    let converter = ambiguous_1988_service().into_converter();

    let resolved = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Lunar,
            solar_date: None,
            lunar_date: Some("1988-08-15".to_string()),
            leap_month: None,
        })
        .await
        .unwrap();

    assert_eq!(resolved.solar_date, "1988-10-25");
    assert_eq!(resolved.lunar_date, "1988-08-15");
    assert!(resolved.leap_month);
}

#[tokio::test]
async fn resolve_honors_explicit_non_leap_preference() {
    let converter = ambiguous_1988_service().into_converter();

    let resolved = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Lunar,
            solar_date: None,
            lunar_date: Some("1988-08-15".to_string()),
            leap_month: Some(false),
        })
        .await
        .unwrap();

    assert_eq!(resolved.solar_date, "1988-09-25");
    assert_eq!(resolved.lunar_date, "1988-08-15");
    assert!(!resolved.leap_month);
}

#[tokio::test]
async fn resolve_fails_on_empty_candidate_set() {
    let converter = FixtureService::default().into_converter();

    let err = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Lunar,
            solar_date: None,
            lunar_date: Some("2024-01-01".to_string()),
            leap_month: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DearDaysError::Validation(ValidationError::NoCandidates)
    ));
}

#[tokio::test]
async fn resolve_requires_a_date_for_the_declared_calendar() {
    let converter = FixtureService::default().into_converter();

    let err = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Lunar,
            // Solar date present but irrelevant: the declared calendar is lunar.
            solar_date: Some("2024-02-10".to_string()),
            lunar_date: None,
            leap_month: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DearDaysError::Validation(ValidationError::MissingDate { calendar: "lunar" })
    ));

    let err = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Solar,
            solar_date: None,
            lunar_date: Some("2024-01-01".to_string()),
            leap_month: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DearDaysError::Validation(ValidationError::MissingDate { calendar: "solar" })
    ));
}

#[tokio::test]
async fn resolve_solar_input_keeps_original_string() {
    let converter = ambiguous_1988_service().into_converter();

    let resolved = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Solar,
            solar_date: Some("1988-09-25".to_string()),
            lunar_date: None,
            leap_month: None,
        })
        .await
        .unwrap();

    assert_eq!(resolved.solar_date, "1988-09-25");
    assert_eq!(resolved.lunar_date, "1988-08-15");
    assert!(!resolved.leap_month);
}

#[tokio::test]
async fn resolve_rejects_malformed_date_before_any_lookup() {
    let converter = FixtureService::default().into_converter();

    let err = converter
        .convert_calendar_dates(CalendarDatesInput {
            calendar_type: CalendarType::Lunar,
            solar_date: None,
            lunar_date: Some("1988-8-15".to_string()),
            leap_month: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DearDaysError::Validation(ValidationError::MalformedDate(_))
    ));
}

#[tokio::test]
async fn recurrence_search_aggregates_per_year_matches() {
    // Lunar new year across three years, plus one leap item to prove the
    // flag is resolved per item rather than once per batch.
    let converter = FixtureService::default()
        .with_span(span((2024, 2, 10), (2024, 1, 1), false))
        .with_span(span((2025, 1, 29), (2025, 1, 1), false))
        .with_span(span((2026, 2, 17), (2026, 1, 1), true))
        .into_converter();

    let matches = converter.find_lunar_date_range(1, 1, 2024, 2026).await.unwrap();
    assert_eq!(matches.len(), 3);

    assert_eq!(matches[0].solar, solar(2024, 2, 10));
    assert_eq!(matches[0].lunar, lunar(2024, 1, 1));
    assert!(!matches[0].leap_month);

    assert_eq!(matches[1].solar, solar(2025, 1, 29));
    assert!(!matches[1].leap_month);

    assert_eq!(matches[2].solar, solar(2026, 2, 17));
    assert!(matches[2].leap_month);
}

#[tokio::test]
async fn recurrence_search_returns_empty_for_no_matches() {
    let converter = FixtureService::default().into_converter();
    let matches = converter.find_lunar_date_range(1, 1, 2024, 2026).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn conversions_are_idempotent() {
    let converter = ambiguous_1988_service().into_converter();

    let first = converter.solar_to_lunar(solar(1988, 9, 25)).await.unwrap();
    let second = converter.solar_to_lunar(solar(1988, 9, 25)).await.unwrap();
    assert_eq!(first, second);

    let first = converter.lunar_to_solar_candidates(lunar(1988, 8, 15)).await;
    let second = converter.lunar_to_solar_candidates(lunar(1988, 8, 15)).await;
    assert_eq!(first, second);
}
