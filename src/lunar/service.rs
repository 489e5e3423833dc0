//! External date service adapter.
//!
//! One HTTP GET per lookup against the government lunar-calendar open-data
//! service, authenticated with a service key. The [`DateService`] trait is
//! the seam between the conversion engine and the wire: production wires
//! [`OpenApiClient`], tests substitute a fixture implementation.
//!
//! No retries and no caching happen at this layer. Successful responses are
//! cacheable for weeks by any HTTP cache beneath (calendar facts never
//! change); failures must not be cached.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::LunarApiConfig;
use crate::error::{Result, ServiceError};
use crate::lunar::response::{parse_response, ConversionItem, SpanItem};
use crate::lunar::types::{LunarDate, SolarDate};

/// The three operations consumed from the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOperation {
    /// Solar date -> lunar date.
    SolarToLunar,
    /// Lunar date (with leap interpretation) -> solar date.
    LunarToSolar,
    /// Every solar occurrence of a fixed lunar (month, day) across a year range.
    LunarSpan,
}

impl LookupOperation {
    /// Operation path segment on the service.
    pub fn path(self) -> &'static str {
        match self {
            LookupOperation::SolarToLunar => "getLunCalInfo",
            LookupOperation::LunarToSolar => "getSolCalInfo",
            LookupOperation::LunarSpan => "getSpcifyLunCalInfo",
        }
    }
}

/// Abstraction over the external lunar-calendar date service.
#[async_trait]
pub trait DateService: Send + Sync {
    /// Look up the lunar representation of a solar date.
    async fn solar_to_lunar(&self, date: SolarDate) -> Result<ConversionItem>;

    /// Look up the solar representation of a lunar date under one leap
    /// interpretation. The leap parameter is only sent upstream when
    /// `leap_month` is true; absence means "regular month".
    async fn lunar_to_solar(&self, date: LunarDate, leap_month: bool) -> Result<ConversionItem>;

    /// Look up every solar occurrence of a fixed lunar (month, day) pair
    /// across an inclusive year range, in one call.
    async fn lunar_span(
        &self,
        lunar_month: u32,
        lunar_day: u32,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<SpanItem>>;
}

/// Build the request URL for an operation. Query pairs are sorted
/// lexicographically by key so the same logical query always produces the
/// same URL, independent of parameter construction order.
pub fn build_url(
    base_url: &str,
    operation: LookupOperation,
    service_key: &str,
    params: &[(&'static str, String)],
) -> Result<Url> {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();
    pairs.push(("ServiceKey", service_key));
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let base = format!("{}/{}", base_url.trim_end_matches('/'), operation.path());
    Url::parse_with_params(&base, &pairs)
        .map_err(|e| crate::error::ConfigError::Invalid(format!("service URL: {e}")).into())
}

/// Reqwest-backed client for the open-data service.
pub struct OpenApiClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl OpenApiClient {
    /// Build a client from configuration. The service key is resolved here,
    /// once, from the config or the environment.
    pub fn from_config(config: &LunarApiConfig) -> Result<Self> {
        let service_key = config.resolve_service_key()?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ServiceError::Request)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key,
        })
    }

    async fn lookup(
        &self,
        operation: LookupOperation,
        params: &[(&'static str, String)],
    ) -> Result<Vec<crate::lunar::response::RawItem>> {
        let url = build_url(&self.base_url, operation, &self.service_key, params)?;
        tracing::debug!(operation = operation.path(), "date service lookup");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ServiceError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()).into());
        }

        let body = response.text().await.map_err(ServiceError::Request)?;
        Ok(parse_response(&body).map_err(|e| {
            tracing::warn!(operation = operation.path(), error = %e, "date service failure");
            e
        })?)
    }

    fn single_item(
        operation: LookupOperation,
        items: Vec<crate::lunar::response::RawItem>,
    ) -> Result<ConversionItem> {
        let item = items.into_iter().next().ok_or_else(|| {
            ServiceError::Xml(format!("{} returned no items", operation.path()))
        })?;
        Ok(ConversionItem::from_raw(&item)?)
    }
}

#[async_trait]
impl DateService for OpenApiClient {
    async fn solar_to_lunar(&self, date: SolarDate) -> Result<ConversionItem> {
        let params = [
            ("solYear", format!("{:04}", date.year)),
            ("solMonth", format!("{:02}", date.month)),
            ("solDay", format!("{:02}", date.day)),
        ];
        let items = self.lookup(LookupOperation::SolarToLunar, &params).await?;
        Self::single_item(LookupOperation::SolarToLunar, items)
    }

    async fn lunar_to_solar(&self, date: LunarDate, leap_month: bool) -> Result<ConversionItem> {
        let mut params = vec![
            ("lunYear", format!("{:04}", date.year)),
            ("lunMonth", format!("{:02}", date.month)),
            ("lunDay", format!("{:02}", date.day)),
        ];
        if leap_month {
            params.push(("leapMonth", super::response::LEAP_MONTH_MARKER.to_string()));
        }
        let items = self.lookup(LookupOperation::LunarToSolar, &params).await?;
        Self::single_item(LookupOperation::LunarToSolar, items)
    }

    async fn lunar_span(
        &self,
        lunar_month: u32,
        lunar_day: u32,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<SpanItem>> {
        let params = [
            ("fromSolYear", format!("{from_year:04}")),
            ("toSolYear", format!("{to_year:04}")),
            ("lunMonth", format!("{lunar_month:02}")),
            ("lunDay", format!("{lunar_day:02}")),
        ];
        let items = self.lookup(LookupOperation::LunarSpan, &params).await?;
        items.iter().map(|i| Ok(SpanItem::from_raw(i)?)).collect()
    }
}
