// Hebcal service
// Hebrew dates and Torah portions for a Gregorian range, from hebcal.com

mod response;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::CalendarError;
use crate::models::calendar_state::DateRange;
use crate::models::day_cell::HebrewCalendar;
use crate::models::settings::Settings;
use crate::utils::date::format_iso_date;

use response::ConverterResponse;

/// Source of Hebrew calendar data for a date range
#[async_trait]
pub trait DateConverter: Send + Sync {
    async fn convert(&self, range: &DateRange) -> Result<HebrewCalendar, CalendarError>;
}

pub struct HebcalClient {
    client: Client,
    base_url: Url,
    max_response_bytes: usize,
}

impl HebcalClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Hebcal HTTP client")?;
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid Hebcal base URL '{}'", base_url))?;

        Ok(Self {
            client,
            base_url,
            max_response_bytes: 2 * 1024 * 1024,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(
            &settings.hebcal_base_url,
            Duration::from_secs(settings.lookup_timeout_secs),
        )
    }

    /// Converter endpoint for `range`, with Torah readings and sedra names
    pub fn converter_url(&self, range: &DateRange) -> Result<Url, CalendarError> {
        let mut url = self
            .base_url
            .join("converter")
            .map_err(|err| CalendarError::Lookup(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("cfg", "json")
            .append_pair("g2h", "1")
            .append_pair("start", &format_iso_date(range.start()))
            .append_pair("end", &format_iso_date(range.end()))
            .append_pair("leyning", "on")
            .append_pair("s", "on");
        Ok(url)
    }
}

#[async_trait]
impl DateConverter for HebcalClient {
    async fn convert(&self, range: &DateRange) -> Result<HebrewCalendar, CalendarError> {
        let url = self.converter_url(range)?;
        log::info!("Fetching Hebrew dates for {} to {}", range.start(), range.end());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Hebcal lookup failed with HTTP status {}", status);
            return Err(CalendarError::Lookup(format!("HTTP error! status: {}", status)));
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.max_response_bytes {
            return Err(CalendarError::Lookup(format!(
                "Response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            )));
        }

        let parsed: ConverterResponse = serde_json::from_slice(&bytes)
            .map_err(|err| CalendarError::Lookup(format!("Malformed response: {}", err)))?;
        let calendar = parsed.into_calendar()?;
        log::debug!("Received Hebrew data for {} days", calendar.len());
        Ok(calendar)
    }
}

/// Converter used when lookups are disabled; days render without Hebrew data
pub struct OfflineConverter;

#[async_trait]
impl DateConverter for OfflineConverter {
    async fn convert(&self, _range: &DateRange) -> Result<HebrewCalendar, CalendarError> {
        Ok(HebrewCalendar::new())
    }
}
