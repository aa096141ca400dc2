//! Open-Meteo forecast client: one request per region.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use statecast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use tracing::instrument;

use crate::types::{CurrentConditions, HourlyRecord, Region, RegionDataset, WeatherError};

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m";
const USER_AGENT: &str = concat!("statecast/", env!("CARGO_PKG_VERSION"));

/// Something that can produce a dataset for one region.
pub trait ForecastSource: Send + Sync + 'static {
    fn fetch(
        &self,
        region: &Region,
    ) -> impl Future<Output = Result<RegionDataset, WeatherError>> + Send;

    /// Trailing days of history each dataset covers
    fn past_days(&self) -> u32;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    relative_humidity_2m: Vec<f64>,
    wind_speed_10m: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Client,
    base_url: String,
    past_days: u32,
    timezone: Option<String>,
}

impl ForecastProvider {
    pub fn new(base_url: &str, past_days: u32) -> Result<Self, WeatherError> {
        Self::build(base_url, past_days, None)
    }

    /// Provider configured from the `[weather]` config section.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut provider = Self::build(
            &config.api_base_url,
            config.past_days,
            config.request_timeout_secs.map(Duration::from_secs),
        )?;
        provider.timezone = config
            .timezone
            .as_deref()
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .map(str::to_string);
        Ok(provider)
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    fn build(base_url: &str, past_days: u32, timeout: Option<Duration>) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| e.into_network_error())?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            past_days,
            timezone: None,
        })
    }

    fn query_params(&self, region: &Region) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("latitude", region.latitude.to_string()),
            ("longitude", region.longitude.to_string()),
            ("past_days", self.past_days.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ];
        if let Some(tz) = &self.timezone {
            params.push(("timezone", tz.clone()));
        }
        params
    }

    #[instrument(skip(self, region), fields(region = %region.name), level = "debug")]
    async fn request(&self, region: &Region) -> Result<RegionDataset, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(region))
            .send()
            .await
            .map_err(|e| e.into_network_error())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.into_network_error())?;

        if !status.is_success() {
            tracing::warn!("Forecast request for {} returned {}", region.name, status);
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))?;

        let dataset = into_dataset(region.clone(), parsed)?;
        tracing::debug!("Fetched {} hourly rows for {}", dataset.hourly.len(), region.name);
        Ok(dataset)
    }
}

impl ForecastSource for ForecastProvider {
    async fn fetch(&self, region: &Region) -> Result<RegionDataset, WeatherError> {
        self.request(region).await
    }

    fn past_days(&self) -> u32 {
        self.past_days
    }
}

fn into_dataset(region: Region, response: ForecastResponse) -> Result<RegionDataset, WeatherError> {
    let times = response
        .hourly
        .time
        .iter()
        .map(|t| parse_time(t))
        .collect::<Result<Vec<_>, _>>()?;

    let hourly = HourlyRecord::new(
        times,
        response.hourly.temperature_2m,
        response.hourly.relative_humidity_2m,
        response.hourly.wind_speed_10m,
    )?;

    Ok(RegionDataset {
        region,
        current: CurrentConditions {
            temperature: response.current.temperature_2m,
            wind_speed: response.current.wind_speed_10m,
        },
        hourly,
    })
}

/// Open-Meteo sends local times without an offset, e.g. `2024-06-01T13:00`.
fn parse_time(s: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::Parse(format!("Invalid time format: {}", s)))
}
