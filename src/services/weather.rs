//! OpenWeatherMap current-conditions lookup.
//!
//! Only transport and mapping live here: the upstream JSON is reduced to a
//! [`WeatherReport`] with temperatures rounded to whole degrees Celsius.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::WeatherConfig;
use crate::error::AppError;
use crate::models::WeatherReport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    NotConfigured,
    #[error("location not found")]
    NotFound,
    #[error("weather upstream failed: {0}")]
    Upstream(String),
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::NotConfigured => AppError::WeatherNotConfigured,
            WeatherError::NotFound => AppError::LocationNotFound,
            WeatherError::Upstream(msg) => AppError::Upstream(msg),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherDto {
    name: String,
    sys: SysDto,
    main: MainDto,
    #[serde(default)]
    weather: Vec<ConditionDto>,
    wind: WindDto,
}

#[derive(Debug, Deserialize)]
struct SysDto {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct MainDto {
    temp: f64,
    feels_like: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindDto {
    speed: f64,
}

fn round_degrees(value: f64) -> i64 {
    value.round() as i64
}

impl From<CurrentWeatherDto> for WeatherReport {
    fn from(dto: CurrentWeatherDto) -> Self {
        let (description, icon) = dto
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();
        WeatherReport {
            location: dto.name,
            country: dto.sys.country,
            temperature: round_degrees(dto.main.temp),
            feels_like: round_degrees(dto.main.feels_like),
            humidity: dto.main.humidity,
            description,
            icon,
            wind_speed: dto.wind.speed,
            pressure: dto.main.pressure,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(WeatherError::NotFound),
            status if !status.is_success() => {
                return Err(WeatherError::Upstream(format!("status {status}")));
            }
            _ => {}
        }

        let dto: CurrentWeatherDto = response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(e.to_string()))?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_payload_is_flattened_and_rounded() {
        let payload = json!({
            "name": "Hubballi",
            "sys": { "country": "IN" },
            "main": { "temp": 28.6, "feels_like": 31.2, "humidity": 70, "pressure": 1008 },
            "weather": [{ "description": "scattered clouds", "icon": "03d" }],
            "wind": { "speed": 4.1 }
        });
        let dto: CurrentWeatherDto = serde_json::from_value(payload).expect("valid payload");
        let report = WeatherReport::from(dto);
        assert_eq!(
            report,
            WeatherReport {
                location: "Hubballi".into(),
                country: "IN".into(),
                temperature: 29,
                feels_like: 31,
                humidity: 70,
                description: "scattered clouds".into(),
                icon: "03d".into(),
                wind_speed: 4.1,
                pressure: 1008,
            }
        );
    }

    #[test]
    fn missing_conditions_leave_description_empty() {
        let payload = json!({
            "name": "Mysore",
            "sys": {},
            "main": { "temp": 22.4, "feels_like": 22.0, "humidity": 60, "pressure": 1012 },
            "wind": { "speed": 1.0 }
        });
        let dto: CurrentWeatherDto = serde_json::from_value(payload).expect("valid payload");
        let report = WeatherReport::from(dto);
        assert_eq!(report.description, "");
        assert_eq!(report.country, "");
        assert_eq!(report.temperature, 22);
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let client = OpenWeatherClient::new(&WeatherConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".into(),
        })
        .expect("client builds");
        let err = client.current("Hubballi").await.expect_err("no key");
        assert!(matches!(err, WeatherError::NotConfigured));
    }
}
