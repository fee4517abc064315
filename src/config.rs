use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid {expected}: {value:?}")]
    Malformed {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
    /// Seeds the soil classifier; unset draws from thread entropy.
    pub soil_seed: Option<u64>,
    pub weather: WeatherConfig,
    pub assistant: AssistantConfig,
}

#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "krishi-dev-secret-change-in-production".into()),
            jwt_expiry_hours: parsed("JWT_EXPIRY_HOURS", "integer")?.unwrap_or(24),
            bind_addr: match parsed("BIND_ADDR", "socket address")? {
                Some(addr) => addr,
                None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Malformed {
                    name: "BIND_ADDR",
                    expected: "socket address",
                    value: DEFAULT_BIND_ADDR.into(),
                })?,
            },
            bcrypt_cost: parsed("BCRYPT_COST", "integer")?.unwrap_or(bcrypt::DEFAULT_COST),
            soil_seed: parsed("SOIL_SEED", "integer")?,
            weather: WeatherConfig {
                api_key: non_empty("OPENWEATHER_API_KEY"),
                base_url: non_empty("OPENWEATHER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.into()),
            },
            assistant: AssistantConfig {
                api_key: non_empty("OPENAI_API_KEY"),
                model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            },
        })
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match non_empty(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Malformed {
                name,
                expected,
                value,
            }),
    }
}
