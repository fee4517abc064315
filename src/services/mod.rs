//! Outbound clients for third-party APIs.

pub mod assistant;
pub mod weather;

pub use assistant::{Assistant, AssistantError, OpenAiAssistant};
pub use weather::{OpenWeatherClient, WeatherError, WeatherProvider};
