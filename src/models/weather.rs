use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// City or town name, e.g. `Hubballi`.
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub location: String,
    pub country: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub description: String,
    pub icon: String,
    pub wind_speed: f64,
    pub pressure: i64,
}
