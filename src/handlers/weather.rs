use axum::{extract::State, Json};

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    error::{AppError, ValidationError},
    extract::ApiQuery,
    models::{WeatherQuery, WeatherReport},
    state::AppState,
    validation::required,
};

#[utoipa::path(
    get,
    path = "/weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current conditions", body = WeatherReport),
        (status = 400, description = "MISSING_LOCATION", body = ErrorBody),
        (status = 404, description = "LOCATION_NOT_FOUND", body = ErrorBody),
        (status = 500, description = "Not configured or upstream failure", body = ErrorBody)
    ),
    tag = "weather"
)]
pub async fn weather(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<WeatherQuery>,
) -> Result<Json<WeatherReport>, AppError> {
    let location = required(query.location).ok_or(ValidationError::MissingLocation)?;
    let report = state.weather.current(&location).await?;
    Ok(Json(report))
}
