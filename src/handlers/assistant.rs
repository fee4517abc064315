use axum::{extract::State, Json};

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    error::{AppError, ValidationError},
    extract::ApiJson,
    models::{VoiceRequest, VoiceResponse, DEFAULT_LANGUAGE},
    state::AppState,
    validation::{required, string_field},
};

/// Open-ended questions go to the language model; nothing is logged.
#[utoipa::path(
    post,
    path = "/voice-assistant",
    request_body = VoiceRequest,
    responses(
        (status = 200, description = "Model reply", body = VoiceResponse),
        (status = 400, description = "MISSING_INPUT", body = ErrorBody),
        (status = 500, description = "Not configured or upstream failure", body = ErrorBody)
    ),
    tag = "assistant"
)]
pub async fn voice_assistant(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VoiceRequest>,
) -> Result<Json<VoiceResponse>, AppError> {
    let input = required(string_field(req.input)).ok_or(ValidationError::MissingInput)?;
    let language = required(string_field(req.language)).unwrap_or_else(|| DEFAULT_LANGUAGE.into());
    let response = state.assistant.reply(&input, &language).await?;
    Ok(Json(VoiceResponse { response }))
}
