use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    dispatcher,
    error::{AppError, ValidationError},
    extract::{ApiJson, ApiQuery},
    middleware::auth::AuthUser,
    models::{
        ChatEntry, ChatRecordRequest, ChatRequest, ChatResponse, NewChatEntry, PageQuery,
        DEFAULT_LANGUAGE,
    },
    state::AppState,
    validation::{parse_path_user_id, parse_user_id, provided, required, string_field},
};

/// Answers from the keyword table and logs the exchange.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Canned reply", body = ChatResponse),
        (status = 400, description = "MISSING_FIELDS or INVALID_USER_ID", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let (Some(user_id), Some(message)) =
        (provided(req.user_id), required(string_field(req.message)))
    else {
        return Err(ValidationError::MissingChatFields.into());
    };
    let user_id = parse_user_id(&user_id)?;
    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let reply = dispatcher::respond(&message);
    let language = required(string_field(req.language))
        .map(|l| l.to_lowercase())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.into());

    state
        .store
        .insert_chat(NewChatEntry {
            user_id,
            message,
            response: reply.text.to_owned(),
            language,
        })
        .await?;

    info!(user_id, topic = ?reply.topic, "chat answered");
    Ok(Json(ChatResponse {
        response: reply.text.to_owned(),
    }))
}

/// Logs an exchange answered elsewhere, e.g. by the voice assistant.
#[utoipa::path(
    post,
    path = "/records/chat",
    request_body = ChatRecordRequest,
    responses(
        (status = 201, description = "Stored", body = ChatEntry),
        (status = 400, description = "MISSING_FIELDS, INVALID_USER_ID or EMPTY_FIELDS", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "chat"
)]
pub async fn record_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChatRecordRequest>,
) -> Result<(StatusCode, Json<ChatEntry>), AppError> {
    let (Some(user_id), Some(message), Some(response), Some(language)) = (
        provided(req.user_id),
        string_field(req.message).filter(|s| !s.is_empty()),
        string_field(req.response).filter(|s| !s.is_empty()),
        string_field(req.language).filter(|s| !s.is_empty()),
    ) else {
        return Err(ValidationError::MissingChatRecordFields.into());
    };
    let user_id = parse_user_id(&user_id)?;
    let (Some(message), Some(response), Some(language)) = (
        required(Some(message)),
        required(Some(response)),
        required(Some(language)),
    ) else {
        return Err(ValidationError::EmptyFields.into());
    };

    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let entry = state
        .store
        .insert_chat(NewChatEntry {
            user_id,
            message,
            response,
            language: language.to_lowercase(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/chat/history/{user_id}",
    params(
        ("user_id" = i64, Path, description = "Owner of the history"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Newest first", body = [ChatEntry]),
        (status = 400, description = "INVALID_USER_ID or INVALID_PAGINATION", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "chat"
)]
pub async fn chat_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<ChatEntry>>, AppError> {
    let user_id = parse_path_user_id(&user_id)?;
    let page = query.page()?;
    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let rows = state.store.list_chats(user_id, page).await?;
    Ok(Json(rows))
}
