use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    error::{AppError, ValidationError},
    extract::{ApiJson, ApiQuery},
    models::{Feedback, FeedbackRequest, NewFeedback, PageQuery},
    state::AppState,
    validation::{
        is_valid_email, normalize_email, parse_rating, parse_user_id, provided, required,
        string_field,
    },
};

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = Feedback),
        (status = 400, description = "Field-specific validation code", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    tag = "feedback"
)]
pub async fn create_feedback(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    let name = required(string_field(req.name)).ok_or(ValidationError::MissingName)?;
    let email = required(string_field(req.email)).ok_or(ValidationError::MissingEmail)?;
    let message = required(string_field(req.message)).ok_or(ValidationError::MissingMessage)?;
    let rating = provided(req.rating).ok_or(ValidationError::MissingRating)?;

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail.into());
    }
    let rating = parse_rating(&rating)?;

    let user_id = match provided(req.user_id) {
        None => None,
        Some(raw) => {
            let user_id = parse_user_id(&raw)?;
            if !state.store.user_exists(user_id).await? {
                return Err(AppError::UserNotFound);
            }
            Some(user_id)
        }
    };

    let row = state
        .store
        .insert_feedback(NewFeedback {
            user_id,
            name,
            email,
            message,
            rating,
        })
        .await?;

    info!(feedback_id = row.id, rating = row.rating, "feedback received");
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/feedback",
    params(PageQuery),
    responses(
        (status = 200, description = "Newest first", body = [Feedback]),
        (status = 400, description = "INVALID_PAGINATION", body = ErrorBody)
    ),
    tag = "feedback"
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Feedback>>, AppError> {
    let page = query.page()?;
    let rows = state.store.list_feedback(page, query.search()).await?;
    Ok(Json(rows))
}
