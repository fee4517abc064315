use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    error::{AppError, ValidationError},
    extract::{ApiJson, ApiQuery},
    middleware::auth::AuthUser,
    models::{
        NewSoilAnalysis, PageQuery, SoilAnalysis, SoilAnalysisRequest, SoilAnalysisResponse,
        SoilRecordRequest,
    },
    state::AppState,
    validation::{parse_crops, parse_path_user_id, parse_user_id, provided, required, string_field},
};

/// Classifies the soil in an uploaded photo and stores the result.
///
/// The photo is kept by reference only; the soil type comes from the
/// classifier's random source.
#[utoipa::path(
    post,
    path = "/soil-analysis",
    request_body = SoilAnalysisRequest,
    responses(
        (status = 201, description = "Analysis stored", body = SoilAnalysisResponse),
        (status = 400, description = "MISSING_FIELDS or INVALID_USER_ID", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "soil"
)]
pub async fn analyze_soil(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<SoilAnalysisRequest>,
) -> Result<(StatusCode, Json<SoilAnalysisResponse>), AppError> {
    let (Some(user_id), Some(image_url)) =
        (provided(req.user_id), required(string_field(req.image_url)))
    else {
        return Err(ValidationError::MissingSoilFields.into());
    };
    let user_id = parse_user_id(&user_id)?;
    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let report = state.classifier.classify();
    let row = state
        .store
        .insert_soil_analysis(NewSoilAnalysis {
            user_id,
            image_url,
            soil_type: report.soil_type,
            recommendations: report.recommendations,
            crops: report.crops,
            analysis_date: Utc::now(),
        })
        .await?;

    info!(user_id, analysis_id = row.id, soil_type = %row.soil_type, "soil analysed");
    Ok((
        StatusCode::CREATED,
        Json(SoilAnalysisResponse {
            id: row.id,
            soil_type: row.soil_type,
            crops: row.crops,
            recommendations: row.recommendations,
        }),
    ))
}

/// Stores an analysis produced outside this service.
#[utoipa::path(
    post,
    path = "/records/soil-analysis",
    request_body = SoilRecordRequest,
    responses(
        (status = 201, description = "Stored", body = SoilAnalysis),
        (status = 400, description = "MISSING_FIELDS, INVALID_USER_ID or INVALID_CROPS", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "soil"
)]
pub async fn record_soil_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<SoilRecordRequest>,
) -> Result<(StatusCode, Json<SoilAnalysis>), AppError> {
    let (Some(user_id), Some(image_url), Some(soil_type), Some(recommendations), Some(crops)) = (
        provided(req.user_id),
        required(string_field(req.image_url)),
        required(string_field(req.soil_type)),
        required(string_field(req.recommendations)),
        req.crops,
    ) else {
        return Err(ValidationError::MissingSoilRecordFields.into());
    };
    let user_id = parse_user_id(&user_id)?;
    let crops = parse_crops(&crops)?;

    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let row = state
        .store
        .insert_soil_analysis(NewSoilAnalysis {
            user_id,
            image_url,
            soil_type,
            recommendations,
            crops,
            analysis_date: req.analysis_date.unwrap_or_else(Utc::now),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/soil-analysis/{user_id}",
    params(
        ("user_id" = i64, Path, description = "Owner of the analyses"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Newest first", body = [SoilAnalysis]),
        (status = 400, description = "INVALID_USER_ID or INVALID_PAGINATION", body = ErrorBody),
        (status = 404, description = "USER_NOT_FOUND", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "soil"
)]
pub async fn soil_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<SoilAnalysis>>, AppError> {
    let user_id = parse_path_user_id(&user_id)?;
    let page = query.page()?;
    auth.ensure_owner(user_id)?;
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::UserNotFound);
    }

    let rows = state.store.list_soil_analyses(user_id, page).await?;
    Ok(Json(rows))
}
