use axum::{extract::State, http::StatusCode, Json};
use bcrypt::{hash, verify};
use tracing::info;

#[allow(unused_imports)] // named in `#[utoipa::path]` responses so the $ref is `ErrorBody`
use crate::error::ErrorBody;
use crate::{
    error::{AppError, ValidationError},
    extract::ApiJson,
    middleware::auth::create_token,
    models::{AuthResponse, LoginRequest, NewUser, SignupRequest, DEFAULT_LANGUAGE},
    state::AppState,
    validation::{normalize_email, required, string_field},
};

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "MISSING_FIELDS or USER_EXISTS", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (Some(email), Some(password), Some(name), Some(phone_number), Some(location)) = (
        required(string_field(req.email)),
        string_field(req.password).filter(|p| !p.is_empty()),
        required(string_field(req.name)),
        required(string_field(req.phone_number)),
        required(string_field(req.location)),
    ) else {
        return Err(ValidationError::MissingSignupFields.into());
    };

    let email = normalize_email(&email);
    // Checked up front for a clean error; the unique constraint still decides races.
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::UserExists);
    }

    let password_hash = hash_password(password, state.config.bcrypt_cost).await?;
    let user = state
        .store
        .create_user(NewUser {
            email,
            password_hash,
            name,
            phone_number,
            location,
            language: required(string_field(req.language)).unwrap_or_else(|| DEFAULT_LANGUAGE.into()),
        })
        .await?;

    info!(user_id = user.id, "user signed up");
    let token = create_token(user.id, &user.email, &state.config)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "MISSING_CREDENTIALS", body = ErrorBody),
        (status = 401, description = "INVALID_CREDENTIALS", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (Some(email), Some(password)) = (
        required(string_field(req.email)),
        string_field(req.password).filter(|p| !p.is_empty()),
    ) else {
        return Err(ValidationError::MissingCredentials.into());
    };

    // Unknown email and wrong password are reported identically.
    let Some(user) = state.store.find_user_by_email(&normalize_email(&email)).await? else {
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_token(user.id, &user.email, &state.config)?;
    Ok(Json(AuthResponse { user, token }))
}

/// Hashes on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}
