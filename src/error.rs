use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::StoreError;

/// Request-shape failures, each carrying a stable machine-readable code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required: email, password, name, phoneNumber, location")]
    MissingSignupFields,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Message and user ID are required")]
    MissingChatFields,
    #[error("Image URL and user ID are required")]
    MissingSoilFields,
    #[error("Required fields: userId, message, response, language")]
    MissingChatRecordFields,
    #[error("Required fields: userId, imageUrl, soilType, recommendations, crops")]
    MissingSoilRecordFields,
    #[error("Fields cannot be empty after trimming")]
    EmptyFields,
    #[error("Crops must be an array of strings")]
    InvalidCrops,
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Message is required")]
    MissingMessage,
    #[error("Rating is required")]
    MissingRating,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Rating must be between 1 and 5")]
    InvalidRating,
    #[error("Valid user ID is required")]
    InvalidUserId,
    #[error("Location is required")]
    MissingLocation,
    #[error("Input is required")]
    MissingInput,
    #[error("limit and offset must be integers")]
    InvalidPagination,
}

impl ValidationError {
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingSignupFields
            | Self::MissingChatFields
            | Self::MissingSoilFields
            | Self::MissingChatRecordFields
            | Self::MissingSoilRecordFields => "MISSING_FIELDS",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::EmptyFields => "EMPTY_FIELDS",
            Self::InvalidCrops => "INVALID_CROPS",
            Self::MissingName => "MISSING_NAME",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::MissingMessage => "MISSING_MESSAGE",
            Self::MissingRating => "MISSING_RATING",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidRating => "INVALID_RATING",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::MissingLocation => "MISSING_LOCATION",
            Self::MissingInput => "MISSING_INPUT",
            Self::InvalidPagination => "INVALID_PAGINATION",
        }
    }
}

/// JSON shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable machine-readable code, e.g. `USER_EXISTS`.
    pub code: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request body: {0}")]
    InvalidBody(String),

    #[error("Malformed query string: {0}")]
    InvalidQuery(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Token does not belong to the requested user")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Location not found")]
    LocationNotFound,

    #[error("Weather API key not configured")]
    WeatherNotConfigured,

    #[error("AI API key not configured")]
    AssistantNotConfigured,

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) | AppError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UserExists => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::LocationNotFound => StatusCode::NOT_FOUND,
            AppError::WeatherNotConfigured
            | AppError::AssistantNotConfigured
            | AppError::Upstream(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(v) => v.code(),
            AppError::InvalidBody(_) => "INVALID_BODY",
            AppError::InvalidQuery(_) => "INVALID_QUERY",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::UserExists => "USER_EXISTS",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::LocationNotFound => "LOCATION_NOT_FOUND",
            AppError::WeatherNotConfigured => "WEATHER_NOT_CONFIGURED",
            AppError::AssistantNotConfigured => "ASSISTANT_NOT_CONFIGURED",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::UserExists,
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Server-side details stay in the log.
        let message = match &self {
            AppError::Upstream(_) => {
                tracing::warn!(error = %self, "upstream request failed");
                "Upstream service unavailable".to_string()
            }
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorBody {
            error: message,
            code: self.code().to_owned(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::from(ValidationError::InvalidRating), StatusCode::BAD_REQUEST, "INVALID_RATING")]
    #[case(AppError::UserExists, StatusCode::BAD_REQUEST, "USER_EXISTS")]
    #[case(AppError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")]
    #[case(AppError::UserNotFound, StatusCode::NOT_FOUND, "USER_NOT_FOUND")]
    #[case(AppError::Forbidden, StatusCode::FORBIDDEN, "FORBIDDEN")]
    #[case(AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")]
    fn status_and_code(#[case] err: AppError, #[case] status: StatusCode, #[case] code: &str) {
        assert_eq!(err.status(), status);
        assert_eq!(err.code(), code);
    }

    #[test]
    fn duplicate_email_maps_to_user_exists() {
        assert!(matches!(
            AppError::from(StoreError::DuplicateEmail),
            AppError::UserExists
        ));
    }

    #[test]
    fn missing_field_groups_share_a_code() {
        assert_eq!(ValidationError::MissingSignupFields.code(), "MISSING_FIELDS");
        assert_eq!(ValidationError::MissingChatFields.code(), "MISSING_FIELDS");
        assert_eq!(ValidationError::MissingSoilRecordFields.code(), "MISSING_FIELDS");
    }
}
