use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub exp: i64,
}

/// The user id carried by a valid `Authorization: Bearer` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl AuthUser {
    /// Rejects requests that name a user other than the token holder.
    pub fn ensure_owner(self, user_id: i64) -> Result<(), AppError> {
        if self.0 == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = verify_token(token, &state.config)?;
        Ok(AuthUser(claims.sub))
    }
}

pub fn create_token(user_id: i64, email: &str, config: &Config) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(config.jwt_expiry_hours)).timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssistantConfig, WeatherConfig};

    fn config(secret: &str) -> Config {
        Config {
            database_url: None,
            jwt_secret: secret.into(),
            jwt_expiry_hours: 1,
            bind_addr: ([127, 0, 0, 1], 0).into(),
            bcrypt_cost: 4,
            soil_seed: None,
            weather: WeatherConfig {
                api_key: None,
                base_url: String::new(),
            },
            assistant: AssistantConfig {
                api_key: None,
                model: String::new(),
            },
        }
    }

    #[test]
    fn token_round_trips_subject() {
        let cfg = config("s3cret");
        let token = create_token(42, "farmer@test.com", &cfg).expect("token");
        let claims = verify_token(&token, &cfg).expect("claims");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "farmer@test.com");
    }

    #[test]
    fn token_from_other_secret_is_unauthorized() {
        let token = create_token(1, "a@b.co", &config("one")).expect("token");
        let err = verify_token(&token, &config("two")).expect_err("wrong secret");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn ownership_is_enforced() {
        assert!(AuthUser(3).ensure_owner(3).is_ok());
        assert!(matches!(AuthUser(3).ensure_owner(4), Err(AppError::Forbidden)));
    }
}
