use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreError};
use crate::models::{
    ChatEntry, Feedback, NewChatEntry, NewFeedback, NewSoilAnalysis, NewUser, Page, SoilAnalysis,
    User,
};

const USER_COLUMNS: &str =
    "id, email, password_hash, name, phone_number, location, language, created_at";
const SOIL_COLUMNS: &str =
    "id, user_id, image_url, soil_type, recommendations, crops, analysis_date, created_at";
const CHAT_COLUMNS: &str = "id, user_id, message, response, language, created_at";
const FEEDBACK_COLUMNS: &str = "id, user_id, name, email, message, rating, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `%`, `_` and `\` so user input is matched literally by `ILIKE`.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, name, phone_number, location, language)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.phone_number)
        .bind(&user.location)
        .bind(&user.language)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::DuplicateEmail;
                }
            }
            StoreError::Database(e)
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_soil_analysis(
        &self,
        analysis: NewSoilAnalysis,
    ) -> Result<SoilAnalysis, StoreError> {
        let row = sqlx::query_as::<_, SoilAnalysis>(&format!(
            "INSERT INTO soil_analysis (user_id, image_url, soil_type, recommendations, crops, analysis_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SOIL_COLUMNS}"
        ))
        .bind(analysis.user_id)
        .bind(&analysis.image_url)
        .bind(&analysis.soil_type)
        .bind(&analysis.recommendations)
        .bind(&analysis.crops)
        .bind(analysis.analysis_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_soil_analyses(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<SoilAnalysis>, StoreError> {
        let rows = sqlx::query_as::<_, SoilAnalysis>(&format!(
            "SELECT {SOIL_COLUMNS} FROM soil_analysis
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_chat(&self, entry: NewChatEntry) -> Result<ChatEntry, StoreError> {
        let row = sqlx::query_as::<_, ChatEntry>(&format!(
            "INSERT INTO chat_history (user_id, message, response, language)
            VALUES ($1, $2, $3, $4)
            RETURNING {CHAT_COLUMNS}"
        ))
        .bind(entry.user_id)
        .bind(&entry.message)
        .bind(&entry.response)
        .bind(&entry.language)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_chats(&self, user_id: i64, page: Page) -> Result<Vec<ChatEntry>, StoreError> {
        let rows = sqlx::query_as::<_, ChatEntry>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chat_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        let row = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedback (user_id, name, email, message, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(feedback.user_id)
        .bind(&feedback.name)
        .bind(&feedback.email)
        .bind(&feedback.message)
        .bind(feedback.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_feedback(
        &self,
        page: Page,
        search: Option<&str>,
    ) -> Result<Vec<Feedback>, StoreError> {
        let rows = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback
            WHERE $1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1 OR message ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3"
        ))
        .bind(search.map(like_pattern))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
