use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub response: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatEntry {
    pub user_id: i64,
    pub message: String,
    pub response: String,
    pub language: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub language: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// An exchange produced elsewhere (e.g. by the voice assistant) to be logged as-is.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecordRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub response: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub language: Option<Value>,
}
