use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    pub id: i64,
    pub user_id: i64,
    pub image_url: String,
    pub soil_type: String,
    pub recommendations: String,
    pub crops: Vec<String>,
    pub analysis_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSoilAnalysis {
    pub user_id: i64,
    pub image_url: String,
    pub soil_type: String,
    pub recommendations: String,
    pub crops: Vec<String>,
    pub analysis_date: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResponse {
    pub id: i64,
    pub soil_type: String,
    pub crops: Vec<String>,
    pub recommendations: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoilRecordRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub soil_type: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub recommendations: Option<Value>,
    /// Checked by hand so a non-array is reported as `INVALID_CROPS`.
    #[schema(value_type = Option<Vec<String>>)]
    pub crops: Option<Value>,
    pub analysis_date: Option<DateTime<Utc>>,
}
