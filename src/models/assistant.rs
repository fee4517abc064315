use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VoiceRequest {
    #[schema(value_type = Option<String>)]
    pub input: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub language: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceResponse {
    pub response: String,
}
