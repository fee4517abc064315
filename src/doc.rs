//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorBody;
use crate::models::{
    AuthResponse, ChatEntry, ChatRecordRequest, ChatRequest, ChatResponse, Feedback,
    FeedbackRequest, LoginRequest, SignupRequest, SoilAnalysis, SoilAnalysisRequest,
    SoilAnalysisResponse, SoilRecordRequest, User, VoiceRequest, VoiceResponse, WeatherReport,
};

/// Registers the JWT bearer scheme issued by signup and login.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    info(
        title = "Krishi Sahayak API",
        description = "Accounts, keyword chat, soil analysis, weather and feedback for Karnataka farmers."
    ),
    paths(
        crate::handlers::health,
        crate::handlers::signup,
        crate::handlers::login,
        crate::handlers::chat,
        crate::handlers::record_chat,
        crate::handlers::chat_history,
        crate::handlers::analyze_soil,
        crate::handlers::record_soil_analysis,
        crate::handlers::soil_history,
        crate::handlers::create_feedback,
        crate::handlers::list_feedback,
        crate::handlers::weather,
        crate::handlers::voice_assistant,
    ),
    components(schemas(
        ErrorBody,
        User,
        SignupRequest,
        LoginRequest,
        AuthResponse,
        ChatRequest,
        ChatResponse,
        ChatRecordRequest,
        ChatEntry,
        SoilAnalysisRequest,
        SoilAnalysisResponse,
        SoilRecordRequest,
        SoilAnalysis,
        FeedbackRequest,
        Feedback,
        WeatherReport,
        VoiceRequest,
        VoiceResponse,
    )),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "chat", description = "Keyword chat and its history"),
        (name = "soil", description = "Soil analysis and its history"),
        (name = "feedback", description = "Visitor feedback"),
        (name = "weather", description = "Current weather by location"),
        (name = "assistant", description = "Language-model voice assistant"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
