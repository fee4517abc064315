use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    doc::ApiDoc,
    handlers::{
        analyze_soil, chat, chat_history, create_feedback, health, list_feedback, login,
        record_chat, record_soil_analysis, signup, soil_history, voice_assistant, weather,
    },
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/chat", post(chat))
        .route("/chat/history/:user_id", get(chat_history))
        .route("/soil-analysis", post(analyze_soil))
        .route("/soil-analysis/:user_id", get(soil_history))
        .route("/records/chat", post(record_chat))
        .route("/records/soil-analysis", post(record_soil_analysis))
        .route("/feedback", get(list_feedback).post(create_feedback))
        .route("/weather", get(weather))
        .route("/voice-assistant", post(voice_assistant))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
