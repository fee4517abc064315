mod assistant;
mod auth;
mod chat;
mod feedback;
mod soil;
mod weather;

pub use assistant::*;
pub use auth::*;
pub use chat::*;
pub use feedback::*;
pub use soil::*;
pub use weather::*;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "OK"
}
