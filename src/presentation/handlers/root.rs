use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(WelcomeResponse {
            message: "Welcome to the Document Processing API".to_string(),
        }),
    )
}
