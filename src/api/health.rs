use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::models::ApiResponse;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(
        "Server is running smoothly",
        HealthResponse {
            status: "healthy".to_string(),
            service: "donation-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        },
    ))
}
