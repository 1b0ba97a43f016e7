use actix_web::{web, HttpResponse};

use super::failure;
use crate::database::DocumentStore;
use crate::models::{ApiResponse, LoginRequest, RegisterRequest};
use crate::services::auth_service::{self, CredentialService};

#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "User already exists or invalid body")
    )
)]
pub async fn register(
    store: web::Data<dyn DocumentStore>,
    credentials: web::Data<CredentialService>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email = request.email.clone();
    log::info!("📝 POST /register - email: {}", email);

    match auth_service::register(store.get_ref(), &credentials, request).await {
        Ok(()) => {
            log::info!("✅ Registration successful: {}", email);
            HttpResponse::Created().json(ApiResponse::done("User registered successfully"))
        }
        Err(e) => failure("Registration", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = crate::models::LoginData),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    store: web::Data<dyn DocumentStore>,
    credentials: web::Data<CredentialService>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    log::info!("🔐 POST /login - email: {}", request.email);

    match auth_service::login(store.get_ref(), &credentials, request).await {
        Ok(data) => {
            log::info!("✅ Login successful: {}", data.email);
            HttpResponse::Ok().json(ApiResponse::ok("Login successful", data))
        }
        Err(e) => failure("Login", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/user/{email}",
    tag = "Auth",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User retrieved successfully", body = crate::models::UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(store: web::Data<dyn DocumentStore>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("👤 GET /user/{}", email);

    match auth_service::get_user(store.get_ref(), &email).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::ok("User retrieved successfully", user)),
        Err(e) => failure("Get user", e),
    }
}
