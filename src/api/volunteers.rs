use actix_web::{web, HttpResponse};

use super::{empty_list, failure};
use crate::database::DocumentStore;
use crate::models::{ApiResponse, NewVolunteer};
use crate::services::community_service;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/v1/add-volunteer",
    tag = "Community",
    request_body = NewVolunteer,
    responses((status = 201, description = "Volunteer added successfully", body = crate::models::InsertResult))
)]
pub async fn add_volunteer(store: web::Data<dyn DocumentStore>, request: web::Json<NewVolunteer>) -> HttpResponse {
    log::info!("🙋 POST /add-volunteer - email: {}", request.email);

    match community_service::add_volunteer(store.get_ref(), request.into_inner()).await {
        Ok(result) => HttpResponse::Created().json(ApiResponse::ok("Volunteer added successfully", result)),
        Err(e) => failure("Add volunteer", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/all-volunteer",
    tag = "Community",
    responses(
        (status = 200, description = "Volunteer retrieved successfully", body = [crate::models::Volunteer]),
        (status = 404, description = "No Volunteer found")
    )
)]
pub async fn all_volunteers(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    match community_service::list_volunteers(store.get_ref()).await {
        Ok(volunteers) => HttpResponse::Ok().json(ApiResponse::ok("Volunteer retrieved successfully", volunteers)),
        Err(AppError::NotFound(message)) => empty_list(message),
        Err(e) => failure("List volunteers", e),
    }
}
