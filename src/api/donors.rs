use actix_web::{web, HttpResponse};

use super::{empty_list, failure};
use crate::database::DocumentStore;
use crate::models::{ApiResponse, DonationUpdate, NewDonor};
use crate::services::donor_service;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/v1/add-donor",
    tag = "Donors",
    request_body = NewDonor,
    responses((status = 201, description = "Donor added successfully", body = crate::models::InsertResult))
)]
pub async fn add_donor(store: web::Data<dyn DocumentStore>, request: web::Json<NewDonor>) -> HttpResponse {
    log::info!("💝 POST /add-donor - email: {}", request.email);

    match donor_service::create_donor(store.get_ref(), request.into_inner()).await {
        Ok(result) => HttpResponse::Created().json(ApiResponse::ok("Donor added successfully", result)),
        Err(e) => failure("Add donor", e),
    }
}

/// GET /api/v1/all-donor - largest total first
#[utoipa::path(
    get,
    path = "/api/v1/all-donor",
    tag = "Donors",
    responses(
        (status = 200, description = "Donors retrieved successfully", body = [crate::models::Donor]),
        (status = 404, description = "No donors found")
    )
)]
pub async fn all_donors(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    match donor_service::list_donors(store.get_ref()).await {
        Ok(donors) => HttpResponse::Ok().json(ApiResponse::ok("Donors retrieved successfully", donors)),
        Err(AppError::NotFound(message)) => empty_list(message),
        Err(e) => failure("List donors", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/donor/{email}",
    tag = "Donors",
    params(("email" = String, Path, description = "Donor email")),
    responses(
        (status = 200, description = "Donor retrieved successfully", body = crate::models::Donor),
        (status = 404, description = "No donor found")
    )
)]
pub async fn get_donor(store: web::Data<dyn DocumentStore>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    match donor_service::get_donor(store.get_ref(), &email).await {
        Ok(donor) => HttpResponse::Ok().json(ApiResponse::ok("Donor retrieved successfully", donor)),
        Err(e) => failure("Get donor", e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/update-donate-amount/{email}",
    tag = "Donors",
    params(("email" = String, Path, description = "Donor email")),
    request_body = DonationUpdate,
    responses(
        (status = 200, description = "Donation successfully"),
        (status = 400, description = "Total would decrease"),
        (status = 404, description = "No donor found")
    )
)]
pub async fn update_donate_amount(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    request: web::Json<DonationUpdate>,
) -> HttpResponse {
    let email = path.into_inner();
    log::info!(
        "💰 PATCH /update-donate-amount/{} - total: {}, post: {}",
        email,
        request.total_amount,
        request.post.post_id
    );

    match donor_service::update_donation(store.get_ref(), &email, request.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::done("Donation successfully")),
        Err(e) => failure("Update donation", e),
    }
}
