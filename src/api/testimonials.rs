use actix_web::{web, HttpResponse};

use super::failure;
use crate::database::DocumentStore;
use crate::models::{ApiResponse, NewTestimonial};
use crate::services::community_service;

#[utoipa::path(
    post,
    path = "/api/v1/add-testimonials",
    tag = "Community",
    request_body = NewTestimonial,
    responses((status = 201, description = "Testimonials added successfully", body = crate::models::InsertResult))
)]
pub async fn add_testimonial(
    store: web::Data<dyn DocumentStore>,
    request: web::Json<NewTestimonial>,
) -> HttpResponse {
    log::info!("💬 POST /add-testimonials - post: {}", request.post_id);

    match community_service::add_testimonial(store.get_ref(), request.into_inner()).await {
        Ok(result) => HttpResponse::Created().json(ApiResponse::ok("Testimonials added successfully", result)),
        Err(e) => failure("Add testimonial", e),
    }
}

/// GET /api/v1/all-testimonials/{id} - testimonials whose `postId` matches
#[utoipa::path(
    get,
    path = "/api/v1/all-testimonials/{id}",
    tag = "Community",
    params(("id" = String, Path, description = "Post id the testimonials belong to")),
    responses((status = 200, description = "Testimonials retrieved successfully", body = [crate::models::Testimonial]))
)]
pub async fn testimonials_for_post(store: web::Data<dyn DocumentStore>, path: web::Path<String>) -> HttpResponse {
    let post_id = path.into_inner();

    match community_service::list_testimonials(store.get_ref(), &post_id).await {
        Ok(testimonials) => {
            log::info!("📋 GET /all-testimonials/{} - {} found", post_id, testimonials.len());
            HttpResponse::Ok().json(ApiResponse::ok("Testimonials retrieved successfully", testimonials))
        }
        Err(e) => failure("List testimonials", e),
    }
}
