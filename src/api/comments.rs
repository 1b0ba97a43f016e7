use actix_web::{web, HttpResponse};

use super::failure;
use crate::database::DocumentStore;
use crate::models::{ApiResponse, NewComment};
use crate::services::community_service;

#[utoipa::path(
    post,
    path = "/api/v1/add-comment",
    tag = "Community",
    request_body = NewComment,
    responses((status = 201, description = "Comment post successfully", body = crate::models::InsertResult))
)]
pub async fn add_comment(store: web::Data<dyn DocumentStore>, request: web::Json<NewComment>) -> HttpResponse {
    match community_service::add_comment(store.get_ref(), request.into_inner()).await {
        Ok(result) => {
            log::info!("💬 Comment added: {}", result.inserted_id);
            HttpResponse::Created().json(ApiResponse::ok("Comment post successfully", result))
        }
        Err(e) => failure("Add comment", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/all-comments",
    tag = "Community",
    responses((status = 200, description = "Comments retrieved successfully", body = [crate::models::Comment]))
)]
pub async fn all_comments(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    match community_service::list_comments(store.get_ref()).await {
        Ok(comments) => HttpResponse::Ok().json(ApiResponse::ok("Comments retrieved successfully", comments)),
        Err(e) => failure("List comments", e),
    }
}
