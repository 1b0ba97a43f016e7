use actix_web::{web, HttpResponse};

use super::failure;
use crate::database::DocumentStore;
use crate::middleware::auth::Claims;
use crate::models::{ApiResponse, NewPost, UpdatePost};
use crate::services::post_service;

/// POST /api/v1/add-post - requires a token; the author is taken from it
#[utoipa::path(
    post,
    path = "/api/v1/add-post",
    tag = "Posts",
    request_body = NewPost,
    responses(
        (status = 201, description = "Post added successfully", body = crate::models::InsertResult),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_post(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    request: web::Json<NewPost>,
) -> HttpResponse {
    log::info!("📝 POST /add-post - by {}", user.email);

    match post_service::create_post(store.get_ref(), request.into_inner(), &user.email).await {
        Ok(result) => {
            log::info!("✅ Post added: {}", result.inserted_id);
            HttpResponse::Created().json(ApiResponse::ok("Post added successfully", result))
        }
        Err(e) => failure("Add post", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/all-post",
    tag = "Posts",
    responses((status = 200, description = "Posts retrieved successfully", body = [crate::models::Post]))
)]
pub async fn all_posts(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    match post_service::list_posts(store.get_ref()).await {
        Ok(posts) => {
            log::info!("📋 GET /all-post - {} posts", posts.len());
            HttpResponse::Ok().json(ApiResponse::ok("Posts retrieved successfully", posts))
        }
        Err(e) => failure("List posts", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/post/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id (hex ObjectId)")),
    responses(
        (status = 200, description = "Post retrieved successfully", body = crate::models::Post),
        (status = 404, description = "No posts found")
    )
)]
pub async fn get_post(store: web::Data<dyn DocumentStore>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔍 GET /post/{}", id);

    match post_service::get_post(store.get_ref(), &id).await {
        Ok(post) => HttpResponse::Ok().json(ApiResponse::ok("Post retrieved successfully", post)),
        Err(e) => failure("Get post", e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/delete-post/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id (hex ObjectId)")),
    responses(
        (status = 200, description = "Post deleted successfully"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No posts found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_post(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /delete-post/{} - by {}", id, user.email);

    match post_service::delete_post(store.get_ref(), &id).await {
        Ok(()) => {
            log::info!("✅ Post deleted: {}", id);
            HttpResponse::Ok().json(ApiResponse::done("Post deleted successfully"))
        }
        Err(e) => failure("Delete post", e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/update-post/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id (hex ObjectId)")),
    request_body = UpdatePost,
    responses(
        (status = 200, description = "Post updated successfully"),
        (status = 400, description = "No fields to update"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No posts found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_post(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    request: web::Json<UpdatePost>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("✏️ PATCH /update-post/{} - by {}", id, user.email);

    match post_service::update_post(store.get_ref(), &id, request.into_inner()).await {
        Ok(()) => {
            log::info!("✅ Post updated: {}", id);
            HttpResponse::Ok().json(ApiResponse::done("Post updated successfully"))
        }
        Err(e) => failure("Update post", e),
    }
}
