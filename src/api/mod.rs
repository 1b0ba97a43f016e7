pub mod auth;
pub mod comments;
pub mod donors;
pub mod health;
pub mod posts;
pub mod swagger;
pub mod testimonials;
pub mod volunteers;

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::middleware::AuthMiddleware;
use crate::models::ApiResponse;
use crate::utils::AppError;

/// Registers every endpoint. Shared by `main` and the HTTP tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid path: {}", err)).into()
    }))
    // Health check
    .route("/", web::get().to(health::health_check))
    .service(
        web::scope("/api/v1")
            // Users
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/user/{email}", web::get().to(auth::get_user))
            // Posts: writes require a token
            .service(
                web::resource("/add-post")
                    .wrap(AuthMiddleware)
                    .route(web::post().to(posts::add_post)),
            )
            .route("/all-post", web::get().to(posts::all_posts))
            .route("/post/{id}", web::get().to(posts::get_post))
            .service(
                web::resource("/delete-post/{id}")
                    .wrap(AuthMiddleware)
                    .route(web::delete().to(posts::delete_post)),
            )
            .service(
                web::resource("/update-post/{id}")
                    .wrap(AuthMiddleware)
                    .route(web::patch().to(posts::update_post)),
            )
            // Donors
            .route("/add-donor", web::post().to(donors::add_donor))
            .route("/all-donor", web::get().to(donors::all_donors))
            .route("/donor/{email}", web::get().to(donors::get_donor))
            .route("/update-donate-amount/{email}", web::patch().to(donors::update_donate_amount))
            // Volunteers, testimonials, comments
            .route("/add-volunteer", web::post().to(volunteers::add_volunteer))
            .route("/all-volunteer", web::get().to(volunteers::all_volunteers))
            .route("/add-testimonials", web::post().to(testimonials::add_testimonial))
            .route("/all-testimonials/{id}", web::get().to(testimonials::testimonials_for_post))
            .route("/add-comment", web::post().to(comments::add_comment))
            .route("/all-comments", web::get().to(comments::all_comments)),
    )
    .default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    log::warn!("⚠️  No route for {} {}", req.method(), req.path());
    AppError::NotFound("Route not found".to_string()).error_response()
}

/// Logs a failed request and renders the error envelope.
pub(crate) fn failure(context: &str, e: AppError) -> HttpResponse {
    if e.status_code().is_client_error() {
        log::warn!("❌ {} failed: {}", context, e);
    }
    e.error_response()
}

/// 404 for listings that keep an empty array in `data`.
pub(crate) fn empty_list(message: String) -> HttpResponse {
    log::warn!("⚠️  {}", message);
    HttpResponse::NotFound().json(ApiResponse {
        success: false,
        message,
        data: Some(Vec::<()>::new()),
    })
}
