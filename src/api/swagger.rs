use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Donation Service API",
        version = "1.0.0",
        description = "REST API for the donation and volunteer platform.\n\n**Authentication:** creating, updating and deleting posts requires a JWT Bearer token obtained from `/api/v1/login`.\n\nEvery response uses the `{success, message, data}` envelope."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::get_user,

        // Posts
        crate::api::posts::add_post,
        crate::api::posts::all_posts,
        crate::api::posts::get_post,
        crate::api::posts::delete_post,
        crate::api::posts::update_post,

        // Donors
        crate::api::donors::add_donor,
        crate::api::donors::all_donors,
        crate::api::donors::get_donor,
        crate::api::donors::update_donate_amount,

        // Community
        crate::api::volunteers::add_volunteer,
        crate::api::volunteers::all_volunteers,
        crate::api::testimonials::add_testimonial,
        crate::api::testimonials::testimonials_for_post,
        crate::api::comments::add_comment,
        crate::api::comments::all_comments,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::LoginData,
            crate::models::UserProfile,
            crate::models::InsertResult,
            crate::models::Post,
            crate::models::NewPost,
            crate::models::UpdatePost,
            crate::models::Donor,
            crate::models::Contribution,
            crate::models::NewDonor,
            crate::models::DonationUpdate,
            crate::models::Volunteer,
            crate::models::NewVolunteer,
            crate::models::Testimonial,
            crate::models::NewTestimonial,
            crate::models::Comment,
            crate::models::NewComment,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check."),
        (name = "Auth", description = "Registration, login and user lookup."),
        (name = "Posts", description = "Donation posts. Writes require a bearer token."),
        (name = "Donors", description = "Donors and their running donation totals."),
        (name = "Community", description = "Volunteers, testimonials and comments."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/v1/login"))
                        .build(),
                ),
            );
        }
    }
}
