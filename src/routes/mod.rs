use actix_web::HttpResponse;

mod contact;
mod health_check;
mod request_info;
mod response;
mod stats;
mod subscriptions;

pub use contact::handle_contact;
pub use health_check::health_check;
pub use request_info::{client_ip, validate_origin};
pub use response::ApiResponse;
pub use stats::{contact_stats, subscriber_stats};
pub use subscriptions::handle_subscribe;

/// CORS preflight answer for the form endpoints. The allow-origin header
/// itself is set globally in `startup::run`.
pub async fn cors_preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .finish()
}
