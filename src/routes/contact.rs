use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::domain::contact::{NewContact, NewContactBody};
use crate::domain::device_info::DeviceInfo;
use crate::domain::location_info::LocationInfo;
use crate::email_client::EmailClient;
use crate::rate_limit::ContactLimiter;
use crate::routes::request_info::{client_ip, validate_origin};
use crate::routes::response::ApiResponse;
use crate::startup::AdminEmail;
use crate::store::FileStore;

#[tracing::instrument(
    name = "Capturing a contact form submission",
    skip(request, body, store, email_client, limiter, admin),
    fields(contact_email = %body.email)
)]
pub async fn handle_contact(
    request: HttpRequest,
    body: web::Json<NewContactBody>,
    store: web::Data<FileStore>,
    email_client: web::Data<EmailClient>,
    limiter: web::Data<ContactLimiter>,
    admin: web::Data<AdminEmail>,
) -> impl Responder {
    if !validate_origin(&request) {
        return HttpResponse::Forbidden().json(ApiResponse::failure("Origin not allowed"));
    }

    let client_ip = client_ip(&request);
    if !limiter.0.check(&format!("contact_{}", client_ip)) {
        tracing::info!("Rate limited contact attempt from {}", client_ip);
        return HttpResponse::TooManyRequests()
            .json(ApiResponse::failure("Too many requests. Please try again later."));
    }

    let new_contact: NewContact = match (&*body).try_into() {
        Ok(new_contact) => new_contact,
        Err(err) => {
            tracing::info!("Rejected contact payload: {}", err);
            return HttpResponse::BadRequest().json(ApiResponse::failure(&err));
        }
    };

    let user_agent = request
        .headers()
        .get("User-Agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let device = DeviceInfo::from_user_agent(user_agent, body.screen_width, body.screen_height);
    let location = LocationInfo::from_ip(&client_ip);

    let notification_html = format!(
        "<p>New contact message from {} &lt;{}&gt;</p><p>Subject: {}</p><p>{}</p>",
        new_contact.name,
        new_contact.email.as_ref(),
        new_contact.subject,
        new_contact.message
    );

    // Same best-effort policy as subscriptions: a failed write is logged,
    // the admin notification is still attempted.
    if let Err(err) = store.save_contact(new_contact, device, location).await {
        tracing::error!("Failed to persist contact: {:?}", err);
    }

    if let Err(err) = email_client
        .send_email(admin.0.clone(), "New contact message", &notification_html)
        .await
    {
        tracing::error!("Failed to send contact notification: {:?}", err);
        return HttpResponse::InternalServerError()
            .json(ApiResponse::failure("Failed to process the message"));
    }

    HttpResponse::Ok().json(ApiResponse::success(json!({ "received": true })))
}
