use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::domain::device_info::DeviceInfo;
use crate::domain::location_info::LocationInfo;
use crate::domain::new_subscriber::{NewSubscriber, NewSubscriberBody};
use crate::domain::subscriber_email::SubscriberEmail;
use crate::email_client::EmailClient;
use crate::rate_limit::SubscribeLimiter;
use crate::routes::request_info::{client_ip, validate_origin};
use crate::routes::response::ApiResponse;
use crate::startup::{AdminEmail, ApplicationBaseUrl};
use crate::store::FileStore;

#[tracing::instrument(
    name = "Capturing a newsletter subscription",
    skip(request, body, store, email_client, limiter, admin, base_url),
    fields(
        subscriber_email = %body.email,
        subscribe_source = %body.source
    )
)]
pub async fn handle_subscribe(
    request: HttpRequest,
    body: web::Json<NewSubscriberBody>,
    store: web::Data<FileStore>,
    email_client: web::Data<EmailClient>,
    limiter: web::Data<SubscribeLimiter>,
    admin: web::Data<AdminEmail>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> impl Responder {
    if !validate_origin(&request) {
        return HttpResponse::Forbidden().json(ApiResponse::failure("Origin not allowed"));
    }

    let client_ip = client_ip(&request);
    if !limiter.0.check(&format!("subscribe_{}", client_ip)) {
        tracing::info!("Rate limited subscription attempt from {}", client_ip);
        return HttpResponse::TooManyRequests()
            .json(ApiResponse::failure("Too many requests. Please try again later."));
    }

    let new_subscriber: NewSubscriber = match (&*body).try_into() {
        Ok(new_subscriber) => new_subscriber,
        Err(err) => {
            tracing::info!("Rejected subscription payload: {}", err);
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

    // Best effort: losing a record silently is considered less bad than
    // failing the signup, so the welcome email still goes out.
    let record_id = match store.save_subscriber(&new_subscriber, device, location).await {
        Ok(subscriber) => Some(subscriber.id),
        Err(err) => {
            tracing::error!("Failed to persist subscriber: {:?}", err);
            None
        }
    };

    if let Err(err) =
        send_subscription_emails(&email_client, &new_subscriber, &admin.0, &base_url.0).await
    {
        tracing::error!(
            "Failed to send subscription emails for {}: {:?}",
            new_subscriber.email.as_ref(),
            err
        );
        return HttpResponse::InternalServerError()
            .json(ApiResponse::failure("Failed to process the subscription"));
    }

    HttpResponse::Ok().json(ApiResponse::success(
        json!({ "subscribed": true, "id": record_id }),
    ))
}

#[tracing::instrument(
    name = "Send welcome and admin notification emails",
    skip(email_client, new_subscriber, admin, base_url)
)]
async fn send_subscription_emails(
    email_client: &EmailClient,
    new_subscriber: &NewSubscriber,
    admin: &SubscriberEmail,
    base_url: &str,
) -> Result<(), reqwest::Error> {
    let welcome_html = format!(
        r#"
            <div>
                <h1>Welcome to the newsletter!</h1>
                <p>You are all set. Visit us any time at <a href="{}">{}</a>.</p>
            </div>
        "#,
        base_url, base_url
    );

    email_client
        .send_email(
            new_subscriber.email.clone(),
            "Welcome to the newsletter",
            welcome_html.as_str(),
        )
        .await?;

    let notification_html = format!(
        "<p>New subscriber: {} (source: {})</p>",
        new_subscriber.email.as_ref(),
        new_subscriber.source.as_ref()
    );

    email_client
        .send_email(
            admin.clone(),
            "New newsletter subscriber",
            notification_html.as_str(),
        )
        .await
}
