use std::net::TcpListener;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::{error, middleware, web, App, HttpRequest, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::email_client::EmailClient;
use crate::rate_limit::{ContactLimiter, RateLimiter, SubscribeLimiter};
use crate::routes::{
    contact_stats, cors_preflight, handle_contact, handle_subscribe, health_check,
    subscriber_stats, ApiResponse,
};
use crate::store::FileStore;

pub struct ApplicationBaseUrl(pub String);

pub struct AdminEmail(pub SubscriberEmail);

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let sender_email = config
            .get_email_client_sender()
            .expect("Sender email is not valid");
        let admin_email = config
            .get_email_client_admin()
            .expect("Admin email is not valid");
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            sender_email,
            config.get_email_client_api(),
            None,
        );
        let store = FileStore::new(config.get_data_dir());
        let subscribe_limiter = SubscribeLimiter(RateLimiter::new(
            config.rate_limit.subscribe_max_attempts,
            Duration::from_secs(config.rate_limit.subscribe_window_secs),
        ));
        let contact_limiter = ContactLimiter(RateLimiter::new(
            config.rate_limit.contact_max_attempts,
            Duration::from_secs(config.rate_limit.contact_window_secs),
        ));

        let listener =
            TcpListener::bind(config.get_address()).expect("Failed to bind the address.");
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            store,
            email_client,
            AdminEmail(admin_email),
            ApplicationBaseUrl(config.get_app_base_url()),
            subscribe_limiter,
            contact_limiter,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    store: FileStore,
    email_client: EmailClient,
    admin_email: AdminEmail,
    base_url: ApplicationBaseUrl,
    subscribe_limiter: SubscribeLimiter,
    contact_limiter: ContactLimiter,
) -> Result<Server, std::io::Error> {
    let store = web::Data::new(store);
    let email_client = web::Data::new(email_client);
    let admin_email = web::Data::new(admin_email);
    let base_url = web::Data::new(base_url);
    let subscribe_limiter = web::Data::new(subscribe_limiter);
    let contact_limiter = web::Data::new(contact_limiter);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY"))
                    .add(("X-XSS-Protection", "1; mode=block")),
            )
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .service(
                // Resources answer 405 for any verb that is not routed here
                web::resource("/api/subscribe")
                    .route(web::post().to(handle_subscribe))
                    .route(web::method(Method::OPTIONS).to(cors_preflight)),
            )
            .service(
                web::resource("/api/contact")
                    .route(web::post().to(handle_contact))
                    .route(web::method(Method::OPTIONS).to(cors_preflight)),
            )
            .route("/api/stats/subscribers", web::get().to(subscriber_stats))
            .route("/api/stats/contacts", web::get().to(contact_stats))
            .app_data(store.clone())
            .app_data(email_client.clone())
            .app_data(admin_email.clone())
            .app_data(base_url.clone())
            .app_data(subscribe_limiter.clone())
            .app_data(contact_limiter.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

// Malformed JSON never reaches a handler; actix's default reply leaks the
// deserialization error, so map it to the generic envelope instead.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let response =
        actix_web::HttpResponse::BadRequest().json(ApiResponse::failure("Invalid request body"));

    error::InternalError::from_response(err, response).into()
}
