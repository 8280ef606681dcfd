use actix_web::{web, HttpResponse, Responder};

use crate::routes::response::ApiResponse;
use crate::store::FileStore;

#[tracing::instrument(name = "Subscriber stats handler", skip(store))]
pub async fn subscriber_stats(store: web::Data<FileStore>) -> impl Responder {
    let stats = store.subscriber_stats().await;

    HttpResponse::Ok().json(ApiResponse::success(
        serde_json::to_value(stats).unwrap_or_default(),
    ))
}

#[tracing::instrument(name = "Contact stats handler", skip(store))]
pub async fn contact_stats(store: web::Data<FileStore>) -> impl Responder {
    let stats = store.contact_stats().await;

    HttpResponse::Ok().json(ApiResponse::success(
        serde_json::to_value(stats).unwrap_or_default(),
    ))
}
