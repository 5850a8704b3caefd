// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place queries
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ServiceError;
use crate::models::{SearchParams, ViewParams};
use crate::services::QueryService;
use actix_web::{web, HttpResponse, Responder};

/// GET /search?q=...
/// Places whose postal code, name or state start with the query words
pub async fn search(
    service: web::Data<QueryService>,
    query: web::Query<SearchParams>,
) -> Result<impl Responder, ServiceError> {
    let places = service.search_places(query.q.as_deref()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /update?sw=lat,lng&ne=lat,lng
/// Up to 10 places inside the map viewport, resampled on each call
pub async fn update(
    service: web::Data<QueryService>,
    query: web::Query<ViewParams>,
) -> Result<impl Responder, ServiceError> {
    let places = service
        .places_in_view(query.sw.as_deref(), query.ne.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(places))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search))
        .route("/update", web::get().to(update));
}
