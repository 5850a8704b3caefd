// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use crate::services::{ArticleCache, QueryService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

pub async fn health_check(
    service: web::Data<QueryService>,
    cache: web::Data<Arc<ArticleCache>>,
) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "mashup-places",
        "version": env!("CARGO_PKG_VERSION"),
        "places": service.store().row_count(),
        "article_cache": cache.stats().await
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
