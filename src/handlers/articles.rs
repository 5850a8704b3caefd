// src/handlers/articles.rs
// DOCUMENTATION: HTTP handler for local news
// PURPOSE: Forward a location to the news provider and return its articles

use crate::errors::ServiceError;
use crate::models::ArticlesParams;
use crate::services::QueryService;
use actix_web::{web, HttpResponse, Responder};

/// GET /articles?geo=...
/// Look up articles for a location
pub async fn articles(
    service: web::Data<QueryService>,
    query: web::Query<ArticlesParams>,
) -> Result<impl Responder, ServiceError> {
    let articles = service.articles_for_geo(query.geo.as_deref()).await?;
    Ok(HttpResponse::Ok().json(articles))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/articles", web::get().to(articles));
}
