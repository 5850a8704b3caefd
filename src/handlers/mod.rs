// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod articles;
pub mod health;
pub mod places;

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

pub use articles::config as articles_config;
pub use health::config as health_config;
pub use places::config as places_config;

/// Responses must never be cached by the browser or proxies
pub fn no_cache_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .add((header::EXPIRES, "0"))
        .add((header::PRAGMA, "no-cache"))
}
