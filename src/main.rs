// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, open the places dataset, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use db::{PlaceStore, PrefixMatch};
use dotenv::dotenv;
use services::{start_cleanup_task, ArticleCache, ArticleLookup, NewsClient, QueryService};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting mashup places service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Open the places dataset; must finish before the first request
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open places dataset: {}", e);
            std::process::exit(1);
        }
    };
    let matching = PrefixMatch::from_config(config.search_case_insensitive);
    let store = match PlaceStore::open(pool, matching).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // 5. News lookup client with its response cache
    let cache = Arc::new(ArticleCache::new(config.articles_cache_ttl));
    log::info!(
        "Initialized article cache (TTL: {}s)",
        config.articles_cache_ttl
    );
    start_cleanup_task(cache.clone(), config.articles_cache_cleanup);

    let news = match NewsClient::new(
        config.articles_api_url.clone(),
        config.articles_fallback_url.clone(),
        Duration::from_secs(config.articles_timeout),
        cache.clone(),
    ) {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let news: Arc<dyn ArticleLookup> = Arc::new(news);
    log::info!(
        "News provider: {} (timeout: {}s)",
        config.articles_api_url,
        config.articles_timeout
    );

    let service = web::Data::new(QueryService::new(store, news));

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (query service and article cache)
            .app_data(service.clone())
            .app_data(web::Data::new(cache.clone()))
            // Middleware
            .wrap(handlers::no_cache_headers())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::articles_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
