// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod article_client;
pub mod cache;
pub mod query_service;

pub use article_client::*;
pub use cache::*;
pub use query_service::QueryService;
