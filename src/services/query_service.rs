// src/services/query_service.rs
// DOCUMENTATION: Business logic for the three map endpoints
// PURPOSE: Validate request parameters and dispatch to the store or the news provider

use crate::db::{PlaceStore, IN_VIEW_LIMIT};
use crate::errors::ServiceError;
use crate::models::{parse_lat_lng, Article, BoundingBox, Place};
use crate::services::ArticleLookup;
use std::sync::Arc;

/// Returns the parameter if it was sent with a value
fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ServiceError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::MissingParameter(name.to_string())),
    }
}

pub struct QueryService {
    store: PlaceStore,
    articles: Arc<dyn ArticleLookup>,
}

impl QueryService {
    pub fn new(store: PlaceStore, articles: Arc<dyn ArticleLookup>) -> Self {
        Self { store, articles }
    }

    pub fn store(&self) -> &PlaceStore {
        &self.store
    }

    /// News for a location
    /// Provider results and provider errors are returned untouched
    pub async fn articles_for_geo(&self, geo: Option<&str>) -> Result<Vec<Article>, ServiceError> {
        let geo = required(geo, "geo")?;
        self.articles.lookup(geo).await
    }

    /// Places whose postal code, name or region start with the query words
    ///
    /// One or two whitespace-separated words are supported. A query made only
    /// of whitespace counts as missing; three or more words are rejected.
    pub async fn search_places(&self, q: Option<&str>) -> Result<Vec<Place>, ServiceError> {
        let q = required(q, "q")?;
        let tokens: Vec<&str> = q.split_whitespace().collect();

        match tokens.len() {
            0 => Err(ServiceError::MissingParameter("q".to_string())),
            1 | 2 => self.store.pattern_search(&tokens).await,
            n => {
                log::debug!("Rejecting search with {} words: {:?}", n, q);
                Err(ServiceError::InvalidQuery("q".to_string()))
            }
        }
    }

    /// Up to ten places inside the viewport given by `lat,lng` corners
    ///
    /// Presence of both corners is checked before their format. Coordinates
    /// outside [-90, 90] / [-180, 180] are passed to the store as they are.
    pub async fn places_in_view(
        &self,
        sw: Option<&str>,
        ne: Option<&str>,
    ) -> Result<Vec<Place>, ServiceError> {
        let sw = required(sw, "sw")?;
        let ne = required(ne, "ne")?;

        let sw = parse_lat_lng(sw).ok_or_else(|| ServiceError::InvalidParameter("sw".to_string()))?;
        let ne = parse_lat_lng(ne).ok_or_else(|| ServiceError::InvalidParameter("ne".to_string()))?;

        self.store
            .in_view(&BoundingBox::new(sw, ne), IN_VIEW_LIMIT)
            .await
    }
}
