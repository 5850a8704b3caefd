// src/db/place_store.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: Read-only prefix search and viewport queries over the places dataset

use crate::errors::ServiceError;
use crate::models::{BoundingBox, Place};
use sqlx::SqlitePool;

/// Text columns are coerced so numeric postal codes and NULL admin fields decode as strings
const PLACE_COLUMNS: &str = r#"
    CAST(COALESCE(country_code, '') AS TEXT) AS country_code,
    CAST(COALESCE(postal_code, '') AS TEXT) AS postal_code,
    CAST(COALESCE(place_name, '') AS TEXT) AS place_name,
    CAST(COALESCE(admin_name1, '') AS TEXT) AS admin_name1,
    CAST(COALESCE(admin_code1, '') AS TEXT) AS admin_code1,
    CAST(latitude AS REAL) AS latitude,
    CAST(longitude AS REAL) AS longitude
"#;

/// Maximum number of places returned for a map viewport
pub const IN_VIEW_LIMIT: u32 = 10;

/// How a search token is compared against the leading characters of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch {
    /// Exact comparison of the leading characters
    CaseSensitive,
    /// SQLite LIKE semantics: ASCII letters compare without case
    AsciiCaseInsensitive,
}

impl PrefixMatch {
    pub fn from_config(case_insensitive: bool) -> Self {
        if case_insensitive {
            PrefixMatch::AsciiCaseInsensitive
        } else {
            PrefixMatch::CaseSensitive
        }
    }

    /// SQL condition "column starts with parameter ?N"
    fn predicate(self, column: &str, param: usize) -> String {
        match self {
            PrefixMatch::CaseSensitive => {
                format!("substr({column}, 1, length(?{param})) = ?{param}")
            }
            PrefixMatch::AsciiCaseInsensitive => format!("{column} LIKE ?{param} ESCAPE '\\'"),
        }
    }

    /// Value bound for a token, matching what `predicate` expects
    fn pattern(self, token: &str) -> String {
        match self {
            PrefixMatch::CaseSensitive => token.to_string(),
            PrefixMatch::AsciiCaseInsensitive => {
                let mut pattern = String::with_capacity(token.len() + 1);
                for c in token.chars() {
                    if matches!(c, '%' | '_' | '\\') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                pattern
            }
        }
    }
}

/// PlaceStore: the static places dataset
/// DOCUMENTATION: Opened once at startup and shared read-only by every request.
/// No method takes `&mut self`; the pool serializes access to SQLite itself
#[derive(Debug, Clone)]
pub struct PlaceStore {
    pool: SqlitePool,
    matching: PrefixMatch,
    len: i64,
}

impl PlaceStore {
    /// Attach to the dataset and make sure the places table is readable
    /// DOCUMENTATION: Must complete before the HTTP server starts accepting requests
    pub async fn open(pool: SqlitePool, matching: PrefixMatch) -> Result<Self, ServiceError> {
        let (len,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                log::error!("Places dataset is not readable: {}", e);
                ServiceError::DatabaseError(e.to_string())
            })?;

        log::info!("Loaded places dataset: {} rows ({:?})", len, matching);
        Ok(Self {
            pool,
            matching,
            len,
        })
    }

    /// Number of rows in the dataset
    pub fn row_count(&self) -> i64 {
        self.len
    }

    /// Prefix search over postal code, place name and region
    /// DOCUMENTATION: Used for GET /search
    ///
    /// One token matches if any of postal_code, place_name, admin_name1 or
    /// admin_code1 starts with it. Two tokens evaluate
    /// `(postal ^ AND name ^) OR (postal ^ AND admin_name1 ^)` where each `^`
    /// accepts either token. Rows come back in storage order, which callers
    /// must treat as unspecified.
    pub async fn pattern_search(&self, tokens: &[&str]) -> Result<Vec<Place>, ServiceError> {
        let m = self.matching;
        let filter = match tokens {
            [_] => format!(
                "{} OR {} OR {} OR {}",
                m.predicate("postal_code", 1),
                m.predicate("place_name", 1),
                m.predicate("admin_name1", 1),
                m.predicate("admin_code1", 1),
            ),
            [_, _] => {
                let postal = format!(
                    "({} OR {})",
                    m.predicate("postal_code", 1),
                    m.predicate("postal_code", 2)
                );
                let name = format!(
                    "({} OR {})",
                    m.predicate("place_name", 1),
                    m.predicate("place_name", 2)
                );
                let region = format!(
                    "({} OR {})",
                    m.predicate("admin_name1", 1),
                    m.predicate("admin_name1", 2)
                );
                // AND binds tighter than OR here
                format!("{postal} AND {name} OR {postal} AND {region}")
            }
            _ => return Err(ServiceError::InvalidQuery("q".to_string())),
        };

        let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE {filter}");
        log::debug!("Executing search query: {}", sql);

        let mut query = sqlx::query_as::<_, Place>(&sql);
        for token in tokens {
            query = query.bind(m.pattern(token));
        }

        let places = query.fetch_all(&self.pool).await.map_err(|e| {
            log::error!("Search query error: {}", e);
            ServiceError::DatabaseError(e.to_string())
        })?;

        log::info!("Search {:?} matched {} places", tokens, places.len());
        Ok(places)
    }

    /// Places inside a map viewport
    /// DOCUMENTATION: Used for GET /update
    ///
    /// One row per (country_code, place_name, admin_code1); which row of a
    /// group is returned is unspecified. When more than `limit` groups fall in
    /// the box a fresh uniform sample is drawn on every call.
    pub async fn in_view(&self, bbox: &BoundingBox, limit: u32) -> Result<Vec<Place>, ServiceError> {
        let longitude_filter = if bbox.wraps_antimeridian() {
            "(?3 <= longitude OR longitude <= ?4)"
        } else {
            "(?3 <= longitude AND longitude <= ?4)"
        };

        let sql = format!(
            r#"
            SELECT {PLACE_COLUMNS}
            FROM places
            WHERE ?1 <= latitude AND latitude <= ?2 AND {longitude_filter}
            GROUP BY country_code, place_name, admin_code1
            ORDER BY RANDOM()
            LIMIT ?5
            "#
        );

        let places = sqlx::query_as::<_, Place>(&sql)
            .bind(bbox.sw.y)
            .bind(bbox.ne.y)
            .bind(bbox.sw.x)
            .bind(bbox.ne.x)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Viewport query error: {}", e);
                ServiceError::DatabaseError(e.to_string())
            })?;

        debug_assert!(places
            .iter()
            .all(|p| bbox.contains(p.latitude, p.longitude)));

        log::debug!(
            "Viewport sw={:?} ne={:?} wraps={} returned {} places",
            bbox.sw,
            bbox.ne,
            bbox.wraps_antimeridian(),
            places.len()
        );

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_pool, place, seed, store_with};
    use geo_types::Coord;
    use std::collections::HashSet;

    fn fixture() -> Vec<Place> {
        vec![
            place("US", "02138", "Cambridge", "Massachusetts", "MA", 42.377, -71.1256),
            place("US", "94305", "Stanford", "California", "CA", 37.4236, -122.1619),
            place("US", "06520", "New Haven", "Connecticut", "CT", 41.3083, -72.9279),
            place("US", "10001", "New York", "New York", "NY", 40.7484, -73.9967),
            place("GB", "CB2", "Cambridge", "England", "ENG", 52.2, 0.12),
        ]
    }

    fn postal_codes(places: &[Place]) -> Vec<String> {
        let mut codes: Vec<String> = places.iter().map(|p| p.postal_code.clone()).collect();
        codes.sort();
        codes
    }

    fn bbox(sw: (f64, f64), ne: (f64, f64)) -> BoundingBox {
        BoundingBox::new(Coord { x: sw.1, y: sw.0 }, Coord { x: ne.1, y: ne.0 })
    }

    #[tokio::test]
    async fn test_open_counts_rows() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;
        assert_eq!(store.row_count(), 5);
    }

    #[tokio::test]
    async fn test_open_without_table_fails() {
        let pool = memory_pool().await;
        let result = PlaceStore::open(pool, PrefixMatch::CaseSensitive).await;
        assert!(matches!(result, Err(ServiceError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_single_token_checks_all_four_fields() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;

        let by_name = store.pattern_search(&["Cam"]).await.unwrap();
        assert_eq!(postal_codes(&by_name), vec!["02138", "CB2"]);

        let by_postal = store.pattern_search(&["021"]).await.unwrap();
        assert_eq!(postal_codes(&by_postal), vec!["02138"]);

        let by_region = store.pattern_search(&["Conn"]).await.unwrap();
        assert_eq!(postal_codes(&by_region), vec!["06520"]);

        let by_region_code = store.pattern_search(&["NY"]).await.unwrap();
        assert_eq!(postal_codes(&by_region_code), vec!["10001"]);

        // place_name "Cambridge" and admin_name1 "California"
        let mixed = store.pattern_search(&["Ca"]).await.unwrap();
        assert_eq!(postal_codes(&mixed), vec!["02138", "94305", "CB2"]);
    }

    #[tokio::test]
    async fn test_prefix_not_substring() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;
        assert!(store.pattern_search(&["bridge"]).await.unwrap().is_empty());
        assert!(store.pattern_search(&["138"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_case_sensitive_by_default() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;
        assert!(store.pattern_search(&["cam"]).await.unwrap().is_empty());
        assert!(store.pattern_search(&["cb2"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_case_insensitive_matching() {
        let store = store_with(&fixture(), PrefixMatch::AsciiCaseInsensitive).await;

        let places = store.pattern_search(&["cam"]).await.unwrap();
        assert_eq!(postal_codes(&places), vec!["02138", "CB2"]);

        // LIKE wildcards in user input are literal characters
        assert!(store.pattern_search(&["%"]).await.unwrap().is_empty());
        assert!(store.pattern_search(&["_2138"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_tokens_postal_and_name_branch() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;

        let places = store.pattern_search(&["02138", "Cambridge"]).await.unwrap();
        assert_eq!(postal_codes(&places), vec!["02138"]);

        // Either token may satisfy either side
        let swapped = store.pattern_search(&["Camb", "021"]).await.unwrap();
        assert_eq!(postal_codes(&swapped), vec!["02138"]);
    }

    #[tokio::test]
    async fn test_two_tokens_postal_and_region_branch() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;

        // Stanford does not start with either token, California does
        let places = store.pattern_search(&["94305", "Calif"]).await.unwrap();
        assert_eq!(postal_codes(&places), vec!["94305"]);
    }

    #[tokio::test]
    async fn test_two_tokens_require_postal_match() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;

        assert!(store
            .pattern_search(&["Cambridge", "Massachusetts"])
            .await
            .unwrap()
            .is_empty());
        assert!(store.pattern_search(&["New", "York"]).await.unwrap().is_empty());
        assert!(store.pattern_search(&["10001", "Boston"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_token_counts_rejected() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;
        assert_eq!(
            store.pattern_search(&[]).await,
            Err(ServiceError::InvalidQuery("q".into()))
        );
        assert_eq!(
            store.pattern_search(&["a", "b", "c"]).await,
            Err(ServiceError::InvalidQuery("q".into()))
        );
    }

    #[tokio::test]
    async fn test_numeric_and_null_columns_decode() {
        let pool = memory_pool().await;
        seed(&pool, &[]).await;
        sqlx::query(
            "INSERT INTO places (country_code, postal_code, place_name, admin_name1, admin_code1, latitude, longitude)
             VALUES ('US', 10001, 'New York', NULL, NULL, 40.7, -74.0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        let store = PlaceStore::open(pool, PrefixMatch::CaseSensitive).await.unwrap();

        let places = store.pattern_search(&["100"]).await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].postal_code, "10001");
        assert_eq!(places[0].admin_name1, "");
    }

    /// 15 distinct towns inside 10..20, each listed under two postal codes
    fn crowded_box() -> Vec<Place> {
        let mut rows = Vec::new();
        for i in 0..15 {
            let lat = 10.0 + i as f64 * 0.5;
            let name = format!("Town {}", i);
            rows.push(place("US", &format!("{:05}", i * 2), &name, "Region", "RG", lat, 15.0));
            rows.push(place("US", &format!("{:05}", i * 2 + 1), &name, "Region", "RG", lat, 15.1));
        }
        // outside the box
        rows.push(place("US", "99990", "Far North", "Region", "RG", 25.0, 15.0));
        rows.push(place("US", "99991", "Far East", "Region", "RG", 15.0, 25.0));
        rows
    }

    #[tokio::test]
    async fn test_in_view_filters_dedups_and_limits() {
        let store = store_with(&crowded_box(), PrefixMatch::CaseSensitive).await;
        let view = bbox((10.0, 10.0), (20.0, 20.0));

        let places = store.in_view(&view, IN_VIEW_LIMIT).await.unwrap();
        assert_eq!(places.len(), 10);

        let mut groups = HashSet::new();
        for p in &places {
            assert!(view.contains(p.latitude, p.longitude), "{:?} outside view", p);
            assert!(groups.insert((p.country_code.clone(), p.place_name.clone(), p.admin_code1.clone())));
        }
    }

    #[tokio::test]
    async fn test_in_view_returns_all_groups_under_limit() {
        let rows = vec![
            place("US", "11111", "Alpha", "Region", "RG", 12.0, 12.0),
            place("US", "11112", "Alpha", "Region", "RG", 12.1, 12.1),
            place("US", "22222", "Beta", "Region", "RG", 13.0, 13.0),
            // same name in another region is its own group
            place("US", "33333", "Beta", "Other", "OT", 14.0, 14.0),
            place("CA", "44444", "Beta", "Other", "OT", 15.0, 15.0),
        ];
        let store = store_with(&rows, PrefixMatch::CaseSensitive).await;

        let places = store.in_view(&bbox((10.0, 10.0), (20.0, 20.0)), 10).await.unwrap();
        assert_eq!(places.len(), 4);
        assert_eq!(places.iter().filter(|p| p.place_name == "Alpha").count(), 1);
    }

    #[tokio::test]
    async fn test_in_view_across_antimeridian() {
        let rows = vec![
            place("FJ", "1", "East", "R", "R", 10.0, 175.0),
            place("FJ", "2", "West", "R", "R", 10.0, -175.0),
            place("FJ", "3", "Edge", "R", "R", 10.0, 180.0),
            place("FJ", "4", "Middle", "R", "R", 10.0, 0.0),
            place("FJ", "5", "North", "R", "R", 11.0, 175.0),
        ];
        let store = store_with(&rows, PrefixMatch::CaseSensitive).await;

        let places = store.in_view(&bbox((10.0, 170.0), (10.0, -170.0)), 10).await.unwrap();
        assert_eq!(postal_codes(&places), vec!["1", "2", "3"]);
        for p in &places {
            assert_eq!(p.latitude, 10.0);
            assert!(p.longitude >= 170.0 || p.longitude <= -170.0);
        }
    }

    #[tokio::test]
    async fn test_in_view_sample_varies_between_calls() {
        let store = store_with(&crowded_box(), PrefixMatch::CaseSensitive).await;
        let view = bbox((10.0, 10.0), (20.0, 20.0));

        let mut samples = HashSet::new();
        for _ in 0..20 {
            let mut names: Vec<String> = store
                .in_view(&view, IN_VIEW_LIMIT)
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.place_name)
                .collect();
            names.sort();
            samples.insert(names);
        }
        assert!(samples.len() > 1);
    }

    #[tokio::test]
    async fn test_in_view_empty_box() {
        let store = store_with(&fixture(), PrefixMatch::CaseSensitive).await;
        let places = store.in_view(&bbox((-10.0, -10.0), (-5.0, -5.0)), 10).await.unwrap();
        assert!(places.is_empty());
    }
}
