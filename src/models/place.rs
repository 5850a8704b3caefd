// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Dataset rows, map viewport geometry and query-string DTOs

use geo_types::Coord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::sync::LazyLock;

/// `lat,lng` with an optional leading minus and optional fraction on each side
static LAT_LNG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(?:\.\d+)?,-?\d+(?:\.\d+)?$").expect("lat,lng pattern is valid")
});

/// Represents one row of the places dataset
/// DOCUMENTATION: Maps to the places table of the static SQLite dataset.
/// Serialized field order is the wire shape returned by /search and /update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Place {
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,

    pub postal_code: String,

    /// City or locality name
    pub place_name: String,

    /// First-order administrative division name (state)
    pub admin_name1: String,

    /// First-order administrative division code (state abbreviation)
    pub admin_code1: String,

    /// WGS84 degrees
    pub latitude: f64,

    /// WGS84 degrees
    pub longitude: f64,
}

/// Map viewport given by its southwest and northeast corners
/// DOCUMENTATION: `x` is longitude and `y` is latitude, as in geo-types.
/// Nominal ranges are [-90, 90] and [-180, 180] but they are not enforced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub sw: Coord<f64>,
    pub ne: Coord<f64>,
}

impl BoundingBox {
    pub fn new(sw: Coord<f64>, ne: Coord<f64>) -> Self {
        Self { sw, ne }
    }

    /// True when the western edge lies east of the eastern edge,
    /// i.e. the box spans the ±180° line
    pub fn wraps_antimeridian(&self) -> bool {
        self.sw.x > self.ne.x
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let lat_ok = self.sw.y <= lat && lat <= self.ne.y;
        let lng_ok = if self.wraps_antimeridian() {
            lng >= self.sw.x || lng <= self.ne.x
        } else {
            self.sw.x <= lng && lng <= self.ne.x
        };
        lat_ok && lng_ok
    }
}

/// Parse a `lat,lng` string into a coordinate
/// Returns None when the text does not have the expected shape
pub fn parse_lat_lng(raw: &str) -> Option<Coord<f64>> {
    if !LAT_LNG.is_match(raw) {
        return None;
    }
    let (lat, lng) = raw.split_once(',')?;
    Some(Coord {
        x: lng.parse().ok()?,
        y: lat.parse().ok()?,
    })
}

/// Query parameters for GET /search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free text: one or two words
    pub q: Option<String>,
}

/// Query parameters for GET /update
#[derive(Debug, Deserialize)]
pub struct ViewParams {
    /// Southwest corner as `lat,lng`
    pub sw: Option<String>,

    /// Northeast corner as `lat,lng`
    pub ne: Option<String>,
}

/// Query parameters for GET /articles
#[derive(Debug, Deserialize)]
pub struct ArticlesParams {
    /// Location handed to the news provider, usually `lat,lng` or a postal code
    pub geo: Option<String>,
}
