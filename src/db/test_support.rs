// src/db/test_support.rs
// DOCUMENTATION: In-memory dataset fixtures shared by the test modules

use super::{PlaceStore, PrefixMatch};
use crate::models::Place;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Single-connection pool: every new connection to `sqlite::memory:` is a fresh database
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite")
}

/// Create the places table (GeoNames postal code layout) and insert rows
pub async fn seed(pool: &SqlitePool, rows: &[Place]) {
    sqlx::query(
        r#"
        CREATE TABLE places (
            country_code TEXT,
            postal_code TEXT,
            place_name TEXT,
            admin_name1 TEXT,
            admin_code1 TEXT,
            admin_name2 TEXT,
            latitude REAL,
            longitude REAL,
            accuracy INTEGER
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("create places table");

    for row in rows {
        sqlx::query(
            "INSERT INTO places (country_code, postal_code, place_name, admin_name1, admin_code1, latitude, longitude)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.country_code)
        .bind(&row.postal_code)
        .bind(&row.place_name)
        .bind(&row.admin_name1)
        .bind(&row.admin_code1)
        .bind(row.latitude)
        .bind(row.longitude)
        .execute(pool)
        .await
        .expect("insert place");
    }
}

pub async fn store_with(rows: &[Place], matching: PrefixMatch) -> PlaceStore {
    let pool = memory_pool().await;
    seed(&pool, rows).await;
    PlaceStore::open(pool, matching).await.expect("open store")
}

pub fn place(
    country_code: &str,
    postal_code: &str,
    place_name: &str,
    admin_name1: &str,
    admin_code1: &str,
    latitude: f64,
    longitude: f64,
) -> Place {
    Place {
        country_code: country_code.to_string(),
        postal_code: postal_code.to_string(),
        place_name: place_name.to_string(),
        admin_name1: admin_name1.to_string(),
        admin_code1: admin_code1.to_string(),
        latitude,
        longitude,
    }
}
