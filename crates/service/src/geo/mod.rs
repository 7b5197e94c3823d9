//! Stores within a radius of a point.
//!
//! One capability ([`StoreRadiusSearch`]) with three engines, picked once at
//! startup by [`GeoStrategy::detect`]:
//!
//! | strategy | backend | how |
//! |---|---|---|
//! | `SpatialIndex` | PostgreSQL + PostGIS `location` column | `ST_DWithin`, GIST index |
//! | `HaversineSql` | PostgreSQL | great-circle distance computed in SQL |
//! | `BoundingBoxScan` | anything else (SQLite) | lat/lon box in SQL, distance in process |
//!
//! `conv_x` is the longitude and `conv_y` the latitude.

pub mod scan;
pub mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use models::store;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use serde::Serialize;
use tracing::info;

use crate::errors::ServiceError;

pub use scan::BoundingBoxRadiusSearch;
pub use sql::SqlRadiusSearch;

/// Mean earth radius used by every distance computation here.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ServiceError> {
        store::validate_coordinates(lon, lat)?;
        Ok(Self { lat, lon })
    }

    pub fn of_store(s: &store::Model) -> Self {
        Self { lat: s.conv_y, lon: s.conv_x }
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Lat/lon rectangle enclosing every point within the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn around(center: GeoPoint, radius_m: f64) -> Self {
        let angular = (radius_m / 1000.0) / EARTH_RADIUS_KM;
        let d_lat = angular.to_degrees();
        let min_lat = (center.lat - d_lat).max(-90.0);
        let max_lat = (center.lat + d_lat).min(90.0);

        // A box touching a pole or wrapping the antimeridian covers every longitude
        let cos_lat = center.lat.to_radians().cos();
        let full = (-180.0, 180.0);
        let (min_lon, max_lon) = if min_lat <= -90.0 || max_lat >= 90.0 || cos_lat <= f64::EPSILON {
            full
        } else {
            let d_lon = (angular.sin() / cos_lat).min(1.0).asin().to_degrees();
            let (lo, hi) = (center.lon - d_lon, center.lon + d_lon);
            if lo < -180.0 || hi > 180.0 { full } else { (lo, hi) }
        };
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat) && (self.min_lon..=self.max_lon).contains(&p.lon)
    }
}

/// A store found by a radius query with its distance from the query point.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStore {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub category: models::FoodCategory,
    pub conv_x: f64,
    pub conv_y: f64,
    pub distance_m: f64,
}

impl NearbyStore {
    pub fn from_model(s: store::Model, center: GeoPoint) -> Self {
        let distance_m = haversine_km(center, GeoPoint::of_store(&s)) * 1000.0;
        Self {
            id: s.id,
            name: s.name,
            address: s.address,
            category: s.category,
            conv_x: s.conv_x,
            conv_y: s.conv_y,
            distance_m,
        }
    }
}

#[async_trait]
pub trait StoreRadiusSearch: Send + Sync {
    /// Stores within `radius_m` metres of `center`, nearest first.
    async fn within_radius(&self, center: GeoPoint, radius_m: f64) -> Result<Vec<NearbyStore>, ServiceError>;

    fn strategy(&self) -> GeoStrategy;
}

pub(crate) fn check_radius(radius_m: f64) -> Result<(), ServiceError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(ServiceError::Validation("radius must be a positive number of metres".into()));
    }
    Ok(())
}

pub(crate) fn sort_nearest_first(stores: &mut [NearbyStore]) {
    stores.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m).then(a.id.cmp(&b.id)));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoStrategy {
    SpatialIndex,
    HaversineSql,
    BoundingBoxScan,
}

impl GeoStrategy {
    /// Pick the strongest engine the connected database supports.
    pub async fn detect(db: &DatabaseConnection) -> Result<Self, ServiceError> {
        if db.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(GeoStrategy::BoundingBoxScan);
        }
        let has_location = db
            .query_one(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT 1 FROM information_schema.columns WHERE table_name = 'store' AND column_name = 'location'",
            ))
            .await?
            .is_some();
        Ok(if has_location { GeoStrategy::SpatialIndex } else { GeoStrategy::HaversineSql })
    }

    pub fn build(self, db: DatabaseConnection) -> Arc<dyn StoreRadiusSearch> {
        match self {
            GeoStrategy::SpatialIndex | GeoStrategy::HaversineSql => Arc::new(SqlRadiusSearch::new(db, self)),
            GeoStrategy::BoundingBoxScan => Arc::new(BoundingBoxRadiusSearch::new(db)),
        }
    }
}

/// Detect and build in one step.
pub async fn radius_search_for(db: &DatabaseConnection) -> Result<Arc<dyn StoreRadiusSearch>, ServiceError> {
    let strategy = GeoStrategy::detect(db).await?;
    info!(?strategy, "radius search engine selected");
    Ok(strategy.build(db.clone()))
}
