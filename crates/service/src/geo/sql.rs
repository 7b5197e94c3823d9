//! PostgreSQL engines: the distance predicate runs inside the database.

use async_trait::async_trait;
use models::store;
use sea_orm::{DatabaseBackend, DatabaseConnection, EntityTrait, Statement, Value};
use tracing::{debug, instrument};

use super::{check_radius, sort_nearest_first, GeoPoint, GeoStrategy, NearbyStore, StoreRadiusSearch, EARTH_RADIUS_KM};
use crate::errors::ServiceError;

const STORE_COLUMNS: &str =
    "id, name, password_hash, conv_x, conv_y, address, category, seller_id, image_id, created_at";

/// `$1` latitude, `$2` longitude, `$3` radius in metres.
fn spatial_index_sql() -> String {
    format!(
        "SELECT {STORE_COLUMNS} FROM store \
         WHERE ST_DWithin(location, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography, $3, false)"
    )
}

/// Same parameters; the `acos` argument is clamped so rounding never leaves its domain.
fn haversine_sql() -> String {
    format!(
        "SELECT {STORE_COLUMNS} FROM store \
         WHERE {EARTH_RADIUS_KM} * acos(LEAST(1.0, GREATEST(-1.0, \
             cos(radians($1)) * cos(radians(conv_y)) * cos(radians(conv_x) - radians($2)) \
             + sin(radians($1)) * sin(radians(conv_y))))) <= $3 / 1000.0"
    )
}

pub struct SqlRadiusSearch {
    db: DatabaseConnection,
    strategy: GeoStrategy,
}

impl SqlRadiusSearch {
    /// `strategy` must be `SpatialIndex` or `HaversineSql`; anything else falls back to `HaversineSql`.
    pub fn new(db: DatabaseConnection, strategy: GeoStrategy) -> Self {
        let strategy = match strategy {
            GeoStrategy::SpatialIndex => GeoStrategy::SpatialIndex,
            _ => GeoStrategy::HaversineSql,
        };
        Self { db, strategy }
    }

    fn statement(&self, center: GeoPoint, radius_m: f64) -> Statement {
        let sql = match self.strategy {
            GeoStrategy::SpatialIndex => spatial_index_sql(),
            _ => haversine_sql(),
        };
        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, [Value::from(center.lat), Value::from(center.lon), Value::from(radius_m)])
    }
}

#[async_trait]
impl StoreRadiusSearch for SqlRadiusSearch {
    #[instrument(skip(self), fields(strategy = ?self.strategy, lat = center.lat, lon = center.lon))]
    async fn within_radius(&self, center: GeoPoint, radius_m: f64) -> Result<Vec<NearbyStore>, ServiceError> {
        check_radius(radius_m)?;
        let rows = store::Entity::find()
            .from_raw_sql(self.statement(center, radius_m))
            .all(&self.db)
            .await?;

        let mut found: Vec<NearbyStore> = rows.into_iter().map(|s| NearbyStore::from_model(s, center)).collect();
        sort_nearest_first(&mut found);
        debug!(matched = found.len(), "sql radius search");
        Ok(found)
    }

    fn strategy(&self) -> GeoStrategy { self.strategy }
}
