use async_trait::async_trait;
use models::store;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use super::{check_radius, sort_nearest_first, BoundingBox, GeoPoint, GeoStrategy, NearbyStore, StoreRadiusSearch};
use crate::errors::ServiceError;

/// Portable engine: the database narrows candidates to a lat/lon box, the
/// exact great-circle check runs here.
pub struct BoundingBoxRadiusSearch {
    db: DatabaseConnection,
}

impl BoundingBoxRadiusSearch {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl StoreRadiusSearch for BoundingBoxRadiusSearch {
    #[instrument(skip(self), fields(lat = center.lat, lon = center.lon))]
    async fn within_radius(&self, center: GeoPoint, radius_m: f64) -> Result<Vec<NearbyStore>, ServiceError> {
        check_radius(radius_m)?;
        let bbox = BoundingBox::around(center, radius_m);
        let candidates = store::Entity::find()
            .filter(store::Column::ConvY.between(bbox.min_lat, bbox.max_lat))
            .filter(store::Column::ConvX.between(bbox.min_lon, bbox.max_lon))
            .all(&self.db)
            .await?;
        let scanned = candidates.len();

        let mut found: Vec<NearbyStore> = candidates
            .into_iter()
            .map(|s| NearbyStore::from_model(s, center))
            .filter(|s| s.distance_m <= radius_m)
            .collect();
        sort_nearest_first(&mut found);
        debug!(scanned, matched = found.len(), "bounding box scan");
        Ok(found)
    }

    fn strategy(&self) -> GeoStrategy { GeoStrategy::BoundingBoxScan }
}
