#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use mongodb::bson::oid::ObjectId;

#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::poi::models::PointOfInterestRecord;
#[cfg(test)]
use crate::features::poi::repository::PoiRepository;

#[cfg(test)]
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two points in meters
#[cfg(test)]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// In-memory stand-in for the document store: upsert-on-save, id assignment
/// on insert, and a haversine-based proximity search returning nearest
/// first, mirroring what the 2dsphere index does.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryPoiRepository {
    records: Mutex<HashMap<ObjectId, PointOfInterestRecord>>,
}

#[cfg(test)]
impl InMemoryPoiRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[async_trait]
impl PoiRepository for InMemoryPoiRepository {
    async fn save(&self, mut record: PointOfInterestRecord) -> Result<PointOfInterestRecord> {
        let mut records = self.records.lock().expect("repository lock poisoned");

        let id = record.id.unwrap_or_else(ObjectId::new);
        record.id = Some(id);
        records.insert(id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<PointOfInterestRecord>> {
        let records = self.records.lock().expect("repository lock poisoned");

        Ok(records.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<bool> {
        let mut records = self.records.lock().expect("repository lock poisoned");

        Ok(records.remove(&id).is_some())
    }

    async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<PointOfInterestRecord>> {
        let records = self.records.lock().expect("repository lock poisoned");

        let mut hits: Vec<(f64, PointOfInterestRecord)> = records
            .values()
            .filter_map(|record| {
                let location = record.location.as_ref()?;
                let distance = haversine_distance(
                    latitude,
                    longitude,
                    location.latitude(),
                    location.longitude(),
                );
                (distance <= radius_meters).then(|| (distance, record.clone()))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(hits.into_iter().map(|(_, record)| record).collect())
    }
}
