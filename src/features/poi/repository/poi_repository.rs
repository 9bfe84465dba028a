use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database, IndexModel};

use crate::core::error::Result;
use crate::features::poi::models::PointOfInterestRecord;

/// The narrow persistence seam the service talks through. Proximity search
/// is evaluated by the store's geospatial index; this layer never re-sorts
/// or filters what the index returns.
#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// Persist the record. A record without an id is inserted and comes back
    /// with the store-assigned id; a record with an id replaces the stored
    /// document of that id, creating it if absent.
    async fn save(&self, record: PointOfInterestRecord) -> Result<PointOfInterestRecord>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<PointOfInterestRecord>>;

    /// Returns whether a document was actually removed.
    async fn delete_by_id(&self, id: ObjectId) -> Result<bool>;

    /// All records within `radius_meters` of the given point, measured on
    /// the sphere, in the order the index yields them (nearest first).
    async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<PointOfInterestRecord>>;
}

/// MongoDB-backed repository over the `point-of-interest` collection.
pub struct MongoPoiRepository {
    collection: Collection<PointOfInterestRecord>,
}

impl MongoPoiRepository {
    pub const COLLECTION_NAME: &'static str = "point-of-interest";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(Self::COLLECTION_NAME),
        }
    }

    /// One-time setup of the 2dsphere index the proximity query requires.
    /// Safe to call on every startup; index creation is idempotent.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let model = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .build();

        self.collection.create_index(model).await?;
        tracing::info!(
            "2dsphere index ensured on {}.location",
            Self::COLLECTION_NAME
        );

        Ok(())
    }
}

#[async_trait]
impl PoiRepository for MongoPoiRepository {
    async fn save(&self, mut record: PointOfInterestRecord) -> Result<PointOfInterestRecord> {
        match record.id {
            Some(id) => {
                self.collection
                    .replace_one(doc! { "_id": id }, &record)
                    .upsert(true)
                    .await?;
            }
            None => {
                let result = self.collection.insert_one(&record).await?;
                record.id = result.inserted_id.as_object_id();
            }
        }

        Ok(record)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<PointOfInterestRecord>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        Ok(result.deleted_count > 0)
    }

    async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<PointOfInterestRecord>> {
        // db.getCollection('point-of-interest').find({location: {$near: {...}}})
        let filter = doc! {
            "location": {
                "$near": {
                    "$geometry": { "type": "Point", "coordinates": [longitude, latitude] },
                    "$maxDistance": radius_meters,
                }
            }
        };

        let cursor = self.collection.find(filter).await?;

        Ok(cursor.try_collect().await?)
    }
}
