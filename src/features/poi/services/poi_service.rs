use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::error::{AppError, ConstraintViolation, Result};
use crate::features::poi::dtos::PointOfInterestDto;
use crate::features::poi::mappers;
use crate::features::poi::models::PointOfInterestRecord;
use crate::features::poi::repository::PoiRepository;

/// Whether an upsert created a fresh record or replaced an existing one.
/// The boundary needs the distinction to choose between 201 and 204.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Orchestrates repository calls and mapping for points of interest.
pub struct PoiService {
    repository: Arc<dyn PoiRepository>,
}

impl PoiService {
    pub fn new(repository: Arc<dyn PoiRepository>) -> Self {
        Self { repository }
    }

    /// Fetch a single POI. `None` means no record for the id; that is a
    /// designed outcome, not an error. Without `expand_details` the details
    /// field is stripped from the response only - the store is untouched.
    pub async fn get_by_id(
        &self,
        id: &str,
        expand_details: bool,
    ) -> Result<Option<PointOfInterestDto>> {
        let object_id = parse_id(id)?;

        let record = self.repository.find_by_id(object_id).await?;

        Ok(record
            .map(mappers::record_to_resource)
            .map(|resource| project(resource, expand_details)))
    }

    /// Persist a new POI and return it with the store-assigned id.
    pub async fn create(&self, resource: &PointOfInterestDto) -> Result<PointOfInterestDto> {
        let record = mappers::resource_to_record(resource)?;
        ensure_storable(&record)?;

        let saved = self.repository.save(record).await?;
        tracing::info!(
            "POI created: id={:?}, category={}",
            saved.id,
            saved.category
        );

        Ok(mappers::record_to_resource(saved))
    }

    /// Upsert: replace the record stored under `id`, creating it when
    /// absent. The id itself is never regenerated.
    ///
    /// The existence check and the save are two separate store calls. Two
    /// concurrent updates for the same fresh id can both observe "absent"
    /// and both report `Created`; the store's per-document atomicity keeps
    /// the data itself consistent.
    pub async fn update(
        &self,
        id: &str,
        resource: &PointOfInterestDto,
    ) -> Result<(PointOfInterestDto, UpsertOutcome)> {
        let object_id = parse_id(id)?;

        let existing = self.repository.find_by_id(object_id).await?;

        let mut record = mappers::resource_to_record(resource)?;
        record.id = Some(object_id);
        ensure_storable(&record)?;

        let saved = self.repository.save(record).await?;

        let outcome = if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        };
        tracing::info!("POI upserted: id={}, outcome={:?}", id, outcome);

        Ok((mappers::record_to_resource(saved), outcome))
    }

    /// Remove the POI stored under `id`. Deleting an id that has no record
    /// reports `NotFound` and changes nothing.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let object_id = parse_id(id)?;

        if !self.repository.delete_by_id(object_id).await? {
            return Err(AppError::NotFound(format!(
                "Point of Interest with id {} not found",
                id
            )));
        }
        tracing::info!("POI deleted: id={}", id);

        Ok(())
    }

    /// Proximity search around a point, radius in meters. Ordering is
    /// whatever the store's geo index returns; every element honors the same
    /// detail projection rule as [`Self::get_by_id`].
    pub async fn list_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        expand_details: bool,
    ) -> Result<Vec<PointOfInterestDto>> {
        let records = self
            .repository
            .find_near(latitude, longitude, radius_meters)
            .await?;
        tracing::info!(
            "Found {} POIs within {}m of ({}, {})",
            records.len(),
            radius_meters,
            latitude,
            longitude
        );

        Ok(records
            .into_iter()
            .map(mappers::record_to_resource)
            .map(|resource| project(resource, expand_details))
            .collect())
    }
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidIdentifier(id.to_string()))
}

fn project(mut resource: PointOfInterestDto, expand_details: bool) -> PointOfInterestDto {
    if !expand_details {
        resource.details = None;
    }
    resource
}

/// Last-line guard for callers that bypass boundary validation: a record
/// must carry a category, a name and a location to be worth storing.
fn ensure_storable(record: &PointOfInterestRecord) -> Result<()> {
    let mut violations = Vec::new();

    if record.category.is_empty() {
        violations.push(ConstraintViolation::new(
            "category is required",
            serde_json::Value::Null,
        ));
    }
    if record.name.is_empty() {
        violations.push(ConstraintViolation::new(
            "name is required",
            serde_json::Value::Null,
        ));
    }
    if record.location.is_none() {
        violations.push(ConstraintViolation::new(
            "location is required",
            serde_json::Value::Null,
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::poi::dtos::GeoJsonPointDto;
    use crate::shared::test_helpers::InMemoryPoiRepository;

    fn service() -> PoiService {
        PoiService::new(Arc::new(InMemoryPoiRepository::new()))
    }

    fn resource(name: &str, lat: f64, lon: f64) -> PointOfInterestDto {
        PointOfInterestDto {
            category: Some("gasstation".to_string()),
            name: Some(name.to_string()),
            details: Some(format!("{} details", name)),
            location: Some(GeoJsonPointDto {
                point_type: "Point".to_string(),
                coordinates: vec![lon, lat],
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_a_fresh_id() {
        let service = service();

        let created = service
            .create(&resource("Shell", 51.0308, 13.7301))
            .await
            .expect("create must succeed");

        let id = created.id.expect("id assigned");
        assert_eq!(id.len(), 24);
        assert!(created.href.is_none());

        let fetched = service
            .get_by_id(&id, true)
            .await
            .expect("get must succeed")
            .expect("created POI must be found");
        assert_eq!(fetched.name.as_deref(), Some("Shell"));
    }

    #[tokio::test]
    async fn create_without_location_is_rejected() {
        let service = service();
        let mut poi = resource("Shell", 51.0308, 13.7301);
        poi.location = None;

        let result = service.create(&poi).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn details_are_projected_away_unless_expanded() {
        let service = service();
        let created = service
            .create(&resource("Shell", 51.0308, 13.7301))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id assigned");

        let collapsed = service
            .get_by_id(&id, false)
            .await
            .expect("get must succeed")
            .expect("POI must be found");
        assert!(collapsed.details.is_none());

        // Projection only shapes the response; the stored record keeps its details
        let expanded = service
            .get_by_id(&id, true)
            .await
            .expect("get must succeed")
            .expect("POI must be found");
        assert_eq!(expanded.details.as_deref(), Some("Shell details"));
    }

    #[tokio::test]
    async fn update_of_unknown_id_creates_and_reports_created() {
        let service = service();
        let id = ObjectId::new().to_hex();

        let (updated, outcome) = service
            .update(&id, &resource("Aral", 52.0, 13.0))
            .await
            .expect("upsert must succeed");

        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));

        let fetched = service
            .get_by_id(&id, true)
            .await
            .expect("get must succeed")
            .expect("upserted POI must be found");
        assert_eq!(fetched.name.as_deref(), Some("Aral"));
    }

    #[tokio::test]
    async fn update_of_existing_id_replaces_fields_and_keeps_id() {
        let service = service();
        let created = service
            .create(&resource("Shell", 51.0308, 13.7301))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id assigned");

        let mut replacement = resource("Esso", 52.0, 13.0);
        replacement.details = None;

        let (updated, outcome) = service
            .update(&id, &replacement)
            .await
            .expect("upsert must succeed");

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));

        let fetched = service
            .get_by_id(&id, true)
            .await
            .expect("get must succeed")
            .expect("POI must be found");
        assert_eq!(fetched.name.as_deref(), Some("Esso"));
        assert!(fetched.details.is_none());
        let location = fetched.location.expect("location present");
        assert_eq!(location.coordinates, vec![13.0, 52.0]);
    }

    #[tokio::test]
    async fn upsert_by_id_matches_create_with_that_id() {
        let upserting = service();
        let id = ObjectId::new().to_hex();
        upserting
            .update(&id, &resource("Jet", 51.5, 13.5))
            .await
            .expect("upsert must succeed");

        let creating = service();
        let mut with_id = resource("Jet", 51.5, 13.5);
        with_id.id = Some(id.clone());
        creating.create(&with_id).await.expect("create must succeed");

        let from_upsert = upserting
            .get_by_id(&id, true)
            .await
            .expect("get must succeed");
        let from_create = creating
            .get_by_id(&id, true)
            .await
            .expect("get must succeed");

        let from_upsert = from_upsert.expect("upserted POI found");
        let from_create = from_create.expect("created POI found");
        assert_eq!(from_upsert.name, from_create.name);
        assert_eq!(from_upsert.category, from_create.category);
        assert_eq!(from_upsert.details, from_create.details);
        assert_eq!(
            from_upsert.location.map(|l| l.coordinates),
            from_create.location.map(|l| l.coordinates),
        );
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found_the_second_time() {
        let service = service();
        let created = service
            .create(&resource("Shell", 51.0308, 13.7301))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id assigned");

        service.delete(&id).await.expect("first delete succeeds");

        let second = service.delete(&id).await;
        assert!(matches!(second, Err(AppError::NotFound(_))));

        let gone = service.get_by_id(&id, true).await.expect("get must succeed");
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn malformed_ids_are_invalid_identifiers() {
        let service = service();

        let result = service.get_by_id("not-an-object-id", false).await;
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));

        let result = service.delete("not-an-object-id").await;
        assert!(matches!(result, Err(AppError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn list_near_returns_only_pois_within_the_radius() {
        let service = service();
        service
            .create(&resource("Brandenburg Gate", 52.516275, 13.377704))
            .await
            .expect("create must succeed");
        service
            .create(&resource("Reichstag", 52.518623, 13.376198))
            .await
            .expect("create must succeed");
        service
            .create(&resource("Far away", 50.0, 10.0))
            .await
            .expect("create must succeed");

        let hits = service
            .list_near(52.516275, 13.377704, 1000.0, false)
            .await
            .expect("search must succeed");

        let names: Vec<Option<&str>> = hits.iter().map(|poi| poi.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Brandenburg Gate"), Some("Reichstag")]);
        assert!(hits.iter().all(|poi| poi.details.is_none()));
    }

    #[tokio::test]
    async fn list_near_expands_details_on_request() {
        let service = service();
        service
            .create(&resource("Shell", 51.0308, 13.7301))
            .await
            .expect("create must succeed");

        let hits = service
            .list_near(51.0308, 13.7301, 500.0, true)
            .await
            .expect("search must succeed");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].details.as_deref(), Some("Shell details"));
    }
}
