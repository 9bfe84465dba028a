//! Hand-written conversion between the persisted record and the wire
//! resource. Field mapping is explicit in both directions; nothing here
//! relies on the two shapes lining up structurally.

use mongodb::bson::oid::ObjectId;

use crate::core::error::{AppError, Result};
use crate::features::poi::dtos::{GeoJsonPointDto, PointOfInterestDto};
use crate::features::poi::models::PointOfInterestRecord;

/// Convert a stored record into its resource representation. Total: every
/// valid record converts. The href is left unset; it belongs to the boundary,
/// which knows the request URI.
pub fn record_to_resource(record: PointOfInterestRecord) -> PointOfInterestDto {
    PointOfInterestDto {
        id: record.id.map(|id| id.to_hex()),
        href: None,
        category: Some(record.category),
        name: Some(record.name),
        details: record.details,
        location: record.location.as_ref().map(GeoJsonPointDto::from_geo_point),
    }
}

/// Convert a resource back into a record, resolving identity from the
/// explicit id or the href self link. Fails only when a present identifier
/// does not conform to the store's id format.
pub fn resource_to_record(resource: &PointOfInterestDto) -> Result<PointOfInterestRecord> {
    Ok(PointOfInterestRecord {
        id: resolve_object_id(resource.id.as_deref(), resource.href.as_deref())?,
        category: resource.category.clone().unwrap_or_default(),
        name: resource.name.clone().unwrap_or_default(),
        details: resource.details.clone(),
        location: resource
            .location
            .as_ref()
            .and_then(GeoJsonPointDto::to_geo_point),
    })
}

/// Identity resolution: an explicit id wins, otherwise the trailing path
/// segment of the href, otherwise the resource has no identity yet.
pub fn resolve_object_id(id: Option<&str>, href: Option<&str>) -> Result<Option<ObjectId>> {
    let candidate = match (id, href) {
        (Some(id), _) => Some(id),
        (None, Some(href)) if !href.is_empty() => href.rsplit('/').next(),
        _ => None,
    };

    match candidate {
        Some(raw) => ObjectId::parse_str(raw)
            .map(Some)
            .map_err(|_| AppError::InvalidIdentifier(raw.to_string())),
        None => Ok(None),
    }
}
