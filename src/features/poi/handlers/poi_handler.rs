use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, ConstraintViolation, Result};
use crate::core::extractor::AppJson;
use crate::features::poi::dtos::{
    poi_dto::collect_violations, ExpandQuery, PointOfInterestDto, SearchQuery,
};
use crate::features::poi::services::{PoiService, UpsertOutcome};

/// Find a Point of Interest by its id
///
/// The `expand=details` query parameter controls whether the details field
/// is included; any other value returns the POI without details.
#[utoipa::path(
    get,
    path = "/poi/{id}",
    params(
        ("id" = String, Path, description = "POI object id"),
        ExpandQuery,
    ),
    responses(
        (status = 200, description = "Found the POI", body = PointOfInterestDto),
        (status = 400, description = "Invalid id supplied", body = Vec<ConstraintViolation>),
        (status = 404, description = "POI not found")
    ),
    tag = "poi"
)]
pub async fn get_poi(
    State(service): State<Arc<PoiService>>,
    Path(id): Path<String>,
    Query(query): Query<ExpandQuery>,
    headers: HeaderMap,
) -> Result<Json<PointOfInterestDto>> {
    let mut poi = service
        .get_by_id(&id, query.expand_details())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Point of Interest with id {} not found", id))
        })?;

    poi.href = Some(poi_href(&headers, &id));

    Ok(Json(poi))
}

/// Search for Points of Interest within a radius around a location
///
/// Radius is in meters; results come back in the order the geospatial index
/// yields them, nearest first.
#[utoipa::path(
    get,
    path = "/poi",
    params(SearchQuery),
    responses(
        (status = 200, description = "POIs found", body = Vec<PointOfInterestDto>),
        (status = 400, description = "Invalid search parameters", body = Vec<ConstraintViolation>)
    ),
    tag = "poi"
)]
pub async fn list_pois(
    State(service): State<Arc<PoiService>>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<PointOfInterestDto>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(collect_violations(&e)))?;

    let mut pois = service
        .list_near(
            query.lat,
            query.lon,
            query.radius as f64,
            query.expand_details(),
        )
        .await?;

    for poi in &mut pois {
        if let Some(id) = poi.id.as_deref() {
            poi.href = Some(poi_href(&headers, id));
        }
    }

    Ok(Json(pois))
}

/// Create a new Point of Interest
#[utoipa::path(
    post,
    path = "/poi",
    request_body = PointOfInterestDto,
    responses(
        (status = 201, description = "POI created, Location header points at it"),
        (status = 400, description = "Invalid POI data supplied", body = Vec<ConstraintViolation>)
    ),
    tag = "poi"
)]
pub async fn create_poi(
    State(service): State<Arc<PoiService>>,
    headers: HeaderMap,
    AppJson(poi): AppJson<PointOfInterestDto>,
) -> Result<Response> {
    let violations = poi.violations();
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let created = service.create(&poi).await?;

    let id = created
        .id
        .ok_or_else(|| AppError::Internal("store did not assign an id".to_string()))?;
    let location = poi_href(&headers, &id);
    tracing::info!("Location header for created POI: {}", location);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Update a Point of Interest by its id
///
/// Upsert semantics: an unknown id creates the POI under that id and
/// answers 201 with a Location header; a known id is replaced and answers
/// 204.
#[utoipa::path(
    put,
    path = "/poi/{id}",
    params(("id" = String, Path, description = "POI object id")),
    request_body = PointOfInterestDto,
    responses(
        (status = 201, description = "New POI created for the given id"),
        (status = 204, description = "POI updated"),
        (status = 400, description = "Invalid POI data supplied", body = Vec<ConstraintViolation>)
    ),
    tag = "poi"
)]
pub async fn update_poi(
    State(service): State<Arc<PoiService>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    AppJson(mut poi): AppJson<PointOfInterestDto>,
) -> Result<Response> {
    let violations = poi.violations();
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    // The path parameter is the authoritative identity for an upsert
    poi.id = Some(id.clone());

    let (_, outcome) = service.update(&id, &poi).await?;

    match outcome {
        UpsertOutcome::Created => {
            let location = poi_href(&headers, &id);
            Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
        }
        UpsertOutcome::Updated => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Delete a Point of Interest by its id
#[utoipa::path(
    delete,
    path = "/poi/{id}",
    params(("id" = String, Path, description = "POI object id")),
    responses(
        (status = 204, description = "POI deleted"),
        (status = 400, description = "Invalid id supplied", body = Vec<ConstraintViolation>),
        (status = 404, description = "POI not found")
    ),
    tag = "poi"
)]
pub async fn delete_poi(
    State(service): State<Arc<PoiService>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Absolute self link of a POI, rebuilt per request from the incoming
/// scheme and authority.
fn poi_href(headers: &HeaderMap, id: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}/poi/{}", scheme, host, id)
}
