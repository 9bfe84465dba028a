use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::error::ConstraintViolation;
use crate::features::poi::models::GeoPoint;

/// Literal value of the `expand` query parameter that switches details on.
/// Matched case-insensitively; anything else means "do not expand".
pub const EXPAND_DETAILS: &str = "details";

/// GeoJSON point as it travels on the wire: coordinates in
/// `[longitude, latitude]` order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoJsonPointDto {
    /// GeoJSON type tag, always "Point"
    #[serde(rename = "type", default = "default_point_type")]
    pub point_type: String,

    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

fn default_point_type() -> String {
    "Point".to_string()
}

impl GeoJsonPointDto {
    pub fn from_geo_point(point: &GeoPoint) -> Self {
        Self {
            point_type: "Point".to_string(),
            coordinates: point.to_wire().to_vec(),
        }
    }

    /// Converts to the persisted point shape. A coordinate array that is not
    /// exactly `[longitude, latitude]` yields no value.
    pub fn to_geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_wire(&self.coordinates)
    }
}

/// The externally visible representation of a point of interest.
///
/// The id is only carried internally for identity resolution; clients see the
/// `href` self link instead. Absent optional fields are left out of the JSON
/// entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PointOfInterestDto {
    #[serde(skip)]
    pub id: Option<String>,

    /// Self link, computed per request - never persisted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub href: Option<String>,

    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category must not be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,

    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,

    #[validate(
        required(message = "location is required"),
        custom(function = validate_location)
    )]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<GeoJsonPointDto>,
}

impl PointOfInterestDto {
    /// Validate the payload for create/update, returning every violation
    /// instead of stopping at the first.
    pub fn violations(&self) -> Vec<ConstraintViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        }
    }
}

fn validate_location(location: &GeoJsonPointDto) -> Result<(), ValidationError> {
    let mut error = ValidationError::new("coordinates");
    error.add_param(Cow::from("value"), &location.coordinates);

    let Some(point) = location.to_geo_point() else {
        error.message = Some(Cow::from(
            "location coordinates must be a [longitude, latitude] pair",
        ));
        return Err(error);
    };

    if !(-90.0..=90.0).contains(&point.latitude())
        || !(-180.0..=180.0).contains(&point.longitude())
    {
        error.message = Some(Cow::from(
            "location coordinates out of range: longitude must be within [-180, 180] and latitude within [-90, 90]",
        ));
        return Err(error);
    }

    Ok(())
}

/// Turn validator output into the wire shape of a Bad Request body.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<ConstraintViolation> {
    let mut violations: Vec<ConstraintViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                let value = error
                    .params
                    .get("value")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);

                ConstraintViolation::new(message, value)
            })
        })
        .collect();

    // HashMap iteration order is arbitrary; keep responses deterministic
    violations.sort_by(|a, b| a.message.cmp(&b.message));
    violations
}

/// Query parameters of the proximity search.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct SearchQuery {
    /// Latitude of the search center, in [-90, 90]
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: f64,

    /// Longitude of the search center, in [-180, 180]
    #[validate(range(min = -180.0, max = 180.0, message = "lon must be between -180 and 180"))]
    pub lon: f64,

    /// Search radius in meters
    #[validate(range(min = 1, max = 100_000, message = "radius must be between 1 and 100000"))]
    #[param(minimum = 1, maximum = 100000)]
    pub radius: i64,

    /// Pass "details" (case-insensitive) to include POI details
    pub expand: Option<String>,
}

impl SearchQuery {
    pub fn expand_details(&self) -> bool {
        expand_requested(self.expand.as_deref())
    }
}

/// Query parameters of the single-POI read.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExpandQuery {
    /// Pass "details" (case-insensitive) to include POI details
    pub expand: Option<String>,
}

impl ExpandQuery {
    pub fn expand_details(&self) -> bool {
        expand_requested(self.expand.as_deref())
    }
}

fn expand_requested(expand: Option<&str>) -> bool {
    expand.is_some_and(|value| value.eq_ignore_ascii_case(EXPAND_DETAILS))
}
