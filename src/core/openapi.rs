use utoipa::{Modify, OpenApi};

use crate::core::error::ConstraintViolation;
use crate::features::poi::{dtos as poi_dtos, handlers as poi_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        poi_handlers::get_poi,
        poi_handlers::list_pois,
        poi_handlers::create_poi,
        poi_handlers::update_poi,
        poi_handlers::delete_poi,
    ),
    components(
        schemas(
            ConstraintViolation,
            poi_dtos::PointOfInterestDto,
            poi_dtos::GeoJsonPointDto,
        )
    ),
    tags(
        (name = "poi", description = "Operations for managing points of interest")
    ),
    info(
        title = "Geo POI API",
        version = "0.1.0",
        description = "API for managing Points of Interest",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
