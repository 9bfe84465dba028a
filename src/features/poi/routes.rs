use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::poi::handlers;
use crate::features::poi::services::PoiService;

/// Create routes for the poi feature
pub fn routes(service: Arc<PoiService>) -> Router {
    Router::new()
        .route("/poi", get(handlers::list_pois).post(handlers::create_poi))
        .route(
            "/poi/{id}",
            get(handlers::get_poi)
                .put(handlers::update_poi)
                .delete(handlers::delete_poi),
        )
        .with_state(service)
}
