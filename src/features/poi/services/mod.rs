pub mod poi_service;

pub use poi_service::{PoiService, UpsertOutcome};
