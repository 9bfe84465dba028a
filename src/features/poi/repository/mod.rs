pub mod poi_repository;

pub use poi_repository::{MongoPoiRepository, PoiRepository};
