pub mod poi_dto;

pub use poi_dto::{ExpandQuery, GeoJsonPointDto, PointOfInterestDto, SearchQuery};
