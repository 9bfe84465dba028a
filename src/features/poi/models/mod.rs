pub mod geo_point;
pub mod poi;

pub use geo_point::GeoPoint;
pub use poi::PointOfInterestRecord;
