pub mod poi_mapper;

pub use poi_mapper::{record_to_resource, resolve_object_id, resource_to_record};
