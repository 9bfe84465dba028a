use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::features::poi::models::GeoPoint;

/// Persisted form of a point of interest.
///
/// The id is assigned by the store on first save and never regenerated;
/// updates replace every other field in place. A record may exist without a
/// location, but only located records are reachable through proximity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfInterestRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub category: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<GeoPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_left_out_of_the_document() {
        let record = PointOfInterestRecord {
            id: None,
            category: "gasstation".to_string(),
            name: "Shell".to_string(),
            details: None,
            location: None,
        };

        let json = serde_json::to_value(&record).expect("serialization must succeed");
        assert_eq!(
            json,
            serde_json::json!({ "category": "gasstation", "name": "Shell" })
        );
    }

    #[test]
    fn deserializes_stored_document() {
        let id = ObjectId::new();
        let json = serde_json::json!({
            "_id": id,
            "category": "restaurant",
            "name": "Trattoria",
            "details": "open late",
            "location": { "type": "Point", "coordinates": [13.377704, 52.516275] },
        });

        let record: PointOfInterestRecord =
            serde_json::from_value(json).expect("deserialization must succeed");

        assert_eq!(record.id, Some(id));
        assert_eq!(record.details.as_deref(), Some("open late"));
        let location = record.location.expect("location present");
        assert_eq!(location.latitude(), 52.516275);
        assert_eq!(location.longitude(), 13.377704);
    }
}
