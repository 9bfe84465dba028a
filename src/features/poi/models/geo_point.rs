use serde::{Deserialize, Serialize};

const LONGITUDE_INDEX: usize = 0;
const LATITUDE_INDEX: usize = 1;

/// Geographic point in the shape MongoDB persists for 2dsphere indexing:
/// a GeoJSON object whose coordinates are ordered `[longitude, latitude]`.
///
/// Callers never touch the array positions directly; latitude and longitude
/// are only exposed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    point_type: String,
    coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[LATITUDE_INDEX]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[LONGITUDE_INDEX]
    }

    /// Replace both coordinates in one step. There is deliberately no way to
    /// set latitude or longitude individually, so a point can never hold a
    /// fresh latitude next to a stale longitude.
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.coordinates = [longitude, latitude];
    }

    /// Build a point from a wire-order `[longitude, latitude]` array.
    /// Anything other than exactly two elements yields no value.
    pub fn from_wire(coordinates: &[f64]) -> Option<Self> {
        match *coordinates {
            [longitude, latitude] => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }

    /// The wire-order `[longitude, latitude]` pair.
    pub fn to_wire(&self) -> [f64; 2] {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_stored_in_geojson_order() {
        let point = GeoPoint::new(51.0308, 13.7301);

        assert_eq!(point.to_wire(), [13.7301, 51.0308]);
        assert_eq!(point.latitude(), 51.0308);
        assert_eq!(point.longitude(), 13.7301);
    }

    #[test]
    fn wire_round_trip_preserves_latitude_and_longitude() {
        for (lat, lon) in [
            (51.0308, 13.7301),
            (-90.0, -180.0),
            (90.0, 180.0),
            (0.0, 0.0),
            (-90.0, 180.0),
        ] {
            let point = GeoPoint::from_wire(&GeoPoint::new(lat, lon).to_wire())
                .expect("two-element array must convert");
            assert_eq!((point.latitude(), point.longitude()), (lat, lon));
        }
    }

    #[test]
    fn malformed_wire_arrays_yield_no_value() {
        assert!(GeoPoint::from_wire(&[]).is_none());
        assert!(GeoPoint::from_wire(&[13.7301]).is_none());
        assert!(GeoPoint::from_wire(&[13.7301, 51.0308, 0.0]).is_none());
    }

    #[test]
    fn set_coordinates_replaces_both_values() {
        let mut point = GeoPoint::new(51.0308, 13.7301);
        point.set_coordinates(52.516275, 13.377704);

        assert_eq!(point.latitude(), 52.516275);
        assert_eq!(point.longitude(), 13.377704);
    }

    #[test]
    fn serializes_as_geojson_point() {
        let point = GeoPoint::new(51.0308, 13.7301);
        let json = serde_json::to_value(&point).expect("serialization must succeed");

        assert_eq!(
            json,
            serde_json::json!({ "type": "Point", "coordinates": [13.7301, 51.0308] })
        );
    }
}
