use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::{invalid_coordinates_error, Error};

/// A keyword search hit. `x` and `y` are longitude and latitude as decimal
/// strings, the way the search service returns them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub place_url: String,
    pub x: String,
    pub y: String,
}

impl PlaceResult {
    pub fn coordinates(&self) -> Result<Coordinates, Error> {
        let lat: f64 = self
            .y
            .trim()
            .parse()
            .map_err(|_| invalid_coordinates_error())?;
        let lng: f64 = self
            .x
            .trim()
            .parse()
            .map_err(|_| invalid_coordinates_error())?;

        let coordinates = Coordinates::new(lat, lng);
        if !coordinates.is_valid() {
            return Err(invalid_coordinates_error());
        }

        Ok(coordinates)
    }
}

#[test]
fn coordinates_come_from_y_and_x() {
    let place: PlaceResult = serde_json::from_value(serde_json::json!({
        "id": "26338954",
        "place_name": "카카오프렌즈 광주점",
        "address_name": "광주 동구 충장로2가 14-2",
        "x": "126.9161", "y": "35.1480"
    }))
    .unwrap();

    assert_eq!(place.coordinates(), Ok(Coordinates::new(35.1480, 126.9161)));
    assert_eq!(place.phone, "");
}

#[test]
fn unparsable_coordinates_are_rejected() {
    let place = PlaceResult {
        place_name: "nowhere".into(),
        x: "".into(),
        y: "35.0".into(),
        ..Default::default()
    };

    assert!(place.coordinates().is_err());
}
