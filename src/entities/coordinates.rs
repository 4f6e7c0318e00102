use serde::{Deserialize, Serialize};

use crate::error::{invalid_coordinates_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Directions endpoints take `x,y`, i.e. longitude first.
    pub fn to_lng_lat(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }

    pub fn from_lng_lat(value: &str) -> Result<Self, Error> {
        let (lng, lat) = value
            .split_once(',')
            .ok_or_else(|| invalid_coordinates_error())?;

        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| invalid_coordinates_error())?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid_coordinates_error())?;

        let coordinates = Self { lat, lng };
        if !coordinates.is_valid() {
            return Err(invalid_coordinates_error());
        }

        Ok(coordinates)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    pub fn new(point: Coordinates) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: Coordinates) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Smallest box containing every point, or `None` for an empty path.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::new(*points.next()?);
        for point in points {
            bounds.extend(*point);
        }

        Some(bounds)
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

#[test]
fn lng_lat_order() {
    let coordinates = Coordinates::new(35.1, 126.8);
    assert_eq!(coordinates.to_lng_lat(), "126.8,35.1");
    assert_eq!(Coordinates::from_lng_lat("126.8,35.1"), Ok(coordinates));
}

#[test]
fn rejects_malformed_lng_lat() {
    assert!(Coordinates::from_lng_lat("126.8").is_err());
    assert!(Coordinates::from_lng_lat("east,north").is_err());
    assert!(Coordinates::from_lng_lat("35.1,126.8").is_err());
}

#[test]
fn bounds_cover_every_point() {
    let path = vec![
        Coordinates::new(35.20, 126.90),
        Coordinates::new(35.10, 126.95),
        Coordinates::new(35.15, 126.80),
    ];

    let bounds = Bounds::from_points(&path).unwrap();
    assert_eq!(bounds.south_west, Coordinates::new(35.10, 126.80));
    assert_eq!(bounds.north_east, Coordinates::new(35.20, 126.95));
    assert!(path.iter().all(|point| bounds.contains(point)));

    assert_eq!(Bounds::from_points(&Vec::<Coordinates>::new()), None);
}
