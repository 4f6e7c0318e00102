use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::{decode_error, upstream_error, Error};
use crate::sdk::PolylineHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Road geometry returned by the directions service.
    Service,
    /// Straight line between the two endpoints.
    Fallback,
}

impl RouteKind {
    pub fn style(&self) -> PolylineStyle {
        match self {
            Self::Service => PolylineStyle {
                stroke_weight: 5,
                stroke_color: "#0000FF".into(),
                stroke_opacity: 0.7,
                stroke_style: StrokeStyle::Solid,
            },
            Self::Fallback => PolylineStyle {
                stroke_weight: 5,
                stroke_color: "#FF0000".into(),
                stroke_opacity: 0.7,
                stroke_style: StrokeStyle::Solid,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStyle {
    Solid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    pub stroke_weight: u32,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_style: StrokeStyle,
}

/// The single route line currently drawn on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
    pub polyline: PolylineHandle,
    pub kind: RouteKind,
    pub path: Vec<Coordinates>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub trans_id: Option<String>,
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub result_code: i32,
    #[serde(default)]
    pub result_msg: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub distance: u64,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub roads: Vec<Road>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Road {
    #[serde(default)]
    pub name: String,
    /// Flat `[x1, y1, x2, y2, ...]`, longitude first.
    pub vertexes: Vec<f64>,
}

impl DirectionsResponse {
    /// Path of the first section of the first route, in (lat, lng) order.
    pub fn path(&self) -> Result<Vec<Coordinates>, Error> {
        let route = self
            .routes
            .first()
            .ok_or_else(|| decode_error("no routes"))?;

        if route.result_code != 0 {
            tracing::warn!(
                code = route.result_code,
                message = %route.result_msg,
                "directions service found no route"
            );
            return Err(upstream_error());
        }

        let section = route
            .sections
            .first()
            .ok_or_else(|| decode_error("no sections"))?;

        let mut path = Vec::new();
        for road in &section.roads {
            path.extend(decode_vertexes(&road.vertexes)?);
        }

        if path.is_empty() {
            return Err(decode_error("empty path"));
        }

        Ok(path)
    }
}

pub fn decode_vertexes(vertexes: &[f64]) -> Result<Vec<Coordinates>, Error> {
    if vertexes.len() % 2 != 0 {
        return Err(decode_error("odd vertex count"));
    }

    Ok(vertexes
        .chunks_exact(2)
        .map(|pair| Coordinates::new(pair[1], pair[0]))
        .collect())
}

#[test]
fn vertex_pairs_become_lat_lng() {
    let path = decode_vertexes(&[126.80, 35.10, 126.85, 35.15, 126.90, 35.20]).unwrap();

    assert_eq!(
        path,
        vec![
            Coordinates::new(35.10, 126.80),
            Coordinates::new(35.15, 126.85),
            Coordinates::new(35.20, 126.90),
        ]
    );
}

#[test]
fn odd_vertex_count_is_malformed() {
    assert!(decode_vertexes(&[126.80, 35.10, 126.85]).is_err());
}

#[test]
fn roads_are_concatenated_in_order() {
    let response: DirectionsResponse = serde_json::from_value(serde_json::json!({
        "trans_id": "0186a4e1",
        "routes": [{
            "result_code": 0,
            "result_msg": "길찾기 성공",
            "sections": [{
                "distance": 1520,
                "duration": 300,
                "roads": [
                    { "name": "", "vertexes": [126.80, 35.10, 126.82, 35.12] },
                    { "name": "무진대로", "vertexes": [126.85, 35.15] },
                    { "name": "", "vertexes": [126.90, 35.20] }
                ]
            }]
        }]
    }))
    .unwrap();

    let path = response.path().unwrap();
    assert_eq!(path.len(), 4);
    assert_eq!(path[0], Coordinates::new(35.10, 126.80));
    assert_eq!(path[3], Coordinates::new(35.20, 126.90));
}

#[test]
fn non_zero_result_code_is_a_failure() {
    let response: DirectionsResponse = serde_json::from_value(serde_json::json!({
        "routes": [{ "result_code": 104, "result_msg": "출발지와 도착지가 5 m 이내로 설정된 경우 경로를 탐색할 수 없음" }]
    }))
    .unwrap();

    assert_eq!(response.path(), Err(upstream_error()));
}

#[test]
fn missing_sections_are_malformed() {
    let response = DirectionsResponse {
        trans_id: None,
        routes: vec![DirectionsRoute::default()],
    };
    assert_eq!(response.path().unwrap_err().code, 6);

    assert!(DirectionsResponse::default().path().is_err());
}

#[test]
fn fallback_is_styled_apart_from_service() {
    assert_ne!(RouteKind::Service.style(), RouteKind::Fallback.style());
}
