use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::entities::{Bounds, Coordinates, PolylineStyle};

use super::{
    CanvasHandle, ControlPosition, MapHandle, MapSdk, MarkerHandle, MarkerImage, PolylineHandle,
};

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerState {
    pub position: Coordinates,
    pub image: MarkerImage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolylineState {
    pub path: Vec<Coordinates>,
    pub style: PolylineStyle,
}

/// Everything currently on the map.
#[derive(Clone, Debug, Default)]
pub struct MapSnapshot {
    pub map: Option<MapHandle>,
    pub center: Option<Coordinates>,
    pub level: u8,
    pub zoom_controls: Vec<ControlPosition>,
    pub markers: HashMap<MarkerHandle, MarkerState>,
    pub polylines: HashMap<PolylineHandle, PolylineState>,
    pub bounds: Option<Bounds>,
    pub polylines_drawn: usize,
}

impl MapSnapshot {
    /// The only polyline on the map, if exactly one is drawn.
    pub fn single_polyline(&self) -> Option<&PolylineState> {
        match self.polylines.len() {
            1 => self.polylines.values().next(),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct MapState {
    canvases: Vec<(String, CanvasHandle)>,
    snapshot: MapSnapshot,
}

/// In-memory map surface. Clones share the same state, so one clone can be
/// handed to the controller and another kept to inspect what was drawn.
#[derive(Clone, Debug, Default)]
pub struct HeadlessMap {
    state: Arc<Mutex<MapState>>,
}

impl HeadlessMap {
    /// A surface with a `map` canvas available.
    pub fn new() -> Self {
        Self::default().with_canvas("map")
    }

    /// A surface with no canvas at all.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_canvas(self, element_id: &str) -> Self {
        self.lock()
            .canvases
            .push((element_id.to_string(), CanvasHandle::new()));
        self
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MapState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MapSdk for HeadlessMap {
    fn find_canvas(&self, element_id: &str) -> Option<CanvasHandle> {
        self.lock()
            .canvases
            .iter()
            .find(|(id, _)| id == element_id)
            .map(|(_, canvas)| *canvas)
    }

    #[tracing::instrument(skip(self))]
    fn create_map(&mut self, _canvas: CanvasHandle, center: Coordinates, level: u8) -> MapHandle {
        let map = MapHandle::new();

        let mut state = self.lock();
        state.snapshot.map = Some(map);
        state.snapshot.center = Some(center);
        state.snapshot.level = level;

        map
    }

    fn add_zoom_control(&mut self, _map: MapHandle, position: ControlPosition) {
        self.lock().snapshot.zoom_controls.push(position);
    }

    fn create_marker(
        &mut self,
        _map: MapHandle,
        position: Coordinates,
        image: &MarkerImage,
    ) -> MarkerHandle {
        let marker = MarkerHandle::new();
        self.lock().snapshot.markers.insert(
            marker,
            MarkerState {
                position,
                image: image.clone(),
            },
        );

        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.lock().snapshot.markers.remove(&marker).is_none() {
            tracing::warn!(?marker, "removing unknown marker");
        }
    }

    fn create_polyline(
        &mut self,
        _map: MapHandle,
        path: &[Coordinates],
        style: &PolylineStyle,
    ) -> PolylineHandle {
        let polyline = PolylineHandle::new();

        let mut state = self.lock();
        state.snapshot.polylines.insert(
            polyline,
            PolylineState {
                path: path.to_vec(),
                style: style.clone(),
            },
        );
        state.snapshot.polylines_drawn += 1;

        polyline
    }

    fn remove_polyline(&mut self, polyline: PolylineHandle) {
        if self.lock().snapshot.polylines.remove(&polyline).is_none() {
            tracing::warn!(?polyline, "removing unknown polyline");
        }
    }

    fn pan_to(&mut self, _map: MapHandle, position: Coordinates) {
        self.lock().snapshot.center = Some(position);
    }

    fn set_bounds(&mut self, _map: MapHandle, bounds: Bounds) {
        let mut state = self.lock();
        state.snapshot.center = Some(Coordinates::new(
            (bounds.south_west.lat + bounds.north_east.lat) / 2.0,
            (bounds.south_west.lng + bounds.north_east.lng) / 2.0,
        ));
        state.snapshot.bounds = Some(bounds);
    }
}

#[test]
fn clones_share_drawn_objects() {
    use crate::entities::{Role, RouteKind};

    let map = HeadlessMap::new();
    let mut sdk = map.clone();

    let canvas = sdk.find_canvas("map").unwrap();
    let handle = sdk.create_map(canvas, Coordinates::new(35.0, 126.0), 3);
    let marker = sdk.create_marker(
        handle,
        Coordinates::new(35.1, 126.1),
        &MarkerImage::for_role(Role::Start),
    );
    sdk.create_polyline(
        handle,
        &[Coordinates::new(35.1, 126.1), Coordinates::new(35.2, 126.2)],
        &RouteKind::Fallback.style(),
    );

    let snapshot = map.snapshot();
    assert_eq!(snapshot.map, Some(handle));
    assert_eq!(snapshot.markers.len(), 1);
    assert!(snapshot.single_polyline().is_some());

    sdk.remove_marker(marker);
    assert!(map.snapshot().markers.is_empty());
}

#[test]
fn detached_surface_has_no_canvas() {
    assert_eq!(HeadlessMap::detached().find_canvas("map"), None);
    assert_eq!(HeadlessMap::detached().with_canvas("other").find_canvas("map"), None);
}
