mod location_api;
mod point_api;
mod route_api;
mod search_api;
mod session;

pub use route_api::{RouteOutcome, RouteTicket};
pub use search_api::{SearchState, SearchStatus, SearchTicket};
pub use session::Session;

use crate::{
    entities::{Coordinates, Point, Points, Role, RouteOverlay},
    error::{map_not_initialized_error, Error},
    sdk::{ControlPosition, DynDirections, DynGeolocation, DynPlaceSearch, MapHandle, MapSdk},
};

pub const MAP_ELEMENT_ID: &str = "map";
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 35.1575,
    lng: 126.8476,
};
pub const DEFAULT_LEVEL: u8 = 3;

/// Collaborators the controller drives. Geolocation is optional because not
/// every host can provide it.
pub struct Capabilities {
    pub map: Box<dyn MapSdk>,
    pub search: DynPlaceSearch,
    pub directions: DynDirections,
    pub geolocation: Option<DynGeolocation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteState {
    Empty,
    /// Exactly one endpoint set.
    Pending,
    Ready,
    Routed,
}

pub struct Controller {
    sdk: Box<dyn MapSdk>,
    search: DynPlaceSearch,
    directions: DynDirections,
    geolocation: Option<DynGeolocation>,
    map: Option<MapHandle>,
    points: Points,
    overlay: Option<RouteOverlay>,
    search_state: SearchState,
    route_token: u64,
}

impl Controller {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            sdk: capabilities.map,
            search: capabilities.search,
            directions: capabilities.directions,
            geolocation: capabilities.geolocation,
            map: None,
            points: Points::default(),
            overlay: None,
            search_state: SearchState::default(),
            route_token: 0,
        }
    }

    /// Creates the map on the host canvas. A missing canvas leaves the
    /// controller uninitialized; operations that need the map will report it.
    #[tracing::instrument(name = "Controller::initialize", skip_all)]
    pub fn initialize(&mut self) {
        if self.map.is_some() {
            return;
        }

        let canvas = match self.sdk.find_canvas(MAP_ELEMENT_ID) {
            Some(canvas) => canvas,
            None => {
                tracing::warn!(element = MAP_ELEMENT_ID, "map canvas not found");
                return;
            }
        };

        let map = self.sdk.create_map(canvas, DEFAULT_CENTER, DEFAULT_LEVEL);
        self.sdk.add_zoom_control(map, ControlPosition::Right);
        self.map = Some(map);

        tracing::info!("map initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn state(&self) -> RouteState {
        match (self.points.count_set(), &self.overlay) {
            (0, _) => RouteState::Empty,
            (1, _) => RouteState::Pending,
            (_, None) => RouteState::Ready,
            (_, Some(_)) => RouteState::Routed,
        }
    }

    pub fn point(&self, role: Role) -> &Point {
        self.points.get(role)
    }

    pub fn overlay(&self) -> Option<&RouteOverlay> {
        self.overlay.as_ref()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search_state
    }

    pub fn can_request_route(&self) -> bool {
        self.map.is_some() && self.points.endpoints().is_some()
    }

    /// Clears both endpoints, the route and the search panel.
    #[tracing::instrument(name = "Controller::reset", skip_all)]
    pub fn reset(&mut self) {
        for role in Role::ALL {
            if let Some(previous) = self.points.get_mut(role).clear() {
                self.sdk.remove_marker(previous.marker);
            }
        }

        self.clear_overlay();
        self.supersede_route_requests();
        self.supersede_searches();
    }

    fn map(&self) -> Result<MapHandle, Error> {
        self.map.ok_or_else(|| map_not_initialized_error())
    }

    fn clear_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            self.sdk.remove_polyline(overlay.polyline);
        }
    }

    fn supersede_route_requests(&mut self) {
        self.route_token += 1;
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;
    use crate::error::upstream_error;
    use crate::sdk::HeadlessMap;

    #[test]
    fn initialize_creates_map_with_zoom_control() {
        let map = HeadlessMap::new();
        let controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        assert!(controller.is_initialized());
        let snapshot = map.snapshot();
        assert_eq!(snapshot.center, Some(DEFAULT_CENTER));
        assert_eq!(snapshot.level, DEFAULT_LEVEL);
        assert_eq!(snapshot.zoom_controls, vec![ControlPosition::Right]);
    }

    #[test]
    fn initialize_without_canvas_is_a_no_op() {
        let map = HeadlessMap::detached();
        let controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        assert!(!controller.is_initialized());
        assert_eq!(map.snapshot().map, None);
    }

    #[test]
    fn initialize_twice_keeps_the_first_map() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));
        let first = map.snapshot().map;

        controller.initialize();

        assert_eq!(map.snapshot().map, first);
        assert_eq!(map.snapshot().zoom_controls.len(), 1);
    }

    #[tokio::test]
    async fn reset_from_any_state_empties_everything() {
        let directions = FakeDirections::new(Ok(vec![
            Coordinates::new(35.10, 126.80),
            Coordinates::new(35.20, 126.90),
        ]));

        for steps in 0..4 {
            let map = HeadlessMap::new();
            let search = FakeSearch::new(vec![Ok(vec![place("카페 A", 35.15, 126.85)])]);
            let mut controller = controller_with(&map, search, directions.clone(), None);

            controller.search("카페").await.unwrap();
            if steps >= 1 {
                controller
                    .set_point(Coordinates::new(35.10, 126.80), Role::Start)
                    .unwrap();
            }
            if steps >= 2 {
                controller
                    .set_point(Coordinates::new(35.20, 126.90), Role::End)
                    .unwrap();
            }
            if steps >= 3 {
                controller.request_route().await.unwrap();
                assert_eq!(controller.state(), RouteState::Routed);
            }

            controller.reset();

            assert_eq!(controller.state(), RouteState::Empty);
            for role in Role::ALL {
                assert_eq!(controller.point(role).coordinates(), None);
                assert_eq!(controller.point(role).marker(), None);
            }
            assert!(controller.overlay().is_none());
            assert_eq!(controller.search_state().keyword, "");
            assert!(controller.search_state().results.is_empty());

            let snapshot = map.snapshot();
            assert!(snapshot.markers.is_empty());
            assert!(snapshot.polylines.is_empty());
        }
    }
}
