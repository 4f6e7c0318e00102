use super::Controller;

use crate::{
    entities::{Coordinates, PlaceResult, Role},
    error::{invalid_coordinates_error, Error},
    sdk::MarkerImage,
};

impl Controller {
    /// Moves an endpoint. Any drawn or pending route is stale afterwards.
    #[tracing::instrument(skip(self))]
    pub fn set_point(&mut self, coordinates: Coordinates, role: Role) -> Result<(), Error> {
        let map = self.map()?;
        if !coordinates.is_valid() {
            return Err(invalid_coordinates_error());
        }

        let marker = self
            .sdk
            .create_marker(map, coordinates, &MarkerImage::for_role(role));

        if let Some(previous) = self.points.get_mut(role).place(coordinates, marker) {
            self.sdk.remove_marker(previous.marker);
        }

        self.clear_overlay();
        self.supersede_route_requests();

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn pan_to(&mut self, coordinates: Coordinates) -> Result<(), Error> {
        let map = self.map()?;
        self.sdk.pan_to(map, coordinates);

        Ok(())
    }

    #[tracing::instrument(skip(self, place), fields(place = %place.place_name))]
    pub fn select_result(&mut self, place: &PlaceResult, role: Role) -> Result<(), Error> {
        let coordinates = place.coordinates()?;

        self.set_point(coordinates, role)?;
        self.pan_to(coordinates)
    }

    /// Shows a result on the map without touching the endpoints.
    pub fn focus_result(&mut self, place: &PlaceResult) -> Result<(), Error> {
        let coordinates = place.coordinates()?;
        self.pan_to(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fakes::*;
    use super::super::RouteState;
    use super::*;
    use crate::entities::RouteKind;
    use crate::error::{map_not_initialized_error, upstream_error};
    use crate::sdk::HeadlessMap;

    const START: Coordinates = Coordinates {
        lat: 35.10,
        lng: 126.80,
    };
    const END: Coordinates = Coordinates {
        lat: 35.20,
        lng: 126.90,
    };

    #[test]
    fn set_point_places_a_role_styled_marker() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        controller.set_point(START, Role::Start).unwrap();
        controller.set_point(END, Role::End).unwrap();

        let snapshot = map.snapshot();
        assert_eq!(snapshot.markers.len(), 2);

        let start_marker = controller.point(Role::Start).marker().unwrap();
        let end_marker = controller.point(Role::End).marker().unwrap();
        assert_eq!(snapshot.markers[&start_marker].position, START);
        assert_eq!(
            snapshot.markers[&start_marker].image,
            MarkerImage::for_role(Role::Start)
        );
        assert_eq!(
            snapshot.markers[&end_marker].image,
            MarkerImage::for_role(Role::End)
        );
        assert_eq!(controller.state(), RouteState::Ready);
    }

    #[test]
    fn moving_a_point_replaces_its_marker() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        controller.set_point(START, Role::Start).unwrap();
        let first = controller.point(Role::Start).marker().unwrap();
        controller.set_point(END, Role::Start).unwrap();

        let snapshot = map.snapshot();
        assert_eq!(snapshot.markers.len(), 1);
        assert!(!snapshot.markers.contains_key(&first));
        assert_eq!(controller.point(Role::Start).coordinates(), Some(END));
        assert_eq!(controller.state(), RouteState::Pending);
    }

    #[test]
    fn setting_a_point_clears_the_route_from_every_state() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        controller.set_point(START, Role::Start).unwrap();
        controller.set_point(END, Role::End).unwrap();
        controller.draw_straight_route().unwrap();
        assert_eq!(controller.state(), RouteState::Routed);
        assert_eq!(controller.overlay().unwrap().kind, RouteKind::Fallback);

        controller.set_point(Coordinates::new(35.3, 126.7), Role::End).unwrap();

        assert!(controller.overlay().is_none());
        assert!(map.snapshot().polylines.is_empty());
        assert_eq!(controller.state(), RouteState::Ready);

        // Ready and Pending have no overlay to begin with and keep none.
        controller.set_point(START, Role::Start).unwrap();
        assert!(controller.overlay().is_none());
    }

    #[test]
    fn select_result_sets_point_and_pans() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));
        let cafe = place("카페 A", 35.15, 126.85);

        controller.select_result(&cafe, Role::End).unwrap();

        let expected = Coordinates::new(35.15, 126.85);
        assert_eq!(controller.point(Role::End).coordinates(), Some(expected));
        assert_eq!(map.snapshot().center, Some(expected));
    }

    #[test]
    fn focus_result_only_pans() {
        let map = HeadlessMap::new();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        controller
            .focus_result(&place("카페 B", 35.16, 126.86))
            .unwrap();

        assert_eq!(map.snapshot().center, Some(Coordinates::new(35.16, 126.86)));
        assert_eq!(controller.state(), RouteState::Empty);
    }

    #[test]
    fn points_need_an_initialized_map() {
        let map = HeadlessMap::detached();
        let mut controller = controller(&map, FakeDirections::new(Err(upstream_error())));

        assert_eq!(
            controller.set_point(START, Role::Start),
            Err(map_not_initialized_error())
        );
        assert!(!controller.point(Role::Start).is_set());
    }
}
