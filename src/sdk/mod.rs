mod headless;
mod proxy_client;

pub use headless::{HeadlessMap, MapSnapshot, MarkerState, PolylineState};
pub use proxy_client::ProxyClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Bounds, Coordinates, PlaceResult, PolylineStyle, Role};
use crate::error::Error;

macro_rules! handle {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }
    };
}

handle!(CanvasHandle);
handle!(MapHandle);
handle!(MarkerHandle);
handle!(PolylineHandle);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPosition {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub offset: (i32, i32),
}

impl MarkerImage {
    pub fn for_role(role: Role) -> Self {
        let src = match role {
            Role::Start => "//t1.daumcdn.net/localimg/localimages/07/mapapidoc/red_b.png",
            Role::End => "//t1.daumcdn.net/localimg/localimages/07/mapapidoc/blue_b.png",
        };

        Self {
            src: src.into(),
            width: 50,
            height: 45,
            offset: (15, 43),
        }
    }
}

/// Drawing surface supplied by the host. Handles returned here are owned by
/// the caller until passed back to the matching `remove_*` call.
pub trait MapSdk: Send {
    fn find_canvas(&self, element_id: &str) -> Option<CanvasHandle>;
    fn create_map(&mut self, canvas: CanvasHandle, center: Coordinates, level: u8) -> MapHandle;
    fn add_zoom_control(&mut self, map: MapHandle, position: ControlPosition);
    fn create_marker(
        &mut self,
        map: MapHandle,
        position: Coordinates,
        image: &MarkerImage,
    ) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);
    fn create_polyline(
        &mut self,
        map: MapHandle,
        path: &[Coordinates],
        style: &PolylineStyle,
    ) -> PolylineHandle;
    fn remove_polyline(&mut self, polyline: PolylineHandle);
    fn pan_to(&mut self, map: MapHandle, position: Coordinates);
    fn set_bounds(&mut self, map: MapHandle, bounds: Bounds);
}

#[async_trait]
pub trait PlaceSearch {
    /// An empty list means the search ran and matched nothing.
    async fn keyword_search(&self, query: &str) -> Result<Vec<PlaceResult>, Error>;
}

#[async_trait]
pub trait DirectionsService {
    /// Road path from `origin` to `destination` in (lat, lng) order.
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<Coordinates>, Error>;
}

#[async_trait]
pub trait Geolocation {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub type DynPlaceSearch = Arc<dyn PlaceSearch + Send + Sync>;
pub type DynDirections = Arc<dyn DirectionsService + Send + Sync>;
pub type DynGeolocation = Arc<dyn Geolocation + Send + Sync>;

#[test]
fn start_and_end_markers_differ() {
    let start = MarkerImage::for_role(Role::Start);
    let end = MarkerImage::for_role(Role::End);

    assert_ne!(start.src, end.src);
    assert_eq!((start.width, start.height), (50, 45));
}
