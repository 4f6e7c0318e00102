mod coordinates;
mod place;
mod point;
mod route;

pub use coordinates::{Bounds, Coordinates};
pub use place::PlaceResult;
pub use point::{Placement, Point, Points, Role};
pub use route::{
    decode_vertexes, DirectionsResponse, DirectionsRoute, PolylineStyle, Road, RouteKind,
    RouteOverlay, Section, StrokeStyle,
};
