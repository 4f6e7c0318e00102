pub mod interface;
pub mod server;

pub use interface::{DirectionsAPI, DynAPI, PlacesAPI, API};
pub use server::{router, serve};
