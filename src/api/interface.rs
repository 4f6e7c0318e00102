use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Coordinates, DirectionsResponse, PlaceResult};
use crate::error::Error;

#[async_trait]
pub trait DirectionsAPI {
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DirectionsResponse, Error>;
}

#[async_trait]
pub trait PlacesAPI {
    async fn search_places(&self, query: String) -> Result<Vec<PlaceResult>, Error>;
}

pub trait API: DirectionsAPI + PlacesAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
