use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DirectionsAPI,
    entities::{Coordinates, DirectionsResponse},
    error::Error,
    external::kakao_mobility,
};

#[async_trait]
impl DirectionsAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DirectionsResponse, Error> {
        kakao_mobility::find_directions(&self.client, &self.config, origin, destination).await
    }
}
