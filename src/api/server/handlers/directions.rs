use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::{
    api::interface::DynAPI,
    entities::{Coordinates, DirectionsResponse},
    error::Error,
};

/// Both values are `<lng>,<lat>`.
#[derive(Serialize, Deserialize)]
pub struct FindParams {
    origin: String,
    destination: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<Json<DirectionsResponse>, Error> {
    let origin = Coordinates::from_lng_lat(&params.origin)?;
    let destination = Coordinates::from_lng_lat(&params.destination)?;

    let directions = api.find_directions(origin, destination).await?;

    Ok(directions.into())
}
