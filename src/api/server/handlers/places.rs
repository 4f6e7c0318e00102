use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::{api::interface::DynAPI, entities::PlaceResult, error::Error};

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    query: String,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PlaceResult>>, Error> {
    let places = api.search_places(params.query).await?;

    Ok(places.into())
}
