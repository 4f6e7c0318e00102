use reqwest::header::AUTHORIZATION;

use crate::{
    config::Config,
    entities::{Coordinates, DirectionsResponse},
    error::Error,
};

use super::check_status;

#[tracing::instrument(skip(client, config))]
pub async fn find_directions(
    client: &reqwest::Client,
    config: &Config,
    origin: Coordinates,
    destination: Coordinates,
) -> Result<DirectionsResponse, Error> {
    let url = format!("{}/v1/directions", config.mobility_api_base);

    let res = client
        .get(url)
        .header(AUTHORIZATION, config.authorization())
        .query(&[("origin", origin.to_lng_lat())])
        .query(&[("destination", destination.to_lng_lat())])
        .send()
        .await?;

    check_status(&res)?;

    let data: DirectionsResponse = res.json().await?;

    Ok(data)
}
