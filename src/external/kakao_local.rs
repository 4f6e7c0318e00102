use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::{config::Config, entities::PlaceResult, error::Error};

use super::check_status;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub pageable_count: u32,
    #[serde(default)]
    pub is_end: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    documents: Vec<PlaceResult>,
    #[serde(default)]
    meta: Meta,
}

#[tracing::instrument(skip(client, config))]
pub async fn search_keyword(
    client: &reqwest::Client,
    config: &Config,
    query: &str,
) -> Result<Vec<PlaceResult>, Error> {
    let url = format!("{}/v2/local/search/keyword.json", config.local_api_base);

    let res = client
        .get(url)
        .header(AUTHORIZATION, config.authorization())
        .query(&[("query", query)])
        .send()
        .await?;

    check_status(&res)?;

    let data: Response = res.json().await?;
    tracing::debug!(total = data.meta.total_count, "keyword search done");

    Ok(data.documents)
}
